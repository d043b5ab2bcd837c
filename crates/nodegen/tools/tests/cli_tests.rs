// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.


//! Command tests running against batches written to temporary directories

use nodegen_tools::cli::{Preset, ReportFormat};
use nodegen_tools::{CheckArgs, CliError, GenerateArgs, InspectArgs, run_check, run_generate, run_inspect};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use test_case::test_case;

const ARITHMETIC: &str = include_str!("../../compiler/tests/fixtures/arithmetic.json");
const LOGICAL: &str = include_str!("../../compiler/tests/fixtures/logical.json");
const MATH: &str = include_str!("../../compiler/tests/fixtures/math.json");

fn write_batch(dir: &TempDir, source: &str) -> PathBuf {
    let path = dir.path().join("batch.json");
    fs::write(&path, source).unwrap();
    path
}

fn generate_args(input: PathBuf, output: &Path, force: bool) -> GenerateArgs {
    GenerateArgs {
        input,
        output: output.to_path_buf(),
        config: None,
        preset: Preset::Default,
        force,
        format: ReportFormat::Text,
        verbose: false,
    }
}

fn inspect_args(input: PathBuf, node: &str, simulate: &[&str]) -> InspectArgs {
    InspectArgs {
        input,
        node: node.to_string(),
        config: None,
        preset: Preset::Default,
        simulate: simulate.iter().map(|s| s.to_string()).collect(),
        failing_guards: vec![],
        rewriting: vec![],
        verbose: false,
    }
}

#[test]
fn test_generate_writes_sources() {
    let dir = tempdir().unwrap();
    let input = write_batch(&dir, ARITHMETIC);
    let output = dir.path().join("generated");

    let summary = run_generate(&generate_args(input, &output, false)).unwrap();
    assert!(summary.is_success());
    assert_eq!(summary.written, vec![output.join("add_node.rs"), output.join("mod.rs")]);
    let add = fs::read_to_string(output.join("add_node.rs")).unwrap();
    assert!(add.contains("pub struct AddNodeGen {"));
}

#[test]
fn test_generate_twice_replaces_generated_files() {
    let dir = tempdir().unwrap();
    let input = write_batch(&dir, ARITHMETIC);
    let output = dir.path().join("generated");

    run_generate(&generate_args(input.clone(), &output, false)).unwrap();
    assert!(run_generate(&generate_args(input, &output, false)).is_ok());
}

#[test_case(false ; "refused without force")]
#[test_case(true ; "replaced with force")]
fn test_generate_hand_written_file(force: bool) {
    let dir = tempdir().unwrap();
    let input = write_batch(&dir, ARITHMETIC);
    let output = dir.path().join("generated");
    fs::create_dir_all(&output).unwrap();
    fs::write(output.join("mod.rs"), "pub mod handwritten;\n").unwrap();

    let result = run_generate(&generate_args(input, &output, force));
    if force {
        assert!(result.is_ok());
        assert!(fs::read_to_string(output.join("mod.rs")).unwrap().contains("pub mod add_node;"));
    } else {
        assert!(matches!(result, Err(CliError::Overwrite(_))));
        assert!(!output.join("add_node.rs").exists());
    }
}

#[test_case(ARITHMETIC ; "arithmetic")]
#[test_case(LOGICAL ; "logical")]
#[test_case(MATH ; "split math")]
fn test_check_passes(source: &str) {
    let dir = tempdir().unwrap();
    let args = CheckArgs {
        input: write_batch(&dir, source),
        config: None,
        preset: Preset::Default,
        deny_warnings: false,
        format: ReportFormat::Json,
        verbose: false,
    };
    let (report, passed) = run_check(&args).unwrap();
    assert!(passed, "{}", report);
}

#[test]
fn test_check_missing_file() {
    let dir = tempdir().unwrap();
    let args = CheckArgs {
        input: dir.path().join("missing.json"),
        config: None,
        preset: Preset::Default,
        deny_warnings: false,
        format: ReportFormat::Text,
        verbose: false,
    };
    assert!(matches!(run_check(&args), Err(CliError::Read { .. })));
}

#[test]
fn test_inspect_lists_states() {
    let dir = tempdir().unwrap();
    let output = run_inspect(&inspect_args(write_batch(&dir, ARITHMETIC), "AddNode", &[])).unwrap();
    assert!(output.starts_with("AddNode (AddNode)"));
    assert!(output.contains("Uninitialized"));
    assert!(output.contains("rewrite on ArithmeticException"));
    assert!(output.contains("generic"));
}

#[test]
fn test_inspect_simulates_transitions() {
    let dir = tempdir().unwrap();
    let args = inspect_args(write_batch(&dir, ARITHMETIC), "AddNode", &["left=int,right=int", "left=int,right=int", "left=double,right=double"]);
    let output = run_inspect(&args).unwrap();
    assert!(output.contains("[left=int,right=int] Uninitialized -> Int"));
    assert!(output.contains("[left=int,right=int] stays Int"));
    assert!(output.contains("[left=double,right=double] Int -> Double"));
}

#[test]
fn test_inspect_rewrite_skips_specialization() {
    let dir = tempdir().unwrap();
    let mut args = inspect_args(write_batch(&dir, ARITHMETIC), "AddNode", &["left=int,right=int"]);
    args.rewriting = vec!["Int".to_string()];
    let output = run_inspect(&args).unwrap();
    assert!(output.contains("Uninitialized -> Generic"));
}

#[test]
fn test_inspect_finds_split_members() {
    let dir = tempdir().unwrap();
    let output = run_inspect(&inspect_args(write_batch(&dir, MATH), "MathCos", &[])).unwrap();
    assert!(output.starts_with("MathCos (MathNode)"));
}

#[test]
fn test_inspect_unknown_node() {
    let dir = tempdir().unwrap();
    let result = run_inspect(&inspect_args(write_batch(&dir, ARITHMETIC), "MissingNode", &[]));
    assert!(matches!(result, Err(CliError::UnknownNode(name)) if name == "MissingNode"));
}
