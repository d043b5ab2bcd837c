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


//! Generate command: write the specialized sources of a batch

use super::{Preset, ReportFormat, load_config, read_file, render_report, write_file};
use crate::error::{CliError, CliResult};
use clap::Args;
use nodegen_common::DiagnosticReport;
use nodegen_compiler::{CompilerConfig, GeneratedFile, GenerationPipeline};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments for the generate command
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Declaration batch (JSON)
    #[arg(value_name = "BATCH")]
    pub input: PathBuf,

    /// Directory receiving the generated files
    #[arg(short, long, default_value = "generated")]
    pub output: PathBuf,

    /// Configuration file (JSON), overrides the preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Configuration preset
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    pub preset: Preset,

    /// Overwrite files that were not generated by nodegen
    #[arg(long)]
    pub force: bool,

    /// Format of the diagnostic report
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// What a generate run did
#[derive(Debug)]
pub struct GenerateSummary {
    pub written: Vec<PathBuf>,
    pub skipped: Vec<String>,
    pub report: DiagnosticReport,
}

impl GenerateSummary {
    pub fn is_success(&self) -> bool {
        !self.report.has_errors()
    }
}

/// Execute the generate command
pub fn run_generate(args: &GenerateArgs) -> CliResult<GenerateSummary> {
    let config = load_config(args.config.as_deref(), args.preset)?;
    let source = read_file(&args.input)?;

    let mut pipeline = GenerationPipeline::new(config.clone())?;
    let output = pipeline.execute_json(&source)?;

    fs::create_dir_all(&args.output).map_err(|source| CliError::Write {
        path: args.output.clone(),
        source,
    })?;

    // Check every target before writing any
    let targets: Vec<(PathBuf, &GeneratedFile)> = output.files.iter().map(|file| (args.output.join(&file.file_name), file)).collect();
    if !args.force {
        for (path, _) in &targets {
            ensure_generated(path, &config)?;
        }
    }

    let mut written = Vec::with_capacity(targets.len());
    for (path, file) in targets {
        debug!(path = %path.display(), bytes = file.contents.len(), "writing");
        write_file(path.clone(), &file.contents)?;
        written.push(path);
    }
    info!(files = written.len(), skipped = output.skipped.len(), "sources written");

    if !output.report.is_empty() {
        eprintln!("{}", render_report(&output.report, args.format)?);
    }

    Ok(GenerateSummary {
        written,
        skipped: output.skipped,
        report: output.report,
    })
}

/// A target may be replaced when it is missing or carries the generated-file header
fn ensure_generated(path: &Path, config: &CompilerConfig) -> CliResult<()> {
    if !path.exists() {
        return Ok(());
    }
    let Some(header) = config.generation.header_comment.as_deref() else {
        return Err(CliError::Overwrite(path.to_path_buf()));
    };
    let existing = read_file(path)?;
    if existing.starts_with(&format!("// {}", header)) {
        Ok(())
    } else {
        Err(CliError::Overwrite(path.to_path_buf()))
    }
}
