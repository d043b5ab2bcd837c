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


//! End-to-end tests of generation runs
//!
//! Every test feeds a declaration batch through the complete pipeline and inspects the generated
//! files and the diagnostic report.

use nodegen_compiler::{CompilerConfig, GenerationOutput, GenerationPipeline, PipelineBuilder};

const ARITHMETIC: &str = include_str!("fixtures/arithmetic.json");
const LOGICAL: &str = include_str!("fixtures/logical.json");
const GUARDED: &str = include_str!("fixtures/guarded.json");
const MATH: &str = include_str!("fixtures/math.json");

const TYPE_SYSTEM: &str = r#"{
    "name": "SimpleTypes",
    "path": "crate::types::SimpleTypes",
    "types": [{ "name": "int", "rust": "i32" }, { "name": "double", "rust": "f64" }],
    "generic": { "name": "Object", "rust": "Value" }
}"#;

fn run(source: &str) -> GenerationOutput {
    let mut pipeline = GenerationPipeline::new(CompilerConfig::default()).expect("default configuration is valid");
    pipeline.execute_json(source).expect("batch should decode")
}

fn file_names(output: &GenerationOutput) -> Vec<&str> {
    output.files.iter().map(|f| f.file_name.as_str()).collect()
}

/// Batch with two unrelated nodes: `BadNode` declares the order value 1 twice
fn batch_with_duplicate_order() -> String {
    format!(
        r#"{{
        "type_systems": [{ts}],
        "nodes": [
            {{
                "name": "ValueNode",
                "methods": [
                    {{ "name": "execute", "return_type": "Object", "modifiers": {{ "abstract": true }} }}
                ]
            }},
            {{
                "name": "BadNode",
                "extends": "ValueNode",
                "fields": [{{ "name": "operand", "type": "ValueNode", "kind": "child" }}],
                "methods": [
                    {{ "name": "do_int", "return_type": "int", "parameters": [{{ "name": "operand", "type": "int" }}],
                       "annotations": [{{ "kind": "specialization", "order": 1 }}] }},
                    {{ "name": "do_double", "return_type": "double", "parameters": [{{ "name": "operand", "type": "double" }}],
                       "annotations": [{{ "kind": "specialization", "order": 1 }}] }}
                ]
            }},
            {{
                "name": "GoodNode",
                "extends": "ValueNode",
                "fields": [{{ "name": "operand", "type": "ValueNode", "kind": "child" }}],
                "methods": [
                    {{ "name": "do_int", "return_type": "int", "parameters": [{{ "name": "operand", "type": "int" }}],
                       "annotations": [{{ "kind": "specialization" }}] }}
                ]
            }}
        ]
    }}"#,
        ts = TYPE_SYSTEM
    )
}

fn batch_with_missing_guard() -> String {
    format!(
        r#"{{
        "type_systems": [{ts}],
        "nodes": [
            {{
                "name": "ValueNode",
                "methods": [
                    {{ "name": "execute", "return_type": "Object", "modifiers": {{ "abstract": true }} }}
                ]
            }},
            {{
                "name": "NegateNode",
                "extends": "ValueNode",
                "fields": [{{ "name": "operand", "type": "ValueNode", "kind": "child" }}],
                "methods": [
                    {{ "name": "do_int", "return_type": "int", "parameters": [{{ "name": "operand", "type": "int" }}],
                       "annotations": [{{ "kind": "specialization", "guards": ["is_positive"] }}] }}
                ]
            }}
        ]
    }}"#,
        ts = TYPE_SYSTEM
    )
}

#[test]
fn test_arithmetic_batch_generates_add_node() {
    let output = run(ARITHMETIC);
    assert!(output.is_success(), "{}", output.report);
    assert_eq!(file_names(&output), vec!["add_node.rs", "mod.rs"]);

    let add = output.find_file("AddNode").expect("AddNode is generated");
    assert!(add.contents.starts_with("// Generated by nodegen. Do not edit."));
    assert!(add.contents.contains("pub enum AddNodeSpecialization {"));
    assert!(add.contents.contains("pub struct AddNodeGen {"));
    assert!(add.contents.contains("fn execute_and_specialize("));
    assert!(add.contents.contains("fn execute_generic("));
}

#[test]
fn test_specializations_follow_lattice_order() {
    let output = run(ARITHMETIC);
    let add = &output.find_file("AddNode").unwrap().contents;
    let position = |variant: &str| add.find(variant).unwrap_or_else(|| panic!("missing {}", variant));
    assert!(position("Uninitialized,") < position("Int,"));
    assert!(position("Int,") < position("Double,"));
    assert!(position("Double,") < position("Generic,"));
}

#[test]
fn test_duplicate_order_skips_only_the_faulty_node() {
    let output = run(&batch_with_duplicate_order());
    assert_eq!(output.skipped, vec!["BadNode".to_string()]);
    let collisions: Vec<_> = output.report.errors().filter(|d| d.message == "Order value 1 used multiple times").collect();
    assert_eq!(collisions.len(), 2);
    assert!(collisions.iter().all(|d| d.element.contains("BadNode")));
    assert!(output.find_file("GoodNode").is_some());
    assert!(output.find_file("BadNode").is_none());
    assert!(!output.is_success());
}

#[test]
fn test_missing_guard_is_reported() {
    let output = run(&batch_with_missing_guard());
    assert_eq!(output.skipped, vec!["NegateNode".to_string()]);
    assert!(output.report.errors().any(|d| d.message.contains("Guard with method name 'is_positive' not found")));
    assert!(output.files.is_empty());
}

#[test]
fn test_resolved_guard_is_emitted() {
    let output = run(GUARDED);
    assert!(output.is_success(), "{}", output.report);
    let add = &output.find_file("AddNode").unwrap().contents;
    assert!(add.contains("if !(self.node.is_small(left.clone())) {"));
    assert!(add.contains("self.execute_and_specialize(AddNodeSpecialization::Double, frame, Value::from(left), Value::from(right))"));
}

#[test]
fn test_short_circuit_passes_flag() {
    let output = run(LOGICAL);
    assert!(output.is_success(), "{}", output.report);
    let and = &output.find_file("AndNode").unwrap().contents;
    assert!(and.contains("has_right"));
    assert!(and.contains("needs_right("));
    assert!(and.contains("needs_right_boolean("));
}

#[test]
fn test_split_node_generates_members_and_container() {
    let output = run(MATH);
    assert!(output.is_success(), "{}", output.report);
    let names = file_names(&output);
    assert!(names.contains(&"math_cos.rs"));
    assert!(names.contains(&"math_sin.rs"));
    assert_eq!(names.last(), Some(&"mod.rs"));

    let container = output.find_file("MathNode").expect("container file");
    assert!(container.contents.contains(r#"pub const NODE_IDS: &'static [&'static str] = &["MathCos", "MathSin"];"#));
    let module = output.files.last().unwrap();
    assert!(module.contents.contains("pub mod math_node;"));
}

#[test]
fn test_check_only_run_reports_without_files() {
    let mut pipeline = PipelineBuilder::new().check().build().unwrap();
    let output = pipeline.execute_json(&batch_with_duplicate_order()).unwrap();
    assert!(output.files.is_empty());
    assert!(output.report.has_errors());
}

#[test]
fn test_output_serializes_to_json() {
    let output = run(ARITHMETIC);
    let json = serde_json::to_value(&output).unwrap();
    assert_eq!(json["files"][0]["file_name"], "add_node.rs");
    assert!(json["skipped"].as_array().unwrap().is_empty());
}

#[test]
fn test_invalid_batch_is_an_error() {
    let mut pipeline = GenerationPipeline::new(CompilerConfig::default()).unwrap();
    assert!(pipeline.execute_json("{ not json").is_err());
}
