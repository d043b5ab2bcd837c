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


//! Emission stage: node model to generated files

use super::{PipelineContext, PipelineStage};
use crate::codegen::{GeneratedFile, NodeCodeGenerator};
use crate::config::CompilerConfig;
use crate::error::CompilerResult;
use crate::node::{NodeData, NodeGraph};
use nodegen_common::{Diagnostic, DiagnosticReport, MessageContainer};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of a generation run
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationOutput {
    /// Resolved top-level nodes
    #[serde(skip)]
    pub nodes: Vec<NodeData>,
    /// Generated files in emission order, `mod.rs` last
    pub files: Vec<GeneratedFile>,
    /// Diagnostics of every node, in emission order
    pub report: DiagnosticReport,
    /// Nodes with specializations that were not emitted because of errors
    pub skipped: Vec<String>,
}

impl GenerationOutput {
    pub(super) fn analyzed(nodes: Vec<NodeData>) -> Self {
        let mut report = DiagnosticReport::new();
        for node in flatten(&nodes) {
            let mut messages = Vec::new();
            node.collect_messages(&mut messages);
            report.extend(messages);
        }
        Self {
            nodes,
            report,
            ..Self::default()
        }
    }

    pub fn find_file(&self, node_id: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.node_id == node_id)
    }

    pub fn is_success(&self) -> bool {
        !self.report.has_errors()
    }
}

/// Every node of the batch, nested declarations and split members included
fn flatten(nodes: &[NodeData]) -> Vec<&NodeData> {
    let mut all = Vec::new();
    let mut stack: Vec<&NodeData> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        all.push(node);
        stack.extend(node.declared_nodes().iter().rev());
    }
    all
}

/// Generates the source of every node that needs a factory
#[derive(Debug, Default)]
pub struct Emitter;

impl Emitter {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStage for Emitter {
    type Input = Vec<NodeData>;
    type Output = GenerationOutput;

    fn execute(&mut self, nodes: Vec<NodeData>, config: &CompilerConfig, context: &mut PipelineContext) -> CompilerResult<GenerationOutput> {
        let generator = NodeCodeGenerator::new(&config.generation, &config.parser)?;
        let all = flatten(&nodes);
        let by_id: HashMap<&str, &NodeData> = all.iter().map(|n| (n.node_id(), *n)).collect();

        let mut report = DiagnosticReport::new();
        let mut files = Vec::new();
        let mut skipped = Vec::new();
        let mut emitted: Vec<String> = Vec::new();
        let mut containers: Vec<&NodeData> = Vec::new();

        for id in NodeGraph::from_nodes(&nodes).emission_order() {
            // Children may name nodes outside the batch
            let Some(node) = by_id.get(id.as_str()).copied() else {
                continue;
            };
            let mut messages = Vec::new();
            node.collect_messages(&mut messages);
            report.extend(messages);

            if node.is_split_container() {
                containers.push(node);
                continue;
            }
            if !node.needs_factory() {
                debug!(node = %id, "no specialized code needed");
                continue;
            }
            if node.has_errors() {
                warn!(node = %id, "node has errors, skipping");
                skipped.push(id);
                continue;
            }
            match generator.generate(node) {
                Ok(file) => {
                    emitted.push(id);
                    files.push(file);
                }
                Err(error) => {
                    warn!(node = %id, %error, "generation failed");
                    report.push(Diagnostic::error(id.clone(), error.to_string()));
                    skipped.push(id);
                }
            }
        }

        for container in containers {
            let members: Vec<&NodeData> = container.declared_nodes().iter().filter(|m| emitted.iter().any(|id| id == m.node_id())).collect();
            if members.is_empty() {
                continue;
            }
            match generator.generate_container(container, &members) {
                Ok(file) => files.push(file),
                Err(error) => report.push(Diagnostic::error(container.node_id(), error.to_string())),
            }
        }

        if !files.is_empty() {
            let module = generator.generate_module(&files)?;
            files.push(module);
        }
        context.metrics.record_processed_items(self.name(), files.len());

        Ok(GenerationOutput {
            nodes,
            files,
            report,
            skipped,
        })
    }

    fn name(&self) -> &'static str {
        "emission"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ARITHMETIC, LOGICAL, parse};

    fn emit(source: &str) -> GenerationOutput {
        let config = CompilerConfig::default();
        let mut context = PipelineContext::new();
        Emitter::new().execute(parse(source), &config, &mut context).unwrap()
    }

    #[test]
    fn test_only_specialized_nodes_emitted() {
        let output = emit(ARITHMETIC);
        let names: Vec<&str> = output.files.iter().map(|f| f.file_name.as_str()).collect();
        assert_eq!(names, vec!["add_node.rs", "mod.rs"]);
        assert!(output.skipped.is_empty());
        assert!(output.is_success());
    }

    #[test]
    fn test_module_declares_every_file() {
        let output = emit(LOGICAL);
        let module = output.files.last().unwrap();
        assert_eq!(module.file_name, "mod.rs");
        assert!(module.contents.contains("pub mod and_node;"));
        assert!(module.contents.contains("pub use and_node::*;"));
    }

    #[test]
    fn test_flatten_includes_declared_nodes() {
        let mut outer = NodeData::new("Outer", "Outer");
        outer.add_declared_node(NodeData::new("Inner", "Inner"));
        let ids: Vec<&str> = flatten(std::slice::from_ref(&outer)).iter().map(|n| n.node_id()).collect();
        assert_eq!(ids, vec!["Outer", "Inner"]);
    }
}
