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


//! Node code generator
//!
//! Each node that needs a factory becomes one Rust file: a state enum, a wrapper struct holding
//! the user node and its current state, one public method per execute method, one private
//! function per state and execute method, the dispatch functions and the factory.

use super::names::NodeNames;
use super::writer::SourceWriter;
use super::{GenerationConfig, GenerationError, GenerationResult};
use crate::config::ParserConfig;
use crate::naming::NamingRules;
use crate::node::NodeData;
use crate::typesystem::TypeSystemData;
use nodegen_common::MessageContainer;
use serde::Serialize;
use tracing::debug;

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Node the file was generated for, empty for the module file
    pub node_id: String,
    pub file_name: String,
    pub contents: String,
}

/// Writes the header, lint allowances and imports every generated file starts with
fn write_preamble(out: &mut SourceWriter, config: &GenerationConfig, runtime_items: &[&str]) -> GenerationResult<()> {
    if let Some(header) = &config.header_comment {
        for line in header.lines() {
            out.comment(line)?;
        }
        out.blank()?;
    }
    out.line("#![allow(unused_imports, unused_variables, unreachable_code, dead_code, clippy::all)]")?;
    out.blank()?;
    out.lines(&config.prelude)?;
    if !runtime_items.is_empty() {
        out.line(format!("use {}::{{{}}};", config.runtime_crate, runtime_items.join(", ")))?;
    }
    Ok(())
}

fn new_writer(config: &GenerationConfig) -> SourceWriter {
    match config.max_output_size {
        Some(limit) => SourceWriter::with_max_size(config.indent_width, limit),
        None => SourceWriter::new(config.indent_width),
    }
}

/// State shared by the emit functions of one node
pub(super) struct NodeEmitter<'a> {
    pub(super) node: &'a NodeData,
    pub(super) ts: &'a TypeSystemData,
    pub(super) names: NodeNames,
    pub(super) config: &'a GenerationConfig,
    pub(super) rules: &'a NamingRules,
    pub(super) frame_type: &'a str,
    pub(super) out: SourceWriter,
}

impl<'a> NodeEmitter<'a> {
    pub(super) fn new(
        node: &'a NodeData,
        config: &'a GenerationConfig,
        rules: &'a NamingRules,
        frame_type: &'a str,
        node_suffix: &str,
    ) -> GenerationResult<Self> {
        let ts = node.type_system().ok_or_else(|| GenerationError::MissingTypeSystem(node.node_id().to_string()))?;
        Ok(Self {
            node,
            ts,
            names: NodeNames::new(node, rules, node_suffix),
            config,
            rules,
            frame_type,
            out: new_writer(config),
        })
    }

    /// Emit the whole file
    pub(super) fn emit_file(mut self) -> GenerationResult<String> {
        let mut runtime = vec!["ExecuteResult", "SpecializationKind", "StateCell"];
        if self.config.emit_factory_metadata {
            runtime.insert(1, "NodeFactory");
        }
        write_preamble(&mut self.out, self.config, &runtime)?;
        self.emit_kind()?;
        self.emit_wrapper()?;
        self.emit_factory()?;
        Ok(self.out.into_string())
    }

    fn emit_kind(&mut self) -> GenerationResult<()> {
        let node = self.node;
        let kind = self.names.kind();
        let specializations = node.specializations();

        self.out.blank()?;
        self.out.doc(format!("Specialization states of `{}`, in lattice order", self.names.node_id()))?;
        self.out.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]")?;
        self.out.open(format!("pub enum {} {{", kind))?;
        for specialization in specializations {
            self.out.line(format!("{},", specialization.id()))?;
        }
        self.out.close("}")?;

        self.out.blank()?;
        self.out.open(format!("impl SpecializationKind for {} {{", kind))?;
        let all: Vec<String> = specializations.iter().map(|s| format!("Self::{}", s.id())).collect();
        self.out.line(format!("const ALL: &'static [Self] = &[{}];", all.join(", ")))?;
        self.out.blank()?;
        self.out.open("fn name(&self) -> &'static str {")?;
        self.out.open("match self {")?;
        for specialization in specializations {
            self.out.line(format!("Self::{} => {:?},", specialization.id(), specialization.id()))?;
        }
        self.out.close("}")?;
        self.out.close("}")?;
        self.out.close("}")?;

        self.out.blank()?;
        self.out.open(format!("impl {} {{", kind))?;
        self.out.doc("Name of the node class implementing this state")?;
        self.out.open("pub fn class_name(&self) -> &'static str {")?;
        self.out.open("match self {")?;
        for specialization in specializations {
            self.out.line(format!("Self::{} => {:?},", specialization.id(), self.names.class_name(specialization)))?;
        }
        self.out.close("}")?;
        self.out.close("}")?;
        self.out.close("}")
    }

    fn emit_wrapper(&mut self) -> GenerationResult<()> {
        let node = self.node;
        let initial = node.specializations().first().ok_or_else(|| GenerationError::MissingSpecialization {
            node: node.node_id().to_string(),
            role: "initial",
        })?;
        let user = self.names.user_type().to_string();
        let generated = self.names.generated();
        let kind = self.names.kind();

        self.out.blank()?;
        self.out.doc(format!("Specializing wrapper around `{}`", user))?;
        self.out.open(format!("pub struct {} {{", generated))?;
        self.out.line(format!("node: {},", user))?;
        self.out.line(format!("state: StateCell<{}>,", kind))?;
        self.out.close("}")?;

        self.out.blank()?;
        self.out.open(format!("impl {} {{", generated))?;
        self.out.doc("Wrap `node`, starting in the initial state")?;
        self.out.open(format!("pub fn new(node: {}) -> Self {{", user))?;
        self.out.line(format!("Self::with_state(node, {})", self.names.variant(initial)))?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.open(format!("pub fn with_state(node: {}, state: {}) -> Self {{", user, kind))?;
        self.out.line("Self { node, state: StateCell::new(state) }")?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.open(format!("pub fn node(&self) -> &{} {{", user))?;
        self.out.line("&self.node")?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.open(format!("pub fn node_mut(&mut self) -> &mut {} {{", user))?;
        self.out.line("&mut self.node")?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.doc("Current state")?;
        self.out.open(format!("pub fn specialization(&self) -> {} {{", kind))?;
        self.out.line("self.state.get()")?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.open("pub fn transitions(&self) -> u32 {")?;
        self.out.line("self.state.transitions()")?;
        self.out.close("}")?;

        self.emit_execute_methods()?;
        self.emit_state_functions()?;
        self.emit_dispatch_functions()?;
        self.out.close("}")
    }
}

/// Generates Rust source for analyzed nodes
pub struct NodeCodeGenerator<'a> {
    config: &'a GenerationConfig,
    parser: &'a ParserConfig,
    rules: NamingRules,
}

impl<'a> NodeCodeGenerator<'a> {
    /// Create a generator; fails on an invalid configuration
    pub fn new(config: &'a GenerationConfig, parser: &'a ParserConfig) -> GenerationResult<Self> {
        config.validate().map_err(GenerationError::ConfigurationError)?;
        Ok(Self {
            config,
            parser,
            rules: NamingRules::new()?,
        })
    }

    /// Names used for `node`
    pub fn names(&self, node: &NodeData) -> NodeNames {
        NodeNames::new(node, &self.rules, &self.parser.node_suffix)
    }

    /// Generate the file of one node
    pub fn generate(&self, node: &NodeData) -> GenerationResult<GeneratedFile> {
        if node.has_errors() {
            return Err(GenerationError::NodeHasErrors(node.node_id().to_string()));
        }
        let emitter = NodeEmitter::new(node, self.config, &self.rules, &self.parser.frame_type, &self.parser.node_suffix)?;
        let file_name = emitter.names.file_name();
        let contents = emitter.emit_file()?;
        debug!(node = node.node_id(), bytes = contents.len(), "generated node");
        Ok(GeneratedFile {
            node_id: node.node_id().to_string(),
            file_name,
            contents,
        })
    }

    /// Generate the factory collecting the nodes split from `container`
    pub fn generate_container(&self, container: &NodeData, members: &[&NodeData]) -> GenerationResult<GeneratedFile> {
        let names = self.names(container);
        let mut out = new_writer(self.config);
        let runtime: &[&str] = if self.config.emit_factory_metadata { &["NodeFactory"] } else { &[] };
        write_preamble(&mut out, self.config, runtime)?;

        let ids: Vec<String> = members.iter().map(|m| format!("{:?}", m.node_id())).collect();
        out.blank()?;
        out.doc(format!("Factories of the nodes split from `{}`", container.declaration_name()))?;
        out.line(format!("pub struct {};", names.factory()))?;
        out.blank()?;
        out.open(format!("impl {} {{", names.factory()))?;
        out.line(format!("pub const NODE_IDS: &'static [&'static str] = &[{}];", ids.join(", ")))?;
        if self.config.emit_factory_metadata {
            let factories: Vec<String> = members.iter().map(|m| format!("&{}", self.names(m).factory())).collect();
            out.blank()?;
            out.open("pub fn factories() -> Vec<&'static dyn NodeFactory> {")?;
            out.line(format!("vec![{}]", factories.join(", ")))?;
            out.close("}")?;
        }
        out.close("}")?;

        Ok(GeneratedFile {
            node_id: container.node_id().to_string(),
            file_name: names.file_name(),
            contents: out.into_string(),
        })
    }

    /// Generate `mod.rs` declaring and re-exporting every generated file
    pub fn generate_module(&self, files: &[GeneratedFile]) -> GenerationResult<GeneratedFile> {
        let mut out = new_writer(self.config);
        write_preamble(&mut out, self.config, &[])?;
        out.blank()?;
        for file in files {
            let module = file.file_name.trim_end_matches(".rs");
            out.line(format!("pub mod {};", module))?;
        }
        out.blank()?;
        for file in files {
            let module = file.file_name.trim_end_matches(".rs");
            out.line(format!("pub use {}::*;", module))?;
        }
        Ok(GeneratedFile {
            node_id: String::new(),
            file_name: "mod.rs".to_string(),
            contents: out.into_string(),
        })
    }
}
