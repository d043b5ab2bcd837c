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

//! Children and fields of a node

use super::ExecutableTypeData;
use crate::template::Cardinality;
use crate::typesystem::TypeData;
use nodegen_common::{Diagnostic, MessageContainer, SourcePosition};

/// How the generated code evaluates a child
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionKind {
    /// Evaluated before every execution
    Default,
    /// Declared but never evaluated
    Ignore,
    /// Evaluated only when its short-circuit method says so
    ShortCircuit,
}

/// A child node slot
#[derive(Debug, Clone)]
pub struct NodeChildData {
    owner: String,
    name: String,
    declared_type: String,
    node_type: String,
    cardinality: Cardinality,
    array_dimensions: usize,
    execution_kind: ExecutionKind,
    child_node: Option<String>,
    executable_types: Vec<ExecutableTypeData>,
    position: Option<SourcePosition>,
    messages: Vec<Diagnostic>,
}

impl NodeChildData {
    /// Create a child whose declared type has already been split into node type and array depth
    pub fn new(owner: &str, name: &str, declared_type: &str, node_type: &str, cardinality: Cardinality, array_dimensions: usize) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            declared_type: declared_type.to_string(),
            node_type: node_type.to_string(),
            cardinality,
            array_dimensions,
            execution_kind: ExecutionKind::Default,
            child_node: None,
            executable_types: Vec::new(),
            position: None,
            messages: Vec::new(),
        }
    }

    pub fn with_position(mut self, position: Option<SourcePosition>) -> Self {
        self.position = position;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type as written in the declaration, including array brackets
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Node type with all array dimensions removed
    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn array_dimensions(&self) -> usize {
        self.array_dimensions
    }

    pub fn execution_kind(&self) -> ExecutionKind {
        self.execution_kind
    }

    pub fn set_execution_kind(&mut self, kind: ExecutionKind) {
        self.execution_kind = kind;
    }

    pub fn is_executed(&self) -> bool {
        self.execution_kind != ExecutionKind::Ignore
    }

    pub fn is_short_circuit(&self) -> bool {
        self.execution_kind == ExecutionKind::ShortCircuit
    }

    /// Node id of the resolved child declaration
    pub fn child_node(&self) -> Option<&str> {
        self.child_node.as_deref()
    }

    /// Record the resolved child declaration and the execute methods it offers
    pub fn resolve(&mut self, node_id: &str, executable_types: Vec<ExecutableTypeData>) {
        self.child_node = Some(node_id.to_string());
        self.executable_types = executable_types;
    }

    /// Execute methods of the child taking no evaluated values
    pub fn executable_types(&self) -> &[ExecutableTypeData] {
        &self.executable_types
    }

    /// Name of the flag parameter of a short-circuited child
    pub fn short_circuit_flag(&self) -> String {
        format!("has_{}", self.name)
    }

    /// Execute method producing exactly `ty`, falling back to a generic one
    pub fn find_executable_type(&self, ty: &TypeData) -> Option<&ExecutableTypeData> {
        self.executable_types.iter().find(|e| e.ty() == ty).or_else(|| self.find_any_generic_executable_type())
    }

    /// Execute methods that cannot fail with an unexpected value
    pub fn find_generic_executable_types(&self) -> Vec<&ExecutableTypeData> {
        self.executable_types.iter().filter(|e| !e.has_unexpected_value()).collect()
    }

    /// The preferred generic execute method: generic type first, then any non-void one
    pub fn find_any_generic_executable_type(&self) -> Option<&ExecutableTypeData> {
        let generic = self.find_generic_executable_types();
        generic
            .iter()
            .find(|e| e.ty().is_generic())
            .or_else(|| generic.iter().find(|e| !e.ty().is_void()))
            .or_else(|| generic.first())
            .copied()
    }
}

impl MessageContainer for NodeChildData {
    fn element_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    fn messages_mut(&mut self) -> &mut Vec<Diagnostic> {
        &mut self.messages
    }

    fn position(&self) -> Option<&SourcePosition> {
        self.position.as_ref()
    }
}

/// A plain field usable as a local parameter of template methods
#[derive(Debug, Clone)]
pub struct NodeFieldData {
    owner: String,
    name: String,
    ty: String,
    position: Option<SourcePosition>,
    messages: Vec<Diagnostic>,
}

impl NodeFieldData {
    pub fn new(owner: &str, name: &str, ty: &str, position: Option<SourcePosition>) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            ty: ty.to_string(),
            position,
            messages: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }
}

impl MessageContainer for NodeFieldData {
    fn element_name(&self) -> String {
        format!("{}.{}", self.owner, self.name)
    }

    fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    fn messages_mut(&mut self) -> &mut Vec<Diagnostic> {
        &mut self.messages
    }

    fn position(&self) -> Option<&SourcePosition> {
        self.position.as_ref()
    }
}
