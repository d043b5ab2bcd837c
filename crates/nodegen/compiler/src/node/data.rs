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

//! Node definitions

use super::{ExecutableTypeData, ExecutionKind, NodeChildData, NodeFieldData, ShortCircuitData, SpecializationData, SpecializationListenerData};
use crate::declaration::ConstructorDeclaration;
use crate::template::TemplateMethod;
use crate::typesystem::{TypeData, TypeSystemData};
use nodegen_common::{Diagnostic, MessageContainer, SourcePosition};
use std::collections::BTreeMap;

/// Everything the generator knows about one node
#[derive(Debug, Clone)]
pub struct NodeData {
    node_id: String,
    declaration_name: String,
    parent: Option<String>,
    private: bool,
    split_container: bool,
    type_system: Option<TypeSystemData>,
    fields: Vec<NodeFieldData>,
    children: Vec<NodeChildData>,
    specializations: Vec<SpecializationData>,
    short_circuits: Vec<ShortCircuitData>,
    executable_types: BTreeMap<usize, Vec<ExecutableTypeData>>,
    listeners: Vec<SpecializationListenerData>,
    constructors: Vec<ConstructorDeclaration>,
    declared_nodes: Vec<NodeData>,
    rejected: Vec<TemplateMethod>,
    position: Option<SourcePosition>,
    messages: Vec<Diagnostic>,
}

impl NodeData {
    pub fn new(node_id: &str, declaration_name: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            declaration_name: declaration_name.to_string(),
            parent: None,
            private: false,
            split_container: false,
            type_system: None,
            fields: Vec::new(),
            children: Vec::new(),
            specializations: Vec::new(),
            short_circuits: Vec::new(),
            executable_types: BTreeMap::new(),
            listeners: Vec::new(),
            constructors: Vec::new(),
            declared_nodes: Vec::new(),
            rejected: Vec::new(),
            position: None,
            messages: Vec::new(),
        }
    }

    /// Copy of this node's structure under a new id, without specializations or listeners
    pub fn split_copy(&self, node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            parent: Some(self.node_id.clone()),
            specializations: Vec::new(),
            listeners: Vec::new(),
            declared_nodes: Vec::new(),
            rejected: Vec::new(),
            messages: Vec::new(),
            split_container: false,
            ..self.clone()
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// Name of the declaration the node was built from
    pub fn declaration_name(&self) -> &str {
        &self.declaration_name
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn set_parent(&mut self, parent: &str) {
        self.parent = Some(parent.to_string());
    }

    pub fn is_private(&self) -> bool {
        self.private
    }

    pub fn set_private(&mut self, private: bool) {
        self.private = private;
    }

    /// Whether the node only groups split siblings
    pub fn is_split_container(&self) -> bool {
        self.split_container
    }

    pub fn set_split_container(&mut self, split: bool) {
        self.split_container = split;
    }

    pub fn set_position(&mut self, position: Option<SourcePosition>) {
        self.position = position;
    }

    pub fn type_system(&self) -> Option<&TypeSystemData> {
        self.type_system.as_ref()
    }

    pub fn set_type_system(&mut self, type_system: Option<TypeSystemData>) {
        self.type_system = type_system;
    }

    pub fn fields(&self) -> &[NodeFieldData] {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: Vec<NodeFieldData>) {
        self.fields = fields;
    }

    /// Children in execution order
    pub fn children(&self) -> &[NodeChildData] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<NodeChildData> {
        &mut self.children
    }

    pub fn set_children(&mut self, children: Vec<NodeChildData>) {
        self.children = children;
    }

    /// Children that are evaluated by the generated code, in execution order
    pub fn executed_children(&self) -> impl Iterator<Item = &NodeChildData> {
        self.children.iter().filter(|c| c.is_executed())
    }

    pub fn find_child(&self, name: &str) -> Option<&NodeChildData> {
        self.children.iter().find(|c| c.name() == name)
    }

    /// Children of one execution kind
    pub fn children_of(&self, kind: ExecutionKind) -> impl Iterator<Item = &NodeChildData> {
        self.children.iter().filter(move |c| c.execution_kind() == kind)
    }

    /// Specializations; sorted in lattice order once the node is finalized
    pub fn specializations(&self) -> &[SpecializationData] {
        &self.specializations
    }

    pub fn specializations_mut(&mut self) -> &mut Vec<SpecializationData> {
        &mut self.specializations
    }

    pub fn set_specializations(&mut self, specializations: Vec<SpecializationData>) {
        self.specializations = specializations;
    }

    pub fn find_specialization(&self, id: &str) -> Option<&SpecializationData> {
        self.specializations.iter().find(|s| s.id() == id)
    }

    pub fn generic_specialization(&self) -> Option<&SpecializationData> {
        self.specializations.iter().find(|s| s.is_generic())
    }

    pub fn uninitialized_specialization(&self) -> Option<&SpecializationData> {
        self.specializations.iter().find(|s| s.is_uninitialized())
    }

    /// Specialization following `index` in lattice order
    pub fn next_specialization(&self, index: usize) -> Option<&SpecializationData> {
        self.specializations.get(index + 1)
    }

    pub fn short_circuits(&self) -> &[ShortCircuitData] {
        &self.short_circuits
    }

    pub fn short_circuits_mut(&mut self) -> &mut Vec<ShortCircuitData> {
        &mut self.short_circuits
    }

    pub fn set_short_circuits(&mut self, short_circuits: Vec<ShortCircuitData>) {
        self.short_circuits = short_circuits;
    }

    /// Execute methods grouped by the number of pre-evaluated values they take
    pub fn executable_type_groups(&self) -> &BTreeMap<usize, Vec<ExecutableTypeData>> {
        &self.executable_types
    }

    pub fn set_executable_types(&mut self, groups: BTreeMap<usize, Vec<ExecutableTypeData>>) {
        self.executable_types = groups;
    }

    /// Execute methods taking `evaluated_count` pre-evaluated values
    pub fn executable_types(&self, evaluated_count: usize) -> &[ExecutableTypeData] {
        self.executable_types.get(&evaluated_count).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every execute method of the node
    pub fn all_executable_types(&self) -> impl Iterator<Item = &ExecutableTypeData> {
        self.executable_types.values().flatten()
    }

    /// Execute method producing exactly `ty`
    pub fn find_executable_type(&self, ty: &TypeData, evaluated_count: usize) -> Option<&ExecutableTypeData> {
        self.executable_types(evaluated_count).iter().find(|e| e.ty() == ty)
    }

    /// Whether the node's execute methods take the frame
    pub fn uses_frame(&self) -> bool {
        self.all_executable_types().any(ExecutableTypeData::has_frame)
    }

    pub fn listeners(&self) -> &[SpecializationListenerData] {
        &self.listeners
    }

    pub fn set_listeners(&mut self, listeners: Vec<SpecializationListenerData>) {
        self.listeners = listeners;
    }

    pub fn constructors(&self) -> &[ConstructorDeclaration] {
        &self.constructors
    }

    pub fn set_constructors(&mut self, constructors: Vec<ConstructorDeclaration>) {
        self.constructors = constructors;
    }

    /// Nested declarations and split siblings
    pub fn declared_nodes(&self) -> &[NodeData] {
        &self.declared_nodes
    }

    pub fn declared_nodes_mut(&mut self) -> &mut Vec<NodeData> {
        &mut self.declared_nodes
    }

    pub fn add_declared_node(&mut self, node: NodeData) {
        self.declared_nodes.push(node);
    }

    /// Methods that carried a marker but did not match their specification
    pub fn rejected_methods(&self) -> &[TemplateMethod] {
        &self.rejected
    }

    pub fn add_rejected(&mut self, rejected: impl IntoIterator<Item = TemplateMethod>) {
        self.rejected.extend(rejected);
    }

    /// Whether any specialization can lead to another one
    pub fn needs_rewrites(&self) -> bool {
        self.specializations.iter().any(|s| s.has_rewrite(&self.children))
    }

    /// Whether a factory and specialized code are generated for this node
    pub fn needs_factory(&self) -> bool {
        !self.private && self.specializations.iter().any(SpecializationData::is_specialized)
    }

    /// All template methods the node declares
    pub fn all_template_methods(&self) -> Vec<&TemplateMethod> {
        let mut methods: Vec<&TemplateMethod> = Vec::new();
        methods.extend(self.specializations.iter().map(SpecializationData::template));
        methods.extend(self.specializations.iter().flat_map(|s| s.guards().iter().map(|g| g.template())));
        methods.extend(self.short_circuits.iter().map(ShortCircuitData::template));
        methods.extend(self.listeners.iter().map(SpecializationListenerData::template));
        methods.extend(self.all_executable_types().map(ExecutableTypeData::template));
        methods
    }
}

impl MessageContainer for NodeData {
    fn element_name(&self) -> String {
        self.node_id.clone()
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

    fn children(&self) -> Vec<&dyn MessageContainer> {
        let mut children: Vec<&dyn MessageContainer> = Vec::new();
        if let Some(type_system) = &self.type_system {
            children.push(type_system);
        }
        children.extend(self.fields.iter().map(|f| f as &dyn MessageContainer));
        children.extend(self.children.iter().map(|c| c as &dyn MessageContainer));
        children.extend(self.specializations.iter().map(|s| s as &dyn MessageContainer));
        children.extend(self.short_circuits.iter().map(|s| s.template() as &dyn MessageContainer));
        children.extend(self.listeners.iter().map(|l| l.template() as &dyn MessageContainer));
        children.extend(self.all_executable_types().map(|e| e.template() as &dyn MessageContainer));
        children.extend(self.rejected.iter().map(|r| r as &dyn MessageContainer));
        children
    }
}
