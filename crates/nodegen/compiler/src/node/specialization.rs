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

//! Specializations and the elements attached to them

use super::NodeChildData;
use crate::template::{ParameterKind, TemplateMethod};
use nodegen_common::{Diagnostic, MessageContainer, SourcePosition};

/// Role of a specialization in the lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecializationRole {
    /// A declared specialization
    Specialized,
    /// The fallback accepting every operand
    Generic,
    /// The state a node starts in before its first execution
    Uninitialized,
}

/// A rewrite-on condition of a specialization
#[derive(Debug, Clone)]
pub struct SpecializationThrowsData {
    element: String,
    exception: String,
    transition_to: Option<String>,
    position: Option<SourcePosition>,
    messages: Vec<Diagnostic>,
}

impl SpecializationThrowsData {
    pub fn new(owner: &TemplateMethod, exception: &str) -> Self {
        Self {
            element: format!("{}[{}]", owner.element_name(), exception),
            exception: exception.to_string(),
            transition_to: None,
            position: owner.position().cloned(),
            messages: Vec::new(),
        }
    }

    pub fn exception(&self) -> &str {
        &self.exception
    }

    /// Id of the specialization the node moves to when the condition is raised
    pub fn transition_to(&self) -> Option<&str> {
        self.transition_to.as_deref()
    }

    pub fn set_transition_to(&mut self, id: &str) {
        self.transition_to = Some(id.to_string());
    }
}

impl MessageContainer for SpecializationThrowsData {
    fn element_name(&self) -> String {
        self.element.clone()
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

/// A resolved guard method
#[derive(Debug, Clone)]
pub struct GuardData {
    template: TemplateMethod,
}

impl GuardData {
    pub fn new(template: TemplateMethod) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &TemplateMethod {
        &self.template
    }

    pub fn guard_name(&self) -> &str {
        self.template.method_name()
    }
}

/// A short-circuit method deciding whether a child is evaluated
#[derive(Debug, Clone)]
pub struct ShortCircuitData {
    template: TemplateMethod,
    value_name: String,
    callee: String,
    generic: bool,
}

impl ShortCircuitData {
    pub fn new(template: TemplateMethod, value_name: &str) -> Self {
        let callee = template.method_name().to_string();
        Self {
            template,
            value_name: value_name.to_string(),
            callee,
            generic: false,
        }
    }

    pub fn template(&self) -> &TemplateMethod {
        &self.template
    }

    pub fn template_mut(&mut self) -> &mut TemplateMethod {
        &mut self.template
    }

    /// Child the method decides about
    pub fn value_name(&self) -> &str {
        &self.value_name
    }

    pub fn method_name(&self) -> &str {
        self.template.method_name()
    }

    /// Rust method the generated code calls; overloads of one declared name get distinct callees
    pub fn callee(&self) -> &str {
        &self.callee
    }

    pub fn set_callee(&mut self, callee: String) {
        self.callee = callee;
    }

    /// Whether this method accepts the operand types every execution can produce
    pub fn is_generic(&self) -> bool {
        self.generic
    }

    pub fn set_generic(&mut self, generic: bool) {
        self.generic = generic;
    }

    /// Whether every value parameter has the same type as in `specialization`
    pub fn is_compatible_to(&self, specialization: &SpecializationData) -> bool {
        if self.generic && specialization.is_generic() {
            return true;
        }
        self.template.parameters_of(ParameterKind::Value).all(|parameter| {
            specialization
                .template()
                .find_parameter(parameter.local_name())
                .is_none_or(|other| other.type_data() == parameter.type_data())
        })
    }
}

/// A method called whenever the node specializes
#[derive(Debug, Clone)]
pub struct SpecializationListenerData {
    template: TemplateMethod,
}

impl SpecializationListenerData {
    pub fn new(template: TemplateMethod) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &TemplateMethod {
        &self.template
    }
}

/// One state of a specializing node
#[derive(Debug, Clone)]
pub struct SpecializationData {
    template: TemplateMethod,
    role: SpecializationRole,
    order: Option<i32>,
    use_specializations_for_generic: bool,
    exceptions: Vec<SpecializationThrowsData>,
    guard_definitions: Vec<String>,
    guards: Vec<GuardData>,
    short_circuits: Vec<ShortCircuitData>,
    reachable: bool,
}

impl SpecializationData {
    /// A declared specialization
    pub fn specialized(template: TemplateMethod, order: Option<i32>, rewrite_on: &[String], guard_definitions: &[String]) -> Self {
        let exceptions = rewrite_on.iter().map(|exception| SpecializationThrowsData::new(&template, exception)).collect();
        Self {
            template,
            role: SpecializationRole::Specialized,
            order,
            use_specializations_for_generic: true,
            exceptions,
            guard_definitions: guard_definitions.to_vec(),
            guards: Vec::new(),
            short_circuits: Vec::new(),
            reachable: true,
        }
    }

    /// The generic fallback, declared or synthesized
    pub fn generic(template: TemplateMethod, use_specializations: bool) -> Self {
        Self {
            template,
            role: SpecializationRole::Generic,
            order: None,
            use_specializations_for_generic: use_specializations,
            exceptions: Vec::new(),
            guard_definitions: Vec::new(),
            guards: Vec::new(),
            short_circuits: Vec::new(),
            reachable: true,
        }
    }

    /// The initial state, sharing the signature of the generic specialization
    pub fn uninitialized(template: TemplateMethod) -> Self {
        Self {
            role: SpecializationRole::Uninitialized,
            ..Self::generic(template, true)
        }
    }

    pub fn template(&self) -> &TemplateMethod {
        &self.template
    }

    pub fn template_mut(&mut self) -> &mut TemplateMethod {
        &mut self.template
    }

    pub fn id(&self) -> &str {
        self.template.id()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.template.set_id(id);
    }

    pub fn method_name(&self) -> &str {
        self.template.method_name()
    }

    pub fn role(&self) -> SpecializationRole {
        self.role
    }

    pub fn is_generic(&self) -> bool {
        self.role == SpecializationRole::Generic
    }

    pub fn is_uninitialized(&self) -> bool {
        self.role == SpecializationRole::Uninitialized
    }

    /// A declared, non-generic specialization
    pub fn is_specialized(&self) -> bool {
        self.role == SpecializationRole::Specialized
    }

    pub fn is_synthetic(&self) -> bool {
        self.template.is_synthetic()
    }

    pub fn order(&self) -> Option<i32> {
        self.order
    }

    pub fn use_specializations_for_generic(&self) -> bool {
        self.use_specializations_for_generic
    }

    pub fn exceptions(&self) -> &[SpecializationThrowsData] {
        &self.exceptions
    }

    pub fn exceptions_mut(&mut self) -> &mut [SpecializationThrowsData] {
        &mut self.exceptions
    }

    pub fn has_exceptions(&self) -> bool {
        !self.exceptions.is_empty()
    }

    pub fn guard_definitions(&self) -> &[String] {
        &self.guard_definitions
    }

    pub fn guards(&self) -> &[GuardData] {
        &self.guards
    }

    pub fn add_guard(&mut self, guard: GuardData) {
        self.guards.push(guard);
    }

    pub fn short_circuits(&self) -> &[ShortCircuitData] {
        &self.short_circuits
    }

    pub fn set_short_circuits(&mut self, short_circuits: Vec<ShortCircuitData>) {
        self.short_circuits = short_circuits;
    }

    pub fn is_reachable(&self) -> bool {
        self.reachable
    }

    pub fn set_reachable(&mut self, reachable: bool) {
        self.reachable = reachable;
    }

    /// Whether executing this specialization can ever lead to another one
    pub fn has_rewrite(&self, children: &[NodeChildData]) -> bool {
        if self.has_exceptions() || !self.guard_definitions.is_empty() {
            return true;
        }
        self.template.signature_parameters().any(|parameter| {
            let Some(child) = children.iter().find(|c| c.name() == parameter.spec_name()) else {
                return false;
            };
            let Some(target) = parameter.type_data() else {
                return false;
            };
            match child.find_executable_type(target) {
                Some(executable) => executable.has_unexpected_value() || executable.ty().needs_cast_to(target),
                None => false,
            }
        })
    }

    /// Same guards and same signature: the later of two such specializations can never be chosen
    pub fn equals_guards(&self, other: &SpecializationData) -> bool {
        self.guard_definitions == other.guard_definitions && self.template.signature_types() == other.template.signature_types()
    }
}

impl MessageContainer for SpecializationData {
    fn element_name(&self) -> String {
        self.template.element_name()
    }

    fn messages(&self) -> &[Diagnostic] {
        self.template.messages()
    }

    fn messages_mut(&mut self) -> &mut Vec<Diagnostic> {
        self.template.messages_mut()
    }

    fn position(&self) -> Option<&SourcePosition> {
        self.template.position()
    }

    fn children(&self) -> Vec<&dyn MessageContainer> {
        let mut children: Vec<&dyn MessageContainer> = Vec::new();
        children.extend(self.exceptions.iter().map(|e| e as &dyn MessageContainer));
        children.extend(self.guards.iter().map(|g| g.template() as &dyn MessageContainer));
        children
    }
}
