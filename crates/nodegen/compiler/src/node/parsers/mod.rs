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

//! Template parsers for the roles a node method can play

pub mod executable;
pub mod generic;
pub mod guard;
pub mod listener;
pub mod short_circuit;
pub mod specialization;

pub use executable::{ExecutableTypeParser, group_executable_types};
pub use generic::GenericParser;
pub use guard::GuardParser;
pub use listener::SpecializationListenerParser;
pub use short_circuit::ShortCircuitParser;
pub use specialization::SpecializationMethodParser;

use super::{NodeChildData, NodeFieldData};
use crate::config::ParserConfig;
use crate::declaration::{Annotation, MethodDeclaration};
use crate::template::{Cardinality, MethodSpec, ParameterKind, ParameterSpec};
use crate::typesystem::TypeSystemData;

/// What the parsers need to know about the node they work on
#[derive(Debug, Clone, Copy)]
pub struct ParserContext<'a> {
    pub owner: &'a str,
    pub type_system: &'a TypeSystemData,
    pub config: &'a ParserConfig,
    pub children: &'a [NodeChildData],
    pub fields: &'a [NodeFieldData],
}

impl<'a> ParserContext<'a> {
    /// Context for parsing execute methods, which never refer to children or fields
    pub fn bare(owner: &'a str, type_system: &'a TypeSystemData, config: &'a ParserConfig) -> Self {
        Self {
            owner,
            type_system,
            config,
            children: &[],
            fields: &[],
        }
    }

    pub fn frame_spec(&self) -> ParameterSpec {
        ParameterSpec::new("frame", vec![self.config.frame_type.clone()], ParameterKind::Frame)
    }

    pub fn boolean_spec(&self, name: &str, kind: ParameterKind) -> ParameterSpec {
        ParameterSpec::new(name, vec![self.config.boolean_type.clone()], kind)
    }

    /// Optional parameters every template may take: the frame and the plain fields
    pub fn add_optional_parameters(&self, spec: &mut MethodSpec) {
        spec.add_optional(self.frame_spec());
        for field in self.fields {
            spec.add_optional(ParameterSpec::new(field.name(), vec![field.ty().to_string()], ParameterKind::Local));
        }
    }

    /// Signature parameter for the value of `child`
    pub fn value_spec(&self, child: &NodeChildData, allowed_types: Vec<String>) -> ParameterSpec {
        ParameterSpec::new(child.name(), allowed_types, ParameterKind::Value)
            .with_cardinality(child.cardinality())
            .as_signature()
    }

    /// Flag and value specifications of the executed children, stopping before `until`
    pub fn add_child_parameters(&self, spec: &mut MethodSpec, until: Option<&str>, value_types: impl Fn(&NodeChildData) -> Vec<String>) {
        for child in self.children.iter().filter(|c| c.is_executed()) {
            if until == Some(child.name()) {
                break;
            }
            if child.is_short_circuit() {
                spec.add_required(self.boolean_spec(&child.short_circuit_flag(), ParameterKind::ShortCircuitFlag));
            }
            spec.add_required(self.value_spec(child, value_types(child)));
        }
    }

    /// Specification shared by specializations and listeners
    pub fn create_default_method_spec(&self, return_types: Vec<String>, value_types: impl Fn(&NodeChildData) -> Vec<String>) -> MethodSpec {
        let mut spec = MethodSpec::new(ParameterSpec::new("return_value", return_types, ParameterKind::Return));
        self.add_optional_parameters(&mut spec);
        self.add_child_parameters(&mut spec, None, value_types);
        spec
    }

    /// Value types plus the generic type
    pub fn all_types(&self) -> Vec<String> {
        self.type_system.all_type_names()
    }

    /// Whether any child of the node is an array of children
    pub fn has_many_children(&self) -> bool {
        self.children.iter().any(|c| c.cardinality() == Cardinality::Many)
    }
}

/// Whether a method carries the given marker kind
pub fn has_marker(method: &MethodDeclaration, kind: &str) -> bool {
    method.annotations.iter().any(|a| a.kind_name() == kind)
}

/// First annotation matching `select`
pub fn find_annotation<'m, T>(method: &'m MethodDeclaration, select: impl Fn(&'m Annotation) -> Option<T>) -> Option<T> {
    method.annotations.iter().find_map(select)
}
