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


//! Names of generated items

use crate::naming::{NamingRules, strip_suffix};
use crate::node::{NodeData, SpecializationData};

/// Names of the items generated for one node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeNames {
    node_id: String,
    user_type: String,
    base: String,
    suffix: String,
    module: String,
}

impl NodeNames {
    pub fn new(node: &NodeData, rules: &NamingRules, node_suffix: &str) -> Self {
        Self {
            node_id: node.node_id().to_string(),
            user_type: node.declaration_name().to_string(),
            base: strip_suffix(node.node_id(), node_suffix).to_string(),
            suffix: node_suffix.to_string(),
            module: rules.to_snake_case(node.node_id()),
        }
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// The hand-written node type the generated code wraps
    pub fn user_type(&self) -> &str {
        &self.user_type
    }

    /// `AddNode` -> `AddNodeGen`
    pub fn generated(&self) -> String {
        format!("{}Gen", self.node_id)
    }

    /// `AddNode` -> `AddNodeSpecialization`
    pub fn kind(&self) -> String {
        format!("{}Specialization", self.node_id)
    }

    /// `AddNode` -> `AddNodeFactory`
    pub fn factory(&self) -> String {
        format!("{}Factory", self.node_id)
    }

    /// Module the node's file becomes
    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn file_name(&self) -> String {
        format!("{}.rs", self.module)
    }

    /// `Kind::Int`
    pub fn variant(&self, specialization: &SpecializationData) -> String {
        format!("{}::{}", self.kind(), specialization.id())
    }

    /// Class name reported for a state, `AddNode` + `Int` -> `AddIntNode`
    pub fn class_name(&self, specialization: &SpecializationData) -> String {
        format!("{}{}{}", self.base, specialization.id(), self.suffix)
    }

    /// Private method implementing one execute method in one state: `int_execute_int`
    pub fn state_function(&self, rules: &NamingRules, specialization: &SpecializationData, method: &str) -> String {
        format!("{}_{}", rules.to_snake_case(specialization.id()), method)
    }
}
