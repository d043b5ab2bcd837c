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

//! Annotation records attached to method declarations

use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Marker attached to a method declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// The method implements one specialization of the operation
    Specialization {
        /// Explicit order; unspecified when absent
        #[serde(default)]
        order: Option<i32>,
        /// Failure conditions that trigger a rewrite to the next specialization
        #[serde(default)]
        rewrite_on: Vec<String>,
        /// Names of guard methods that must all hold
        #[serde(default)]
        guards: Vec<String>,
    },
    /// The method implements the generic fallback
    Generic {
        /// Whether the generic execution first tries the specializations in order
        #[serde(default = "default_true")]
        use_specializations: bool,
    },
    /// The method decides whether the named child is evaluated at all
    ShortCircuit {
        /// Name of the short-circuited child
        value: String,
    },
    /// The method is called every time the node specializes
    SpecializationListener,
    /// Overrides the grouping id of the method for split nodes
    NodeId {
        /// Grouping id
        value: String,
    },
}

impl Annotation {
    /// Kind name used in messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Annotation::Specialization { .. } => "Specialization",
            Annotation::Generic { .. } => "Generic",
            Annotation::ShortCircuit { .. } => "ShortCircuit",
            Annotation::SpecializationListener => "SpecializationListener",
            Annotation::NodeId { .. } => "NodeId",
        }
    }

    /// Whether the annotation selects one of the template parsers
    pub fn is_template_marker(&self) -> bool {
        !matches!(self, Annotation::NodeId { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specialization_defaults() {
        let annotation: Annotation = serde_json::from_str(r#"{"kind": "specialization"}"#).unwrap();
        assert_eq!(
            annotation,
            Annotation::Specialization {
                order: None,
                rewrite_on: vec![],
                guards: vec![]
            }
        );
    }

    #[test]
    fn test_generic_uses_specializations_by_default() {
        let annotation: Annotation = serde_json::from_str(r#"{"kind": "generic"}"#).unwrap();
        assert_eq!(annotation, Annotation::Generic { use_specializations: true });
        assert_eq!(annotation.kind_name(), "Generic");
    }

    #[test]
    fn test_node_id_is_not_a_template_marker() {
        let annotation: Annotation = serde_json::from_str(r#"{"kind": "node_id", "value": "sin"}"#).unwrap();
        assert!(!annotation.is_template_marker());
        assert!(Annotation::SpecializationListener.is_template_marker());
    }
}
