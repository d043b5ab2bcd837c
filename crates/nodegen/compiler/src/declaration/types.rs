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

//! Declaration records read from the batch file

use super::Annotation;
use crate::error::{CompilerError, CompilerResult};
use nodegen_common::SourcePosition;
use serde::{Deserialize, Serialize};

fn default_void() -> String {
    "void".to_string()
}

fn default_constructor_name() -> String {
    "new".to_string()
}

fn default_true() -> bool {
    true
}

/// One generation run: type systems plus the node declarations that use them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Batch {
    #[serde(default)]
    pub type_systems: Vec<TypeSystemDeclaration>,
    #[serde(default)]
    pub nodes: Vec<NodeDeclaration>,
}

impl Batch {
    /// Decode a batch from JSON
    pub fn from_json(source: &str) -> CompilerResult<Self> {
        serde_json::from_str(source).map_err(CompilerError::from)
    }

    /// Find a declaration by name, searching nested declarations as well
    pub fn find_node(&self, name: &str) -> Option<&NodeDeclaration> {
        fn search<'a>(nodes: &'a [NodeDeclaration], name: &str) -> Option<&'a NodeDeclaration> {
            for node in nodes {
                if node.name == name {
                    return Some(node);
                }
                if let Some(found) = search(&node.nested, name) {
                    return Some(found);
                }
            }
            None
        }
        search(&self.nodes, name)
    }

    /// Every declaration in the batch, top-level first, nested ones after their parent
    pub fn all_nodes(&self) -> Vec<&NodeDeclaration> {
        fn collect<'a>(nodes: &'a [NodeDeclaration], out: &mut Vec<&'a NodeDeclaration>) {
            for node in nodes {
                out.push(node);
                collect(&node.nested, out);
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }
}

/// A named set of value types with a generic supertype
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeSystemDeclaration {
    pub name: String,
    /// Path of the type-system item in generated code (`crate::types::SimpleTypes`)
    #[serde(default)]
    pub path: Option<String>,
    /// Value types, most specific first
    pub types: Vec<TypeDeclaration>,
    /// The generic type every value type converts into
    pub generic: TypeDeclaration,
    #[serde(default)]
    pub position: Option<SourcePosition>,
}

/// A value type of a type system
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    /// Name used in declarations (`int`)
    pub name: String,
    /// Rust type used in generated code (`i32`)
    pub rust: String,
}

/// A declared interpreter node type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeDeclaration {
    pub name: String,
    /// Supertype whose members are inherited
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub type_system: Option<String>,
    /// Explicit evaluation order of the children
    #[serde(default)]
    pub execution_order: Option<Vec<String>>,
    /// Split the specializations into one node per grouping id
    #[serde(default)]
    pub split: bool,
    /// Overrides the node id derived from the name
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
    #[serde(default)]
    pub constructors: Vec<ConstructorDeclaration>,
    #[serde(default)]
    pub nested: Vec<NodeDeclaration>,
    #[serde(default)]
    pub position: Option<SourcePosition>,
}

/// How a field takes part in execution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Plain data field, usable as a local parameter
    #[default]
    Plain,
    /// A single child node
    Child,
    /// An array of child nodes
    Children,
}

/// A field of a node declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub kind: FieldKind,
    /// Children that are declared but not evaluated by the generated code
    #[serde(default = "default_true")]
    pub execute: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub position: Option<SourcePosition>,
}

/// Method modifiers relevant to the generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

/// A formal parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl ParameterDeclaration {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self { name: name.into(), ty: ty.into() }
    }
}

/// A method of a node declaration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default = "default_void")]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    /// Failure conditions the method may signal
    #[serde(default)]
    pub throws: Vec<String>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub position: Option<SourcePosition>,
}

impl MethodDeclaration {
    /// Readable signature used in messages: `name(int, double)`
    pub fn readable_signature(&self) -> String {
        let types: Vec<&str> = self.parameters.iter().map(|p| p.ty.as_str()).collect();
        format!("{}({})", self.name, types.join(", "))
    }

    /// Same name and parameter types, so one overrides the other
    pub fn same_signature(&self, other: &MethodDeclaration) -> bool {
        self.name == other.name && self.parameters.iter().map(|p| &p.ty).eq(other.parameters.iter().map(|p| &p.ty))
    }

    /// Annotations that select a template parser
    pub fn template_markers(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|a| a.is_template_marker())
    }

    /// Explicit grouping id, if any
    pub fn node_id(&self) -> Option<&str> {
        self.annotations.iter().find_map(|a| match a {
            Annotation::NodeId { value } => Some(value.as_str()),
            _ => None,
        })
    }
}

/// A constructor of a node declaration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstructorDeclaration {
    #[serde(default = "default_constructor_name")]
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDeclaration>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub position: Option<SourcePosition>,
}

impl ConstructorDeclaration {
    /// Whether this constructor takes exactly one parameter of the node type itself
    pub fn is_copy_constructor(&self, node_name: &str) -> bool {
        self.parameters.len() == 1 && strip_reference(&self.parameters[0].ty) == node_name
    }
}

/// Drop a leading `&` so `&AddNode` and `AddNode` name the same type
pub fn strip_reference(ty: &str) -> &str {
    ty.trim_start_matches('&').trim_start_matches("mut ").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BATCH: &str = r#"{
        "type_systems": [{
            "name": "SimpleTypes",
            "types": [{"name": "int", "rust": "i32"}],
            "generic": {"name": "Object", "rust": "Value"}
        }],
        "nodes": [{
            "name": "MathNode",
            "fields": [{"name": "operand", "type": "ExpressionNode", "kind": "child"}],
            "methods": [{"name": "sin", "return_type": "Object", "annotations": [{"kind": "specialization"}]}],
            "nested": [{"name": "InnerNode"}]
        }]
    }"#;

    #[test]
    fn test_decode_batch() {
        let batch = Batch::from_json(BATCH).unwrap();
        assert_eq!(batch.type_systems.len(), 1);
        let node = batch.find_node("MathNode").unwrap();
        assert_eq!(node.fields[0].kind, FieldKind::Child);
        assert!(node.fields[0].execute);
        assert!(batch.find_node("InnerNode").is_some());
        assert_eq!(batch.all_nodes().len(), 2);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(Batch::from_json("{ nodes: ").is_err());
    }

    #[test]
    fn test_copy_constructor_detection() {
        let constructor = ConstructorDeclaration {
            name: "from_previous".to_string(),
            parameters: vec![ParameterDeclaration::new("previous", "&AddNode")],
            private: false,
            position: None,
        };
        assert!(constructor.is_copy_constructor("AddNode"));
        assert!(!constructor.is_copy_constructor("SubNode"));
    }

    #[test]
    fn test_readable_signature() {
        let method = MethodDeclaration {
            name: "add".to_string(),
            parameters: vec![ParameterDeclaration::new("left", "int"), ParameterDeclaration::new("right", "int")],
            ..Default::default()
        };
        assert_eq!(method.readable_signature(), "add(int, int)");
    }
}
