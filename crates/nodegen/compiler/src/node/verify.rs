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

//! Structural checks run on a finalized node

use super::NodeData;
use crate::config::ParserConfig;
use crate::declaration::MethodDeclaration;
use nodegen_common::MessageContainer;

/// Run every structural check. Problems are recorded on the node and its members.
pub fn verify_node(node: &mut NodeData, methods: &[MethodDeclaration], config: &ParserConfig) {
    verify_private(node);
    verify_missing_abstract_methods(node, methods);
    verify_constructors(node);
    verify_naming_convention(node, &config.short_circuit_prefix);
    verify_frame_usage(node);
}

/// Private declarations cannot carry specializations
pub fn verify_private(node: &mut NodeData) {
    if node.is_private() && node.specializations().iter().any(|s| s.is_specialized()) {
        node.add_error("Classes containing a @Specialization annotation must not be private.");
    }
}

fn is_accessor(method: &MethodDeclaration, name: &str) -> bool {
    method.parameters.is_empty() && (method.name == name || method.name.strip_prefix("get_") == Some(name))
}

/// Abstract methods must be implemented by a template method or be field accessors
pub fn verify_missing_abstract_methods(node: &mut NodeData, methods: &[MethodDeclaration]) {
    if !node.needs_factory() {
        return;
    }

    let missing: Vec<String> = methods
        .iter()
        .filter(|m| m.modifiers.is_abstract)
        .filter(|m| !node.all_template_methods().iter().any(|t| t.method().is_some_and(|used| used.same_signature(m))))
        .filter(|m| !node.fields().iter().any(|f| is_accessor(m, f.name())))
        .filter(|m| !node.children().iter().any(|c| is_accessor(m, c.name())))
        .map(MethodDeclaration::readable_signature)
        .collect();

    for signature in missing {
        let message = format!("The type {} must implement the inherited abstract method {}.", node.declaration_name(), signature);
        node.add_error(message);
    }
}

/// A rewriting node needs a public copy constructor next to at least one other constructor
pub fn verify_constructors(node: &mut NodeData) {
    if !node.needs_rewrites() {
        return;
    }
    if node.constructors().iter().all(|c| c.parameters.is_empty()) {
        return;
    }

    let name = node.declaration_name().to_string();
    let message = match node.constructors().iter().find(|c| c.is_copy_constructor(&name)) {
        Some(copy) if copy.private => Some("The specialization constructor must not be private.".to_string()),
        Some(_) if node.constructors().len() <= 1 => {
            Some("The specialization constructor must not be the only constructor. The definition of an alternative constructor is required.".to_string())
        }
        Some(_) => None,
        None => Some(format!("Specialization constructor '{}(previous_node: &{})' is required.", name, name)),
    };
    if let Some(message) = message {
        node.add_error(message);
    }
}

/// Short-circuit methods must start with the configured prefix
pub fn verify_naming_convention(node: &mut NodeData, prefix: &str) {
    for short_circuit in node.short_circuits_mut() {
        let name = short_circuit.method_name().to_string();
        if name.len() < 3 || !name.starts_with(prefix) {
            short_circuit.template_mut().add_error(format!("Naming convention: method name must start with '{}'.", prefix));
        }
    }
}

/// Execute methods must agree on the frame, and children needing one require it of the node
pub fn verify_frame_usage(node: &mut NodeData) {
    let framed = node.all_executable_types().filter(|e| e.has_frame()).count();
    let total = node.all_executable_types().count();
    if framed != 0 && framed != total {
        node.add_error("All execute methods must consistently declare the frame parameter.");
        return;
    }
    if total == 0 || framed != 0 {
        return;
    }

    let node_name = node.node_id().to_string();
    for child in node.children_mut().iter_mut().filter(|c| c.is_executed()) {
        if child.executable_types().iter().any(|e| e.has_frame()) {
            let message = format!("Child '{}' requires a frame but the execute methods of {} do not declare one.", child.name(), node_name);
            child.add_error(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{ConstructorDeclaration, Modifiers, ParameterDeclaration};
    use crate::node::SpecializationData;
    use crate::template::{ActualParameter, ParameterKind, ParameterSpec, TemplateMethod};
    use crate::typesystem::tests::simple_types;

    fn constructor(parameters: &[(&str, &str)], private: bool) -> ConstructorDeclaration {
        ConstructorDeclaration {
            name: "new".to_string(),
            parameters: parameters.iter().map(|(n, t)| ParameterDeclaration::new(*n, *t)).collect(),
            private,
            position: None,
        }
    }

    fn rewriting_node() -> NodeData {
        let ts = simple_types();
        let return_type = ActualParameter::typed(ParameterSpec::new("returnValue", vec![], ParameterKind::Return), ts.find_type("int").unwrap().clone());
        let template = TemplateMethod::synthetic("doInt", "AddNode", return_type, vec![]);
        let mut node = NodeData::new("AddNode", "AddNode");
        node.set_specializations(vec![SpecializationData::specialized(template, None, &["ArithmeticException".to_string()], &[])]);
        node
    }

    fn first_error(node: &NodeData) -> Option<&str> {
        node.messages().first().map(|d| d.message.as_str())
    }

    #[test]
    fn test_copy_constructor_required() {
        let mut node = rewriting_node();
        node.set_constructors(vec![constructor(&[("value", "int")], false)]);
        verify_constructors(&mut node);
        assert_eq!(first_error(&node), Some("Specialization constructor 'AddNode(previous_node: &AddNode)' is required."));
    }

    #[test]
    fn test_copy_constructor_rules() {
        let mut node = rewriting_node();
        node.set_constructors(vec![constructor(&[("previous", "&AddNode")], false)]);
        verify_constructors(&mut node);
        assert!(first_error(&node).unwrap().starts_with("The specialization constructor must not be the only constructor."));

        let mut node = rewriting_node();
        node.set_constructors(vec![constructor(&[], false), constructor(&[("previous", "&AddNode")], true)]);
        verify_constructors(&mut node);
        assert_eq!(first_error(&node), Some("The specialization constructor must not be private."));

        let mut node = rewriting_node();
        node.set_constructors(vec![constructor(&[("value", "int")], false), constructor(&[("previous", "&AddNode")], false)]);
        verify_constructors(&mut node);
        assert!(!node.has_errors());
    }

    #[test]
    fn test_default_constructors_only() {
        let mut node = rewriting_node();
        node.set_constructors(vec![constructor(&[], false)]);
        verify_constructors(&mut node);
        assert!(!node.has_errors());
    }

    #[test]
    fn test_abstract_methods() {
        let mut node = rewriting_node();
        let abstract_method = |name: &str| MethodDeclaration {
            name: name.to_string(),
            return_type: "int".to_string(),
            modifiers: Modifiers { is_abstract: true, ..Default::default() },
            ..Default::default()
        };
        verify_missing_abstract_methods(&mut node, &[abstract_method("get_value")]);
        assert_eq!(first_error(&node), Some("The type AddNode must implement the inherited abstract method get_value()."));
    }

    #[test]
    fn test_private_node() {
        let mut node = rewriting_node();
        node.set_private(true);
        verify_private(&mut node);
        assert_eq!(first_error(&node), Some("Classes containing a @Specialization annotation must not be private."));
    }
}
