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

//! Node model builder
//!
//! Resolves node declarations into `NodeData`. Declarations reference each other through
//! supertypes, child field types and nesting; resolution threads a [`ResolutionMap`] so that a
//! node referring back to a declaration still being resolved is handled without recursion.

use super::lattice::{assign_short_circuits, finalize_specializations};
use super::parsers::{
    ExecutableTypeParser, GenericParser, GuardParser, ParserContext, ShortCircuitParser, SpecializationListenerParser, SpecializationMethodParser, group_executable_types,
};
use super::verify::verify_node;
use super::{ExecutableTypeData, ExecutionKind, NodeChildData, NodeData, NodeFieldData, SpecializationData, SpecializationListenerData};
use crate::config::ParserConfig;
use crate::declaration::{Batch, FieldKind, MethodDeclaration, NodeDeclaration};
use crate::error::CompilerResult;
use crate::naming::{NamingRules, strip_suffix, to_upper_camel_case};
use crate::template::{ActualParameter, Cardinality, ParameterKind, ParameterSpec, TemplateMethod, TemplateMethodParser};
use crate::typesystem::TypeSystemData;
use nodegen_common::MessageContainer;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::{debug, info, trace};

/// Progress of one declaration during resolution
#[derive(Debug, Clone)]
pub enum Resolution {
    /// Resolution has started but not finished; the declaration refers to itself
    InProgress,
    Resolved(Box<NodeData>),
}

/// Declarations resolved so far, keyed by declaration name
pub type ResolutionMap = HashMap<String, Resolution>;

/// Builds the node model for a batch of declarations
pub struct NodeParser<'a> {
    batch: &'a Batch,
    config: &'a ParserConfig,
    rules: NamingRules,
    type_systems: Vec<TypeSystemData>,
}

impl<'a> NodeParser<'a> {
    pub fn new(batch: &'a Batch, config: &'a ParserConfig) -> CompilerResult<Self> {
        let rules = NamingRules::new()?;
        let type_systems = batch.type_systems.iter().map(|declaration| TypeSystemData::from_declaration(declaration, &rules)).collect();
        Ok(Self {
            batch,
            config,
            rules,
            type_systems,
        })
    }

    pub fn naming_rules(&self) -> &NamingRules {
        &self.rules
    }

    /// Resolve every top-level declaration
    pub fn parse_batch(&self) -> Vec<NodeData> {
        let mut map = ResolutionMap::new();
        let nodes: Vec<NodeData> = self.batch.nodes.iter().filter_map(|declaration| self.resolve_node(&declaration.name, &mut map)).collect();
        info!(nodes = nodes.len(), "declarations resolved");
        nodes
    }

    /// Resolve one declaration by name. Returns `None` for unknown names and for declarations
    /// whose resolution is still in progress.
    pub fn resolve_node(&self, name: &str, map: &mut ResolutionMap) -> Option<NodeData> {
        match map.get(name) {
            Some(Resolution::Resolved(node)) => return Some((**node).clone()),
            Some(Resolution::InProgress) => {
                trace!(node = name, "declaration refers to itself");
                return None;
            }
            None => {}
        }

        let declaration = self.batch.find_node(name)?;
        map.insert(name.to_string(), Resolution::InProgress);
        let node = self.parse_node(declaration, map);
        map.insert(name.to_string(), Resolution::Resolved(Box::new(node.clone())));
        Some(node)
    }

    fn parse_node(&self, declaration: &NodeDeclaration, map: &mut ResolutionMap) -> NodeData {
        let node_id = declaration.node_id.clone().unwrap_or_else(|| declaration.name.clone());
        debug!(node = %node_id, "resolving declaration");

        let mut node = NodeData::new(&node_id, &declaration.name);
        node.set_position(declaration.position.clone());
        node.set_private(declaration.private);
        node.set_constructors(declaration.constructors.clone());
        self.verify_identifiers(&mut node, declaration);

        let hierarchy = match self.hierarchy(declaration) {
            Ok(hierarchy) => hierarchy,
            Err(message) => {
                node.add_error(message);
                vec![declaration]
            }
        };
        let type_system = match self.resolve_type_system(&hierarchy) {
            Ok(type_system) => type_system,
            Err(message) => {
                node.add_error(message);
                None
            }
        };
        node.set_type_system(type_system.clone());
        let methods = collect_methods(&hierarchy);

        self.parse_fields(&mut node, &hierarchy, type_system.as_ref(), map);

        for nested in &declaration.nested {
            if let Some(mut nested_node) = self.resolve_node(&nested.name, map) {
                nested_node.set_parent(&node_id);
                node.add_declared_node(nested_node);
            }
        }

        let Some(type_system) = type_system else {
            if methods.iter().any(|m| m.template_markers().next().is_some()) {
                node.add_error(format!("No type system reference found in type hierarchy of {}.", declaration.name));
            }
            return node;
        };

        node.set_executable_types(self.parse_executable_types(&node_id, &type_system, &methods));
        let rejected = self.mark_short_circuits(&mut node, &type_system, &methods);
        node.add_rejected(rejected);
        self.parse_methods(&mut node, &type_system, &methods);

        if hierarchy.iter().any(|d| d.split) {
            self.split(node, &methods)
        } else {
            self.complete(&mut node, &methods);
            node
        }
    }

    fn complete(&self, node: &mut NodeData, methods: &[MethodDeclaration]) {
        finalize_specializations(node);
        assign_short_circuits(node);
        verify_node(node, methods, self.config);
        debug!(node = node.node_id(), errors = node.has_errors(), "node resolved");
    }

    fn verify_identifiers(&self, node: &mut NodeData, declaration: &NodeDeclaration) {
        let names = std::iter::once(node.node_id().to_string())
            .chain(declaration.fields.iter().map(|f| f.name.clone()))
            .chain(declaration.methods.iter().map(|m| m.name.clone()));
        let invalid: Vec<String> = names.filter(|name| !name.is_empty() && !self.rules.is_identifier(name)).collect();
        for name in invalid {
            node.add_error(format!("'{}' is not a valid identifier.", name));
        }
    }

    /// The declaration and its supertypes, root first. Supertypes outside the batch end the chain.
    pub fn hierarchy<'d>(&'d self, declaration: &'d NodeDeclaration) -> Result<Vec<&'d NodeDeclaration>, String> {
        let mut chain = vec![declaration];
        let mut seen = HashSet::from([declaration.name.as_str()]);
        let mut current = declaration;
        while let Some(parent) = current.extends.as_deref() {
            let Some(supertype) = self.batch.find_node(parent) else {
                break;
            };
            if !seen.insert(supertype.name.as_str()) {
                return Err(format!("Cyclic type hierarchy involving {}.", supertype.name));
            }
            chain.push(supertype);
            current = supertype;
        }
        chain.reverse();
        Ok(chain)
    }

    /// Type system of the nearest declaration naming one, else the only type system of the batch
    pub fn resolve_type_system(&self, hierarchy: &[&NodeDeclaration]) -> Result<Option<TypeSystemData>, String> {
        match hierarchy.iter().rev().find_map(|d| d.type_system.as_deref()) {
            Some(name) => self
                .type_systems
                .iter()
                .find(|t| t.name() == name)
                .cloned()
                .map(Some)
                .ok_or_else(|| format!("The type system '{}' is not declared.", name)),
            None if self.type_systems.len() == 1 => Ok(self.type_systems.first().cloned()),
            None => Ok(None),
        }
    }

    fn parse_executable_types(&self, owner: &str, type_system: &TypeSystemData, methods: &[MethodDeclaration]) -> BTreeMap<usize, Vec<ExecutableTypeData>> {
        let context = ParserContext::bare(owner, type_system, self.config);
        let (executables, _) = ExecutableTypeParser::new(context).parse_all(methods);
        group_executable_types(executables)
    }

    fn parse_fields(&self, node: &mut NodeData, hierarchy: &[&NodeDeclaration], type_system: Option<&TypeSystemData>, map: &mut ResolutionMap) {
        let mut fields = Vec::new();
        let mut levels: Vec<Vec<NodeChildData>> = Vec::new();
        let mut names = HashSet::new();

        for declaration in hierarchy {
            let mut level = Vec::new();
            for field in declaration.fields.iter().filter(|f| !f.is_static) {
                if field.name.is_empty() {
                    node.add_error("Field names must not be empty.");
                    continue;
                }
                if !names.insert(field.name.as_str()) {
                    node.add_error(format!("Duplicate field name '{}'.", field.name));
                    continue;
                }

                let dimensions = field.ty.matches("[]").count();
                let node_type = field.ty.trim_end_matches("[]");
                let (cardinality, problem) = match (field.kind, dimensions) {
                    (FieldKind::Plain, _) => {
                        if !field.private {
                            fields.push(NodeFieldData::new(node.node_id(), &field.name, &field.ty, field.position.clone()));
                        }
                        continue;
                    }
                    (FieldKind::Child, 0) => (Cardinality::One, None),
                    (FieldKind::Child, _) => (Cardinality::One, Some(format!("@Child field '{}' must not be an array type; use @Children instead.", field.name))),
                    (FieldKind::Children, 0) => (Cardinality::Many, Some(format!("@Children field '{}' must be an array type.", field.name))),
                    (FieldKind::Children, _) => (Cardinality::Many, None),
                };

                let mut child = NodeChildData::new(node.node_id(), &field.name, &field.ty, node_type, cardinality, dimensions).with_position(field.position.clone());
                if let Some(problem) = problem {
                    child.add_error(problem);
                }
                if !field.execute {
                    child.set_execution_kind(ExecutionKind::Ignore);
                }
                level.push(child);
            }
            levels.push(level);
        }

        let execution_order = hierarchy.iter().rev().find_map(|d| d.execution_order.as_deref());
        let mut children = self.order_children(node, levels, execution_order);
        for child in &mut children {
            self.resolve_child(child, type_system, map);
        }
        node.set_fields(fields);
        node.set_children(children);
    }

    /// Evaluation order: the explicit order if declared, else supertype fields first in
    /// declaration order, else lexicographic when the declarations leave it ambiguous
    fn order_children(&self, node: &mut NodeData, levels: Vec<Vec<NodeChildData>>, execution_order: Option<&[String]>) -> Vec<NodeChildData> {
        if let Some(order) = execution_order {
            let mut children: Vec<NodeChildData> = levels.into_iter().flatten().collect();
            for name in order {
                if !children.iter().any(|c| c.name() == name) {
                    node.add_error(format!("Execution order references unknown field '{}'.", name));
                }
            }
            for child in &children {
                if !order.iter().any(|name| name == child.name()) {
                    node.add_error(format!("Field '{}' is missing from the execution order.", child.name()));
                }
            }
            children.sort_by_key(|c| order.iter().position(|name| name == c.name()).unwrap_or(usize::MAX));
            return children;
        }

        let mut ambiguous = false;
        let mut levels = levels;
        for level in &mut levels {
            let positioned = level.iter().filter(|c| c.position().is_some()).count();
            if positioned == 0 {
                continue;
            }
            let keys: BTreeSet<(u32, u32)> = level.iter().filter_map(|c| c.position().map(|p| p.sort_key())).collect();
            if positioned < level.len() || keys.len() < level.len() {
                ambiguous = true;
            } else {
                level.sort_by_key(|c| c.position().map(|p| p.sort_key()));
            }
        }

        let mut children: Vec<NodeChildData> = levels.into_iter().flatten().collect();
        if ambiguous && children.len() > 1 {
            if self.config.warn_on_lexical_field_order {
                node.add_warning(format!("Field order of {} cannot be determined from the declarations; children are executed in lexicographic order.", node.node_id()));
            }
            children.sort_by(|a, b| a.name().cmp(b.name()));
        }
        children
    }

    fn resolve_child(&self, child: &mut NodeChildData, type_system: Option<&TypeSystemData>, map: &mut ResolutionMap) {
        let Some(declaration) = self.batch.find_node(child.node_type()) else {
            let message = format!("Child '{}' has type {}, which is not a declared node.", child.name(), child.node_type());
            child.add_error(message);
            return;
        };
        let hierarchy = self.hierarchy(declaration).unwrap_or_else(|_| vec![declaration]);
        let child_type_system = self.resolve_type_system(&hierarchy).ok().flatten();

        if let (Some(own), Some(parent)) = (child_type_system.as_ref(), type_system) {
            if own != parent {
                let message = format!("The type system {} of child '{}' does not match the type system {} of the node.", own.name(), child.name(), parent.name());
                child.add_error(message);
                return;
            }
        }
        let Some(effective) = child_type_system.as_ref().or(type_system) else {
            return;
        };

        let child_id = declaration.node_id.clone().unwrap_or_else(|| declaration.name.clone());
        let executables = match self.resolve_node(&declaration.name, map) {
            Some(resolved) if resolved.type_system().is_some() => resolved.executable_types(0).to_vec(),
            _ => {
                let methods = collect_methods(&hierarchy);
                self.parse_executable_types(&child_id, effective, &methods).remove(&0).unwrap_or_default()
            }
        };
        child.resolve(&child_id, executables);

        if !child.is_executed() {
            return;
        }
        if child.executable_types().is_empty() {
            let message = format!("Node type {} of child '{}' declares no execute methods.", child.node_type(), child.name());
            child.add_error(message);
        } else if child.find_any_generic_executable_type().is_none() {
            let message = format!("No generic execute method found for child '{}' of type {}.", child.name(), child.node_type());
            child.add_error(message);
        }
    }

    /// Mark children named by short-circuit methods; methods naming anything else are rejected
    fn mark_short_circuits(&self, node: &mut NodeData, type_system: &TypeSystemData, methods: &[MethodDeclaration]) -> Vec<TemplateMethod> {
        let mut rejected = Vec::new();
        for method in methods {
            let Some(value) = ShortCircuitParser::value_name(method) else {
                continue;
            };
            match node.children_mut().iter_mut().find(|c| c.name() == value && c.is_executed()) {
                Some(child) => child.set_execution_kind(ExecutionKind::ShortCircuit),
                None => {
                    let spec = ParameterSpec::new("return_value", vec![self.config.boolean_type.clone()], ParameterKind::Return);
                    let return_type = ActualParameter::new(spec, method.return_type.clone(), type_system.find_type(&method.return_type).cloned(), None, false);
                    let mut template = TemplateMethod::new(method.name.clone(), node.node_id(), method.clone(), return_type, Vec::new());
                    template.add_error(format!("Invalid short circuit value {}.", value));
                    rejected.push(template);
                }
            }
        }
        rejected
    }

    fn parse_methods(&self, node: &mut NodeData, type_system: &TypeSystemData, methods: &[MethodDeclaration]) {
        let context = ParserContext {
            owner: node.node_id(),
            type_system,
            config: self.config,
            children: node.children(),
            fields: node.fields(),
        };

        let (short_circuits, mut rejected) = ShortCircuitParser::new(context).parse_all(methods);
        let (mut specializations, rejected_specializations) = SpecializationMethodParser::new(context).parse_all(methods);
        let (generics, rejected_generics) = GenericParser::new(context).parse_all(methods);
        let (listeners, rejected_listeners) = SpecializationListenerParser::new(context).parse_all(methods);
        specializations.extend(generics);
        rejected.extend(rejected_specializations);
        rejected.extend(rejected_generics);
        rejected.extend(rejected_listeners);

        for specialization in &mut specializations {
            resolve_guards(context, specialization, methods);
        }

        trace!(
            node = node.node_id(),
            specializations = specializations.len(),
            short_circuits = short_circuits.len(),
            listeners = listeners.len(),
            rejected = rejected.len(),
            "methods parsed"
        );
        node.set_short_circuits(short_circuits);
        node.set_specializations(specializations);
        node.set_listeners(listeners);
        node.add_rejected(rejected);
    }

    /// Replace a node by a container holding one sibling per grouping id
    fn split(&self, mut node: NodeData, methods: &[MethodDeclaration]) -> NodeData {
        let specializations = std::mem::take(node.specializations_mut());
        let listeners: Vec<SpecializationListenerData> = node.listeners().to_vec();
        node.set_listeners(Vec::new());

        let mut groups: BTreeMap<String, Vec<SpecializationData>> = BTreeMap::new();
        for specialization in specializations {
            groups.entry(specialization.template().id().to_string()).or_default().push(specialization);
        }
        let keys: BTreeSet<String> = groups.keys().cloned().collect();
        let base = strip_suffix(node.node_id(), &self.config.node_suffix).to_string();

        for (group, members) in groups {
            let id = format!("{}{}", base, to_upper_camel_case(&group));
            if !self.rules.is_identifier(&id) {
                node.add_error(format!("'{}' is not a valid identifier.", id));
                continue;
            }
            let mut split = node.split_copy(&id);
            let group_listeners = listeners.iter().filter(|l| l.template().id() == group || !keys.contains(l.template().id())).cloned().collect();
            split.set_specializations(members);
            split.set_listeners(group_listeners);
            self.complete(&mut split, methods);
            node.add_declared_node(split);
        }

        node.set_split_container(true);
        debug!(node = node.node_id(), nodes = node.declared_nodes().len(), "node split");
        node
    }
}

fn resolve_guards(context: ParserContext<'_>, specialization: &mut SpecializationData, methods: &[MethodDeclaration]) {
    let names = specialization.guard_definitions().to_vec();
    for name in names {
        let resolved = {
            let parser = GuardParser::new(context, specialization, &name);
            parser.resolve(methods).ok_or_else(|| parser.not_found_message())
        };
        match resolved {
            Ok(guard) => specialization.add_guard(guard),
            Err(message) => specialization.add_error(message),
        }
    }
}

/// Methods of a hierarchy, root first; a method overriding an inherited one takes its place
fn collect_methods(hierarchy: &[&NodeDeclaration]) -> Vec<MethodDeclaration> {
    let mut methods: Vec<MethodDeclaration> = Vec::new();
    for declaration in hierarchy {
        for method in &declaration.methods {
            match methods.iter().position(|existing| existing.same_signature(method)) {
                Some(index) => methods[index] = method.clone(),
                None => methods.push(method.clone()),
            }
        }
    }
    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ARITHMETIC, LOGICAL, parse, parse_node};
    use nodegen_common::Diagnostic;

    fn messages(node: &NodeData) -> Vec<String> {
        let mut out: Vec<Diagnostic> = Vec::new();
        node.collect_messages(&mut out);
        out.into_iter().map(|d| d.message).collect()
    }

    fn batch_with(node: &str) -> String {
        format!(
            r#"{{
                "type_systems": [{{ "name": "SimpleTypes", "types": [{{ "name": "int", "rust": "i32" }}], "generic": {{ "name": "Object", "rust": "Value" }} }}],
                "nodes": [
                    {{ "name": "ValueNode", "methods": [{{ "name": "execute", "return_type": "Object" }}] }},
                    {}
                ]
            }}"#,
            node
        )
    }

    #[test]
    fn test_resolve_arithmetic() {
        let node = parse_node(ARITHMETIC, "AddNode");
        assert!(!node.has_errors(), "{:?}", messages(&node));

        let ids: Vec<&str> = node.specializations().iter().map(|s| s.id()).collect();
        assert_eq!(ids, vec!["Uninitialized", "Int", "Double", "Generic"]);
        assert!(node.needs_factory());
        assert!(node.uses_frame());

        let children: Vec<&str> = node.children().iter().map(|c| c.name()).collect();
        assert_eq!(children, vec!["left", "right"]);
        assert_eq!(node.children()[0].executable_types().len(), 3);
        assert_eq!(node.children()[0].child_node(), Some("ExpressionNode"));

        let generic = node.generic_specialization().unwrap();
        assert!(generic.is_synthetic());
        assert!(generic.template().signature_types().iter().all(|t| t.is_some_and(|t| t.is_generic())));
        assert_eq!(node.specializations()[1].exceptions()[0].transition_to(), Some("Double"));
    }

    #[test]
    fn test_base_node_needs_no_factory() {
        let node = parse_node(ARITHMETIC, "ExpressionNode");
        assert!(!node.needs_factory());
        assert!(node.specializations().is_empty());
        assert_eq!(node.executable_types(0).len(), 3);
    }

    #[test]
    fn test_short_circuits_assigned() {
        let node = parse_node(LOGICAL, "AndNode");
        assert!(!node.has_errors(), "{:?}", messages(&node));
        assert!(node.find_child("right").unwrap().is_short_circuit());

        let generic = node.generic_specialization().unwrap();
        assert!(!generic.is_synthetic());
        assert!(generic.short_circuits()[0].is_generic());
        let specialized = node.specializations().iter().find(|s| s.is_specialized()).unwrap();
        assert!(!specialized.short_circuits()[0].is_generic());

        assert_eq!(generic.short_circuits()[0].callee(), "needs_right");
        assert_eq!(specialized.short_circuits()[0].callee(), "needs_right_boolean");
    }

    #[test]
    fn test_self_referencing_children() {
        let source = batch_with(
            r#"{ "name": "BlockNode",
                 "fields": [{ "name": "body", "type": "BlockNode[]", "kind": "children" }],
                 "methods": [
                     { "name": "execute", "return_type": "Object" },
                     { "name": "do_block", "return_type": "Object", "parameters": [{ "name": "body", "type": "Object[]" }], "annotations": [{ "kind": "specialization" }] }
                 ] }"#,
        );
        let node = parse_node(&source, "BlockNode");
        assert!(!node.has_errors(), "{:?}", messages(&node));
        let body = node.find_child("body").unwrap();
        assert_eq!(body.cardinality(), Cardinality::Many);
        assert_eq!(body.executable_types().len(), 1);
    }

    #[test]
    fn test_unknown_type_system() {
        let source = batch_with(r#"{ "name": "BadNode", "type_system": "Missing" }"#);
        let node = parse_node(&source, "BadNode");
        assert_eq!(messages(&node), vec!["The type system 'Missing' is not declared."]);
    }

    #[test]
    fn test_execution_order_errors() {
        let source = batch_with(
            r#"{ "name": "PairNode",
                 "execution_order": ["second", "third"],
                 "fields": [
                     { "name": "first", "type": "ValueNode", "kind": "child" },
                     { "name": "second", "type": "ValueNode", "kind": "child" }
                 ] }"#,
        );
        let node = parse_node(&source, "PairNode");
        let messages = messages(&node);
        assert!(messages.contains(&"Execution order references unknown field 'third'.".to_string()));
        assert!(messages.contains(&"Field 'first' is missing from the execution order.".to_string()));
        assert_eq!(node.children()[0].name(), "second");
    }

    #[test]
    fn test_lexical_order_warning() {
        let source = batch_with(
            r#"{ "name": "PairNode",
                 "fields": [
                     { "name": "zeta", "type": "ValueNode", "kind": "child", "position": { "line": 3 } },
                     { "name": "alpha", "type": "ValueNode", "kind": "child" }
                 ] }"#,
        );
        let node = parse_node(&source, "PairNode");
        assert!(!node.has_errors());
        assert_eq!(node.messages().len(), 1);
        assert_eq!(node.children()[0].name(), "alpha");
    }

    #[test]
    fn test_invalid_short_circuit_value() {
        let source = batch_with(
            r#"{ "name": "OrNode",
                 "fields": [{ "name": "left", "type": "ValueNode", "kind": "child" }],
                 "methods": [{ "name": "needs_other", "return_type": "boolean", "annotations": [{ "kind": "short_circuit", "value": "other" }] }] }"#,
        );
        let node = parse_node(&source, "OrNode");
        assert_eq!(messages(&node), vec!["Invalid short circuit value other."]);
    }

    #[test]
    fn test_guard_not_found() {
        let source = batch_with(
            r#"{ "name": "NegNode",
                 "fields": [{ "name": "operand", "type": "ValueNode", "kind": "child" }],
                 "methods": [{ "name": "do_int", "return_type": "int", "parameters": [{ "name": "operand", "type": "int" }],
                               "annotations": [{ "kind": "specialization", "guards": ["is_positive"] }] }] }"#,
        );
        let node = parse_node(&source, "NegNode");
        assert!(messages(&node).iter().any(|m| m.starts_with("Guard with method name 'is_positive' not found.")));
    }

    #[test]
    fn test_cyclic_hierarchy() {
        let source = batch_with(r#"{ "name": "LoopNode", "extends": "LoopNode" }"#);
        let node = parse_node(&source, "LoopNode");
        assert_eq!(messages(&node), vec!["Cyclic type hierarchy involving LoopNode."]);
    }

    #[test]
    fn test_split_by_node_id() {
        let source = batch_with(
            r#"{ "name": "MathNode", "split": true,
                 "fields": [{ "name": "operand", "type": "ValueNode", "kind": "child" }],
                 "methods": [
                     { "name": "sin_int", "return_type": "int", "parameters": [{ "name": "operand", "type": "int" }],
                       "annotations": [{ "kind": "specialization" }, { "kind": "node_id", "value": "sin" }] },
                     { "name": "cos_int", "return_type": "int", "parameters": [{ "name": "operand", "type": "int" }],
                       "annotations": [{ "kind": "specialization" }, { "kind": "node_id", "value": "cos" }] }
                 ] }"#,
        );
        let nodes = parse(&source);
        let container = nodes.iter().find(|n| n.node_id() == "MathNode").unwrap();
        assert!(container.is_split_container());
        assert!(container.specializations().is_empty());

        let ids: Vec<&str> = container.declared_nodes().iter().map(|n| n.node_id()).collect();
        assert_eq!(ids, vec!["MathCos", "MathSin"]);
        assert!(container.declared_nodes().iter().all(|n| n.parent() == Some("MathNode")));
    }

    #[test]
    fn test_nested_declarations() {
        let source = batch_with(r#"{ "name": "OuterNode", "nested": [{ "name": "InnerNode" }] }"#);
        let node = parse_node(&source, "OuterNode");
        assert_eq!(node.declared_nodes()[0].node_id(), "InnerNode");
        assert_eq!(node.declared_nodes()[0].parent(), Some("OuterNode"));
    }
}
