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

//! Specialization lattice
//!
//! Orders the specializations of a node, synthesizes the generic and uninitialized states when
//! the node can rewrite itself, assigns ids and computes reachability.

use super::{NodeData, ShortCircuitData, SpecializationData};
use crate::naming::capitalize;
use crate::template::{ActualParameter, ParameterKind, TemplateMethod};
use crate::typesystem::TypeData;
use nodegen_common::MessageContainer;
use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, trace};

/// Id of the synthesized or declared generic specialization
pub const GENERIC_ID: &str = "Generic";
/// Id of the initial state
pub const UNINITIALIZED_ID: &str = "Uninitialized";

fn compare_optional_types(a: Option<&TypeData>, b: Option<&TypeData>) -> Ordering {
    let rank = |t: Option<&TypeData>| t.map(TypeData::rank).unwrap_or(usize::MAX - 1);
    rank(a).cmp(&rank(b))
}

/// Order two templates by the specificity of their signatures.
///
/// Parameters are compared position by position; every position must agree in direction (ties
/// allowed), otherwise the templates are incomparable. The return type breaks remaining ties.
pub fn compare_by_signature(a: &TemplateMethod, b: &TemplateMethod) -> Ordering {
    let first = a.signature_types();
    let second = b.signature_types();
    if first.len() != second.len() {
        return second.len().cmp(&first.len());
    }

    let mut result = Ordering::Equal;
    for (left, right) in first.iter().zip(&second).skip(1) {
        let position = compare_optional_types(*left, *right);
        if result == Ordering::Equal {
            result = position;
        } else if position != Ordering::Equal && position != result {
            return Ordering::Equal;
        }
    }

    if result == Ordering::Equal && !first.is_empty() {
        result = compare_optional_types(first[0], second[0]);
    }
    result
}

/// Total order used for linearization: explicit orders, then role, then signature
pub fn compare_specializations(a: &SpecializationData, b: &SpecializationData) -> Ordering {
    if let (Some(x), Some(y)) = (a.order(), b.order()) {
        return x.cmp(&y);
    }
    if a.is_uninitialized() != b.is_uninitialized() {
        return if a.is_uninitialized() { Ordering::Less } else { Ordering::Greater };
    }
    if a.is_generic() != b.is_generic() {
        return if a.is_generic() { Ordering::Greater } else { Ordering::Less };
    }
    compare_by_signature(a.template(), b.template())
}

/// Check explicit orders against the lattice. Stops at the first conflict.
pub fn verify_specialization_order(specializations: &mut [SpecializationData]) {
    let declared: Vec<usize> = (0..specializations.len()).filter(|&i| specializations[i].is_specialized()).collect();
    for (n, &i) in declared.iter().enumerate() {
        for &j in &declared[n + 1..] {
            let inferred = compare_by_signature(specializations[i].template(), specializations[j].template());
            match (specializations[i].order(), specializations[j].order()) {
                (Some(first), Some(second)) => {
                    let explicit = first.cmp(&second);
                    if explicit == Ordering::Equal {
                        let message = format!("Order value {} used multiple times", first);
                        specializations[i].add_error(message.clone());
                        specializations[j].add_error(message);
                        return;
                    }
                    if inferred != Ordering::Equal && inferred != explicit {
                        let message = format!("Explicit order values {} and {} are inconsistent with type lattice ordering.", first, second);
                        specializations[i].add_error(message.clone());
                        specializations[j].add_error(message);
                        return;
                    }
                }
                (first, _) if inferred == Ordering::Equal => {
                    let target = if first.is_none() { i } else { j };
                    specializations[target].add_error("Cannot calculate a consistent order for this specialization. Define the order attribute to resolve this.");
                    return;
                }
                _ => {}
            }
        }
    }
}

/// Sort specializations in lattice order
pub fn linearize(node: &mut NodeData) {
    let specializations = std::mem::take(node.specializations_mut());
    let mut graph = DiGraph::<usize, ()>::new();
    let indices: Vec<_> = (0..specializations.len()).map(|i| graph.add_node(i)).collect();
    for i in 0..specializations.len() {
        for j in i + 1..specializations.len() {
            match compare_specializations(&specializations[i], &specializations[j]) {
                Ordering::Less => {
                    graph.add_edge(indices[i], indices[j], ());
                }
                Ordering::Greater => {
                    graph.add_edge(indices[j], indices[i], ());
                }
                Ordering::Equal => {}
            }
        }
    }

    match toposort(&graph, None) {
        Ok(order) => {
            let mut slots: Vec<Option<SpecializationData>> = specializations.into_iter().map(Some).collect();
            let sorted = order.into_iter().filter_map(|index| slots[graph[index]].take()).collect();
            node.set_specializations(sorted);
        }
        Err(cycle) => {
            let mut specializations = specializations;
            let culprit = graph[cycle.node_id()];
            specializations[culprit].add_error("Cannot calculate a consistent order for this specialization. Define the order attribute to resolve this.");
            node.set_specializations(specializations);
        }
    }
}

fn type_id(parameter: &ActualParameter) -> String {
    match parameter.type_data() {
        Some(ty) => ty.id_part(),
        None => capitalize(parameter.declared_type().trim_end_matches("[]")),
    }
}

/// Derive short, unique ids from the signatures of the given specializations.
///
/// Positions on which all specializations agree are dropped, a signature made of one repeated
/// type collapses to that type, an empty signature becomes `Default` and duplicates get a
/// counter appended in order.
pub fn calculate_specialization_ids(templates: &[&TemplateMethod]) -> Vec<String> {
    let signatures: Vec<Vec<String>> = templates
        .iter()
        .map(|t| std::iter::once(t.return_type()).chain(t.signature_parameters()).map(type_id).collect())
        .collect();

    let shared_length = signatures.iter().map(Vec::len).min().unwrap_or(0);
    let agreeing: BTreeSet<usize> = (0..shared_length).filter(|&p| signatures.iter().all(|s| s[p] == signatures[0][p])).collect();

    let names: Vec<String> = signatures
        .into_iter()
        .map(|signature| {
            let mut reduced: Vec<String> = signature.into_iter().enumerate().filter(|(p, _)| !agreeing.contains(p)).map(|(_, t)| t).collect();
            if reduced.len() > 1 && reduced.iter().all(|t| *t == reduced[0]) {
                reduced.truncate(1);
            }
            if reduced.is_empty() { "Default".to_string() } else { reduced.concat() }
        })
        .collect();

    let mut totals: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *totals.entry(name.as_str()).or_default() += 1;
    }
    // A counted id must not shadow a name that is already taken, e.g. `Int0` from a type `int0`
    let mut taken: HashSet<String> = names.iter().filter(|name| totals[name.as_str()] == 1).cloned().collect();
    let mut counters: HashMap<&str, usize> = HashMap::new();
    names
        .iter()
        .map(|name| {
            if totals[name.as_str()] == 1 {
                return name.clone();
            }
            let counter = counters.entry(name.as_str()).or_default();
            let mut id = format!("{}{}", name, counter);
            while taken.contains(&id) {
                *counter += 1;
                id = format!("{}{}", name, counter);
            }
            *counter += 1;
            taken.insert(id.clone());
            id
        })
        .collect()
}

/// Type of the synthesized generic at one signature position
fn generic_position_type(node: &NodeData, parameter: &ActualParameter, position: usize, generic: &TypeData) -> TypeData {
    let types: BTreeSet<&str> = node
        .specializations()
        .iter()
        .filter(|s| s.is_specialized())
        .filter_map(|s| s.template().signature_parameters().nth(position).and_then(|p| p.type_data()))
        .map(TypeData::name)
        .collect();
    let Some(child) = node.find_child(parameter.spec_name()) else {
        return generic.clone();
    };

    if types.len() == 1 {
        let single = node
            .specializations()
            .iter()
            .find_map(|s| s.template().signature_parameters().nth(position).and_then(|p| p.type_data()).cloned());
        if let Some(single) = single {
            if child.find_executable_type(&single).is_some_and(|e| !e.has_unexpected_value()) {
                return single;
            }
        }
    }
    child.find_any_generic_executable_type().map(|e| e.ty().clone()).unwrap_or_else(|| generic.clone())
}

/// Build the generic fallback for a node that declares none
pub fn create_generic_specialization(node: &NodeData) -> Option<SpecializationData> {
    let type_system = node.type_system()?;
    let generic = type_system.generic_type().clone();
    let first = node.specializations().iter().find(|s| s.is_specialized())?;

    let mut parameters = Vec::new();
    let mut position = 0;
    for parameter in first.template().parameters() {
        match parameter.kind() {
            ParameterKind::Value => {
                let mut widened = parameter.clone();
                widened.set_type_data(generic_position_type(node, parameter, position, &generic));
                parameters.push(widened);
                position += 1;
            }
            ParameterKind::ShortCircuitFlag => parameters.push(parameter.clone()),
            _ => {}
        }
    }

    let return_type = ActualParameter::typed(first.template().return_type().spec().clone(), generic);
    let template = TemplateMethod::synthetic(GENERIC_ID, node.node_id(), return_type, parameters);
    Some(SpecializationData::generic(template, true))
}

/// Widen the value parameters of a declared generic where the specializations disagree
fn widen_generic(node: &mut NodeData, generic_index: usize) {
    let mut replacements = Vec::new();
    {
        let generic = &node.specializations()[generic_index];
        for (position, parameter) in generic.template().signature_parameters().enumerate() {
            let types: BTreeSet<&str> = node
                .specializations()
                .iter()
                .filter(|s| s.is_specialized())
                .filter_map(|s| s.template().signature_parameters().nth(position).and_then(|p| p.type_data()))
                .map(TypeData::name)
                .collect();
            if types.len() <= 1 {
                continue;
            }
            let widened = node.find_child(parameter.spec_name()).and_then(|c| c.find_any_generic_executable_type()).map(|e| e.ty().clone());
            if let Some(widened) = widened.filter(|w| Some(w) != parameter.type_data()) {
                replacements.push((parameter.local_name().to_string(), widened));
            }
        }
    }
    let template = node.specializations_mut()[generic_index].template_mut();
    for parameter in template.parameters_mut() {
        if let Some((_, widened)) = replacements.iter().find(|(name, _)| name == parameter.local_name()) {
            parameter.set_type_data(widened.clone());
        }
    }
}

/// Complete the specialization list of a node
pub fn finalize_specializations(node: &mut NodeData) {
    if node.specializations().is_empty() {
        return;
    }

    let declared = node.specializations().iter().filter(|s| s.is_specialized()).count();
    let generics: Vec<usize> = (0..node.specializations().len()).filter(|&i| node.specializations()[i].is_generic()).collect();
    if generics.len() == 1 && declared == 0 {
        node.specializations_mut()[generics[0]].add_error("@Generic defined but no @Specialization.");
    } else if generics.len() > 1 {
        for &index in &generics {
            node.specializations_mut()[index].add_error("Only one @Generic is allowed per operation.");
        }
    }

    verify_specialization_order(node.specializations_mut());

    let generic_index = match generics.first() {
        Some(&index) => {
            widen_generic(node, index);
            Some(index)
        }
        None if node.needs_rewrites() => match create_generic_specialization(node) {
            Some(generic) => {
                node.specializations_mut().push(generic);
                Some(node.specializations().len() - 1)
            }
            None => None,
        },
        None => None,
    };

    if let Some(index) = generic_index {
        let template = node.specializations()[index].template().synthetic_copy(UNINITIALIZED_ID, node.node_id());
        node.specializations_mut().push(SpecializationData::uninitialized(template));
    }

    linearize(node);
    assign_ids(node);

    let arities: BTreeSet<usize> = node.specializations().iter().map(|s| s.template().signature_arity()).collect();
    if arities.len() > 1 {
        for specialization in node.specializations_mut() {
            specialization.add_error("All specializations must have the same number of arguments.");
        }
    }

    let ids: Vec<String> = node.specializations().iter().map(|s| s.id().to_string()).collect();
    for (index, specialization) in node.specializations_mut().iter_mut().enumerate() {
        if let Some(next) = ids.get(index + 1) {
            for exception in specialization.exceptions_mut() {
                exception.set_transition_to(next);
            }
        }
    }

    compute_reachability(node);
    debug!(node = node.node_id(), specializations = ?ids, "specializations finalized");
}

fn assign_ids(node: &mut NodeData) {
    let concrete: Vec<usize> = (0..node.specializations().len()).filter(|&i| node.specializations()[i].is_specialized()).collect();
    let templates: Vec<&TemplateMethod> = concrete.iter().map(|&i| node.specializations()[i].template()).collect();
    let ids = calculate_specialization_ids(&templates);

    for (&index, id) in concrete.iter().zip(ids) {
        node.specializations_mut()[index].set_id(id);
    }
    for specialization in node.specializations_mut() {
        if specialization.is_generic() {
            specialization.set_id(GENERIC_ID);
        } else if specialization.is_uninitialized() {
            specialization.set_id(UNINITIALIZED_ID);
        }
    }
}

/// Mark specializations that can never be selected
pub fn compute_reachability(node: &mut NodeData) {
    let children = node.children().to_vec();
    let mut reachable = true;
    let mut previous: Option<usize> = None;

    for index in 0..node.specializations().len() {
        if node.specializations()[index].is_uninitialized() {
            node.specializations_mut()[index].set_reachable(true);
            continue;
        }
        let current = &node.specializations()[index];
        let shadowed = previous.is_some_and(|p| {
            let prior = &node.specializations()[p];
            prior.equals_guards(current) && !prior.has_exceptions()
        });
        let flagged = shadowed || (!reachable && !current.is_synthetic());
        let kind = if current.is_generic() { "Generic" } else { "Specialization" };
        let has_rewrite = current.has_rewrite(&children);

        let specialization = &mut node.specializations_mut()[index];
        if flagged {
            specialization.add_error(format!("{} is not reachable.", kind));
        }
        specialization.set_reachable(reachable);
        trace!(specialization = specialization.id(), reachable, "reachability");
        if !has_rewrite {
            reachable = false;
        }
        previous = Some(index);
    }
}

/// Whether a short-circuit method accepts what the children produce without failing
fn is_generic_short_circuit(node: &NodeData, short_circuit: &ShortCircuitData) -> bool {
    short_circuit.template().parameters_of(ParameterKind::Value).all(|parameter| {
        let Some(ty) = parameter.type_data() else {
            return false;
        };
        if ty.is_generic() {
            return true;
        }
        node.find_child(parameter.spec_name())
            .is_some_and(|child| child.find_generic_executable_types().iter().any(|e| e.ty() == ty))
    })
}

/// The generic overload keeps the declared name; the others are suffixed with their value types
fn assign_callees(short_circuits: &mut [ShortCircuitData], overloads: &[usize], method_name: &str) {
    let mut taken: HashSet<String> = HashSet::from([method_name.to_string()]);
    for &i in overloads {
        if short_circuits[i].is_generic() {
            continue;
        }
        let suffix: Vec<&str> = short_circuits[i]
            .template()
            .parameters_of(ParameterKind::Value)
            .filter_map(|parameter| parameter.type_data().map(TypeData::suffix))
            .collect();
        let base = if suffix.is_empty() { format!("{}_specialized", method_name) } else { format!("{}_{}", method_name, suffix.join("_")) };
        let mut callee = base.clone();
        let mut counter = 0;
        while taken.contains(&callee) {
            callee = format!("{}{}", base, counter);
            counter += 1;
        }
        taken.insert(callee.clone());
        short_circuits[i].set_callee(callee);
    }
}

/// Validate short circuits and give every specialization one per short-circuited child
pub fn assign_short_circuits(node: &mut NodeData) {
    let values: Vec<String> = node.children_of(super::ExecutionKind::ShortCircuit).map(|c| c.name().to_string()).collect();
    if values.is_empty() {
        return;
    }

    let mut valid = true;
    for value in &values {
        let available: Vec<usize> = (0..node.short_circuits().len()).filter(|&i| node.short_circuits()[i].value_name() == value).collect();
        if available.is_empty() {
            node.add_error(format!("@ShortCircuit method for short cut value '{}' required.", value));
            valid = false;
            continue;
        }

        let method_name = node.short_circuits()[available[0]].method_name().to_string();
        if available.iter().any(|&i| node.short_circuits()[i].method_name() != method_name) {
            for &i in &available {
                node.short_circuits_mut()[i]
                    .template_mut()
                    .add_error(format!("All short circuits for short cut value '{}' must have the same method name.", value));
            }
            valid = false;
            continue;
        }

        let generic = available.iter().copied().find(|&i| is_generic_short_circuit(node, &node.short_circuits()[i]));
        match generic {
            Some(index) => {
                for &i in &available {
                    node.short_circuits_mut()[i].set_generic(i == index);
                }
                if available.len() > 1 {
                    assign_callees(node.short_circuits_mut(), &available, &method_name);
                }
            }
            None => {
                node.add_error(format!("No generic @ShortCircuit method available for short cut value '{}'.", value));
                valid = false;
            }
        }
    }
    if !valid {
        return;
    }

    let short_circuits = node.short_circuits().to_vec();
    for specialization in node.specializations_mut() {
        let assigned: Vec<ShortCircuitData> = values
            .iter()
            .filter_map(|value| {
                let candidates: Vec<&ShortCircuitData> = short_circuits.iter().filter(|s| s.value_name() == value).collect();
                let generic = candidates.iter().find(|s| s.is_generic()).copied();
                let compatible = candidates.iter().find(|s| !s.is_generic() && s.is_compatible_to(specialization)).copied();
                compatible.or(generic).cloned()
            })
            .collect();
        specialization.set_short_circuits(assigned);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ParameterSpec;
    use crate::typesystem::tests::digit_suffixed_types;
    use proptest::prelude::*;

    fn template(id: &str, types: &[&str]) -> TemplateMethod {
        let ts = digit_suffixed_types();
        let ty = |name: &str| ts.find_type(name).unwrap().clone();
        let return_type = ActualParameter::typed(ParameterSpec::new("returnValue", vec![], ParameterKind::Return), ty(types[0]));
        let parameters = types[1..]
            .iter()
            .enumerate()
            .map(|(i, name)| ActualParameter::typed(ParameterSpec::new(format!("operand{}", i), vec![], ParameterKind::Value).as_signature(), ty(name)))
            .collect();
        TemplateMethod::synthetic(id, "AddNode", return_type, parameters)
    }

    fn specialization(types: &[&str], order: Option<i32>) -> SpecializationData {
        SpecializationData::specialized(template("do", types), order, &[], &[])
    }

    #[test]
    fn test_signature_ordering() {
        let int = template("a", &["int", "int", "int"]);
        let double = template("b", &["double", "double", "double"]);
        let object = template("c", &["Object", "Object", "Object"]);
        assert_eq!(compare_by_signature(&int, &double), Ordering::Less);
        assert_eq!(compare_by_signature(&object, &double), Ordering::Greater);

        let mixed = template("d", &["Object", "int", "double"]);
        let crossed = template("e", &["Object", "double", "int"]);
        assert_eq!(compare_by_signature(&mixed, &crossed), Ordering::Equal);

        let longer = template("f", &["int", "int", "int", "int"]);
        assert_eq!(compare_by_signature(&longer, &int), Ordering::Less);
    }

    #[test]
    fn test_ids_drop_agreeing_positions() {
        let int = template("a", &["Object", "int", "Object"]);
        let double = template("b", &["Object", "double", "Object"]);
        assert_eq!(calculate_specialization_ids(&[&int, &double]), vec!["Int", "Double"]);

        let uniform = template("c", &["int", "int", "int"]);
        let other = template("d", &["double", "double", "double"]);
        assert_eq!(calculate_specialization_ids(&[&uniform, &other]), vec!["Int", "Double"]);

        assert_eq!(calculate_specialization_ids(&[&uniform]), vec!["Default"]);
        assert_eq!(calculate_specialization_ids(&[&uniform, &other, &uniform]), vec!["Int0", "Double", "Int1"]);
    }

    #[test]
    fn test_counted_ids_skip_taken_names() {
        let int = template("a", &["int", "int", "int"]);
        let wide = template("b", &["int0", "int0", "int0"]);
        let ids = calculate_specialization_ids(&[&int, &int, &wide]);
        assert_eq!(ids, vec!["Int1", "Int2", "Int0"]);
    }

    #[test]
    fn test_duplicate_order_reported_once() {
        let mut specializations = vec![specialization(&["int", "int"], Some(1)), specialization(&["double", "double"], Some(1)), specialization(&["Object", "Object"], Some(1))];
        verify_specialization_order(&mut specializations);

        assert_eq!(specializations[0].messages()[0].message, "Order value 1 used multiple times");
        assert!(specializations[1].has_errors());
        assert!(!specializations[2].has_errors());
    }

    #[test]
    fn test_inconsistent_explicit_order() {
        let mut specializations = vec![specialization(&["int", "int"], Some(2)), specialization(&["double", "double"], Some(1))];
        verify_specialization_order(&mut specializations);
        assert_eq!(specializations[0].messages()[0].message, "Explicit order values 2 and 1 are inconsistent with type lattice ordering.");
    }

    #[test]
    fn test_incomparable_needs_order() {
        let mut specializations = vec![specialization(&["Object", "int", "double"], None), specialization(&["Object", "double", "int"], None)];
        verify_specialization_order(&mut specializations);
        assert!(specializations[0].has_errors());
        assert!(!specializations[1].has_errors());

        let mut ordered = vec![specialization(&["Object", "int", "double"], Some(1)), specialization(&["Object", "double", "int"], Some(2))];
        verify_specialization_order(&mut ordered);
        assert!(ordered.iter().all(|s| !s.has_errors()));
    }

    #[test]
    fn test_linearize_by_lattice() {
        let mut node = NodeData::new("AddNode", "AddNode");
        node.set_specializations(vec![specialization(&["Object", "Object"], None), specialization(&["double", "double"], None), specialization(&["int", "int"], None)]);
        linearize(&mut node);

        let order: Vec<&str> = node.specializations().iter().map(|s| s.template().return_type().declared_type()).collect();
        assert_eq!(order, vec!["int", "double", "Object"]);
    }

    #[test]
    fn test_finalize_without_rewrites() {
        let mut node = NodeData::new("AddNode", "AddNode");
        node.set_specializations(vec![specialization(&["int", "int"], None)]);
        finalize_specializations(&mut node);

        assert_eq!(node.specializations().len(), 1);
        assert_eq!(node.specializations()[0].id(), "Default");
        assert!(node.generic_specialization().is_none());
        assert!(node.uninitialized_specialization().is_none());
    }

    #[test]
    fn test_generic_without_specialization() {
        let mut node = NodeData::new("AddNode", "AddNode");
        node.set_specializations(vec![SpecializationData::generic(template("g", &["Object", "Object"]), true)]);
        finalize_specializations(&mut node);
        let generic = node.generic_specialization().unwrap();
        assert_eq!(generic.messages()[0].message, "@Generic defined but no @Specialization.");
        assert!(node.specializations()[0].is_uninitialized());
    }

    proptest! {
        #[test]
        fn test_ids_are_unique(signatures in prop::collection::vec(prop::collection::vec(prop::sample::select(vec!["int", "int0", "double", "boolean", "Object"]), 3), 1..6)) {
            let templates: Vec<TemplateMethod> = signatures.iter().map(|s| template("s", s)).collect();
            let references: Vec<&TemplateMethod> = templates.iter().collect();
            let ids = calculate_specialization_ids(&references);

            let unique: BTreeSet<&String> = ids.iter().collect();
            prop_assert_eq!(unique.len(), ids.len());
            prop_assert!(ids.iter().all(|id| !id.is_empty()));
        }
    }
}
