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

//! Signature matching
//!
//! Formal parameters are aligned with a method specification greedily and in declaration order.
//! Optional specifications may be skipped, a `Many` specification consumes either one array
//! parameter or a run of compatible parameters, and the last required specification may repeat
//! when the specification allows variable arguments.

use super::{ActualParameter, Cardinality, MethodSpec, ParameterSpec, TemplateMethod};
use crate::declaration::{MethodDeclaration, ParameterDeclaration};
use crate::typesystem::TypeSystemData;
use nodegen_common::MessageContainer;
use tracing::trace;

/// Why a method did not fit a specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFailure {
    /// The declared return type is not allowed
    ReturnType,
    /// The parameter list could not be aligned
    Parameters,
}

/// Result of running one parser over one method
#[derive(Debug)]
pub enum ParseOutcome<T> {
    /// The method matched and produced a model element
    Parsed(T),
    /// The method carries the parser's marker but did not match; the template holds the error
    Rejected(TemplateMethod),
    /// The method is not meant for this parser
    Skipped,
}

fn resolve(spec: &ParameterSpec, formal: &ParameterDeclaration, type_system: Option<&TypeSystemData>, index: Option<usize>, array: bool) -> ActualParameter {
    let component = if array { formal.ty.trim_end_matches("[]") } else { formal.ty.as_str() };
    let type_data = type_system.and_then(|ts| ts.find_type(component)).cloned();
    ActualParameter::new(spec.clone(), formal.ty.clone(), type_data, index, array)
}

/// Align `method` with `spec`
pub fn match_method(
    spec: &MethodSpec,
    method: &MethodDeclaration,
    type_system: Option<&TypeSystemData>,
) -> Result<(ActualParameter, Vec<ActualParameter>), MatchFailure> {
    let return_spec = spec.return_type();
    if !return_spec.matches(&method.return_type) {
        return Err(MatchFailure::ReturnType);
    }
    let return_type = ActualParameter::new(
        return_spec.clone(),
        method.return_type.clone(),
        type_system.and_then(|ts| ts.find_type(&method.return_type)).cloned(),
        None,
        false,
    );

    let formals = &method.parameters;
    let mut consumed = vec![false; formals.len()];
    let mut optional = Vec::new();
    let mut scan_from = 0;
    for optional_spec in spec.optional() {
        if let Some(offset) = formals[scan_from..].iter().position(|f| optional_spec.matches(&f.ty)) {
            let index = scan_from + offset;
            consumed[index] = true;
            optional.push((index, resolve(optional_spec, &formals[index], type_system, None, false)));
            scan_from = index + 1;
        }
    }

    let remaining: Vec<&ParameterDeclaration> = formals.iter().zip(&consumed).filter(|(_, used)| !**used).map(|(f, _)| f).collect();
    let required_specs = spec.required();
    let last = required_specs.len().checked_sub(1);
    let mut required = Vec::new();
    let mut cursor = 0;
    let mut spec_index = 0;

    loop {
        let repeating = spec.variable_required_arguments && last.is_some_and(|last| spec_index >= last);
        let current = if spec_index < required_specs.len() {
            &required_specs[spec_index]
        } else if let (true, Some(last)) = (spec.variable_required_arguments, last) {
            &required_specs[last]
        } else {
            break;
        };

        let Some(formal) = remaining.get(cursor) else {
            if repeating || spec.ignore_additional_specifications {
                break;
            }
            return Err(MatchFailure::Parameters);
        };
        let repeat_index = last.filter(|_| repeating).map(|last| spec_index - last);

        match current.cardinality() {
            Cardinality::One => {
                if !current.matches(&formal.ty) {
                    if repeating || spec.ignore_additional_specifications {
                        break;
                    }
                    return Err(MatchFailure::Parameters);
                }
                required.push(resolve(current, formal, type_system, repeat_index, false));
                cursor += 1;
            }
            Cardinality::Many => {
                if current.matches_array(&formal.ty) {
                    required.push(resolve(current, formal, type_system, None, true));
                    cursor += 1;
                } else if current.matches(&formal.ty) {
                    let mut run = 0;
                    while let Some(next) = remaining.get(cursor).filter(|f| current.matches(&f.ty)) {
                        required.push(resolve(current, next, type_system, Some(run), false));
                        run += 1;
                        cursor += 1;
                    }
                } else if repeating || spec.ignore_additional_specifications {
                    break;
                } else {
                    return Err(MatchFailure::Parameters);
                }
            }
        }
        spec_index += 1;
    }

    if cursor < remaining.len() && !spec.ignore_additional_parameters {
        return Err(MatchFailure::Parameters);
    }

    // Keep the parameters in declaration order.
    let mut ordered: Vec<(usize, ActualParameter)> = optional;
    let mut required_iter = required.into_iter();
    for (position, used) in consumed.iter().enumerate() {
        if !*used {
            match required_iter.next() {
                Some(parameter) => ordered.push((position, parameter)),
                None => break,
            }
        }
    }
    ordered.sort_by_key(|(position, _)| *position);
    Ok((return_type, ordered.into_iter().map(|(_, p)| p).collect()))
}

/// Message explaining why `method` did not match `spec`
pub fn mismatch_message(spec: &MethodSpec, method: &MethodDeclaration, failure: &MatchFailure) -> String {
    let mut rendered = spec.clone();
    rendered.apply_type_definitions("types");
    let expected = rendered.to_signature_string(&method.name);
    match failure {
        MatchFailure::ReturnType => {
            let expected_return = match rendered.return_type().type_definition() {
                Some(definition) => format!("<{}>", definition),
                None => rendered.return_type().allowed_types().first().cloned().unwrap_or_else(|| "void".to_string()),
            };
            format!(
                "The provided return type \"{}\" does not match expected return type \"{}\".\nExpected signature: \n{}",
                method.return_type, expected_return, expected
            )
        }
        MatchFailure::Parameters => {
            let actual: Vec<&str> = method.parameters.iter().map(|p| p.ty.as_str()).collect();
            format!("Method signature ({}) does not match to the expected signature: \n{}", actual.join(", "), expected)
        }
    }
}

/// A parser turning declared methods of one role into model elements
pub trait TemplateMethodParser {
    /// The model element produced
    type Output;

    /// Name of the parser for logging
    fn name(&self) -> &'static str;

    /// Name of the node owning the methods
    fn owner(&self) -> &str;

    /// Type system used to resolve parameter types
    fn type_system(&self) -> Option<&TypeSystemData>;

    /// Whether the method is meant for this parser
    fn is_parsable(&self, method: &MethodDeclaration) -> bool;

    /// Specification the method has to satisfy
    fn create_specification(&self, method: &MethodDeclaration) -> Option<MethodSpec>;

    /// Build the model element from a matched template
    fn create(&self, template: TemplateMethod) -> Option<Self::Output>;

    /// Whether a mismatch is reported or silently ignored
    fn emit_errors_on_mismatch(&self) -> bool {
        true
    }

    /// Id given to templates of this parser
    fn template_id(&self, method: &MethodDeclaration) -> String {
        method.node_id().map(str::to_string).unwrap_or_else(|| method.name.clone())
    }

    /// Parse a single method
    fn parse(&self, method: &MethodDeclaration) -> ParseOutcome<Self::Output> {
        if !self.is_parsable(method) {
            return ParseOutcome::Skipped;
        }
        let Some(spec) = self.create_specification(method) else {
            return ParseOutcome::Skipped;
        };
        match match_method(&spec, method, self.type_system()) {
            Ok((return_type, parameters)) => {
                trace!(parser = self.name(), method = %method.name, "method matched");
                let template = TemplateMethod::new(self.template_id(method), self.owner(), method.clone(), return_type, parameters);
                match self.create(template) {
                    Some(output) => ParseOutcome::Parsed(output),
                    None => ParseOutcome::Skipped,
                }
            }
            Err(failure) if self.emit_errors_on_mismatch() => {
                let return_type = ActualParameter::new(spec.return_type().clone(), method.return_type.clone(), None, None, false);
                let mut template = TemplateMethod::new(self.template_id(method), self.owner(), method.clone(), return_type, Vec::new());
                template.add_error(mismatch_message(&spec, method, &failure));
                ParseOutcome::Rejected(template)
            }
            Err(_) => ParseOutcome::Skipped,
        }
    }

    /// Parse every method, separating matched elements from rejected templates
    fn parse_all(&self, methods: &[MethodDeclaration]) -> (Vec<Self::Output>, Vec<TemplateMethod>) {
        let mut parsed = Vec::new();
        let mut rejected = Vec::new();
        for method in methods {
            match self.parse(method) {
                ParseOutcome::Parsed(output) => parsed.push(output),
                ParseOutcome::Rejected(template) => rejected.push(template),
                ParseOutcome::Skipped => {}
            }
        }
        (parsed, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::ParameterKind;
    use crate::typesystem::tests::simple_types;

    fn types(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn method(name: &str, return_type: &str, params: &[(&str, &str)]) -> MethodDeclaration {
        MethodDeclaration {
            name: name.to_string(),
            return_type: return_type.to_string(),
            parameters: params.iter().map(|(n, t)| ParameterDeclaration::new(*n, *t)).collect(),
            ..Default::default()
        }
    }

    fn binary_spec() -> MethodSpec {
        let all = types(&["int", "double", "boolean", "Object"]);
        let mut spec = MethodSpec::new(ParameterSpec::new("return_value", all.clone(), ParameterKind::Return));
        spec.add_optional(ParameterSpec::new("frame", types(&["VirtualFrame"]), ParameterKind::Frame));
        spec.add_required(ParameterSpec::new("left", all.clone(), ParameterKind::Value).as_signature());
        spec.add_required(ParameterSpec::new("right", all, ParameterKind::Value).as_signature());
        spec
    }

    #[test]
    fn test_match_with_and_without_frame() {
        let ts = simple_types();
        let spec = binary_spec();

        let (ret, params) = match_method(&spec, &method("add", "int", &[("a", "int"), ("b", "int")]), Some(&ts)).unwrap();
        assert_eq!(ret.type_data().unwrap().name(), "int");
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].local_name(), "left");

        let (_, params) = match_method(&spec, &method("add", "int", &[("f", "VirtualFrame"), ("a", "int"), ("b", "double")]), Some(&ts)).unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params[0].kind(), ParameterKind::Frame);
        assert_eq!(params[2].type_data().unwrap().name(), "double");
    }

    #[test]
    fn test_mismatches() {
        let ts = simple_types();
        let spec = binary_spec();
        assert_eq!(match_method(&spec, &method("add", "String", &[("a", "int"), ("b", "int")]), Some(&ts)).unwrap_err(), MatchFailure::ReturnType);
        assert_eq!(match_method(&spec, &method("add", "int", &[("a", "int")]), Some(&ts)).unwrap_err(), MatchFailure::Parameters);
        assert_eq!(
            match_method(&spec, &method("add", "int", &[("a", "int"), ("b", "int"), ("c", "int")]), Some(&ts)).unwrap_err(),
            MatchFailure::Parameters
        );
    }

    #[test]
    fn test_mismatch_message_renders_expected_signature() {
        let spec = binary_spec();
        let declared = method("add", "int", &[("a", "int")]);
        let message = mismatch_message(&spec, &declared, &MatchFailure::Parameters);
        assert!(message.starts_with("Method signature (int) does not match to the expected signature: \n"));
        assert!(message.contains("<types> add([VirtualFrame frame], <types> left, <types> right)"));
        assert!(message.contains("<types> = {int, double, boolean, Object}"));
    }

    #[test]
    fn test_many_cardinality() {
        let ts = simple_types();
        let mut spec = MethodSpec::new(ParameterSpec::new("return_value", types(&["Object"]), ParameterKind::Return));
        spec.add_required(ParameterSpec::new("arguments", types(&["int", "Object"]), ParameterKind::Value).with_cardinality(Cardinality::Many).as_signature());

        let (_, params) = match_method(&spec, &method("call", "Object", &[("args", "Object[]")]), Some(&ts)).unwrap();
        assert_eq!(params.len(), 1);
        assert!(params[0].is_array());

        let (_, params) = match_method(&spec, &method("call", "Object", &[("a", "int"), ("b", "Object"), ("c", "int")]), Some(&ts)).unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params[2].local_name(), "arguments2");
    }

    #[test]
    fn test_repeated_many_ends_at_foreign_formal() {
        let ts = simple_types();
        let mut spec = MethodSpec::new(ParameterSpec::new("return_value", types(&["Object"]), ParameterKind::Return));
        spec.add_required(ParameterSpec::new("left", types(&["int"]), ParameterKind::Value));
        spec.add_required(ParameterSpec::new("rest", types(&["int"]), ParameterKind::Value).with_cardinality(Cardinality::Many));
        spec.variable_required_arguments = true;
        spec.ignore_additional_parameters = true;

        let declared = method("call", "Object", &[("a", "int"), ("b", "int"), ("c", "int"), ("flag", "boolean")]);
        let (_, params) = match_method(&spec, &declared, Some(&ts)).unwrap();
        let names: Vec<&str> = params.iter().map(|p| p.local_name()).collect();
        assert_eq!(names, vec!["left", "rest0", "rest1"]);

        let mut tail = MethodSpec::new(ParameterSpec::new("return_value", types(&["Object"]), ParameterKind::Return));
        tail.add_required(ParameterSpec::new("rest", types(&["int"]), ParameterKind::Value).with_cardinality(Cardinality::Many));
        tail.ignore_additional_specifications = true;
        tail.ignore_additional_parameters = true;
        let (_, params) = match_method(&tail, &method("call", "Object", &[("flag", "boolean")]), Some(&ts)).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_variable_arguments_and_prefix() {
        let ts = simple_types();
        let mut spec = MethodSpec::new(ParameterSpec::new("return_value", types(&["int"]), ParameterKind::Return));
        spec.add_required(ParameterSpec::new("evaluated", types(&["int", "Object"]), ParameterKind::Evaluated));
        spec.variable_required_arguments = true;
        spec.ignore_additional_specifications = true;

        let (_, params) = match_method(&spec, &method("execute_int", "int", &[]), Some(&ts)).unwrap();
        assert!(params.is_empty());

        let (_, params) = match_method(&spec, &method("execute_int", "int", &[("a", "Object"), ("b", "int")]), Some(&ts)).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].local_name(), "evaluated1");
    }
}
