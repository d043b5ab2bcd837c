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

//! Parser resolving guard names of a specialization to guard methods

use super::ParserContext;
use crate::declaration::MethodDeclaration;
use crate::node::{GuardData, SpecializationData};
use crate::template::{MethodSpec, ParameterKind, ParameterSpec, TemplateMethod, TemplateMethodParser};
use crate::typesystem::TypeSystemData;

/// Looks for methods named like one guard of one specialization
pub struct GuardParser<'a> {
    context: ParserContext<'a>,
    specialization: &'a SpecializationData,
    guard_name: &'a str,
}

impl<'a> GuardParser<'a> {
    pub fn new(context: ParserContext<'a>, specialization: &'a SpecializationData, guard_name: &'a str) -> Self {
        Self {
            context,
            specialization,
            guard_name,
        }
    }

    /// Specification every guard of the specialization has to satisfy
    pub fn specification(&self) -> MethodSpec {
        let mut spec = MethodSpec::new(self.context.boolean_spec("return_value", ParameterKind::Return));
        self.context.add_optional_parameters(&mut spec);
        spec.ignore_additional_specifications = true;

        let generic = self.context.type_system.generic_type().name().to_string();
        for parameter in self.specialization.template().parameters() {
            let spec_parameter = match parameter.kind() {
                ParameterKind::Value => {
                    let mut allowed = vec![parameter.declared_type().to_string()];
                    if !allowed.contains(&generic) && !parameter.is_array() {
                        allowed.push(generic.clone());
                    }
                    let mut value = ParameterSpec::new(parameter.local_name(), allowed, ParameterKind::Value);
                    if parameter.is_signature() {
                        value = value.as_signature();
                    }
                    value
                }
                ParameterKind::ShortCircuitFlag => self.context.boolean_spec(parameter.local_name(), ParameterKind::ShortCircuitFlag),
                _ => continue,
            };
            spec.add_required(spec_parameter);
        }
        spec
    }

    /// Message reported when no method satisfies the guard
    pub fn not_found_message(&self) -> String {
        let mut spec = self.specification();
        spec.apply_type_definitions("types");
        format!("Guard with method name '{}' not found. Expected signature: \n{}", self.guard_name, spec.to_signature_string(self.guard_name))
    }

    /// Resolve the guard against the node's methods
    pub fn resolve(&self, methods: &[MethodDeclaration]) -> Option<GuardData> {
        methods.iter().find_map(|method| match self.parse(method) {
            crate::template::ParseOutcome::Parsed(guard) => Some(guard),
            _ => None,
        })
    }
}

impl TemplateMethodParser for GuardParser<'_> {
    type Output = GuardData;

    fn name(&self) -> &'static str {
        "guard"
    }

    fn owner(&self) -> &str {
        self.context.owner
    }

    fn type_system(&self) -> Option<&TypeSystemData> {
        Some(self.context.type_system)
    }

    fn is_parsable(&self, method: &MethodDeclaration) -> bool {
        method.name == self.guard_name && method.template_markers().next().is_none() && !method.modifiers.is_static
    }

    fn create_specification(&self, _method: &MethodDeclaration) -> Option<MethodSpec> {
        Some(self.specification())
    }

    fn emit_errors_on_mismatch(&self) -> bool {
        false
    }

    fn create(&self, template: TemplateMethod) -> Option<GuardData> {
        Some(GuardData::new(template))
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{GUARDED, parse_node};
    use nodegen_common::{Diagnostic, MessageContainer};

    const GUARD_PARAMETERS: &str = r#""parameters": [{ "name": "left", "type": "int" }]"#;

    fn messages(source: &str) -> Vec<String> {
        let mut out: Vec<Diagnostic> = Vec::new();
        parse_node(source, "AddNode").collect_messages(&mut out);
        out.into_iter().map(|d| d.message).collect()
    }

    #[test]
    fn test_guard_resolved_by_name() {
        let node = parse_node(GUARDED, "AddNode");
        assert!(!node.has_errors(), "{:?}", messages(GUARDED));

        let int = node.specializations().iter().find(|s| s.id() == "Int").unwrap();
        assert_eq!(int.guard_definitions(), ["is_small".to_string()]);
        assert_eq!(int.guards().len(), 1);
        assert_eq!(int.guards()[0].guard_name(), "is_small");
        assert_eq!(int.guards()[0].template().parameters()[0].local_name(), "left");

        let double = node.specializations().iter().find(|s| s.id() == "Double").unwrap();
        assert!(double.guards().is_empty());
    }

    #[test]
    fn test_guard_accepts_generic_operand() {
        let source = GUARDED.replace(GUARD_PARAMETERS, r#""parameters": [{ "name": "left", "type": "Object" }]"#);
        let node = parse_node(&source, "AddNode");
        assert!(!node.has_errors(), "{:?}", messages(&source));
        let int = node.specializations().iter().find(|s| s.id() == "Int").unwrap();
        assert!(int.guards()[0].template().parameters()[0].type_data().unwrap().is_generic());
    }

    #[test]
    fn test_guard_with_foreign_operand_type_not_found() {
        let source = GUARDED.replace(GUARD_PARAMETERS, r#""parameters": [{ "name": "left", "type": "double" }]"#);
        let found = messages(&source);
        let message = found.iter().find(|m| m.starts_with("Guard with method name 'is_small' not found.")).unwrap();
        assert!(message.contains("is_small("));
    }
}
