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

//! Parser for short-circuit methods

use super::{ParserContext, find_annotation};
use crate::declaration::{Annotation, MethodDeclaration};
use crate::node::ShortCircuitData;
use crate::template::{MethodSpec, ParameterKind, TemplateMethod, TemplateMethodParser};
use crate::typesystem::TypeSystemData;

/// Parses methods deciding whether a child is evaluated
pub struct ShortCircuitParser<'a> {
    context: ParserContext<'a>,
}

impl<'a> ShortCircuitParser<'a> {
    pub fn new(context: ParserContext<'a>) -> Self {
        Self { context }
    }

    /// Name of the child a short-circuit method decides about
    pub fn value_name(method: &MethodDeclaration) -> Option<&str> {
        find_annotation(method, |a| match a {
            Annotation::ShortCircuit { value } => Some(value.as_str()),
            _ => None,
        })
    }
}

impl TemplateMethodParser for ShortCircuitParser<'_> {
    type Output = ShortCircuitData;

    fn name(&self) -> &'static str {
        "short_circuit"
    }

    fn owner(&self) -> &str {
        self.context.owner
    }

    fn type_system(&self) -> Option<&TypeSystemData> {
        Some(self.context.type_system)
    }

    fn is_parsable(&self, method: &MethodDeclaration) -> bool {
        Self::value_name(method).is_some_and(|value| self.context.children.iter().any(|c| c.is_executed() && c.name() == value))
    }

    fn create_specification(&self, method: &MethodDeclaration) -> Option<MethodSpec> {
        let value = Self::value_name(method)?;
        let mut spec = MethodSpec::new(self.context.boolean_spec("return_value", ParameterKind::Return));
        self.context.add_optional_parameters(&mut spec);
        let all = self.context.all_types();
        self.context.add_child_parameters(&mut spec, Some(value), |_| all.clone());
        Some(spec)
    }

    fn create(&self, template: TemplateMethod) -> Option<ShortCircuitData> {
        let value = Self::value_name(template.method()?)?.to_string();
        Some(ShortCircuitData::new(template, &value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{LOGICAL, parse_node};

    #[test]
    fn test_value_name_of_marker() {
        let method = MethodDeclaration {
            name: "needs_right".to_string(),
            annotations: vec![Annotation::ShortCircuit { value: "right".to_string() }],
            ..Default::default()
        };
        assert_eq!(ShortCircuitParser::value_name(&method), Some("right"));
        assert_eq!(ShortCircuitParser::value_name(&MethodDeclaration::default()), None);
    }

    #[test]
    fn test_overloads_parsed_with_preceding_operands() {
        let node = parse_node(LOGICAL, "AndNode");
        assert_eq!(node.short_circuits().len(), 2);
        for short_circuit in node.short_circuits() {
            assert_eq!(short_circuit.value_name(), "right");
            let names: Vec<&str> = short_circuit.template().parameters().iter().map(|p| p.local_name()).collect();
            assert_eq!(names, vec!["left"]);
        }
        let types: Vec<&str> = node.short_circuits().iter().map(|s| s.template().parameters()[0].declared_type()).collect();
        assert_eq!(types, vec!["boolean", "Object"]);
    }
}
