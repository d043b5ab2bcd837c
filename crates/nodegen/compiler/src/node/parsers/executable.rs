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

//! Parser for execute methods

use super::ParserContext;
use crate::declaration::MethodDeclaration;
use crate::node::ExecutableTypeData;
use crate::template::{MethodSpec, ParameterKind, ParameterSpec, TemplateMethod, TemplateMethodParser};
use crate::typesystem::{TypeSystemData, compare_types};
use std::collections::BTreeMap;

/// Parses the typed `execute*` entry points of a node
pub struct ExecutableTypeParser<'a> {
    context: ParserContext<'a>,
}

impl<'a> ExecutableTypeParser<'a> {
    pub fn new(context: ParserContext<'a>) -> Self {
        Self { context }
    }
}

impl TemplateMethodParser for ExecutableTypeParser<'_> {
    type Output = ExecutableTypeData;

    fn name(&self) -> &'static str {
        "executable_type"
    }

    fn owner(&self) -> &str {
        self.context.owner
    }

    fn type_system(&self) -> Option<&TypeSystemData> {
        Some(self.context.type_system)
    }

    fn is_parsable(&self, method: &MethodDeclaration) -> bool {
        method.name.starts_with("execute") && method.template_markers().next().is_none() && !method.modifiers.is_static && !method.modifiers.private
    }

    fn create_specification(&self, _method: &MethodDeclaration) -> Option<MethodSpec> {
        let mut return_types = self.context.all_types();
        return_types.push("void".to_string());
        let mut spec = MethodSpec::new(ParameterSpec::new("return_value", return_types, ParameterKind::Return));
        spec.add_optional(self.context.frame_spec());
        spec.add_required(ParameterSpec::new("evaluated", self.context.all_types(), ParameterKind::Evaluated));
        spec.variable_required_arguments = true;
        spec.ignore_additional_specifications = true;
        Some(spec)
    }

    fn emit_errors_on_mismatch(&self) -> bool {
        false
    }

    fn create(&self, template: TemplateMethod) -> Option<ExecutableTypeData> {
        let ty = template.return_type().type_data()?.clone();
        let unexpected = &self.context.config.unexpected_value_type;
        let has_unexpected_value = template.method()?.throws.iter().any(|t| t == unexpected);
        Some(ExecutableTypeData::new(template, ty, has_unexpected_value))
    }
}

/// Group execute methods by evaluated count, most specific type first.
///
/// When two methods of a group produce the same type, a final one wins over a non-final one;
/// otherwise the first declared one is kept.
pub fn group_executable_types(executables: Vec<ExecutableTypeData>) -> BTreeMap<usize, Vec<ExecutableTypeData>> {
    let mut groups: BTreeMap<usize, Vec<ExecutableTypeData>> = BTreeMap::new();
    for executable in executables {
        let group = groups.entry(executable.evaluated_count()).or_default();
        match group.iter().position(|existing| existing.ty() == executable.ty()) {
            Some(index) if executable.is_final() && !group[index].is_final() => group[index] = executable,
            Some(_) => {}
            None => group.push(executable),
        }
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| compare_types(a.ty(), b.ty()));
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::declaration::{Modifiers, ParameterDeclaration};
    use crate::template::ParseOutcome;
    use crate::typesystem::tests::simple_types;

    fn execute(name: &str, return_type: &str, throws: bool, is_final: bool) -> MethodDeclaration {
        MethodDeclaration {
            name: name.to_string(),
            return_type: return_type.to_string(),
            parameters: vec![ParameterDeclaration::new("frame", "VirtualFrame")],
            throws: if throws { vec!["UnexpectedResultException".to_string()] } else { vec![] },
            modifiers: Modifiers {
                is_final,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_and_group() {
        let ts = simple_types();
        let config = ParserConfig::default();
        let parser = ExecutableTypeParser::new(ParserContext::bare("ExpressionNode", &ts, &config));

        let methods = vec![
            execute("execute_generic", "Object", false, false),
            execute("execute_double", "double", true, false),
            execute("execute_int", "int", true, false),
            execute("execute_int_fast", "int", true, true),
            execute("compute", "int", false, false),
        ];
        let (parsed, rejected) = parser.parse_all(&methods);
        assert!(rejected.is_empty());
        assert_eq!(parsed.len(), 4);

        let groups = group_executable_types(parsed);
        let group = &groups[&0];
        let names: Vec<&str> = group.iter().map(|e| e.method_name()).collect();
        assert_eq!(names, vec!["execute_int_fast", "execute_double", "execute_generic"]);
        assert!(group[0].has_unexpected_value());
        assert!(!group[2].has_unexpected_value());
        assert!(group[2].has_frame());
    }

    #[test]
    fn test_evaluated_values_and_mismatch() {
        let ts = simple_types();
        let config = ParserConfig::default();
        let parser = ExecutableTypeParser::new(ParserContext::bare("ExpressionNode", &ts, &config));

        let mut with_value = execute("execute_with", "Object", false, false);
        with_value.parameters.push(ParameterDeclaration::new("left", "Object"));
        match parser.parse(&with_value) {
            ParseOutcome::Parsed(executable) => assert_eq!(executable.evaluated_count(), 1),
            other => panic!("unexpected outcome {:?}", other),
        }

        let bad_return = execute("execute_string", "String", false, false);
        assert!(matches!(parser.parse(&bad_return), ParseOutcome::Skipped));
    }
}
