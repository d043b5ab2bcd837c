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

//! Parser for the declared generic fallback

use super::{ParserContext, find_annotation, has_marker};
use crate::declaration::{Annotation, MethodDeclaration};
use crate::node::{NodeChildData, SpecializationData};
use crate::template::{MethodSpec, TemplateMethod, TemplateMethodParser};
use crate::typesystem::TypeSystemData;

/// Parses methods marked as the generic fallback
pub struct GenericParser<'a> {
    context: ParserContext<'a>,
}

impl<'a> GenericParser<'a> {
    pub fn new(context: ParserContext<'a>) -> Self {
        Self { context }
    }

    /// Types a generic parameter for `child` may have: whatever the child produces without failing
    pub fn generic_value_types(&self, child: &NodeChildData) -> Vec<String> {
        let mut types: Vec<String> = child.find_generic_executable_types().iter().map(|e| e.ty().name().to_string()).collect();
        let generic = self.context.type_system.generic_type().name().to_string();
        if !types.contains(&generic) {
            types.push(generic);
        }
        types
    }
}

impl TemplateMethodParser for GenericParser<'_> {
    type Output = SpecializationData;

    fn name(&self) -> &'static str {
        "generic"
    }

    fn owner(&self) -> &str {
        self.context.owner
    }

    fn type_system(&self) -> Option<&TypeSystemData> {
        Some(self.context.type_system)
    }

    fn is_parsable(&self, method: &MethodDeclaration) -> bool {
        has_marker(method, "Generic")
    }

    fn create_specification(&self, _method: &MethodDeclaration) -> Option<MethodSpec> {
        Some(self.context.create_default_method_spec(self.context.all_types(), |child| self.generic_value_types(child)))
    }

    fn create(&self, template: TemplateMethod) -> Option<SpecializationData> {
        let use_specializations = find_annotation(template.method()?, |a| match a {
            Annotation::Generic { use_specializations } => Some(*use_specializations),
            _ => None,
        })?;
        Some(SpecializationData::generic(template, use_specializations))
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{LOGICAL, parse_node};
    use nodegen_common::{Diagnostic, MessageContainer};

    #[test]
    fn test_generic_uses_specializations_by_default() {
        let node = parse_node(LOGICAL, "AndNode");
        let generic = node.generic_specialization().unwrap();
        assert!(!generic.is_synthetic());
        assert_eq!(generic.method_name(), "do_generic");
        assert!(generic.use_specializations_for_generic());
    }

    #[test]
    fn test_generic_without_specializations() {
        let source = LOGICAL.replace(r#"{ "kind": "generic" }"#, r#"{ "kind": "generic", "use_specializations": false }"#);
        let node = parse_node(&source, "AndNode");
        assert!(!node.has_errors());
        assert!(!node.generic_specialization().unwrap().use_specializations_for_generic());
    }

    #[test]
    fn test_generic_rejects_narrower_operand() {
        let source = LOGICAL.replace(r#"{ "name": "right", "type": "Object" }"#, r#"{ "name": "right", "type": "int" }"#);
        let node = parse_node(&source, "AndNode");
        let mut out: Vec<Diagnostic> = Vec::new();
        node.collect_messages(&mut out);
        assert!(out.iter().any(|d| d.message.starts_with("Method signature (Object, boolean, int) does not match")));
    }
}
