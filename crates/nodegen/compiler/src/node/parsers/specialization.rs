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

//! Parser for declared specializations

use super::{ParserContext, find_annotation, has_marker};
use crate::declaration::{Annotation, MethodDeclaration};
use crate::node::SpecializationData;
use crate::template::{MethodSpec, TemplateMethod, TemplateMethodParser};
use crate::typesystem::TypeSystemData;
use nodegen_common::MessageContainer;
use std::collections::HashSet;

/// Parses methods marked as specializations
pub struct SpecializationMethodParser<'a> {
    context: ParserContext<'a>,
}

impl<'a> SpecializationMethodParser<'a> {
    pub fn new(context: ParserContext<'a>) -> Self {
        Self { context }
    }
}

impl TemplateMethodParser for SpecializationMethodParser<'_> {
    type Output = SpecializationData;

    fn name(&self) -> &'static str {
        "specialization"
    }

    fn owner(&self) -> &str {
        self.context.owner
    }

    fn type_system(&self) -> Option<&TypeSystemData> {
        Some(self.context.type_system)
    }

    fn is_parsable(&self, method: &MethodDeclaration) -> bool {
        has_marker(method, "Specialization")
    }

    fn create_specification(&self, _method: &MethodDeclaration) -> Option<MethodSpec> {
        let all = self.context.all_types();
        Some(self.context.create_default_method_spec(all.clone(), |_| all.clone()))
    }

    fn create(&self, template: TemplateMethod) -> Option<SpecializationData> {
        let method = template.method()?;
        let (order, rewrite_on, guards) = find_annotation(method, |a| match a {
            Annotation::Specialization { order, rewrite_on, guards } => Some((*order, rewrite_on.clone(), guards.clone())),
            _ => None,
        })?;

        let mut specialization = SpecializationData::specialized(template, order, &rewrite_on, &guards);
        let mut seen = HashSet::new();
        if rewrite_on.iter().any(|exception| !seen.insert(exception.as_str())) {
            specialization.add_error("Duplicate exception type.");
        }
        Some(specialization)
    }
}
