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

//! Parser for specialization listeners

use super::{ParserContext, has_marker};
use crate::declaration::MethodDeclaration;
use crate::node::SpecializationListenerData;
use crate::template::{MethodSpec, TemplateMethod, TemplateMethodParser};
use crate::typesystem::TypeSystemData;

/// Parses methods called on every specialization of the node
pub struct SpecializationListenerParser<'a> {
    context: ParserContext<'a>,
}

impl<'a> SpecializationListenerParser<'a> {
    pub fn new(context: ParserContext<'a>) -> Self {
        Self { context }
    }
}

impl TemplateMethodParser for SpecializationListenerParser<'_> {
    type Output = SpecializationListenerData;

    fn name(&self) -> &'static str {
        "specialization_listener"
    }

    fn owner(&self) -> &str {
        self.context.owner
    }

    fn type_system(&self) -> Option<&TypeSystemData> {
        Some(self.context.type_system)
    }

    fn is_parsable(&self, method: &MethodDeclaration) -> bool {
        has_marker(method, "SpecializationListener")
    }

    fn create_specification(&self, _method: &MethodDeclaration) -> Option<MethodSpec> {
        // Listeners see the operands the way the specializing execution holds them.
        let generic = vec![self.context.type_system.generic_type().name().to_string()];
        let mut spec = self.context.create_default_method_spec(vec!["void".to_string()], |_| generic.clone());
        spec.ignore_additional_specifications = true;
        Some(spec)
    }

    fn create(&self, template: TemplateMethod) -> Option<SpecializationListenerData> {
        Some(SpecializationListenerData::new(template))
    }
}
