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

//! Executable types

use crate::template::TemplateMethod;
use crate::typesystem::TypeData;
use nodegen_common::MessageContainer;

/// A typed entry point (`execute_int`, `execute_generic`, ...) of a node
#[derive(Debug, Clone)]
pub struct ExecutableTypeData {
    template: TemplateMethod,
    ty: TypeData,
    evaluated_count: usize,
    has_frame: bool,
    has_unexpected_value: bool,
    is_final: bool,
    is_abstract: bool,
}

impl ExecutableTypeData {
    pub fn new(template: TemplateMethod, ty: TypeData, has_unexpected_value: bool) -> Self {
        let method = template.method();
        let is_final = method.is_some_and(|m| m.modifiers.is_final);
        let is_abstract = method.is_some_and(|m| m.modifiers.is_abstract);
        let has_frame = template.has_frame();
        let evaluated_count = template.parameters_of(crate::template::ParameterKind::Evaluated).count();
        Self {
            template,
            ty,
            evaluated_count,
            has_frame,
            has_unexpected_value,
            is_final,
            is_abstract,
        }
    }

    pub fn template(&self) -> &TemplateMethod {
        &self.template
    }

    /// Name of the execute method
    pub fn method_name(&self) -> &str {
        self.template.method_name()
    }

    /// Type produced by the method
    pub fn ty(&self) -> &TypeData {
        &self.ty
    }

    /// Number of values handed in already evaluated by the caller
    pub fn evaluated_count(&self) -> usize {
        self.evaluated_count
    }

    pub fn has_frame(&self) -> bool {
        self.has_frame
    }

    /// Whether the method may fail with an unexpected value
    pub fn has_unexpected_value(&self) -> bool {
        self.has_unexpected_value
    }

    /// Final execute methods are implemented by hand and never generated
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    pub fn has_errors(&self) -> bool {
        self.template.has_errors()
    }
}
