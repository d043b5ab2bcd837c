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

//! Template methods

use super::{ActualParameter, ParameterKind};
use crate::declaration::MethodDeclaration;
use crate::typesystem::TypeData;
use nodegen_common::{Diagnostic, MessageContainer, SourcePosition};

/// A declared (or synthesized) method together with the role of each of its parameters
#[derive(Debug, Clone)]
pub struct TemplateMethod {
    id: String,
    element: String,
    method: Option<MethodDeclaration>,
    return_type: ActualParameter,
    parameters: Vec<ActualParameter>,
    messages: Vec<Diagnostic>,
}

impl TemplateMethod {
    /// Template backed by a declared method
    pub fn new(id: impl Into<String>, owner: &str, method: MethodDeclaration, return_type: ActualParameter, parameters: Vec<ActualParameter>) -> Self {
        let element = format!("{}.{}", owner, method.name);
        Self {
            id: id.into(),
            element,
            method: Some(method),
            return_type,
            parameters,
            messages: Vec::new(),
        }
    }

    /// Template without a declared method
    pub fn synthetic(id: impl Into<String>, owner: &str, return_type: ActualParameter, parameters: Vec<ActualParameter>) -> Self {
        let id = id.into();
        Self {
            element: format!("{}.{}", owner, id),
            id,
            method: None,
            return_type,
            parameters,
            messages: Vec::new(),
        }
    }

    /// Copy of this template under another id, without a backing method
    pub fn synthetic_copy(&self, id: impl Into<String>, owner: &str) -> Self {
        Self::synthetic(id, owner, self.return_type.clone(), self.parameters.clone())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    pub fn method(&self) -> Option<&MethodDeclaration> {
        self.method.as_ref()
    }

    /// Name of the backing method, empty for synthetic templates
    pub fn method_name(&self) -> &str {
        self.method.as_ref().map(|m| m.name.as_str()).unwrap_or("")
    }

    pub fn is_synthetic(&self) -> bool {
        self.method.is_none()
    }

    pub fn return_type(&self) -> &ActualParameter {
        &self.return_type
    }

    pub fn return_type_mut(&mut self) -> &mut ActualParameter {
        &mut self.return_type
    }

    pub fn parameters(&self) -> &[ActualParameter] {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut [ActualParameter] {
        &mut self.parameters
    }

    /// Parameters that take part in the type signature
    pub fn signature_parameters(&self) -> impl Iterator<Item = &ActualParameter> {
        self.parameters.iter().filter(|p| p.is_signature())
    }

    /// Return type followed by the types of the signature parameters
    pub fn signature_types(&self) -> Vec<Option<&TypeData>> {
        std::iter::once(self.return_type.type_data()).chain(self.signature_parameters().map(|p| p.type_data())).collect()
    }

    /// Number of signature parameters
    pub fn signature_arity(&self) -> usize {
        self.signature_parameters().count()
    }

    pub fn find_parameter(&self, local_name: &str) -> Option<&ActualParameter> {
        self.parameters.iter().find(|p| p.local_name() == local_name)
    }

    /// Parameters of one kind
    pub fn parameters_of(&self, kind: ParameterKind) -> impl Iterator<Item = &ActualParameter> {
        self.parameters.iter().filter(move |p| p.kind() == kind)
    }

    pub fn has_frame(&self) -> bool {
        self.parameters_of(ParameterKind::Frame).next().is_some()
    }
}

impl MessageContainer for TemplateMethod {
    fn element_name(&self) -> String {
        self.element.clone()
    }

    fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    fn messages_mut(&mut self) -> &mut Vec<Diagnostic> {
        &mut self.messages
    }

    fn position(&self) -> Option<&SourcePosition> {
        self.method.as_ref().and_then(|m| m.position.as_ref())
    }
}
