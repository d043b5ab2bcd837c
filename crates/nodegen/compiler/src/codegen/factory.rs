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


//! Factory emission

use super::GenerationResult;
use super::generator::NodeEmitter;
use crate::declaration::ConstructorDeclaration;
use crate::node::SpecializationData;

impl<'a> NodeEmitter<'a> {
    /// Constructors mirrored by `create` methods
    fn creatable_constructors(&self) -> Vec<&'a ConstructorDeclaration> {
        let node = self.node;
        node.constructors()
            .iter()
            .filter(|c| !c.private && !c.is_copy_constructor(node.declaration_name()))
            .collect()
    }

    /// State a node created for a type name falls back to
    fn default_state(&self) -> Option<&'a SpecializationData> {
        let node = self.node;
        node.generic_specialization()
            .or_else(|| node.specializations().iter().find(|s| s.is_specialized()))
            .or_else(|| node.specializations().first())
    }

    /// Type names that select exactly one specialization
    fn type_name_states(&self) -> Vec<(String, &'a SpecializationData)> {
        let node = self.node;
        let Some(ts) = node.type_system() else {
            return Vec::new();
        };
        ts.value_types()
            .iter()
            .filter_map(|ty| {
                let mut matching = node
                    .specializations()
                    .iter()
                    .filter(|s| s.is_specialized() && s.is_reachable() && s.template().return_type().type_data() == Some(ty));
                match (matching.next(), matching.next()) {
                    (Some(only), None) => Some((ty.name().to_string(), only)),
                    _ => None,
                }
            })
            .collect()
    }

    /// Expression copying `previous` into a fresh node
    fn copy_expression(&self) -> String {
        let node = self.node;
        let user = self.names.user_type();
        let constructors = node.constructors();
        if let Some(copy) = constructors.iter().find(|c| !c.private && c.is_copy_constructor(user)) {
            let argument = if copy.parameters[0].ty.starts_with('&') { "previous" } else { "previous.clone()" };
            return format!("{}::{}({})", user, copy.name, argument);
        }
        match constructors.iter().find(|c| !c.private && c.parameters.is_empty()) {
            Some(empty) => format!("{}::{}()", user, empty.name),
            None => "previous.clone()".to_string(),
        }
    }

    pub(super) fn emit_factory(&mut self) -> GenerationResult<()> {
        let node = self.node;
        let user = self.names.user_type().to_string();
        let generated = self.names.generated();
        let factory = self.names.factory();

        self.out.blank()?;
        self.out.doc(format!("Creates `{}` instances", generated))?;
        self.out.line(format!("pub struct {};", factory))?;
        self.out.blank()?;
        self.out.open(format!("impl {} {{", factory))?;

        let constructors = self.creatable_constructors();
        if constructors.is_empty() {
            self.out.doc(format!("Wrap an existing `{}`", user))?;
            self.out.open(format!("pub fn create(node: {}) -> {} {{", user, generated))?;
            self.out.line(format!("{}::new(node)", generated))?;
            self.out.close("}")?;
        }
        for (index, constructor) in constructors.iter().enumerate() {
            if index > 0 {
                self.out.blank()?;
            }
            let method = if constructor.name == "new" { "create".to_string() } else { format!("create_{}", constructor.name) };
            let parameters: Vec<String> = constructor.parameters.iter().map(|p| format!("{}: {}", p.name, p.ty)).collect();
            let arguments: Vec<&str> = constructor.parameters.iter().map(|p| p.name.as_str()).collect();
            self.out.open(format!("pub fn {}({}) -> {} {{", method, parameters.join(", "), generated))?;
            self.out.line(format!("{}::new({}::{}({}))", generated, user, constructor.name, arguments.join(", ")))?;
            self.out.close("}")?;
        }

        if node.specializations().len() > 1 {
            if let Some(fallback) = self.default_state() {
                self.out.blank()?;
                self.out.doc("Copy `previous` into a node that starts in the state selected by `type_name`")?;
                self.out.open(format!("pub fn create_specialized(previous: &{}, type_name: &str) -> {} {{", user, generated))?;
                self.out.line(format!("let node = {};", self.copy_expression()))?;
                let states = self.type_name_states();
                if states.is_empty() {
                    self.out.line(format!("let state = {};", self.names.variant(fallback)))?;
                } else {
                    self.out.open("let state = match type_name {")?;
                    for (type_name, state) in states {
                        self.out.line(format!("{:?} => {},", type_name, self.names.variant(state)))?;
                    }
                    self.out.line(format!("_ => {},", self.names.variant(fallback)))?;
                    self.out.close("};")?;
                }
                self.out.line(format!("{}::with_state(node, state)", generated))?;
                self.out.close("}")?;
            }
        }
        self.out.close("}")?;

        if self.config.emit_factory_metadata {
            self.emit_factory_metadata()?;
        }
        Ok(())
    }

    fn emit_factory_metadata(&mut self) -> GenerationResult<()> {
        let node = self.node;
        let signatures: Vec<String> = match self.creatable_constructors().as_slice() {
            [] => vec![format!("vec![{:?}]", self.names.user_type())],
            constructors => constructors
                .iter()
                .map(|c| format!("vec![{}]", c.parameters.iter().map(|p| format!("{:?}", p.ty)).collect::<Vec<_>>().join(", ")))
                .collect(),
        };
        let children: Vec<String> = node.executed_children().map(|c| format!("{:?}", c.name())).collect();
        let states: Vec<String> = node.specializations().iter().map(|s| format!("{:?}", s.id())).collect();

        self.out.blank()?;
        self.out.open(format!("impl NodeFactory for {} {{", self.names.factory()))?;
        self.out.open("fn node_id(&self) -> &'static str {")?;
        self.out.line(format!("{:?}", self.names.node_id()))?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.open("fn node_signatures(&self) -> Vec<Vec<&'static str>> {")?;
        self.out.line(format!("vec![{}]", signatures.join(", ")))?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.open("fn execution_signature(&self) -> Vec<&'static str> {")?;
        self.out.line(format!("vec![{}]", children.join(", ")))?;
        self.out.close("}")?;
        self.out.blank()?;
        self.out.open("fn specializations(&self) -> Vec<&'static str> {")?;
        self.out.line(format!("vec![{}]", states.join(", ")))?;
        self.out.close("}")?;
        self.out.close("}")
    }
}
