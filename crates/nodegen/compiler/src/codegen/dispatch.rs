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


//! Specialization scan and generic execution
//!
//! `execute_and_specialize` walks the specializations in lattice order, skipping every state
//! before the minimum one, and commits to the first whose guards accept the operands and whose
//! body does not request a rewrite. `execute_generic` runs the generic fallback.

use super::GenerationResult;
use super::expressions::Scope;
use super::generator::NodeEmitter;
use crate::node::SpecializationData;

impl NodeEmitter<'_> {
    /// Emit both dispatch functions; nodes without a generic state need neither
    pub(super) fn emit_dispatch_functions(&mut self) -> GenerationResult<()> {
        let node = self.node;
        let Some(generic) = node.generic_specialization() else {
            return Ok(());
        };
        let scope = self.generic_scope();
        self.emit_execute_and_specialize(generic, &scope)?;
        self.emit_execute_generic(generic, &scope)
    }

    /// Change the state and notify the listeners
    fn emit_transition(&mut self, specialization: &SpecializationData, reason: &str, scope: &Scope) -> GenerationResult<()> {
        let node = self.node;
        self.out.line(format!("self.state.replace({}, {:?});", self.names.variant(specialization), reason))?;
        for listener in node.listeners() {
            self.out.line(format!("{};", self.call_user(listener.template(), scope)))?;
        }
        Ok(())
    }

    fn emit_execute_and_specialize(&mut self, generic: &SpecializationData, scope: &Scope) -> GenerationResult<()> {
        let node = self.node;
        let kind = self.names.kind();
        let mut parameters = format!("minimum_state: {}", kind);
        let rest = self.dispatch_parameters();
        if !rest.is_empty() {
            parameters = format!("{}, {}", parameters, rest);
        }

        self.out.blank()?;
        self.out.doc("Choose the first state at or after `minimum_state` that accepts the operands")?;
        self.out.open(format!("fn execute_and_specialize(&mut self, {}) -> {} {{", parameters, self.generic_rust()))?;

        let candidates: Vec<&SpecializationData> = node.specializations().iter().filter(|s| s.is_specialized()).collect();
        if candidates.iter().any(|s| s.is_reachable()) {
            let start = match node.uninitialized_specialization() {
                Some(uninitialized) => format!("minimum_state == {}", self.names.variant(uninitialized)),
                None => "true".to_string(),
            };
            self.out.line(format!("let mut allowed = {};", start))?;
        }

        for specialization in candidates {
            if !specialization.is_reachable() {
                if self.config.emit_unreachable_comments {
                    self.out.comment(format!("{} is not reachable", specialization.id()))?;
                }
                continue;
            }
            self.out.line(format!("allowed = allowed || minimum_state == {};", self.names.variant(specialization)))?;

            let mut conditions = vec!["allowed".to_string()];
            conditions.extend(self.implicit_guards(specialization, scope));
            conditions.extend(self.explicit_guards(specialization, scope));
            self.out.open(format!("if {} {{", conditions.join(" && ")))?;

            let call = self.call_user(specialization.template(), scope);
            let returned = specialization.template().return_type().type_data().cloned().unwrap_or_else(|| self.generic_type().clone());
            let reason = format!("{} accepts the operands", specialization.id());
            if specialization.has_exceptions() {
                self.out.open(format!("if let Ok(result) = {} {{", call))?;
                self.emit_transition(specialization, &reason, scope)?;
                self.out.line(format!("return {};", self.box_value("result", &returned)))?;
                self.out.close("}")?;
            } else {
                self.out.line(format!("let result = {};", call))?;
                self.emit_transition(specialization, &reason, scope)?;
                self.out.line(format!("return {};", self.box_value("result", &returned)))?;
            }
            self.out.close("}")?;
        }

        if !generic.is_reachable() && self.config.emit_unreachable_comments {
            self.out.comment(format!("{} is not reachable", generic.id()))?;
        }
        self.emit_transition(generic, "no specialization accepts the operands", scope)?;
        self.out.line(self.dispatch_call("execute_generic", None, scope))?;
        self.out.close("}")
    }

    fn emit_execute_generic(&mut self, generic: &SpecializationData, scope: &Scope) -> GenerationResult<()> {
        let node = self.node;
        self.out.blank()?;
        self.out.open(format!("fn execute_generic(&mut self{}) -> {} {{", self.dispatch_parameter_tail(), self.generic_rust()))?;

        if generic.is_synthetic() || generic.use_specializations_for_generic() {
            for specialization in node.specializations().iter().filter(|s| s.is_specialized() && s.is_reachable()) {
                let mut conditions = self.implicit_guards(specialization, scope);
                conditions.extend(self.explicit_guards(specialization, scope));
                let call = self.call_user(specialization.template(), scope);
                let returned = specialization.template().return_type().type_data().cloned().unwrap_or_else(|| self.generic_type().clone());

                if conditions.is_empty() && !specialization.has_exceptions() {
                    self.out.line(self.box_value(&call, &returned))?;
                    return self.out.close("}");
                }
                if !conditions.is_empty() {
                    self.out.open(format!("if {} {{", conditions.join(" && ")))?;
                }
                if specialization.has_exceptions() {
                    self.out.open(format!("if let Ok(result) = {} {{", call))?;
                    self.out.line(format!("return {};", self.box_value("result", &returned)))?;
                    self.out.close("}")?;
                } else {
                    self.out.line(format!("return {};", self.box_value(&call, &returned)))?;
                }
                if !conditions.is_empty() {
                    self.out.close("}")?;
                }
            }
        }

        if generic.is_synthetic() {
            self.out.line(format!("{}::unsupported_specialization({:?})", self.config.runtime_crate, self.names.node_id()))?;
        } else {
            let returned = generic.template().return_type().type_data().cloned().unwrap_or_else(|| self.generic_type().clone());
            let call = self.call_user(generic.template(), scope);
            self.out.line(self.box_value(&call, &returned))?;
        }
        self.out.close("}")
    }

    /// `, frame: &mut F, left: G, ...` or nothing
    fn dispatch_parameter_tail(&self) -> String {
        let parameters = self.dispatch_parameters();
        if parameters.is_empty() { parameters } else { format!(", {}", parameters) }
    }
}
