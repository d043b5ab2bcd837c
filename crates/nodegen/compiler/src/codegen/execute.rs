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


//! Per-state function bodies and the public execute methods

use super::GenerationResult;
use super::expressions::{Held, Scope};
use super::generator::NodeEmitter;
use crate::node::{ExecutableTypeData, NodeChildData, SpecializationData, SpecializationRole};
use crate::template::{ActualParameter, ParameterKind};

impl<'a> NodeEmitter<'a> {
    /// Execute methods that get a generated implementation
    pub(super) fn generated_executables(&self) -> Vec<&'a ExecutableTypeData> {
        let node = self.node;
        node.executable_types(0).iter().filter(|e| !e.is_final()).collect()
    }

    /// The execute method a state implements directly; the others convert its result
    pub(super) fn primary_executable(&self, specialization: &SpecializationData) -> Option<&'a ExecutableTypeData> {
        let executables = self.generated_executables();
        let returned = specialization.template().return_type().type_data();
        executables
            .iter()
            .find(|e| Some(e.ty()) == returned)
            .or_else(|| executables.iter().find(|e| e.ty().is_generic()))
            .or_else(|| executables.iter().find(|e| !e.ty().is_void()))
            .or_else(|| executables.first())
            .copied()
    }

    pub(super) fn frame_parameter(&self) -> String {
        if self.node.uses_frame() { format!(", frame: &mut {}", self.frame_type) } else { String::new() }
    }

    fn frame_argument(&self) -> &'static str {
        if self.node.uses_frame() { "frame" } else { "" }
    }

    /// Public execute methods switching on the current state
    pub(super) fn emit_execute_methods(&mut self) -> GenerationResult<()> {
        let node = self.node;
        for executable in self.generated_executables() {
            let frame = if executable.has_frame() { format!(", frame: &mut {}", self.frame_type) } else { String::new() };
            self.out.blank()?;
            self.out.open(format!("pub fn {}(&mut self{}){} {{", executable.method_name(), frame, self.return_clause(executable)))?;
            if let [only] = node.specializations() {
                let function = self.names.state_function(self.rules, only, executable.method_name());
                self.out.line(format!("self.{}({})", function, self.frame_argument()))?;
            } else {
                self.out.open("match self.state.get() {")?;
                for specialization in node.specializations() {
                    let function = self.names.state_function(self.rules, specialization, executable.method_name());
                    self.out.line(format!("{} => self.{}({}),", self.names.variant(specialization), function, self.frame_argument()))?;
                }
                self.out.close("}")?;
            }
            self.out.close("}")?;
        }
        Ok(())
    }

    /// One private function per state and execute method
    pub(super) fn emit_state_functions(&mut self) -> GenerationResult<()> {
        let node = self.node;
        for (index, specialization) in node.specializations().iter().enumerate() {
            let Some(primary) = self.primary_executable(specialization) else {
                continue;
            };
            for executable in self.generated_executables() {
                let function = self.names.state_function(self.rules, specialization, executable.method_name());
                self.out.blank()?;
                self.out.open(format!("fn {}(&mut self{}){} {{", function, self.frame_parameter(), self.return_clause(executable)))?;
                if executable.method_name() != primary.method_name() {
                    self.emit_delegating_body(specialization, primary, executable)?;
                } else {
                    match specialization.role() {
                        SpecializationRole::Uninitialized => self.emit_dispatching_body(specialization, primary)?,
                        SpecializationRole::Generic => self.emit_dispatching_body(specialization, primary)?,
                        SpecializationRole::Specialized => self.emit_specialized_body(index, specialization, primary)?,
                    }
                }
                self.out.close("}")?;
            }
        }
        Ok(())
    }

    /// Run the primary execute method of the state and convert its result
    fn emit_delegating_body(
        &mut self,
        specialization: &SpecializationData,
        primary: &ExecutableTypeData,
        executable: &ExecutableTypeData,
    ) -> GenerationResult<()> {
        let function = self.names.state_function(self.rules, specialization, primary.method_name());
        let call = format!("self.{}({})", function, self.frame_argument());
        if executable.ty().is_void() {
            return self.out.line(format!("let _ = {};", call));
        }
        if primary.has_unexpected_value() {
            let boxed = self.box_value("value", primary.ty());
            self.out.line(format!("let value = match {} {{ Ok(value) => {}, Err(ex) => ex.into_value() }};", call, boxed))?;
            let generic = self.generic_type().clone();
            self.out.line(self.finish("value", &generic, executable))
        } else {
            self.out.line(format!("let value = {};", call))?;
            self.out.line(self.finish("value", primary.ty(), executable))
        }
    }

    /// Uninitialized and generic states evaluate every operand generically and hand over
    fn emit_dispatching_body(&mut self, specialization: &SpecializationData, primary: &ExecutableTypeData) -> GenerationResult<()> {
        let mut scope = Scope::default();
        let operands = self.operand_parameters();
        self.emit_generic_operands(&mut scope, &operands)?;
        let call = if specialization.is_uninitialized() {
            let variant = self.names.variant(specialization);
            self.dispatch_call("execute_and_specialize", Some(&variant), &scope)
        } else {
            self.dispatch_call("execute_generic", None, &scope)
        };
        let generic = self.generic_type().clone();
        self.out.line(self.finish(&call, &generic, primary))
    }

    /// Child of a flag parameter
    fn flag_child(&self, parameter: &ActualParameter) -> Option<&'a NodeChildData> {
        let node = self.node;
        node.children().iter().find(|c| c.short_circuit_flag() == parameter.local_name())
    }

    /// Evaluate operands without committing to a type, binding them in `scope`
    pub(super) fn emit_generic_operands(&mut self, scope: &mut Scope, operands: &[&ActualParameter]) -> GenerationResult<()> {
        let node = self.node;
        for parameter in operands {
            let name = parameter.local_name();
            if parameter.kind() == ParameterKind::ShortCircuitFlag {
                let decision = self
                    .flag_child(parameter)
                    .and_then(|child| node.short_circuits().iter().find(|s| s.value_name() == child.name() && s.is_generic()))
                    .map(|short_circuit| self.call_named(short_circuit.callee(), short_circuit.template(), scope))
                    .unwrap_or_else(|| "true".to_string());
                self.out.line(format!("let {}: bool = {};", name, decision))?;
                scope.bind(name, Held::Flag);
                continue;
            }
            let held = self.generic_held(parameter);
            let evaluation = match node.find_child(parameter.spec_name()) {
                Some(child) => self.generic_evaluation(child, parameter),
                None => "Default::default()".to_string(),
            };
            self.emit_let(name, &held, &evaluation, parameter)?;
            scope.bind(name, held);
        }
        Ok(())
    }

    /// `let name: T = value;`, evaluated only when the short-circuit flag allows it
    fn emit_let(&mut self, name: &str, held: &Held, evaluation: &str, parameter: &ActualParameter) -> GenerationResult<()> {
        let rust = self.rust_type(held);
        match self.node.find_child(parameter.spec_name()).filter(|c| c.is_short_circuit()) {
            Some(child) => self.out.line(format!(
                "let {}: {} = if {} {{ {} }} else {{ Default::default() }};",
                name,
                rust,
                child.short_circuit_flag(),
                evaluation
            )),
            None => self.out.line(format!("let {}: {} = {};", name, rust, evaluation)),
        }
    }

    /// Hand the operands in `scope` to the next state, converted to the primary's result
    fn fallback(&self, next: Option<&SpecializationData>, scope: &Scope, primary: &ExecutableTypeData) -> String {
        match next {
            Some(next) => {
                let call = self.dispatch_call("execute_and_specialize", Some(&self.names.variant(next)), scope);
                self.finish(&call, self.generic_type(), primary)
            }
            None => format!("{}::unsupported_specialization({:?})", self.config.runtime_crate, self.names.node_id()),
        }
    }

    /// Typed operand evaluation, guard checks and the call of the specialization body
    fn emit_specialized_body(&mut self, index: usize, specialization: &SpecializationData, primary: &ExecutableTypeData) -> GenerationResult<()> {
        let node = self.node;
        let next = node.specializations().get(index + 1);
        let mut scope = Scope::default();

        for parameter in specialization.template().parameters() {
            let name = parameter.local_name();
            match parameter.kind() {
                ParameterKind::ShortCircuitFlag => {
                    let decision = self
                        .flag_child(parameter)
                        .and_then(|child| {
                            specialization
                                .short_circuits()
                                .iter()
                                .find(|s| s.value_name() == child.name())
                                .or_else(|| node.short_circuits().iter().find(|s| s.value_name() == child.name() && s.is_generic()))
                        })
                        .map(|short_circuit| self.call_named(short_circuit.callee(), short_circuit.template(), &scope))
                        .unwrap_or_else(|| "true".to_string());
                    self.out.line(format!("let {}: bool = {};", name, decision))?;
                    scope.bind(name, Held::Flag);
                }
                ParameterKind::Value => {
                    let Some(child) = node.find_child(parameter.spec_name()) else {
                        continue;
                    };
                    if parameter.is_array() {
                        let evaluation = self.generic_evaluation(child, parameter);
                        self.emit_let(name, &Held::Array, &evaluation, parameter)?;
                        scope.bind(name, Held::Array);
                        continue;
                    }
                    let ty = parameter.type_data().cloned().unwrap_or_else(|| self.generic_type().clone());
                    let access = self.child_access(child, parameter);
                    let (evaluation, checked) = match child.find_executable_type(&ty) {
                        None => ("Default::default()".to_string(), false),
                        Some(executable) if executable.ty() == &ty => (self.execute_call(&access, executable), executable.has_unexpected_value()),
                        Some(executable) if ty.is_generic() => (self.generic_execute(&access, executable), false),
                        Some(executable) => (self.ts.call("expect", &ty, &self.generic_execute(&access, executable)), true),
                    };
                    let held = Held::Typed(ty);
                    if checked {
                        self.emit_checked_operand(name, &held, &evaluation, child, next, &scope, primary)?;
                    } else {
                        self.emit_let(name, &held, &evaluation, parameter)?;
                    }
                    scope.bind(name, held);
                }
                _ => {}
            }
        }

        let mut checks = Vec::new();
        if next.is_some() {
            checks.extend(self.implicit_guards(specialization, &scope));
        }
        checks.extend(self.explicit_guards(specialization, &scope));
        if !checks.is_empty() {
            self.out.open(format!("if !({}) {{", checks.join(" && ")))?;
            self.out.line(format!("return {};", self.fallback(next, &scope, primary)))?;
            self.out.close("}")?;
        }

        let call = self.call_user(specialization.template(), &scope);
        let returned = specialization.template().return_type().type_data().cloned().unwrap_or_else(|| self.generic_type().clone());
        if specialization.has_exceptions() {
            self.out.open(format!("match {} {{", call))?;
            self.out.line(format!("Ok(result) => {},", self.finish("result", &returned, primary)))?;
            self.out.line(format!("Err(_) => {},", self.fallback(next, &scope, primary)))?;
            self.out.close("}")
        } else {
            self.out.line(self.finish(&call, &returned, primary))
        }
    }

    /// Typed evaluation that falls back to the next state on a value of another type
    #[allow(clippy::too_many_arguments)]
    fn emit_checked_operand(
        &mut self,
        name: &str,
        held: &Held,
        evaluation: &str,
        child: &NodeChildData,
        next: Option<&SpecializationData>,
        scope: &Scope,
        primary: &ExecutableTypeData,
    ) -> GenerationResult<()> {
        let rust = self.rust_type(held);
        let short_circuit = child.is_short_circuit();
        if short_circuit {
            self.out.open(format!("let {}: {} = if {} {{", name, rust, child.short_circuit_flag()))?;
            self.out.open(format!("match {} {{", evaluation))?;
        } else {
            self.out.open(format!("let {}: {} = match {} {{", name, rust, evaluation))?;
        }
        self.out.line("Ok(value) => value,")?;
        self.out.open("Err(ex) => {")?;
        self.out.line(format!("let {} = ex.into_value();", name))?;

        let mut remaining = scope.clone();
        remaining.bind(name, Held::Typed(self.generic_type().clone()));
        let operands: Vec<&ActualParameter> = self.operand_parameters().into_iter().filter(|p| remaining.get(p.local_name()).is_none()).collect();
        self.emit_generic_operands(&mut remaining, &operands)?;
        self.out.line(format!("return {};", self.fallback(next, &remaining, primary)))?;
        self.out.close("}")?;

        if short_circuit {
            self.out.close("}")?;
            self.out.reopen("} else {")?;
            self.out.line("Default::default()")?;
            self.out.close("};")
        } else {
            self.out.close("};")
        }
    }
}
