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


//! Expressions shared by the emitted functions
//!
//! Generated functions keep operands in locals named after the children they come from. A local
//! either holds an unboxed value of a type-system type, a vector of generic values for an array
//! of children, or a short-circuit flag. Conversions between those representations go through
//! the type-system functions `is_<type>`, `as_<type>` and `expect_<type>` and through
//! `From<T>` on the generic type.

use super::generator::NodeEmitter;
use crate::node::{ExecutableTypeData, NodeChildData, SpecializationData};
use crate::template::{ActualParameter, ParameterKind, TemplateMethod};
use crate::typesystem::TypeData;

/// How a local of the generated code holds an operand
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Held {
    /// A value of a type-system type
    Typed(TypeData),
    /// Generic values of an array of children
    Array,
    /// Short-circuit flag
    Flag,
}

/// Locals visible at a point of a generated function
#[derive(Debug, Clone, Default)]
pub(super) struct Scope {
    locals: Vec<(String, Held)>,
}

impl Scope {
    /// Bind a local, replacing an earlier binding of the same name
    pub(super) fn bind(&mut self, name: &str, held: Held) {
        match self.locals.iter_mut().find(|(local, _)| local == name) {
            Some(entry) => entry.1 = held,
            None => self.locals.push((name.to_string(), held)),
        }
    }

    pub(super) fn get(&self, name: &str) -> Option<&Held> {
        self.locals.iter().find(|(local, _)| local == name).map(|(_, held)| held)
    }
}

impl<'a> NodeEmitter<'a> {
    pub(super) fn generic_type(&self) -> &TypeData {
        self.ts.generic_type()
    }

    pub(super) fn generic_rust(&self) -> &str {
        self.ts.generic_type().rust()
    }

    /// Rust type of a local
    pub(super) fn rust_type(&self, held: &Held) -> String {
        match held {
            Held::Typed(ty) => ty.rust().to_string(),
            Held::Array => format!("Vec<{}>", self.generic_rust()),
            Held::Flag => "bool".to_string(),
        }
    }

    /// Return type clause of an execute method, empty for `void`
    pub(super) fn return_clause(&self, executable: &ExecutableTypeData) -> String {
        let ty = executable.ty();
        if ty.is_void() {
            String::new()
        } else if executable.has_unexpected_value() {
            format!(" -> ExecuteResult<{}, {}>", ty.rust(), self.generic_rust())
        } else {
            format!(" -> {}", ty.rust())
        }
    }

    /// Move a value of type `from` into the generic type
    pub(super) fn box_value(&self, expr: &str, from: &TypeData) -> String {
        if from.is_generic() {
            expr.to_string()
        } else if from.is_void() {
            format!("{{ {}; {}::default() }}", expr, self.generic_rust())
        } else {
            format!("{}::from({})", self.generic_rust(), expr)
        }
    }

    /// Move a local into its generic representation
    pub(super) fn boxed(&self, name: &str, held: Option<&Held>) -> String {
        match held {
            Some(Held::Typed(ty)) => self.box_value(name, ty),
            Some(Held::Array) | Some(Held::Flag) => name.to_string(),
            None => "Default::default()".to_string(),
        }
    }

    /// Turn `expr`, produced as `from`, into the return value of `to`
    pub(super) fn finish(&self, expr: &str, from: &TypeData, to: &ExecutableTypeData) -> String {
        let target = to.ty();
        if target.is_void() {
            return format!("{{ let _ = {}; }}", expr);
        }
        let value = if from == target {
            expr.to_string()
        } else {
            let boxed = self.box_value(expr, from);
            if target.is_generic() {
                boxed
            } else if to.has_unexpected_value() {
                return self.ts.call("expect", target, &boxed);
            } else {
                self.ts.call("as", target, &format!("&{}", boxed))
            }
        };
        if to.has_unexpected_value() { format!("Ok({})", value) } else { value }
    }

    /// Copy a local into a parameter of type `to`
    fn convert_local(&self, name: &str, from: &TypeData, to: &TypeData) -> Option<String> {
        if from == to {
            None
        } else if to.is_generic() {
            Some(format!("{}::from({}.clone())", self.generic_rust(), name))
        } else if from.is_generic() {
            Some(self.ts.call("as", to, &format!("&{}", name)))
        } else {
            Some(self.ts.call("as", to, &format!("&{}::from({}.clone())", self.generic_rust(), name)))
        }
    }

    /// Argument passed for `parameter` of a user method
    pub(super) fn argument(&self, parameter: &ActualParameter, scope: &Scope) -> String {
        let name = parameter.local_name();
        match parameter.kind() {
            ParameterKind::Frame => "frame".to_string(),
            ParameterKind::Local => format!("self.node.{}.clone()", name),
            ParameterKind::ShortCircuitFlag | ParameterKind::Return => name.to_string(),
            ParameterKind::Value | ParameterKind::Evaluated => {
                let converted = match (scope.get(name), parameter.type_data()) {
                    (Some(Held::Array), Some(ty)) if parameter.is_array() && !ty.is_generic() => {
                        Some(format!("{}.iter().map(|value| {}).collect::<Vec<_>>()", name, self.ts.call("as", ty, "value")))
                    }
                    (Some(Held::Typed(from)), Some(to)) if !parameter.is_array() => self.convert_local(name, from, to),
                    _ => None,
                };
                match (converted, self.short_circuited(parameter)) {
                    (Some(conversion), Some(child)) => {
                        format!("if {} {{ {} }} else {{ Default::default() }}", child.short_circuit_flag(), conversion)
                    }
                    (Some(conversion), None) => conversion,
                    (None, _) => format!("{}.clone()", name),
                }
            }
        }
    }

    /// The short-circuited child a value parameter belongs to
    fn short_circuited(&self, parameter: &ActualParameter) -> Option<&'a NodeChildData> {
        let node = self.node;
        node.find_child(parameter.spec_name()).filter(|child| child.is_short_circuit())
    }

    /// Call of a user method on the wrapped node
    pub(super) fn call_user(&self, template: &TemplateMethod, scope: &Scope) -> String {
        self.call_named(template.method_name(), template, scope)
    }

    /// `self.node.callee(...)` with the arguments of `template`
    pub(super) fn call_named(&self, callee: &str, template: &TemplateMethod, scope: &Scope) -> String {
        let arguments: Vec<String> = template.parameters().iter().map(|p| self.argument(p, scope)).collect();
        format!("self.node.{}({})", callee, arguments.join(", "))
    }

    /// Type checks implied by the signature of `specialization`
    pub(super) fn implicit_guards(&self, specialization: &SpecializationData, scope: &Scope) -> Vec<String> {
        let mut checks = Vec::new();
        for parameter in specialization.template().signature_parameters() {
            let name = parameter.local_name();
            let Some(ty) = parameter.type_data().filter(|ty| !ty.is_generic()) else {
                continue;
            };
            let check = match scope.get(name) {
                Some(Held::Array) if parameter.is_array() => {
                    format!("{}.iter().all(|value| {})", name, self.ts.call("is", ty, "value"))
                }
                Some(Held::Typed(held)) if held.is_generic() => self.ts.call("is", ty, &format!("&{}", name)),
                _ => continue,
            };
            match self.short_circuited(parameter) {
                Some(child) => checks.push(format!("(!{} || {})", child.short_circuit_flag(), check)),
                None => checks.push(check),
            }
        }
        checks
    }

    /// Calls of the guard methods of `specialization`
    pub(super) fn explicit_guards(&self, specialization: &SpecializationData, scope: &Scope) -> Vec<String> {
        specialization.guards().iter().map(|guard| self.call_user(guard.template(), scope)).collect()
    }

    /// Path of the child slot bound to `parameter`
    pub(super) fn child_access(&self, child: &NodeChildData, parameter: &ActualParameter) -> String {
        match parameter.index() {
            Some(index) => format!("self.node.{}[{}]", child.name(), index),
            None => format!("self.node.{}", child.name()),
        }
    }

    /// Call of an execute method of a child
    pub(super) fn execute_call(&self, access: &str, executable: &ExecutableTypeData) -> String {
        let frame = if executable.has_frame() { "frame" } else { "" };
        format!("{}.{}({})", access, executable.method_name(), frame)
    }

    /// Generic value of executing a child through the given execute method
    pub(super) fn generic_execute(&self, access: &str, executable: &ExecutableTypeData) -> String {
        let call = self.execute_call(access, executable);
        if executable.has_unexpected_value() {
            format!("match {} {{ Ok(value) => {}, Err(ex) => ex.into_value() }}", call, self.box_value("value", executable.ty()))
        } else {
            self.box_value(&call, executable.ty())
        }
    }

    /// Evaluate the child bound to `parameter` without committing to a type
    pub(super) fn generic_evaluation(&self, child: &NodeChildData, parameter: &ActualParameter) -> String {
        let Some(executable) = child.find_any_generic_executable_type() else {
            return "Default::default()".to_string();
        };
        if parameter.is_array() {
            let each = self.generic_execute("child", executable);
            format!("self.node.{}.iter_mut().map(|child| {}).collect::<Vec<_>>()", child.name(), each)
        } else {
            self.generic_execute(&self.child_access(child, parameter), executable)
        }
    }

    /// Flags and values handed to the dispatch functions, in execution order
    pub(super) fn operand_parameters(&self) -> Vec<&'a ActualParameter> {
        let node = self.node;
        match node.generic_specialization() {
            Some(generic) => generic
                .template()
                .parameters()
                .iter()
                .filter(|p| matches!(p.kind(), ParameterKind::Value | ParameterKind::ShortCircuitFlag))
                .collect(),
            None => Vec::new(),
        }
    }

    /// How the dispatch functions hold an operand
    pub(super) fn generic_held(&self, parameter: &ActualParameter) -> Held {
        match parameter.kind() {
            ParameterKind::ShortCircuitFlag => Held::Flag,
            _ if parameter.is_array() => Held::Array,
            _ => Held::Typed(self.generic_type().clone()),
        }
    }

    /// Scope at the top of a dispatch function
    pub(super) fn generic_scope(&self) -> Scope {
        let mut scope = Scope::default();
        for parameter in self.operand_parameters() {
            scope.bind(parameter.local_name(), self.generic_held(parameter));
        }
        scope
    }

    /// Parameter list of a dispatch function after `&mut self`
    pub(super) fn dispatch_parameters(&self) -> String {
        let mut parameters = Vec::new();
        if self.node.uses_frame() {
            parameters.push(format!("frame: &mut {}", self.frame_type));
        }
        for parameter in self.operand_parameters() {
            parameters.push(format!("{}: {}", parameter.local_name(), self.rust_type(&self.generic_held(parameter))));
        }
        parameters.join(", ")
    }

    /// Call of a dispatch function with the operands boxed from `scope`
    pub(super) fn dispatch_call(&self, function: &str, lead: Option<&str>, scope: &Scope) -> String {
        let mut arguments: Vec<String> = lead.map(str::to_string).into_iter().collect();
        if self.node.uses_frame() {
            arguments.push("frame".to_string());
        }
        for parameter in self.operand_parameters() {
            let name = parameter.local_name();
            arguments.push(self.boxed(name, scope.get(name)));
        }
        format!("self.{}({})", function, arguments.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::GenerationConfig;
    use crate::fixtures::{ARITHMETIC, LOGICAL, parse_node};
    use crate::naming::NamingRules;

    fn with_emitter(source: &str, name: &str, check: impl FnOnce(&NodeEmitter<'_>)) {
        let node = parse_node(source, name);
        let config = GenerationConfig::default();
        let rules = NamingRules::new().unwrap();
        let emitter = NodeEmitter::new(&node, &config, &rules, "VirtualFrame", "Node").unwrap();
        check(&emitter);
    }

    #[test]
    fn test_dispatch_signature() {
        with_emitter(ARITHMETIC, "AddNode", |emitter| {
            assert_eq!(emitter.dispatch_parameters(), "frame: &mut VirtualFrame, left: Value, right: Value");
        });
        with_emitter(LOGICAL, "AndNode", |emitter| {
            assert_eq!(emitter.dispatch_parameters(), "frame: &mut VirtualFrame, left: Value, has_right: bool, right: Value");
        });
    }

    #[test]
    fn test_implicit_guards_of_int() {
        with_emitter(ARITHMETIC, "AddNode", |emitter| {
            let int = emitter.node.find_specialization("Int").unwrap();
            let checks = emitter.implicit_guards(int, &emitter.generic_scope());
            assert_eq!(
                checks,
                vec!["crate::types::SimpleTypes::is_int(&left)", "crate::types::SimpleTypes::is_int(&right)"]
            );
        });
    }

    #[test]
    fn test_short_circuited_guard_respects_flag() {
        with_emitter(LOGICAL, "AndNode", |emitter| {
            let and = emitter.node.specializations().iter().find(|s| s.is_specialized()).unwrap();
            let checks = emitter.implicit_guards(and, &emitter.generic_scope());
            assert_eq!(checks[1], "(!has_right || crate::types::SimpleTypes::is_boolean(&right))");
        });
    }

    #[test]
    fn test_finish_conversions() {
        with_emitter(ARITHMETIC, "AddNode", |emitter| {
            let generic = emitter.generic_type().clone();
            let int_execute = emitter.node.executable_types(0).iter().find(|e| e.method_name() == "execute_int").unwrap();
            assert_eq!(emitter.finish("result", &generic, int_execute), "crate::types::SimpleTypes::expect_int(result)");
            let int = int_execute.ty().clone();
            assert_eq!(emitter.finish("result", &int, int_execute), "Ok(result)");
        });
    }

    #[test]
    fn test_scope_rebinds() {
        let mut scope = Scope::default();
        scope.bind("left", Held::Flag);
        scope.bind("left", Held::Array);
        assert_eq!(scope.get("left"), Some(&Held::Array));
        assert_eq!(scope.get("right"), None);
    }
}
