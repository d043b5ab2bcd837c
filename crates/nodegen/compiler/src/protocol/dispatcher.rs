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


//! State machine of a specializing node

use crate::codegen::{GenerationError, GenerationResult};
use crate::node::{NodeData, SpecializationData, SpecializationRole};
use nodegen_core::RewriteResult;
use tracing::trace;

/// Answers the questions the generated code answers at run time
#[cfg_attr(test, mockall::automock)]
pub trait OperandOracle {
    /// Whether the operand bound to `operand` currently has type `type_name`
    fn is_type(&self, operand: &str, type_name: &str) -> bool;

    /// Result of calling guard method `guard` for `specialization`
    fn guard(&self, specialization: &str, guard: &str) -> bool;

    /// Run the body of `specialization`; an error requests a rewrite
    fn execute_body(&self, specialization: &str) -> RewriteResult<()>;
}

/// Outcome of one execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The node stayed in the named state
    Stayed(String),
    /// The node moved forward
    Specialized { from: String, to: String },
}

/// Current state of a node and the transitions it takes
#[derive(Debug)]
pub struct Dispatcher<'a> {
    node: &'a NodeData,
    state: usize,
}

impl<'a> Dispatcher<'a> {
    /// Start in the first state of a finalized node
    pub fn new(node: &'a NodeData) -> GenerationResult<Self> {
        if node.specializations().is_empty() {
            return Err(GenerationError::MissingSpecialization {
                node: node.node_id().to_string(),
                role: "initial",
            });
        }
        Ok(Self { node, state: 0 })
    }

    /// Id of the current state
    pub fn state(&self) -> &'a str {
        let node = self.node;
        node.specializations()[self.state].id()
    }

    fn accepts(specialization: &SpecializationData, oracle: &dyn OperandOracle) -> bool {
        let types_match = specialization.template().signature_parameters().all(|parameter| match parameter.type_data() {
            Some(ty) if !ty.is_generic() => oracle.is_type(parameter.local_name(), ty.name()),
            _ => true,
        });
        types_match && specialization.guards().iter().all(|guard| oracle.guard(specialization.id(), guard.guard_name()))
    }

    /// Execute once in the current state
    pub fn execute(&mut self, oracle: &dyn OperandOracle) -> Transition {
        let node = self.node;
        let current = &node.specializations()[self.state];
        match current.role() {
            SpecializationRole::Uninitialized => self.specialize(self.state, oracle),
            SpecializationRole::Generic => Transition::Stayed(current.id().to_string()),
            SpecializationRole::Specialized => {
                if Self::accepts(current, oracle) && oracle.execute_body(current.id()).is_ok() {
                    return Transition::Stayed(current.id().to_string());
                }
                if self.state + 1 < node.specializations().len() {
                    self.specialize(self.state + 1, oracle)
                } else {
                    Transition::Stayed(current.id().to_string())
                }
            }
        }
    }

    /// Choose the first state at or after `minimum` whose guards accept the operands
    pub fn specialize(&mut self, minimum: usize, oracle: &dyn OperandOracle) -> Transition {
        let node = self.node;
        let specializations = node.specializations();
        let chosen = specializations
            .iter()
            .enumerate()
            .skip(minimum)
            .find(|(_, specialization)| match specialization.role() {
                SpecializationRole::Specialized => {
                    specialization.is_reachable()
                        && Self::accepts(specialization, oracle)
                        && (!specialization.has_exceptions() || oracle.execute_body(specialization.id()).is_ok())
                }
                SpecializationRole::Generic => true,
                SpecializationRole::Uninitialized => false,
            })
            .map(|(index, _)| index);

        match chosen {
            Some(index) if index != self.state => {
                let from = self.state().to_string();
                self.state = index;
                let to = self.state().to_string();
                trace!(node = node.node_id(), from = from.as_str(), to = to.as_str(), "specialized");
                Transition::Specialized { from, to }
            }
            _ => Transition::Stayed(self.state().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ARITHMETIC, GUARDED, parse_node};
    use mockall::predicate::eq;
    use nodegen_core::Rewrite;

    /// Both operands have the same type
    struct Operands(&'static str);

    impl OperandOracle for Operands {
        fn is_type(&self, _operand: &str, type_name: &str) -> bool {
            type_name == self.0
        }

        fn guard(&self, _specialization: &str, _guard: &str) -> bool {
            true
        }

        fn execute_body(&self, _specialization: &str) -> RewriteResult<()> {
            Ok(())
        }
    }

    fn specialized(from: &str, to: &str) -> Transition {
        Transition::Specialized {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    #[test]
    fn test_int_double_round_trip() {
        let node = parse_node(ARITHMETIC, "AddNode");
        let mut dispatcher = Dispatcher::new(&node).unwrap();
        assert_eq!(dispatcher.state(), "Uninitialized");

        assert_eq!(dispatcher.execute(&Operands("int")), specialized("Uninitialized", "Int"));
        assert_eq!(dispatcher.execute(&Operands("int")), Transition::Stayed("Int".to_string()));
        assert_eq!(dispatcher.execute(&Operands("double")), specialized("Int", "Double"));
        assert_eq!(dispatcher.execute(&Operands("int")), specialized("Double", "Generic"));
        assert_eq!(dispatcher.execute(&Operands("int")), Transition::Stayed("Generic".to_string()));
    }

    #[test]
    fn test_rewrite_moves_past_failing_state() {
        let node = parse_node(ARITHMETIC, "AddNode");
        let mut dispatcher = Dispatcher::new(&node).unwrap();
        assert_eq!(dispatcher.execute(&Operands("int")), specialized("Uninitialized", "Int"));

        let mut oracle = MockOperandOracle::new();
        oracle.expect_is_type().returning(|_, ty| ty == "int");
        oracle.expect_execute_body().with(eq("Int")).times(1).returning(|_| Err(Rewrite::new("overflow")));
        assert_eq!(dispatcher.execute(&oracle), specialized("Int", "Generic"));
    }

    #[test]
    fn test_first_execution_skips_rewriting_body() {
        let node = parse_node(ARITHMETIC, "AddNode");
        let mut dispatcher = Dispatcher::new(&node).unwrap();

        let mut oracle = MockOperandOracle::new();
        oracle.expect_is_type().returning(|_, ty| ty == "int");
        oracle.expect_execute_body().with(eq("Int")).returning(|_| Err(Rewrite::new("overflow")));
        oracle.expect_guard().never();
        assert_eq!(dispatcher.execute(&oracle), specialized("Uninitialized", "Generic"));
    }

    #[test]
    fn test_guard_holds_keeps_state() {
        let node = parse_node(GUARDED, "AddNode");
        let mut dispatcher = Dispatcher::new(&node).unwrap();

        let mut oracle = MockOperandOracle::new();
        oracle.expect_is_type().returning(|_, ty| ty == "int");
        oracle.expect_guard().with(eq("Int"), eq("is_small")).times(2).returning(|_, _| true);
        oracle.expect_execute_body().with(eq("Int")).times(1).returning(|_| Ok(()));
        assert_eq!(dispatcher.execute(&oracle), specialized("Uninitialized", "Int"));
        assert_eq!(dispatcher.execute(&oracle), Transition::Stayed("Int".to_string()));
    }

    #[test]
    fn test_failing_guard_moves_to_next_state() {
        let node = parse_node(GUARDED, "AddNode");
        let mut dispatcher = Dispatcher::new(&node).unwrap();
        assert_eq!(dispatcher.execute(&Operands("int")), specialized("Uninitialized", "Int"));

        let mut oracle = MockOperandOracle::new();
        oracle.expect_is_type().returning(|_, ty| ty == "int" || ty == "double");
        oracle.expect_guard().with(eq("Int"), eq("is_small")).times(1).returning(|_, _| false);
        oracle.expect_execute_body().never();
        assert_eq!(dispatcher.execute(&oracle), specialized("Int", "Double"));
    }

    #[test]
    fn test_failing_guard_skipped_on_first_execution() {
        let node = parse_node(GUARDED, "AddNode");
        let mut dispatcher = Dispatcher::new(&node).unwrap();

        let mut oracle = MockOperandOracle::new();
        oracle.expect_is_type().returning(|_, ty| ty == "int");
        oracle.expect_guard().with(eq("Int"), eq("is_small")).times(1).returning(|_, _| false);
        assert_eq!(dispatcher.execute(&oracle), specialized("Uninitialized", "Generic"));
    }

    #[test]
    fn test_state_never_moves_backward() {
        let node = parse_node(ARITHMETIC, "AddNode");
        let mut dispatcher = Dispatcher::new(&node).unwrap();
        let mut last = 0;
        for operands in ["double", "int", "double", "int"] {
            dispatcher.execute(&Operands(operands));
            let index = node.specializations().iter().position(|s| s.id() == dispatcher.state()).unwrap();
            assert!(index >= last);
            last = index;
        }
        assert_eq!(dispatcher.state(), "Generic");
    }
}
