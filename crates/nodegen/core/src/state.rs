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

//! Specialization state of a generated node

use std::fmt::Debug;

/// Tag enum generated for every specializing node
pub trait SpecializationKind: Copy + Eq + Debug + 'static {
    /// All states in lattice order
    const ALL: &'static [Self];

    /// Name of the state as assigned by the generator
    fn name(&self) -> &'static str;

    /// Position of the state in lattice order
    fn ordinal(&self) -> usize {
        Self::ALL.iter().position(|kind| kind == self).unwrap_or(usize::MAX)
    }

    /// Whether this is the generic fallback
    fn is_generic(&self) -> bool {
        self.ordinal() + 1 == Self::ALL.len()
    }
}

/// Holds the current specialization of a node and records transitions
#[derive(Debug, Clone)]
pub struct StateCell<K: SpecializationKind> {
    current: K,
    transitions: u32,
}

impl<K: SpecializationKind> StateCell<K> {
    /// Start in the given state
    pub fn new(initial: K) -> Self {
        Self { current: initial, transitions: 0 }
    }

    /// Current state
    pub fn get(&self) -> K {
        self.current
    }

    /// Number of transitions performed so far
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Move to a later state. States only ever move forward in lattice order.
    pub fn replace(&mut self, next: K, reason: &'static str) -> K {
        debug_assert!(
            next.ordinal() > self.current.ordinal(),
            "specialization may only move forward: {:?} -> {:?}",
            self.current,
            next
        );
        tracing::trace!(from = self.current.name(), to = next.name(), reason, "specialization transition");
        let previous = self.current;
        self.current = next;
        self.transitions += 1;
        previous
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Kind {
        Uninitialized,
        Int,
        Double,
        Generic,
    }

    impl SpecializationKind for Kind {
        const ALL: &'static [Self] = &[Kind::Uninitialized, Kind::Int, Kind::Double, Kind::Generic];

        fn name(&self) -> &'static str {
            match self {
                Kind::Uninitialized => "Uninitialized",
                Kind::Int => "Int",
                Kind::Double => "Double",
                Kind::Generic => "Generic",
            }
        }
    }

    #[test]
    fn test_forward_transitions() {
        let mut cell = StateCell::new(Kind::Uninitialized);
        assert_eq!(cell.replace(Kind::Int, "first execution"), Kind::Uninitialized);
        assert_eq!(cell.replace(Kind::Double, "unexpected value"), Kind::Int);
        assert_eq!(cell.get(), Kind::Double);
        assert_eq!(cell.transitions(), 2);
        assert!(Kind::Generic.is_generic());
        assert!(!Kind::Double.is_generic());
    }

    #[test]
    #[should_panic(expected = "may only move forward")]
    fn test_backward_transition_rejected() {
        let mut cell = StateCell::new(Kind::Double);
        cell.replace(Kind::Int, "bogus");
    }

    proptest! {
        #[test]
        fn prop_ordinals_follow_declaration(index in 0usize..4) {
            let kind = Kind::ALL[index];
            prop_assert_eq!(kind.ordinal(), index);
        }
    }
}
