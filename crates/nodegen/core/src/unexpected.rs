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

//! Unexpected value signalling

use thiserror::Error;

/// Raised by a typed execute method when the produced value does not have the requested type.
///
/// The value that was actually produced travels with the error so the caller can re-dispatch
/// on it without evaluating the operand a second time.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("operand produced a value of an unexpected type")]
pub struct UnexpectedValue<V> {
    value: V,
}

impl<V> UnexpectedValue<V> {
    /// Wrap the value that was actually produced
    pub fn new(value: V) -> Self {
        Self { value }
    }

    /// Borrow the produced value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Take the produced value
    pub fn into_value(self) -> V {
        self.value
    }
}

/// Result of a typed execute method
pub type ExecuteResult<T, V> = Result<T, UnexpectedValue<V>>;

/// Called by generated code when no declared specialization accepts the operands and the
/// generic fallback was synthesized instead of declared.
#[cold]
pub fn unsupported_specialization(node: &str) -> ! {
    tracing::error!(node, "no specialization accepts the given operands");
    panic!("unsupported operation: no specialization of {} accepts the given operands", node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_travels_with_error() {
        let error: ExecuteResult<i32, String> = Err(UnexpectedValue::new("1.5".to_string()));
        let err = error.unwrap_err();
        assert_eq!(err.value(), "1.5");
        assert_eq!(err.into_value(), "1.5".to_string());
    }

    #[test]
    #[should_panic(expected = "unsupported operation")]
    fn test_unsupported_panics() {
        unsupported_specialization("AddNode");
    }
}
