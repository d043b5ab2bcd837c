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

//! Rewrite requests raised by specialization bodies

use thiserror::Error;

/// Signals that a specialization body cannot handle its operands and the node must move on to
/// the next specialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("rewrite requested: {reason}")]
pub struct Rewrite {
    reason: String,
}

impl Rewrite {
    /// Create a rewrite request with a reason
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    /// Why the rewrite was requested
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Result of a specialization body declared with rewrite-on conditions
pub type RewriteResult<T> = Result<T, Rewrite>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_message() {
        let rewrite = Rewrite::new("integer overflow");
        assert_eq!(rewrite.reason(), "integer overflow");
        assert_eq!(rewrite.to_string(), "rewrite requested: integer overflow");
    }
}
