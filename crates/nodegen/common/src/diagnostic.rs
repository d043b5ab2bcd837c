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

//! Diagnostic messages attached to model elements

use super::SourcePosition;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Prevents code generation for the owning node
    Error,
    /// Reported but does not block generation
    Warning,
}

impl Severity {
    /// Short label used in rendered output
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single message produced while analysing a declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How bad it is
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Qualified name of the element the message is attached to
    pub element: String,
    /// Position of that element, when the declaration carried one
    pub position: Option<SourcePosition>,
}

impl Diagnostic {
    /// Create an error diagnostic
    pub fn error(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            element: element.into(),
            position: None,
        }
    }

    /// Create a warning diagnostic
    pub fn warning(element: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
            element: element.into(),
            position: None,
        }
    }

    /// Attach a source position
    pub fn at(mut self, position: Option<SourcePosition>) -> Self {
        self.position = position;
        self
    }

    /// Whether this diagnostic blocks generation
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.position {
            Some(position) => write!(f, "{}: {} [{}]: {}", self.severity.label(), position, self.element, self.message),
            None => write!(f, "{}: [{}]: {}", self.severity.label(), self.element, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let diagnostic = Diagnostic::error("AddNode.add", "Duplicate exception type.").at(Some(SourcePosition::new(12, 5)));
        assert_eq!(diagnostic.to_string(), "error: 12:5 [AddNode.add]: Duplicate exception type.");

        let warning = Diagnostic::warning("AddNode", "fields ordered lexicographically");
        assert_eq!(warning.to_string(), "warning: [AddNode]: fields ordered lexicographically");
        assert!(!warning.is_error());
    }
}
