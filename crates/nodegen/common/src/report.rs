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

//! Aggregated diagnostics for a whole batch

use super::{Diagnostic, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// All diagnostics produced while processing a batch of declarations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiagnosticReport {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single diagnostic
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add several diagnostics
    pub fn extend(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    /// All diagnostics in the order they were reported
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Only the errors
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Only the warnings
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Number of errors
    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Number of warnings
    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Whether the report contains any error
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Whether the report is empty
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// One-line summary of the report
    pub fn summary(&self) -> String {
        format!("{} error(s), {} warning(s)", self.error_count(), self.warning_count())
    }
}

impl fmt::Display for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_summary() {
        let mut report = DiagnosticReport::new();
        assert!(report.is_empty());

        report.push(Diagnostic::error("A", "first"));
        report.extend(vec![Diagnostic::warning("B", "second"), Diagnostic::error("C", "third")]);

        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_errors());
        assert_eq!(report.summary(), "2 error(s), 1 warning(s)");
        assert!(report.to_string().starts_with("error: [A]: first\n"));
    }

    #[test]
    fn test_json_round_trip() {
        let mut report = DiagnosticReport::new();
        report.push(Diagnostic::warning("AddNode", "lexicographic order"));
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"severity\":\"warning\""));
        let restored: DiagnosticReport = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.diagnostics(), report.diagnostics());
    }
}
