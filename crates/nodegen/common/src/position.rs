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

//! Source position tracking for declarations

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a declaration in the file it was read from
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    /// File the declaration came from, if known
    #[serde(default)]
    pub file: Option<String>,
    /// Line number (1-based)
    #[serde(default = "default_line")]
    pub line: u32,
    /// Column number (1-based)
    #[serde(default = "default_column")]
    pub column: u32,
}

fn default_line() -> u32 {
    1
}

fn default_column() -> u32 {
    1
}

impl SourcePosition {
    /// Create a new position without a file
    pub fn new(line: u32, column: u32) -> Self {
        Self { file: None, line, column }
    }

    /// Create a position inside a named file
    pub fn in_file(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self { file: Some(file.into()), line, column }
    }

    /// Ordering key used when declarations are sorted by their place in the source
    pub fn sort_key(&self) -> (u32, u32) {
        (self.line, self.column)
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{}:{}:{}", file, self.line, self.column),
            None => write!(f, "{}:{}", self.line, self.column),
        }
    }
}
