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

//! Error types for the generator
//!
//! These cover failures of the run itself. Problems in the declarations are reported as
//! diagnostics on the node model instead.

use crate::codegen::GenerationError;
use thiserror::Error;

/// Errors that abort a generation run
#[derive(Error, Debug)]
pub enum CompilerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid batch file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid naming pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Unknown node declaration: {0}")]
    UnknownNode(String),

    #[error("Code generation failed: {0}")]
    Generation(#[from] GenerationError),
}

/// Result type for generator operations
pub type CompilerResult<T> = Result<T, CompilerError>;
