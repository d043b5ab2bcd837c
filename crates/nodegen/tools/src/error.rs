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


//! Errors of the command-line tools

use nodegen_compiler::CompilerError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that end a command
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration file {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error(transparent)]
    Compiler(#[from] CompilerError),

    #[error("Node '{0}' is not declared in the batch")]
    UnknownNode(String),

    #[error("Invalid operand assignment '{0}', expected name=type pairs")]
    InvalidAssignment(String),

    #[error("Refusing to overwrite {0}, it was not generated by nodegen (pass --force)")]
    Overwrite(PathBuf),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type of the command-line tools
pub type CliResult<T> = Result<T, CliError>;
