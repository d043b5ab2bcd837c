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


//! Error types for source generation

use thiserror::Error;

/// Errors that can occur during source generation
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Node {0} has errors and cannot be generated")]
    NodeHasErrors(String),

    #[error("Node {0} has no type system")]
    MissingTypeSystem(String),

    #[error("Node {node} has no {role} specialization")]
    MissingSpecialization { node: String, role: &'static str },

    #[error("Invalid naming pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Output size limit exceeded: {actual} > {limit}")]
    OutputSizeLimitExceeded { actual: usize, limit: usize },
}

/// Result type for source generation operations
pub type GenerationResult<T> = Result<T, GenerationError>;
