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


//! Source generation for specializing nodes
//!
//! Analyzed nodes are turned into Rust source, one file per node:
//!
//! - `config`: Configuration management
//! - `error`: Error types and handling
//! - `writer`: Indenting source writer with an optional size limit
//! - `names`: Names of the generated items
//! - `generator`: Emits the state enum, the wrapper struct, the per-state functions, the
//!   dispatch functions and the factory, plus split containers and `mod.rs`

pub mod config;
pub mod error;
pub mod generator;
pub mod names;
pub mod writer;

mod dispatch;
mod execute;
mod expressions;
mod factory;

pub use config::GenerationConfig;
pub use error::{GenerationError, GenerationResult};
pub use generator::{GeneratedFile, NodeCodeGenerator};
pub use names::NodeNames;
pub use writer::SourceWriter;
