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


//! Specialization generator for self-rewriting AST interpreter nodes
//!
//! A node declares its children, its execute methods and a set of specialization methods. The
//! compiler resolves those declarations into a node model, verifies it and emits one Rust module
//! per node: a state enum, a wrapper dispatching on that state and a factory.
//!
//! ```text
//! Batch (JSON) -> NodeParser -> NodeData -> NodeCodeGenerator -> GeneratedFile
//! ```

pub mod codegen;
pub mod config;
pub mod declaration;
pub mod error;
pub mod naming;
pub mod node;
pub mod pipeline;
pub mod protocol;
pub mod template;
pub mod typesystem;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export the entry points
pub use codegen::{GeneratedFile, GenerationConfig, NodeCodeGenerator};
pub use config::{CompilerConfig, ParserConfig};
pub use declaration::Batch;
pub use error::{CompilerError, CompilerResult};
pub use node::{NodeData, NodeParser};
pub use pipeline::{GenerationOutput, GenerationPipeline, PipelineBuilder};
