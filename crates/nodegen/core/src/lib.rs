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

//! Runtime contract for generated specializing nodes
//!
//! Code emitted by `nodegen-compiler` links against this crate. It provides the signalling types
//! used instead of exceptions (`UnexpectedValue`, `Rewrite`), the state cell holding the current
//! specialization tag of a node, and the factory metadata trait.

pub mod factory;
pub mod rewrite;
pub mod state;
pub mod unexpected;

pub use factory::NodeFactory;
pub use rewrite::{Rewrite, RewriteResult};
pub use state::{SpecializationKind, StateCell};
pub use unexpected::{ExecuteResult, UnexpectedValue, unsupported_specialization};
