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


//! Executable model of the dispatch protocol
//!
//! `Dispatcher` walks a finalized node through the same state transitions the generated code
//! performs, asking an `OperandOracle` for operand types, guard results and body outcomes. The
//! `inspect --simulate` command and the tests use it to check the transition behavior of a node
//! without compiling the generated source.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, OperandOracle, Transition};

#[cfg(test)]
pub use dispatcher::MockOperandOracle;
