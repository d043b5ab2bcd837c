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

//! Shared diagnostics model for the nodegen workspace
//!
//! Every element of the node model (nodes, fields, specializations, guards, ...) carries its own
//! list of diagnostics. Nothing in the generator stops at the first problem: errors are attached
//! to the most local element and the batch decides per node whether code can be emitted.

pub mod container;
pub mod diagnostic;
pub mod position;
pub mod report;

pub use container::MessageContainer;
pub use diagnostic::{Diagnostic, Severity};
pub use position::SourcePosition;
pub use report::DiagnosticReport;
