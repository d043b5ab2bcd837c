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

//! Node model
//!
//! `NodeParser` turns node declarations into `NodeData`: fields and children, executable
//! types, short circuits, guards, listeners and the finalized list of specializations. The
//! lattice module orders specializations and synthesizes the generic and uninitialized states;
//! `verify` adds the structural checks.

pub mod child;
pub mod data;
pub mod executable;
pub mod graph;
pub mod lattice;
pub mod parser;
pub mod parsers;
pub mod specialization;
pub mod verify;

pub use child::{ExecutionKind, NodeChildData, NodeFieldData};
pub use data::NodeData;
pub use executable::ExecutableTypeData;
pub use graph::NodeGraph;
pub use parser::NodeParser;
pub use specialization::{GuardData, ShortCircuitData, SpecializationData, SpecializationListenerData, SpecializationRole, SpecializationThrowsData};
