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

//! Factory metadata for generated nodes

/// Descriptive metadata implemented by every generated node factory
pub trait NodeFactory {
    /// Identifier of the node the factory creates
    fn node_id(&self) -> &'static str;

    /// Parameter type names of every constructor the factory mirrors
    fn node_signatures(&self) -> Vec<Vec<&'static str>>;

    /// Names of the executed children in execution order
    fn execution_signature(&self) -> Vec<&'static str>;

    /// Names of all specialization states in lattice order
    fn specializations(&self) -> Vec<&'static str>;
}
