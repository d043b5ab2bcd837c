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

//! Method templates
//!
//! A method specification describes the shape a declared method has to have to play a given
//! role (specialization, guard, short circuit, ...). The matcher aligns a declared method with a
//! specification and produces a `TemplateMethod` whose parameters know which role they fill.

pub mod method_spec;
pub mod parameter;
pub mod parser;
pub mod template_method;

pub use method_spec::{Cardinality, MethodSpec, ParameterKind, ParameterSpec, TypeDefinition};
pub use parameter::ActualParameter;
pub use parser::{MatchFailure, ParseOutcome, TemplateMethodParser, match_method, mismatch_message};
pub use template_method::TemplateMethod;
