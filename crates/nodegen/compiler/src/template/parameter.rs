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

//! Parameters of a matched template method

use super::{ParameterKind, ParameterSpec};
use crate::typesystem::TypeData;

/// A formal parameter bound to the specification it satisfied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActualParameter {
    spec: ParameterSpec,
    declared_type: String,
    type_data: Option<TypeData>,
    local_name: String,
    index: Option<usize>,
    array: bool,
}

impl ActualParameter {
    /// Bind a parameter. `index` is set for parameters that are part of an indexed run.
    pub fn new(spec: ParameterSpec, declared_type: impl Into<String>, type_data: Option<TypeData>, index: Option<usize>, array: bool) -> Self {
        let local_name = match index {
            Some(index) => format!("{}{}", spec.name(), index),
            None => spec.name().to_string(),
        };
        Self {
            spec,
            declared_type: declared_type.into(),
            type_data,
            local_name,
            index,
            array,
        }
    }

    /// Bind a parameter whose type is known to be a type-system type
    pub fn typed(spec: ParameterSpec, type_data: TypeData) -> Self {
        let declared = type_data.name().to_string();
        Self::new(spec, declared, Some(type_data), None, false)
    }

    pub fn spec(&self) -> &ParameterSpec {
        &self.spec
    }

    pub fn kind(&self) -> ParameterKind {
        self.spec.kind()
    }

    /// Name of the specification, shared by all parameters of an indexed run
    pub fn spec_name(&self) -> &str {
        self.spec.name()
    }

    /// Name of this parameter, including its index
    pub fn local_name(&self) -> &str {
        &self.local_name
    }

    /// Type as written in the declaration
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Type-system type of the parameter, or of its components for arrays
    pub fn type_data(&self) -> Option<&TypeData> {
        self.type_data.as_ref()
    }

    /// Replace the type-system type, used when a generic parameter is widened
    pub fn set_type_data(&mut self, type_data: TypeData) {
        self.declared_type = if self.array { format!("{}[]", type_data.name()) } else { type_data.name().to_string() };
        self.type_data = Some(type_data);
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_array(&self) -> bool {
        self.array
    }

    pub fn is_signature(&self) -> bool {
        self.spec.is_signature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typesystem::tests::simple_types;

    #[test]
    fn test_local_names() {
        let ts = simple_types();
        let spec = ParameterSpec::new("arguments", vec!["Object".to_string()], ParameterKind::Value).as_signature();
        let indexed = ActualParameter::new(spec.clone(), "Object", Some(ts.generic_type().clone()), Some(2), false);
        assert_eq!(indexed.local_name(), "arguments2");
        assert_eq!(indexed.spec_name(), "arguments");
        assert!(indexed.is_signature());

        let mut array = ActualParameter::new(spec, "Object[]", Some(ts.generic_type().clone()), None, true);
        assert_eq!(array.local_name(), "arguments");
        array.set_type_data(ts.find_type("int").unwrap().clone());
        assert_eq!(array.declared_type(), "int[]");
    }
}
