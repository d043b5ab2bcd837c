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

//! Type systems and the type lattice
//!
//! A type system is an ordered list of value types followed by a generic supertype. The
//! declaration index is the specificity rank: earlier types are more specific, the generic type
//! is less specific than every value type.

use crate::declaration::TypeSystemDeclaration;
use crate::naming::{NamingRules, capitalize};
use nodegen_common::{Diagnostic, MessageContainer, SourcePosition};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Where a type sits in the lattice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Value,
    Generic,
    Void,
}

/// A type of a type system
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeData {
    name: String,
    rust: String,
    suffix: String,
    index: usize,
    kind: TypeKind,
}

impl TypeData {
    fn new(name: &str, rust: &str, suffix: String, index: usize, kind: TypeKind) -> Self {
        Self {
            name: name.to_string(),
            rust: rust.to_string(),
            suffix,
            index,
            kind,
        }
    }

    /// Name used in declarations
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rust type used in generated code
    pub fn rust(&self) -> &str {
        &self.rust
    }

    /// Snake-case suffix of the type-system functions (`is_int`, `expect_int`)
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Declaration index inside the type system
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn is_generic(&self) -> bool {
        self.kind == TypeKind::Generic
    }

    pub fn is_void(&self) -> bool {
        self.kind == TypeKind::Void
    }

    /// Specificity rank, lower is more specific
    pub fn rank(&self) -> usize {
        match self.kind {
            TypeKind::Value => self.index,
            TypeKind::Generic => usize::MAX - 1,
            TypeKind::Void => usize::MAX,
        }
    }

    /// Whether a value of this type must be checked before it can be used as `target`
    pub fn needs_cast_to(&self, target: &TypeData) -> bool {
        self != target && !target.is_generic() && !target.is_void()
    }

    /// Component used when building specialization ids (`int` -> `Int`)
    pub fn id_part(&self) -> String {
        capitalize(&self.name)
    }
}

/// Compare two types by specificity
pub fn compare_types(a: &TypeData, b: &TypeData) -> Ordering {
    a.rank().cmp(&b.rank())
}

/// A resolved type system
#[derive(Debug, Clone)]
pub struct TypeSystemData {
    name: String,
    path: String,
    types: Vec<TypeData>,
    generic: TypeData,
    void: TypeData,
    position: Option<SourcePosition>,
    messages: Vec<Diagnostic>,
}

impl TypeSystemData {
    /// Resolve a declaration, attaching diagnostics for malformed entries
    pub fn from_declaration(declaration: &TypeSystemDeclaration, rules: &NamingRules) -> Self {
        let mut seen = HashSet::new();
        let mut problems = Vec::new();
        let mut types = Vec::new();

        if declaration.types.is_empty() {
            problems.push("A type system must declare at least one value type.".to_string());
        }

        for declared in &declaration.types {
            if !rules.is_identifier(&declared.name) {
                problems.push(format!("Type name '{}' is not a valid identifier.", declared.name));
                continue;
            }
            if !seen.insert(declared.name.clone()) {
                problems.push(format!("Type '{}' is declared more than once.", declared.name));
                continue;
            }
            let suffix = rules.to_snake_case(&declared.name);
            types.push(TypeData::new(&declared.name, &declared.rust, suffix, types.len(), TypeKind::Value));
        }

        let generic_declaration = &declaration.generic;
        if seen.contains(&generic_declaration.name) {
            problems.push(format!("Generic type '{}' must not also be a value type.", generic_declaration.name));
        }
        let generic = TypeData::new(
            &generic_declaration.name,
            &generic_declaration.rust,
            rules.to_snake_case(&generic_declaration.name),
            types.len(),
            TypeKind::Generic,
        );
        let void = TypeData::new("void", "()", "void".to_string(), types.len() + 1, TypeKind::Void);

        let mut type_system = Self {
            name: declaration.name.clone(),
            path: declaration.path.clone().unwrap_or_else(|| declaration.name.clone()),
            types,
            generic,
            void,
            position: declaration.position.clone(),
            messages: Vec::new(),
        };
        for problem in problems {
            type_system.add_error(problem);
        }
        type_system
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the type-system item in generated code
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value types, most specific first
    pub fn value_types(&self) -> &[TypeData] {
        &self.types
    }

    pub fn generic_type(&self) -> &TypeData {
        &self.generic
    }

    pub fn void_type(&self) -> &TypeData {
        &self.void
    }

    /// Value types followed by the generic type
    pub fn all_types(&self) -> Vec<TypeData> {
        let mut all = self.types.clone();
        all.push(self.generic.clone());
        all
    }

    /// Names of the value types followed by the generic type
    pub fn all_type_names(&self) -> Vec<String> {
        self.all_types().into_iter().map(|t| t.name).collect()
    }

    /// Look up a value type, the generic type or `void`
    pub fn find_type(&self, name: &str) -> Option<&TypeData> {
        if name == self.generic.name {
            return Some(&self.generic);
        }
        if name == self.void.name {
            return Some(&self.void);
        }
        self.types.iter().find(|t| t.name == name)
    }

    /// Expression calling one of the type-system functions for `ty`
    pub fn call(&self, function: &str, ty: &TypeData, argument: &str) -> String {
        format!("{}::{}_{}({})", self.path, function, ty.suffix(), argument)
    }
}

impl PartialEq for TypeSystemData {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl MessageContainer for TypeSystemData {
    fn element_name(&self) -> String {
        self.name.clone()
    }

    fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    fn messages_mut(&mut self) -> &mut Vec<Diagnostic> {
        &mut self.messages
    }

    fn position(&self) -> Option<&SourcePosition> {
        self.position.as_ref()
    }
}
