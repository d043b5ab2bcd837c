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

//! Method and parameter specifications

/// How many formal parameters a specification may consume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    One,
    /// An array parameter, or a run of parameters that are then indexed
    Many,
}

/// Role of a parameter in a template method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    /// The execution frame
    Frame,
    /// Value of an executed child
    Value,
    /// Flag telling whether a short-circuited child was evaluated
    ShortCircuitFlag,
    /// A plain field of the node
    Local,
    /// Value handed to a typed execute method by its caller
    Evaluated,
    /// The return value
    Return,
}

/// Expected shape of one parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    name: String,
    allowed_types: Vec<String>,
    kind: ParameterKind,
    cardinality: Cardinality,
    signature: bool,
    type_definition: Option<String>,
}

impl ParameterSpec {
    /// Create a specification accepting the given type names
    pub fn new(name: impl Into<String>, allowed_types: Vec<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            allowed_types,
            kind,
            cardinality: Cardinality::One,
            signature: false,
            type_definition: None,
        }
    }

    /// Set the cardinality
    pub fn with_cardinality(mut self, cardinality: Cardinality) -> Self {
        self.cardinality = cardinality;
        self
    }

    /// Mark the parameter as part of the type signature
    pub fn as_signature(mut self) -> Self {
        self.signature = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn allowed_types(&self) -> &[String] {
        &self.allowed_types
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Whether the parameter takes part in the type signature
    pub fn is_signature(&self) -> bool {
        self.signature
    }

    pub fn type_definition(&self) -> Option<&str> {
        self.type_definition.as_deref()
    }

    /// Whether a formal parameter of type `ty` fits
    pub fn matches(&self, ty: &str) -> bool {
        self.allowed_types.iter().any(|allowed| allowed == ty)
    }

    /// Whether `ty` is an array whose component fits
    pub fn matches_array(&self, ty: &str) -> bool {
        self.cardinality == Cardinality::Many && ty.strip_suffix("[]").is_some_and(|component| self.matches(component))
    }

    fn type_signature(&self, type_only: bool) -> String {
        let mut signature = match (&self.type_definition, self.allowed_types.first()) {
            (Some(definition), _) => format!("<{}>", definition),
            (None, Some(first)) => first.clone(),
            (None, None) => "void".to_string(),
        };
        if !type_only {
            signature.push(' ');
            signature.push_str(&self.name);
        }
        signature
    }
}

/// A named group of types rendered once below a signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDefinition {
    pub name: String,
    pub types: Vec<String>,
}

/// Expected shape of a whole method
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSpec {
    return_type: ParameterSpec,
    optional: Vec<ParameterSpec>,
    required: Vec<ParameterSpec>,
    /// The last required specification may repeat
    pub variable_required_arguments: bool,
    /// Formal parameters left over after matching are accepted
    pub ignore_additional_parameters: bool,
    /// Required specifications left over after matching are accepted
    pub ignore_additional_specifications: bool,
    type_definitions: Vec<TypeDefinition>,
}

impl MethodSpec {
    pub fn new(return_type: ParameterSpec) -> Self {
        Self {
            return_type,
            optional: Vec::new(),
            required: Vec::new(),
            variable_required_arguments: false,
            ignore_additional_parameters: false,
            ignore_additional_specifications: false,
            type_definitions: Vec::new(),
        }
    }

    pub fn add_optional(&mut self, spec: ParameterSpec) {
        self.optional.push(spec);
    }

    pub fn add_required(&mut self, spec: ParameterSpec) {
        self.required.push(spec);
    }

    pub fn return_type(&self) -> &ParameterSpec {
        &self.return_type
    }

    pub fn optional(&self) -> &[ParameterSpec] {
        &self.optional
    }

    pub fn required(&self) -> &[ParameterSpec] {
        &self.required
    }

    pub fn required_mut(&mut self) -> &mut Vec<ParameterSpec> {
        &mut self.required
    }

    pub fn type_definitions(&self) -> &[TypeDefinition] {
        &self.type_definitions
    }

    /// Name every multi-type parameter's type list so signatures stay readable
    pub fn apply_type_definitions(&mut self, prefix: &str) {
        let mut definitions: Vec<TypeDefinition> = Vec::new();
        let specs = std::iter::once(&mut self.return_type).chain(self.optional.iter_mut()).chain(self.required.iter_mut());
        for spec in specs {
            if spec.allowed_types.len() <= 1 {
                continue;
            }
            let name = match definitions.iter().find(|d| d.types == spec.allowed_types) {
                Some(existing) => existing.name.clone(),
                None => {
                    let name = if definitions.is_empty() { prefix.to_string() } else { format!("{}{}", prefix, definitions.len()) };
                    definitions.push(TypeDefinition {
                        name: name.clone(),
                        types: spec.allowed_types.clone(),
                    });
                    name
                }
            };
            spec.type_definition = Some(name);
        }
        self.type_definitions = definitions;
    }

    /// Render the expected signature of a method called `method_name`
    pub fn to_signature_string(&self, method_name: &str) -> String {
        let mut builder = String::from("    ");
        builder.push_str(&self.return_type.type_signature(true));
        builder.push(' ');
        builder.push_str(method_name);
        builder.push('(');

        let mut separator = "";
        for optional in &self.optional {
            builder.push_str(separator);
            builder.push('[');
            builder.push_str(&optional.type_signature(false));
            builder.push(']');
            separator = ", ";
        }

        let last = self.required.len().saturating_sub(1);
        for (i, required) in self.required.iter().enumerate() {
            builder.push_str(separator);
            let repeated = self.variable_required_arguments && i == last;
            if repeated {
                builder.push('{');
            }
            builder.push_str(&required.type_signature(false));
            if repeated {
                builder.push('}');
            }
            separator = ", ";
        }
        builder.push(')');

        if !self.type_definitions.is_empty() {
            builder.push_str("\n\n");
            let lines: Vec<String> = self
                .type_definitions
                .iter()
                .map(|definition| format!("    <{}> = {{{}}}", definition.name, definition.types.join(", ")))
                .collect();
            builder.push_str(&lines.join("\n"));
        }
        builder
    }
}
