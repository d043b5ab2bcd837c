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

//! Naming rules shared by analysis and code generation

use regex::Regex;

/// Compiled identifier patterns
#[derive(Debug, Clone)]
pub struct NamingRules {
    identifier: Regex,
    camel_boundary: Regex,
    acronym_boundary: Regex,
}

impl NamingRules {
    /// Compile the patterns
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            identifier: Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$")?,
            camel_boundary: Regex::new(r"([a-z0-9])([A-Z])")?,
            acronym_boundary: Regex::new(r"([A-Z]+)([A-Z][a-z])")?,
        })
    }

    /// Whether `name` can be used as a Rust identifier
    pub fn is_identifier(&self, name: &str) -> bool {
        self.identifier.is_match(name)
    }

    /// `BigInteger` -> `big_integer`, `HTTPNode` -> `http_node`
    pub fn to_snake_case(&self, name: &str) -> String {
        let step = self.acronym_boundary.replace_all(name, "${1}_${2}");
        let step = self.camel_boundary.replace_all(&step, "${1}_${2}");
        step.to_lowercase()
    }
}

/// Upper-case the first character
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip `suffix` unless the name consists of nothing else
pub fn strip_suffix<'a>(name: &'a str, suffix: &str) -> &'a str {
    match name.strip_suffix(suffix) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

/// Turn a snake_case or lower-case id into an UpperCamelCase one
pub fn to_upper_camel_case(name: &str) -> String {
    name.split('_').filter(|part| !part.is_empty()).map(capitalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        let rules = NamingRules::new().unwrap();
        assert_eq!(rules.to_snake_case("BigInteger"), "big_integer");
        assert_eq!(rules.to_snake_case("int"), "int");
        assert_eq!(rules.to_snake_case("HTTPNode"), "http_node");
        assert_eq!(rules.to_snake_case("AddIntNode"), "add_int_node");
    }

    #[test]
    fn test_identifiers() {
        let rules = NamingRules::new().unwrap();
        assert!(rules.is_identifier("needs_right"));
        assert!(rules.is_identifier("_x1"));
        assert!(!rules.is_identifier("1x"));
        assert!(!rules.is_identifier("a-b"));
        assert!(!rules.is_identifier(""));
    }

    #[test]
    fn test_name_helpers() {
        assert_eq!(capitalize("sin"), "Sin");
        assert_eq!(capitalize(""), "");
        assert_eq!(strip_suffix("AddNode", "Node"), "Add");
        assert_eq!(strip_suffix("Node", "Node"), "Node");
        assert_eq!(to_upper_camel_case("big_integer"), "BigInteger");
    }
}
