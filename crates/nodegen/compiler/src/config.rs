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

//! Configuration for declaration analysis

use crate::codegen::GenerationConfig;
use serde::{Deserialize, Serialize};

/// Settings that control how declarations are interpreted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Type name of the frame parameter
    pub frame_type: String,

    /// Name of the failure condition signalled by typed execute methods
    pub unexpected_value_type: String,

    /// Type name used for short-circuit flags and guard results
    pub boolean_type: String,

    /// Required prefix of short-circuit method names
    pub short_circuit_prefix: String,

    /// Suffix stripped from node ids when deriving generated names
    pub node_suffix: String,

    /// Whether to warn when children have to be ordered by name
    pub warn_on_lexical_field_order: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            frame_type: "VirtualFrame".to_string(),
            unexpected_value_type: "UnexpectedResultException".to_string(),
            boolean_type: "boolean".to_string(),
            short_circuit_prefix: "needs".to_string(),
            node_suffix: "Node".to_string(),
            warn_on_lexical_field_order: true,
        }
    }
}

impl ParserConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("frame_type", &self.frame_type),
            ("unexpected_value_type", &self.unexpected_value_type),
            ("boolean_type", &self.boolean_type),
            ("node_suffix", &self.node_suffix),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{} must not be empty", name));
            }
        }

        if self.short_circuit_prefix.len() < 3 {
            return Err("Short circuit prefix must be at least 3 characters long".to_string());
        }

        Ok(())
    }
}

/// Complete configuration of a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    pub parser: ParserConfig,
    pub generation: GenerationConfig,
}

impl CompilerConfig {
    /// Configuration that keeps every warning and emits extra comments
    pub fn debug() -> Self {
        Self {
            parser: ParserConfig::default(),
            generation: GenerationConfig::debug(),
        }
    }

    /// Configuration for committed output: compact, no commentary
    pub fn release() -> Self {
        Self {
            parser: ParserConfig {
                warn_on_lexical_field_order: false,
                ..Default::default()
            },
            generation: GenerationConfig::release(),
        }
    }

    /// Decode a configuration from JSON; missing keys keep their defaults
    pub fn from_json(source: &str) -> Result<Self, String> {
        let config: Self = serde_json::from_str(source).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.parser.validate()?;
        self.generation.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(CompilerConfig::default().validate().is_ok());
        assert!(CompilerConfig::debug().validate().is_ok());
        assert!(CompilerConfig::release().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CompilerConfig::from_json(r#"{"parser": {"frame_type": "Frame"}}"#).unwrap();
        assert_eq!(config.parser.frame_type, "Frame");
        assert_eq!(config.parser.short_circuit_prefix, "needs");
        assert_eq!(config.generation, GenerationConfig::default());
    }

    #[test]
    fn test_short_prefix_rejected() {
        let mut config = CompilerConfig::default();
        config.parser.short_circuit_prefix = "is".to_string();
        assert!(config.validate().is_err());
    }
}
