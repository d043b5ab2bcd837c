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


//! Configuration for source generation

use serde::{Deserialize, Serialize};

/// Configuration for source generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Crate path of the runtime contract the generated code links against
    pub runtime_crate: String,

    /// Spaces per indentation level
    pub indent_width: usize,

    /// Comment written at the top of every generated file
    pub header_comment: Option<String>,

    /// Whether to implement the factory metadata trait
    pub emit_factory_metadata: bool,

    /// Whether to mark skipped, unreachable specializations with comments
    pub emit_unreachable_comments: bool,

    /// Maximum size of one generated file in bytes (None for unlimited)
    pub max_output_size: Option<usize>,

    /// Lines emitted after the header, before any generated item
    pub prelude: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            runtime_crate: "nodegen_core".to_string(),
            indent_width: 4,
            header_comment: Some("Generated by nodegen. Do not edit.".to_string()),
            emit_factory_metadata: true,
            emit_unreachable_comments: false,
            max_output_size: None,
            prelude: vec!["use super::*;".to_string()],
        }
    }
}

impl GenerationConfig {
    /// Create a debug configuration that annotates the output
    pub fn debug() -> Self {
        Self {
            emit_unreachable_comments: true,
            ..Default::default()
        }
    }

    /// Create a release configuration with a size limit
    pub fn release() -> Self {
        Self {
            emit_unreachable_comments: false,
            max_output_size: Some(1 << 20),
            ..Default::default()
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.runtime_crate.trim().is_empty() {
            return Err("Runtime crate path must not be empty".to_string());
        }

        if self.indent_width == 0 || self.indent_width > 8 {
            return Err("Indent width must be between 1 and 8".to_string());
        }

        if let Some(max_size) = self.max_output_size {
            if max_size == 0 {
                return Err("Maximum output size must be greater than 0".to_string());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(GenerationConfig::default().validate().is_ok());
        assert!(GenerationConfig::debug().validate().is_ok());
        assert!(GenerationConfig::release().validate().is_ok());
    }

    #[test]
    fn test_invalid_settings() {
        let config = GenerationConfig {
            indent_width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GenerationConfig {
            max_output_size: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_json_is_default() {
        let config: GenerationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GenerationConfig::default());
    }
}
