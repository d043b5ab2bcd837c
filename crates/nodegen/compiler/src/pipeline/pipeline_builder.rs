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


//! Pipeline builder for configuring generation runs

use super::GenerationPipeline;
use crate::config::CompilerConfig;
use crate::error::CompilerResult;

/// Builder for generation pipelines
pub struct PipelineBuilder {
    /// Configuration for the pipeline
    config: CompilerConfig,
    /// Whether to run the emission stage
    enable_emission: bool,
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    /// Create a builder with a specific configuration
    pub fn with_config(config: CompilerConfig) -> Self {
        Self { config, enable_emission: true }
    }

    /// Set the compiler configuration
    pub fn config(mut self, config: CompilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable the emission stage. Without it a run only reports diagnostics.
    pub fn emission(mut self, enable: bool) -> Self {
        self.enable_emission = enable;
        self
    }

    /// Check-only pipeline
    pub fn check(self) -> Self {
        self.emission(false)
    }

    /// Debug pipeline (unreachable code annotated)
    pub fn debug(mut self) -> Self {
        self.config = CompilerConfig::debug();
        self
    }

    /// Release pipeline (bounded output)
    pub fn release(mut self) -> Self {
        self.config = CompilerConfig::release();
        self
    }

    /// Build the pipeline
    pub fn build(self) -> CompilerResult<GenerationPipeline> {
        GenerationPipeline::with_stages(self.config, self.enable_emission)
    }
}
