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


//! Pipeline architecture for generation runs
//!
//! A run passes a declaration batch through two stages: the analyzer builds the node model and
//! the emitter turns every node that needs a factory into source. Diagnostics of all nodes are
//! collected into one report; a node with errors is skipped while the rest of the batch is still
//! emitted.

pub mod analyzer;
pub mod emitter;
pub mod pipeline_builder;

pub use analyzer::Analyzer;
pub use emitter::{Emitter, GenerationOutput};
pub use pipeline_builder::PipelineBuilder;

use crate::config::CompilerConfig;
use crate::declaration::Batch;
use crate::error::{CompilerError, CompilerResult};
use crate::node::NodeData;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::info;

/// Trait for pipeline stages
pub trait PipelineStage {
    /// The input type for this stage
    type Input;
    /// The output type for this stage
    type Output;

    /// Execute this pipeline stage
    fn execute(&mut self, input: Self::Input, config: &CompilerConfig, context: &mut PipelineContext) -> CompilerResult<Self::Output>;

    /// Get the name of this stage for debugging
    fn name(&self) -> &'static str;
}

/// Pipeline context for sharing data between stages
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    /// Performance metrics
    pub metrics: PipelineMetrics,
    /// Warnings about the run itself, not about declarations
    pub warnings: Vec<String>,
}

impl PipelineContext {
    /// Create a new pipeline context
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Record stage execution time
    pub fn record_stage_time(&mut self, stage: &str, duration: Duration) {
        self.metrics.stage_times.insert(stage.to_string(), duration);
    }

    /// Get total execution time
    pub fn total_time(&self) -> Duration {
        self.metrics.stage_times.values().sum()
    }
}

/// Performance metrics for the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineMetrics {
    /// Execution time for each stage
    pub stage_times: HashMap<String, Duration>,
    /// Number of processed items per stage
    pub processed_items: HashMap<String, usize>,
}

impl PipelineMetrics {
    /// Record number of processed items
    pub fn record_processed_items(&mut self, stage: &str, count: usize) {
        self.processed_items.insert(stage.to_string(), count);
    }
}

/// Main generation pipeline
pub struct GenerationPipeline {
    config: CompilerConfig,
    context: PipelineContext,
    analyzer: Analyzer,
    emitter: Option<Emitter>,
}

impl GenerationPipeline {
    /// Create a new pipeline with the given configuration
    pub fn new(config: CompilerConfig) -> CompilerResult<Self> {
        Self::with_stages(config, true)
    }

    fn with_stages(config: CompilerConfig, emit: bool) -> CompilerResult<Self> {
        config.validate().map_err(CompilerError::InvalidConfig)?;
        Ok(Self {
            analyzer: Analyzer::new(),
            emitter: emit.then(Emitter::new),
            context: PipelineContext::new(),
            config,
        })
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn context(&self) -> &PipelineContext {
        &self.context
    }

    /// Analyze the batch only
    pub fn analyze(&mut self, batch: Batch) -> CompilerResult<Vec<NodeData>> {
        let stage_start = Instant::now();
        let nodes = self.analyzer.execute(batch, &self.config, &mut self.context)?;
        self.context.record_stage_time(self.analyzer.name(), stage_start.elapsed());
        Ok(nodes)
    }

    /// Execute the complete pipeline
    pub fn execute(&mut self, batch: Batch) -> CompilerResult<GenerationOutput> {
        let nodes = self.analyze(batch)?;

        let output = match self.emitter.as_mut() {
            Some(emitter) => {
                let stage_start = Instant::now();
                let output = emitter.execute(nodes, &self.config, &mut self.context)?;
                self.context.record_stage_time(emitter.name(), stage_start.elapsed());
                output
            }
            None => GenerationOutput::analyzed(nodes),
        };

        info!(
            files = output.files.len(),
            errors = output.report.error_count(),
            warnings = output.report.warning_count(),
            elapsed_ms = self.context.total_time().as_millis() as u64,
            "generation finished"
        );
        Ok(output)
    }

    /// Decode a JSON batch and execute the pipeline
    pub fn execute_json(&mut self, source: &str) -> CompilerResult<GenerationOutput> {
        let batch = Batch::from_json(source)?;
        self.execute(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ARITHMETIC;

    #[test]
    fn test_stage_times_recorded() {
        let mut pipeline = GenerationPipeline::new(CompilerConfig::default()).unwrap();
        let output = pipeline.execute_json(ARITHMETIC).unwrap();
        assert!(!output.files.is_empty());
        assert!(pipeline.context().metrics.stage_times.contains_key("analysis"));
        assert!(pipeline.context().metrics.stage_times.contains_key("emission"));
        assert_eq!(pipeline.context().metrics.processed_items.get("analysis"), Some(&2));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = CompilerConfig::default();
        config.generation.indent_width = 0;
        assert!(matches!(GenerationPipeline::new(config), Err(CompilerError::InvalidConfig(_))));
    }
}
