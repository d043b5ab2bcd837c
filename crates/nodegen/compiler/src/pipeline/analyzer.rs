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


//! Analysis stage: declarations to node model

use super::{PipelineContext, PipelineStage};
use crate::config::CompilerConfig;
use crate::declaration::Batch;
use crate::error::CompilerResult;
use crate::node::{NodeData, NodeParser};

/// Resolves every declaration of a batch
#[derive(Debug, Default)]
pub struct Analyzer;

impl Analyzer {
    pub fn new() -> Self {
        Self
    }
}

impl PipelineStage for Analyzer {
    type Input = Batch;
    type Output = Vec<NodeData>;

    fn execute(&mut self, batch: Batch, config: &CompilerConfig, context: &mut PipelineContext) -> CompilerResult<Vec<NodeData>> {
        let parser = NodeParser::new(&batch, &config.parser)?;
        let nodes = parser.parse_batch();
        if batch.nodes.is_empty() {
            context.add_warning("The batch declares no nodes");
        }
        context.metrics.record_processed_items(self.name(), nodes.len());
        Ok(nodes)
    }

    fn name(&self) -> &'static str {
        "analysis"
    }
}
