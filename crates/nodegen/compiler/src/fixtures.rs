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

//! Declaration batches shared by unit tests

use crate::config::ParserConfig;
use crate::declaration::Batch;
use crate::node::{NodeData, NodeParser};

pub(crate) const ARITHMETIC: &str = include_str!("../tests/fixtures/arithmetic.json");
pub(crate) const LOGICAL: &str = include_str!("../tests/fixtures/logical.json");
pub(crate) const GUARDED: &str = include_str!("../tests/fixtures/guarded.json");

pub(crate) fn parse(source: &str) -> Vec<NodeData> {
    let batch = Batch::from_json(source).unwrap();
    let config = ParserConfig::default();
    NodeParser::new(&batch, &config).unwrap().parse_batch()
}

pub(crate) fn parse_node(source: &str, name: &str) -> NodeData {
    parse(source).into_iter().find(|n| n.node_id() == name).unwrap()
}
