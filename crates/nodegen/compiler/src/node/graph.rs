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

//! Reference graph between nodes
//!
//! An edge `a -> b` means node `a` executes children of node type `b`. The graph gives the batch
//! a stable emission order (referenced nodes first) and tells which nodes are recursive.

use super::NodeData;
use petgraph::Directed;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{Graph, NodeIndex};
use std::collections::HashMap;
use tracing::debug;

/// Graph of node ids
pub type ReferenceGraph = Graph<String, (), Directed>;

/// Builder and queries over the node reference graph
#[derive(Debug, Default)]
pub struct NodeGraph {
    graph: ReferenceGraph,
    indices: HashMap<String, NodeIndex>,
}

impl NodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph of the given nodes and everything they declare
    pub fn from_nodes(nodes: &[NodeData]) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_tree(node);
        }
        graph
    }

    fn add_tree(&mut self, node: &NodeData) {
        self.add_node(node.node_id());
        for child in node.children() {
            if let Some(target) = child.child_node() {
                self.add_reference(node.node_id(), target);
            }
        }
        for declared in node.declared_nodes() {
            self.add_tree(declared);
        }
    }

    /// Add a node if not present, returns its index
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&index) = self.indices.get(id) {
            return index;
        }
        let index = self.graph.add_node(id.to_string());
        self.indices.insert(id.to_string(), index);
        index
    }

    /// Record that `from` executes children of type `to`
    pub fn add_reference(&mut self, from: &str, to: &str) {
        let u = self.add_node(from);
        let v = self.add_node(to);
        if !self.graph.contains_edge(u, v) {
            self.graph.add_edge(u, v, ());
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn references(&self, from: &str, to: &str) -> bool {
        match (self.indices.get(from), self.indices.get(to)) {
            (Some(&u), Some(&v)) => self.graph.contains_edge(u, v),
            _ => false,
        }
    }

    /// Referenced nodes before the nodes referencing them. Falls back to insertion order when
    /// the graph has cycles.
    pub fn emission_order(&self) -> Vec<String> {
        match toposort(&self.graph, None) {
            Ok(order) => order.into_iter().rev().map(|index| self.graph[index].clone()).collect(),
            Err(cycle) => {
                debug!(node = %self.graph[cycle.node_id()], "reference cycle, keeping declaration order");
                self.graph.node_indices().map(|index| self.graph[index].clone()).collect()
            }
        }
    }

    /// Nodes that can reach themselves through their children
    pub fn recursive_nodes(&self) -> Vec<String> {
        let mut recursive: Vec<String> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| component.len() > 1 || self.graph.contains_edge(component[0], component[0]))
            .flatten()
            .map(|index| self.graph[index].clone())
            .collect();
        recursive.sort();
        recursive
    }

    pub fn graph(&self) -> &ReferenceGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{ARITHMETIC, parse};

    #[test]
    fn test_referenced_nodes_first() {
        let graph = NodeGraph::from_nodes(&parse(ARITHMETIC));
        assert!(graph.references("AddNode", "ExpressionNode"));
        assert_eq!(graph.emission_order(), vec!["ExpressionNode", "AddNode"]);
        assert!(graph.recursive_nodes().is_empty());
    }

    #[test]
    fn test_cycles_keep_insertion_order() {
        let mut graph = NodeGraph::new();
        graph.add_reference("BlockNode", "StatementNode");
        graph.add_reference("StatementNode", "BlockNode");
        graph.add_reference("CallNode", "CallNode");

        assert_eq!(graph.emission_order(), vec!["BlockNode", "StatementNode", "CallNode"]);
        assert_eq!(graph.recursive_nodes(), vec!["BlockNode", "CallNode", "StatementNode"]);
    }
}
