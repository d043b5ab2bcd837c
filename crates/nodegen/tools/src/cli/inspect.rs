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


//! Inspect command: show the state machine of one node and simulate executions

use super::{Preset, load_config, read_file};
use crate::error::{CliError, CliResult};
use clap::Args;
use nodegen_compiler::node::{NodeData, SpecializationData, SpecializationRole};
use nodegen_compiler::protocol::{Dispatcher, OperandOracle, Transition};
use nodegen_compiler::{Batch, PipelineBuilder};
use nodegen_core::{Rewrite, RewriteResult};
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    /// Declaration batch (JSON)
    #[arg(value_name = "BATCH")]
    pub input: PathBuf,

    /// Node id to inspect
    #[arg(value_name = "NODE")]
    pub node: String,

    /// Configuration file (JSON), overrides the preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Configuration preset
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    pub preset: Preset,

    /// Simulate one execution per value, operand types as `left=int,right=double`
    #[arg(long = "simulate", value_name = "OPERANDS")]
    pub simulate: Vec<String>,

    /// Guard methods that fail during simulation
    #[arg(long = "fail-guard", value_name = "GUARD")]
    pub failing_guards: Vec<String>,

    /// Specializations whose bodies request a rewrite during simulation
    #[arg(long = "rewrite", value_name = "SPECIALIZATION")]
    pub rewriting: Vec<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Operands of one simulated execution
#[derive(Debug)]
struct SimulatedOperands<'a> {
    types: HashMap<String, String>,
    failing_guards: &'a HashSet<String>,
    rewriting: &'a HashSet<String>,
}

impl<'a> SimulatedOperands<'a> {
    fn parse(assignment: &str, failing_guards: &'a HashSet<String>, rewriting: &'a HashSet<String>) -> CliResult<Self> {
        let mut types = HashMap::new();
        for pair in assignment.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (operand, ty) = pair.split_once('=').ok_or_else(|| CliError::InvalidAssignment(assignment.to_string()))?;
            types.insert(operand.trim().to_string(), ty.trim().to_string());
        }
        Ok(Self { types, failing_guards, rewriting })
    }
}

impl OperandOracle for SimulatedOperands<'_> {
    fn is_type(&self, operand: &str, type_name: &str) -> bool {
        self.types.get(operand).is_some_and(|ty| ty == type_name)
    }

    fn guard(&self, _specialization: &str, guard: &str) -> bool {
        !self.failing_guards.contains(guard)
    }

    fn execute_body(&self, specialization: &str) -> RewriteResult<()> {
        if self.rewriting.contains(specialization) {
            Err(Rewrite::new(format!("{} requested a rewrite", specialization)))
        } else {
            Ok(())
        }
    }
}

fn find_node<'a>(nodes: &'a [NodeData], id: &str) -> Option<&'a NodeData> {
    nodes.iter().find_map(|node| if node.node_id() == id { Some(node) } else { find_node(node.declared_nodes(), id) })
}

fn role_label(specialization: &SpecializationData) -> &'static str {
    match specialization.role() {
        SpecializationRole::Uninitialized => "uninitialized",
        SpecializationRole::Specialized => "specialized",
        SpecializationRole::Generic => "generic",
    }
}

/// Table of the states of `node` in dispatch order
pub fn describe_node(node: &NodeData) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", node.node_id(), node.declaration_name());
    for (index, specialization) in node.specializations().iter().enumerate() {
        let mut details = Vec::new();
        if let Some(order) = specialization.order() {
            details.push(format!("order {}", order));
        }
        let guards: Vec<&str> = specialization.guards().iter().map(|g| g.guard_name()).collect();
        if !guards.is_empty() {
            details.push(format!("guards {}", guards.join(" && ")));
        }
        let rewrites: Vec<&str> = specialization.exceptions().iter().map(|e| e.exception()).collect();
        if !rewrites.is_empty() {
            details.push(format!("rewrite on {}", rewrites.join(", ")));
        }
        if specialization.is_specialized() && !specialization.is_reachable() {
            details.push("unreachable".to_string());
        }
        let _ = writeln!(
            out,
            "  {:>2}  {:<16} {:<14} {}",
            index,
            specialization.id(),
            role_label(specialization),
            details.join("; ")
        );
    }
    out
}

/// Execute the inspect command and return the rendered output
pub fn run_inspect(args: &InspectArgs) -> CliResult<String> {
    let config = load_config(args.config.as_deref(), args.preset)?;
    let batch = Batch::from_json(&read_file(&args.input)?)?;
    let mut pipeline = PipelineBuilder::with_config(config).check().build()?;
    let nodes = pipeline.analyze(batch)?;
    let node = find_node(&nodes, &args.node).ok_or_else(|| CliError::UnknownNode(args.node.clone()))?;

    let mut out = describe_node(node);
    if args.simulate.is_empty() {
        return Ok(out);
    }

    let failing_guards: HashSet<String> = args.failing_guards.iter().cloned().collect();
    let rewriting: HashSet<String> = args.rewriting.iter().cloned().collect();
    let mut dispatcher = Dispatcher::new(node).map_err(nodegen_compiler::CompilerError::from)?;
    let _ = writeln!(out, "simulation:");
    for (step, assignment) in args.simulate.iter().enumerate() {
        let operands = SimulatedOperands::parse(assignment, &failing_guards, &rewriting)?;
        let line = match dispatcher.execute(&operands) {
            Transition::Stayed(state) => format!("stays {}", state),
            Transition::Specialized { from, to } => format!("{} -> {}", from, to),
        };
        let _ = writeln!(out, "  {:>2}  [{}] {}", step + 1, assignment, line);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        let none = HashSet::new();
        let operands = SimulatedOperands::parse("left=int, right=double", &none, &none).unwrap();
        assert!(operands.is_type("left", "int"));
        assert!(operands.is_type("right", "double"));
        assert!(!operands.is_type("right", "int"));
        assert!(!operands.is_type("other", "int"));
    }

    #[test]
    fn test_invalid_assignment() {
        let none = HashSet::new();
        assert!(matches!(SimulatedOperands::parse("left:int", &none, &none), Err(CliError::InvalidAssignment(_))));
    }

    #[test]
    fn test_failing_guards_and_rewrites() {
        let guards: HashSet<String> = ["is_small".to_string()].into_iter().collect();
        let rewriting: HashSet<String> = ["Int".to_string()].into_iter().collect();
        let operands = SimulatedOperands::parse("", &guards, &rewriting).unwrap();
        assert!(!operands.guard("Int", "is_small"));
        assert!(operands.guard("Int", "is_large"));
        assert!(operands.execute_body("Int").is_err());
        assert!(operands.execute_body("Double").is_ok());
    }
}
