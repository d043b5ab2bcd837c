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


//! Nodegen CLI Tool
//!
//! Main entry point for the nodegen command-line interface.

use anyhow::Context;
use clap::{Parser, Subcommand};
use nodegen_tools::cli::init_tracing;
use nodegen_tools::{CheckArgs, GenerateArgs, InspectArgs, run_check, run_generate, run_inspect};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "nodegen")]
#[command(about = "nodegen - Specialization generator for self-rewriting interpreter nodes")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate specialized node sources from a declaration batch
    Generate(GenerateArgs),
    /// Verify a declaration batch without writing files
    Check(CheckArgs),
    /// Show the specialization states of one node
    Inspect(InspectArgs),
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let passed = match cli.command {
        Commands::Generate(args) => {
            init_tracing(args.verbose);
            let summary = run_generate(&args).with_context(|| format!("generating {}", args.input.display()))?;
            println!("{} file(s) written to {}", summary.written.len(), args.output.display());
            for node in &summary.skipped {
                println!("skipped {}", node);
            }
            summary.is_success()
        }
        Commands::Check(args) => {
            init_tracing(args.verbose);
            let (_, passed) = run_check(&args).with_context(|| format!("checking {}", args.input.display()))?;
            passed
        }
        Commands::Inspect(args) => {
            init_tracing(args.verbose);
            print!("{}", run_inspect(&args)?);
            true
        }
    };

    Ok(if passed { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
