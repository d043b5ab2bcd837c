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


//! Check command: verify a batch without writing anything

use super::{Preset, ReportFormat, load_config, read_file, render_report};
use crate::error::CliResult;
use clap::Args;
use nodegen_common::DiagnosticReport;
use nodegen_compiler::PipelineBuilder;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Declaration batch (JSON)
    #[arg(value_name = "BATCH")]
    pub input: PathBuf,

    /// Configuration file (JSON), overrides the preset
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Configuration preset
    #[arg(long, value_enum, default_value_t = Preset::Default)]
    pub preset: Preset,

    /// Treat warnings as errors
    #[arg(long)]
    pub deny_warnings: bool,

    /// Format of the diagnostic report
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Execute the check command. Returns the report and whether the batch passed.
pub fn run_check(args: &CheckArgs) -> CliResult<(DiagnosticReport, bool)> {
    let config = load_config(args.config.as_deref(), args.preset)?;
    let source = read_file(&args.input)?;

    let mut pipeline = PipelineBuilder::with_config(config).check().build()?;
    let output = pipeline.execute_json(&source)?;
    let report = output.report;

    println!("{}", render_report(&report, args.format)?);
    let passed = !report.has_errors() && !(args.deny_warnings && report.warning_count() > 0);
    Ok((report, passed))
}
