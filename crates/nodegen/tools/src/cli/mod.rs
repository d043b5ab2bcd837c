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


//! Command implementations and the helpers they share

pub mod check;
pub mod generate;
pub mod inspect;

use crate::error::{CliError, CliResult};
use clap::ValueEnum;
use nodegen_common::DiagnosticReport;
use nodegen_compiler::CompilerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Configuration preset selected on the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    #[default]
    Default,
    Debug,
    Release,
}

impl From<Preset> for CompilerConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Default => CompilerConfig::default(),
            Preset::Debug => CompilerConfig::debug(),
            Preset::Release => CompilerConfig::release(),
        }
    }
}

/// Output format of reports
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

/// Install the global subscriber. `RUST_LOG` wins over `--verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed when commands run inside tests
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Load the configuration file if given, else the preset
pub fn load_config(path: Option<&Path>, preset: Preset) -> CliResult<CompilerConfig> {
    let Some(path) = path else {
        return Ok(preset.into());
    };
    let source = read_file(path)?;
    debug!(path = %path.display(), "loading configuration");
    CompilerConfig::from_json(&source).map_err(|message| CliError::Config {
        path: path.to_path_buf(),
        message,
    })
}

pub fn read_file(path: &Path) -> CliResult<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_file(path: PathBuf, contents: &str) -> CliResult<()> {
    fs::write(&path, contents).map_err(|source| CliError::Write { path, source })
}

/// Render a diagnostic report
pub fn render_report(report: &DiagnosticReport, format: ReportFormat) -> CliResult<String> {
    match format {
        ReportFormat::Text => Ok(report.to_string()),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
