// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! oh - run one office-hours session
//!
//! A TA helps students one at a time; students wait on a limited number of
//! hallway chairs and come back later when every chair is taken.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use oh_core::{DelayConfig, Office, OfficeConfig, ServiceMode};
use std::path::PathBuf;
use tracing::debug;

use crate::output::{ConsoleSink, OutputFormat};

#[derive(Parser)]
#[command(
    name = "oh",
    version,
    about = "Office hours - one TA, a hallway of chairs, and students who need help"
)]
struct Cli {
    /// TOML config file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of students
    #[arg(short = 'n', long)]
    students: Option<u32>,

    /// Number of hallway chairs
    #[arg(short = 'c', long)]
    chairs: Option<u32>,

    /// Whether the TA waits for each help session to end before calling the next student
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Arrival attempts before a student gives up (default: never)
    #[arg(long)]
    patience: Option<u32>,

    /// Seed for reproducible delays
    #[arg(long)]
    seed: Option<u64>,

    /// Skip all simulated delays
    #[arg(long)]
    no_delay: bool,

    /// Don't print status lines, only the final report
    #[arg(short, long)]
    quiet: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Log filter for diagnostics on stderr (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Serialized,
    Overlapping,
}

impl From<ModeArg> for ServiceMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Serialized => ServiceMode::Serialized,
            ModeArg::Overlapping => ServiceMode::Overlapping,
        }
    }
}

impl Cli {
    /// Build the effective config: file (or defaults), then flag overrides
    fn office_config(&self) -> Result<OfficeConfig> {
        let mut config = match &self.config {
            Some(path) => OfficeConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => OfficeConfig::default(),
        };

        if let Some(students) = self.students {
            config.students = students;
        }
        if let Some(chairs) = self.chairs {
            config.chairs = chairs;
        }
        if let Some(mode) = self.mode {
            config.service_mode = mode.into();
        }
        if self.patience.is_some() {
            config.patience = self.patience;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.no_delay {
            config.delays = DelayConfig::zero();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref());

    let config = cli.office_config()?;
    debug!(?config, "effective configuration");

    let office = Office::new(config)?.with_events(ConsoleSink::new(
        !cli.quiet && matches!(cli.format, OutputFormat::Text),
    ));
    let report = office.run().await?;

    output::print(&report, cli.format);
    Ok(())
}

fn setup_logging(level: Option<&str>) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
