// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for the CLI

use clap::ValueEnum;
use oh_core::{Event, EventSink};
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Print output in the specified format
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", value),
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(value) {
                println!("{}", json);
            }
        }
    }
}

/// Prints each status event as a line on stdout, and traces it at debug
pub struct ConsoleSink {
    echo: bool,
}

impl ConsoleSink {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl EventSink for ConsoleSink {
    fn emit(&self, event: Event) {
        tracing::debug!(event = event.name(), "status");
        if self.echo {
            println!("{}", event);
        }
    }
}
