// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for office hours

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating an [`crate::OfficeConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the waiting room needs at least one chair")]
    NoChairs,
    #[error("{name} delay range is inverted: min {min:?} is greater than max {max:?}")]
    InvertedRange {
        name: &'static str,
        min: Duration,
        max: Duration,
    },
    #[error("patience must allow at least one arrival attempt")]
    ZeroPatience,
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors that abort an office-hours run
///
/// "No chair available" is not here: a denied student simply retries.
#[derive(Debug, Error)]
pub enum OfficeError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{0} signal was closed while a task was waiting on it")]
    SignalClosed(&'static str),
    #[error("{task} task failed: {source}")]
    Join {
        task: String,
        #[source]
        source: tokio::task::JoinError,
    },
}
