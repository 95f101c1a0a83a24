// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Office-hours configuration
//!
//! Loaded from TOML, e.g.:
//!
//! ```toml
//! students = 10
//! chairs = 3
//! service_mode = "serialized"
//! patience = 20
//!
//! [delays.arrival]
//! min = "1s"
//! max = "5s"
//! ```

use crate::error::ConfigError;
use crate::handoff::ServiceMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Inclusive range a pacer draws a delay from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayRange {
    #[serde(with = "humantime_serde")]
    pub min: Duration,
    #[serde(with = "humantime_serde")]
    pub max: Duration,
}

impl DelayRange {
    pub const ZERO: DelayRange = DelayRange::fixed(Duration::ZERO);

    pub const fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub const fn fixed(delay: Duration) -> Self {
        Self {
            min: delay,
            max: delay,
        }
    }

    pub const fn secs(min: u64, max: u64) -> Self {
        Self::new(Duration::from_secs(min), Duration::from_secs(max))
    }

    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedRange {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Delays standing in for real-world work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DelayConfig {
    /// Time before each arrival attempt
    pub arrival: DelayRange,
    /// Length of one help session
    pub service: DelayRange,
    /// TA pause between summons
    pub ta_ready: DelayRange,
}

impl DelayConfig {
    /// No delays at all
    pub const fn zero() -> Self {
        Self {
            arrival: DelayRange::ZERO,
            service: DelayRange::ZERO,
            ta_ready: DelayRange::ZERO,
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            arrival: DelayRange::secs(1, 5),
            service: DelayRange::secs(1, 3),
            ta_ready: DelayRange::secs(1, 3),
        }
    }
}

/// Everything needed to run one office-hours session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OfficeConfig {
    /// Number of students (N)
    pub students: u32,
    /// Number of hallway chairs (C)
    pub chairs: u32,
    pub service_mode: ServiceMode,
    /// Arrival attempts before a student gives up; unset retries forever
    pub patience: Option<u32>,
    /// Seed for the random pacer
    pub seed: Option<u64>,
    pub delays: DelayConfig,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            students: 10,
            chairs: 3,
            service_mode: ServiceMode::default(),
            patience: None,
            seed: None,
            delays: DelayConfig::default(),
        }
    }
}

impl OfficeConfig {
    pub fn new(students: u32, chairs: u32) -> Self {
        Self {
            students,
            chairs,
            ..Self::default()
        }
    }

    pub fn with_service_mode(mut self, mode: ServiceMode) -> Self {
        self.service_mode = mode;
        self
    }

    pub fn with_patience(mut self, patience: u32) -> Self {
        self.patience = Some(patience);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_delays(mut self, delays: DelayConfig) -> Self {
        self.delays = delays;
        self
    }

    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chairs == 0 {
            return Err(ConfigError::NoChairs);
        }
        if self.patience == Some(0) {
            return Err(ConfigError::ZeroPatience);
        }
        self.delays.arrival.validate("arrival")?;
        self.delays.service.validate("service")?;
        self.delays.ta_ready.validate("ta_ready")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
