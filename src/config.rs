// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the form guard.
//!
//! Defaults reproduce the behaviour shipped on the bastion pages, so an
//! empty configuration object is always valid.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Configuration for the form guard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Submission throttling configuration
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Field validation configuration
    #[serde(default)]
    pub validation: ValidationConfig,
}

/// Submission throttling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Attempts allowed inside one window (default: 5)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Quiet period after which the counter resets, in milliseconds (default: 60000)
    #[serde(default = "default_reset_window_ms")]
    pub reset_window_ms: u64,

    /// Storage key holding the attempt counter (default: formAttempts)
    #[serde(default = "default_attempts_key")]
    pub attempts_key: String,

    /// Storage key holding the last attempt timestamp (default: formLastAttempt)
    #[serde(default = "default_last_attempt_key")]
    pub last_attempt_key: String,
}

/// Field validation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum trimmed length of the name field (default: 2)
    #[serde(default = "default_min_name_len")]
    pub min_name_len: usize,

    /// Minimum trimmed length of the message field (default: 10)
    #[serde(default = "default_min_message_len")]
    pub min_message_len: usize,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_reset_window_ms() -> u64 {
    60_000
}

fn default_attempts_key() -> String {
    "formAttempts".to_string()
}

fn default_last_attempt_key() -> String {
    "formLastAttempt".to_string()
}

fn default_min_name_len() -> usize {
    2
}

fn default_min_message_len() -> usize {
    10
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            reset_window_ms: default_reset_window_ms(),
            attempts_key: default_attempts_key(),
            last_attempt_key: default_last_attempt_key(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_name_len: default_min_name_len(),
            min_message_len: default_min_message_len(),
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
