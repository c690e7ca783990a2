// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error types for the form guard

use thiserror::Error;

/// Guard error types
///
/// Invalid user input is never an error; see
/// [`FieldError`](crate::validator::FieldError) for that.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, GuardError>;
