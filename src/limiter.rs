// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Submission rate limiter.
//!
//! Counts submission attempts in durable storage and refuses further
//! attempts once `max_attempts` is reached, until `reset_window_ms` has
//! passed since the last allowed attempt.
//!
//! This is client-side throttling only. Storage belongs to the visitor, who
//! can clear or rewrite it at will, and tabs of the same origin race on the
//! shared counters. It keeps honest users from hammering a form; it does
//! not stop anybody determined.
//!
//! The in-memory counter is only refreshed from storage when a last-attempt
//! timestamp is stored. A fresh limiter therefore starts from zero unless
//! storage holds a timestamp, even if an attempt count is stored on its own.

use crate::clock::Clock;
use crate::config::RateLimitConfig;
use crate::error::Result;
use crate::storage::Storage;
use crate::validator::is_js_whitespace;
use tracing::{debug, warn};

/// Result of a rate limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Attempt is allowed
    Allowed {
        /// Attempts counted in the current window, including this one
        attempts: u32,
    },
    /// Attempt is refused
    Denied {
        /// Attempts counted in the current window
        attempts: u32,
    },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Attempt counter backed by durable storage.
pub struct RateLimiter<S, C> {
    config: RateLimitConfig,
    storage: S,
    clock: C,
    attempts: u32,
}

impl<S: Storage, C: Clock> RateLimiter<S, C> {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig, storage: S, clock: C) -> Self {
        Self {
            config,
            storage,
            clock,
            attempts: 0,
        }
    }

    /// Record a submission attempt if the limit allows it.
    ///
    /// An allowed attempt writes the new count and the current time; a
    /// denied attempt writes nothing.
    pub fn check(&mut self) -> Result<RateLimitDecision> {
        let now = self.clock.now_ms();

        let last_attempt = self
            .storage
            .get(&self.config.last_attempt_key)?
            .filter(|v| !v.is_empty());

        if let Some(raw) = last_attempt {
            // A timestamp that holds no number cannot prove the window has
            // passed, so the stored count stays in force.
            let elapsed = parse_int_prefix(&raw).map(|last| now.saturating_sub(last));
            match elapsed {
                Some(elapsed) if elapsed > window_ms(&self.config) => {
                    debug!(elapsed_ms = elapsed, "Reset window elapsed, clearing attempts");
                    self.attempts = 0;
                    self.storage.remove(&self.config.attempts_key)?;
                }
                _ => {
                    if elapsed.is_none() {
                        debug!(value = %raw, "Stored last attempt is not a number");
                    }
                    self.attempts = self.stored_attempts()?;
                }
            }
        }

        if self.attempts >= self.config.max_attempts {
            warn!(
                attempts = self.attempts,
                max_attempts = self.config.max_attempts,
                "Submission rate limit exceeded"
            );
            return Ok(RateLimitDecision::Denied {
                attempts: self.attempts,
            });
        }

        self.attempts += 1;
        self.storage
            .set(&self.config.attempts_key, &self.attempts.to_string())?;
        self.storage
            .set(&self.config.last_attempt_key, &now.to_string())?;

        debug!(attempts = self.attempts, "Submission attempt allowed");
        Ok(RateLimitDecision::Allowed {
            attempts: self.attempts,
        })
    }

    /// In-memory attempt count as of the last check.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Stored count, read from its leading integer. Missing, non-numeric and
    /// negative counts are zero.
    fn stored_attempts(&self) -> Result<u32> {
        let count = self
            .storage
            .get(&self.config.attempts_key)?
            .and_then(|v| parse_int_prefix(&v))
            .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0);
        Ok(count)
    }
}

fn window_ms(config: &RateLimitConfig) -> i64 {
    i64::try_from(config.reset_window_ms).unwrap_or(i64::MAX)
}

/// Leading integer of a stored value, read the way a page script's
/// `parseInt` reads it: leading whitespace is skipped, an optional sign and a
/// `0x` prefix are honoured, and parsing stops at the first non-digit.
/// `None` when no digit follows. Out of range values saturate.
fn parse_int_prefix(value: &str) -> Option<i64> {
    let rest = value.trim_start_matches(is_js_whitespace);
    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };
    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let mut magnitude: Option<i64> = None;
    for digit in digits.chars().map_while(|c| c.to_digit(radix)) {
        let acc = magnitude.unwrap_or(0);
        magnitude = Some(acc.saturating_mul(i64::from(radix)).saturating_add(i64::from(digit)));
    }
    magnitude.map(|m| if negative { -m } else { m })
}
