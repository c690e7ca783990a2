// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Submission patterns for simulation.

use super::generators;
use super::metrics::SubmissionMetrics;
use form_guard::{
    clock::ManualClock, config::Config, storage::MemoryStorage, FormGuard,
};

/// Submission pattern configuration.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Total number of submissions
    pub total_submissions: usize,
    /// Simulated time between submissions, in milliseconds
    pub interval_ms: i64,
    /// Share of submissions carrying an invalid form (0.0-1.0)
    pub invalid_ratio: f64,
    /// Reload the page (fresh guard, same storage) every n submissions
    pub reload_every: Option<usize>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            total_submissions: 20,
            interval_ms: 1_000,
            invalid_ratio: 0.0,
            reload_every: None,
        }
    }
}

impl Scenario {
    /// Impatient visitor hammering the submit button.
    pub fn rapid_fire() -> Self {
        Self {
            total_submissions: 50,
            interval_ms: 100,
            ..Default::default()
        }
    }

    /// Visitor submitting once every 15 seconds for ten minutes.
    pub fn steady_trickle() -> Self {
        Self {
            total_submissions: 40,
            interval_ms: 15_000,
            ..Default::default()
        }
    }

    /// Visitor retrying a form that never validates.
    pub fn stubborn_invalid() -> Self {
        Self {
            total_submissions: 10,
            interval_ms: 500,
            invalid_ratio: 1.0,
            ..Default::default()
        }
    }

    /// Visitor reloading the page to try to get a fresh counter.
    pub fn reload_evasion() -> Self {
        Self {
            total_submissions: 30,
            interval_ms: 200,
            reload_every: Some(3),
            ..Default::default()
        }
    }

    /// Run the scenario against a fresh store and return the tallies.
    pub fn run(&self, config: &Config) -> SubmissionMetrics {
        let storage = MemoryStorage::new();
        let clock = ManualClock::new(1_700_000_000_000);
        let mut guard = FormGuard::new(config.clone(), storage.clone(), clock.clone());
        let mut metrics = SubmissionMetrics::new();

        let invalid = generators::invalid_contact_form();

        for i in 0..self.total_submissions {
            if let Some(n) = self.reload_every {
                if i > 0 && i % n == 0 {
                    guard = FormGuard::new(config.clone(), storage.clone(), clock.clone());
                }
            }

            let outcome = if pick(self.invalid_ratio, i) {
                guard.on_submit(&invalid)
            } else {
                guard.on_submit(&generators::valid_contact_form(i))
            };
            metrics.record(&outcome);

            clock.advance_ms(self.interval_ms);
        }

        metrics
    }
}

/// Deterministic spread of `ratio` over submission indices.
fn pick(ratio: f64, index: usize) -> bool {
    if ratio >= 1.0 {
        true
    } else if ratio <= 0.0 {
        false
    } else {
        (index as f64 * 0.618033988749895) % 1.0 < ratio
    }
}
