// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outcome tallies for submission simulation.

use form_guard::SubmitOutcome;
use std::collections::HashMap;
use std::fmt;

/// What happened to a single submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Submitted,
    InvalidForm,
    RateLimited,
    InvalidAndRateLimited,
}

impl From<&SubmitOutcome> for Outcome {
    fn from(outcome: &SubmitOutcome) -> Self {
        match (outcome.validation.is_valid(), outcome.is_rate_limited()) {
            (true, false) => Outcome::Submitted,
            (false, false) => Outcome::InvalidForm,
            (true, true) => Outcome::RateLimited,
            (false, true) => Outcome::InvalidAndRateLimited,
        }
    }
}

/// Collects outcomes during a simulation.
#[derive(Debug, Default)]
pub struct SubmissionMetrics {
    outcomes: HashMap<Outcome, usize>,
    alerts: usize,
}

impl SubmissionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: &SubmitOutcome) {
        *self.outcomes.entry(Outcome::from(outcome)).or_insert(0) += 1;
        if outcome.alert().is_some() {
            self.alerts += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.outcomes.values().sum()
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    pub fn alerts(&self) -> usize {
        self.alerts
    }

    /// Share of submissions the browser was told to cancel.
    pub fn block_rate(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (total - self.count(Outcome::Submitted)) as f64 / total as f64
    }
}

impl fmt::Display for SubmissionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "submissions:         {}", self.total())?;
        writeln!(f, "  submitted:         {}", self.count(Outcome::Submitted))?;
        writeln!(f, "  invalid:           {}", self.count(Outcome::InvalidForm))?;
        writeln!(f, "  rate limited:      {}", self.count(Outcome::RateLimited))?;
        writeln!(
            f,
            "  invalid + limited: {}",
            self.count(Outcome::InvalidAndRateLimited)
        )?;
        writeln!(f, "alerts:              {}", self.alerts)?;
        write!(f, "block rate:          {:.2}", self.block_rate())
    }
}
