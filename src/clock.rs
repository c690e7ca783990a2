// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wall-clock sources.
//!
//! Timestamps are epoch milliseconds because that is what ends up in
//! storage. They are signed so a clock that moves backwards produces a
//! negative elapsed time instead of wrapping.

use std::cell::Cell;
use std::rc::Rc;

/// Source of the current time in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> i64 {
        (**self).now_ms()
    }
}

/// System clock backed by `chrono`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Manually advanced clock for tests and simulations.
///
/// Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<i64>>,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set_ms(&self, ms: i64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.get()
    }
}
