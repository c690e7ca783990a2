// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form Guard
//!
//! Client-side hardening for the contact and signup forms served by the
//! bastion pages:
//!
//! - Text sanitization on blur (HTML text escaping)
//! - Email, phone, name and message validation with native validity messages
//! - Submission throttling (5 attempts per minute by default), persisted in
//!   browser local storage
//! - Audit of `<script>` sources loaded by the page
//!
//! Everything here is advisory. Local storage is fully under the visitor's
//! control, so the throttle and the validation are conveniences for honest
//! users and provide no security guarantee.
//!
//! The core is DOM-free and runs on any target. The `wasm` feature adds the
//! browser binding that attaches the guard to every form on the page.

pub mod audit;
pub mod clock;
pub mod config;
pub mod error;
pub mod form;
pub mod guard;
pub mod limiter;
pub mod sanitizer;
pub mod storage;
pub mod validator;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::Config;
pub use error::{GuardError, Result};
pub use guard::{FormGuard, SubmitOutcome, RATE_LIMITED_ALERT};
pub use limiter::{RateLimitDecision, RateLimiter};
pub use sanitizer::{sanitize, Sanitize};
pub use validator::{FieldError, FieldKind, FormValidation, FormValidator};
