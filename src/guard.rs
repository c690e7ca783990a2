// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form guard: the handlers a page binds to its forms.
//!
//! The guard never touches browser events. Each handler does its work on
//! the form or control it is given and returns what happened; the binding
//! layer decides whether to cancel the submission or alert the visitor.

use crate::clock::Clock;
use crate::config::Config;
use crate::form::{FormControl, FormSurface};
use crate::limiter::{RateLimitDecision, RateLimiter};
use crate::sanitizer::escape_text;
use crate::storage::Storage;
use crate::validator::{FieldKind, FormValidation, FormValidator};
use std::borrow::Cow;
use tracing::{debug, info, warn};

/// Alert shown when a submission is refused by the rate limiter.
pub const RATE_LIMITED_ALERT: &str =
    "Too many submission attempts. Please wait a moment and try again.";

/// Everything that happened while handling one submit event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Validation of the submitted form
    pub validation: FormValidation,
    /// Rate limit decision, `None` if storage could not be used
    pub rate_limit: Option<RateLimitDecision>,
}

impl SubmitOutcome {
    /// Whether the browser should go ahead with the submission.
    pub fn should_submit(&self) -> bool {
        self.validation.is_valid() && !self.is_rate_limited()
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self.rate_limit, Some(RateLimitDecision::Denied { .. }))
    }

    /// Message for a blocking alert, if one should be shown.
    pub fn alert(&self) -> Option<&'static str> {
        self.is_rate_limited().then_some(RATE_LIMITED_ALERT)
    }
}

/// Validator and rate limiter shared by all forms of a page.
pub struct FormGuard<S, C> {
    validator: FormValidator,
    limiter: RateLimiter<S, C>,
}

impl<S: Storage, C: Clock> FormGuard<S, C> {
    /// Create a new guard with the given configuration.
    pub fn new(config: Config, storage: S, clock: C) -> Self {
        Self {
            validator: FormValidator::new(config.validation),
            limiter: RateLimiter::new(config.rate_limit, storage, clock),
        }
    }

    /// Add autofill hints to the email, name and phone inputs.
    pub fn prepare_form<F: FormSurface>(&self, form: &F) {
        if let Some(email) = form.first(FieldKind::Email) {
            email.set_attribute("autocomplete", "email");
            email.set_attribute("spellcheck", "false");
        }
        if let Some(name) = form.first(FieldKind::Name) {
            name.set_attribute("autocomplete", "name");
        }
        if let Some(phone) = form.first(FieldKind::Phone) {
            phone.set_attribute("autocomplete", "tel");
        }
        info!(
            text_controls = form.text_controls().len(),
            controls = form.controls().len(),
            "Form prepared"
        );
    }

    /// Blur handler for text inputs and textareas: escape the typed value.
    pub fn on_blur<T: FormControl>(&self, control: &T) {
        let value = control.value();
        if value.is_empty() {
            return;
        }
        if let Cow::Owned(escaped) = escape_text(&value) {
            debug!("Sanitized field value on blur");
            control.set_value(&escaped);
        }
    }

    /// Input handler for every control: drop any stale validity message.
    pub fn on_input<T: FormControl>(&self, control: &T) {
        control.set_custom_validity("");
    }

    /// Submit handler.
    ///
    /// Validation runs first so validity messages are in place, then the
    /// attempt is counted even when validation failed. A storage failure is
    /// logged and does not block the submission.
    pub fn on_submit<F: FormSurface>(&mut self, form: &F) -> SubmitOutcome {
        let validation = self.validator.validate_form(form);
        if !validation.is_valid() {
            info!(errors = ?validation.errors(), "Form validation failed");
        }

        let rate_limit = match self.limiter.check() {
            Ok(decision) => Some(decision),
            Err(err) => {
                warn!(error = %err, "Rate limit check failed, allowing submission");
                None
            }
        };

        SubmitOutcome {
            validation,
            rate_limit,
        }
    }
}
