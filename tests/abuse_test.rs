// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Abuse simulation tests for the form guard.
//!
//! These tests replay submission patterns against the guard and check that
//! throttling and sanitization behave as intended. They say nothing about
//! real security: a visitor can clear local storage at any time.

mod harness;

use form_guard::{
    clock::ManualClock,
    config::Config,
    form::{FormControl, MemoryControl, MemoryForm},
    storage::MemoryStorage,
    validator::validate_email,
    FormGuard,
};
use harness::{generators, metrics::Outcome, scenarios::Scenario};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Submission Pattern Tests
// ============================================================================

#[test]
fn test_rapid_fire() {
    init_tracing();
    let metrics = Scenario::rapid_fire().run(&Config::default());
    println!("{}", metrics);

    assert_eq!(metrics.total(), 50);
    assert_eq!(metrics.count(Outcome::Submitted), 5);
    assert_eq!(metrics.count(Outcome::RateLimited), 45);
    assert_eq!(metrics.alerts(), 45);
    assert!(metrics.block_rate() >= 0.9);
}

#[test]
fn test_steady_trickle_is_throttled_in_cycles() {
    init_tracing();
    let metrics = Scenario::steady_trickle().run(&Config::default());
    println!("{}", metrics);

    // Five allowed, then denied until a minute passes without an allowed
    // attempt: nine submissions per cycle at 15s spacing.
    assert_eq!(metrics.count(Outcome::Submitted), 24);
    assert_eq!(metrics.count(Outcome::RateLimited), 16);
}

#[test]
fn test_invalid_submissions_use_up_attempts() {
    init_tracing();
    let metrics = Scenario::stubborn_invalid().run(&Config::default());
    println!("{}", metrics);

    assert_eq!(metrics.count(Outcome::Submitted), 0);
    assert_eq!(metrics.count(Outcome::InvalidForm), 5);
    assert_eq!(metrics.count(Outcome::InvalidAndRateLimited), 5);
    assert_eq!(metrics.alerts(), 5);
}

#[test]
fn test_reload_does_not_reset_counter() {
    init_tracing();
    let metrics = Scenario::reload_evasion().run(&Config::default());
    println!("{}", metrics);

    assert_eq!(metrics.count(Outcome::Submitted), 5);
    assert_eq!(metrics.count(Outcome::RateLimited), 25);
}

#[test]
fn test_stricter_config() {
    init_tracing();
    let config = Config::from_json(r#"{"rate_limit": {"max_attempts": 2, "reset_window_ms": 1000}}"#)
        .unwrap();
    let scenario = Scenario {
        total_submissions: 12,
        interval_ms: 400,
        ..Default::default()
    };
    let metrics = scenario.run(&config);
    println!("{}", metrics);

    // t=0 and t=400 allowed; t=800, 1200 denied; t=1600 resets.
    assert_eq!(metrics.count(Outcome::Submitted), 6);
    assert_eq!(metrics.count(Outcome::RateLimited), 6);
}

// ============================================================================
// Sanitization and Validation Sweeps
// ============================================================================

#[test]
fn test_markup_payloads_neutralised_on_blur() {
    let guard = FormGuard::new(Config::default(), MemoryStorage::new(), ManualClock::new(0));

    for payload in generators::markup_payloads() {
        let field = MemoryControl::textarea().with_value(payload);
        guard.on_blur(&field);
        let value = field.value();
        assert!(
            !value.contains('<') && !value.contains('>'),
            "payload {:?} left markup behind: {:?}",
            payload,
            value
        );
    }
}

#[test]
fn test_malformed_emails_rejected() {
    let mut guard = FormGuard::new(Config::default(), MemoryStorage::new(), ManualClock::new(0));

    for email in generators::malformed_emails() {
        assert!(!validate_email(email), "{:?} should be rejected", email);

        let field = MemoryControl::input("email").with_value(email);
        let outcome = guard.on_submit(&MemoryForm::new().with(field.clone()));
        assert!(!outcome.validation.is_valid());
        assert_eq!(field.validation_message(), "Please enter a valid email address");
    }
}
