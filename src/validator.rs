// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Form field validator.
//!
//! Checks at most one control per category:
//! - the first `input[type="email"]`
//! - the first `input[type="tel"]`
//! - the first input whose `name` contains `name`
//! - the first textarea
//!
//! Missing or empty controls are skipped and count as valid. Every checked
//! control gets its custom validity message set when invalid and cleared
//! when valid, so the browser can show its native tooltip.

use crate::config::ValidationConfig;
use crate::form::{FormControl, FormSurface};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;

/// Browser whitespace as a regex class body. Unlike Unicode `White_Space`
/// it includes U+FEFF and leaves out U+0085. Keep in sync with
/// [`is_js_whitespace`].
const JS_WHITESPACE_CLASS: &str = r"\t\n\v\f\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    let part = format!("[^{}@]+", JS_WHITESPACE_CLASS);
    Regex::new(&format!(r"^{part}@{part}\.{part}$", part = part)).expect("email pattern is valid")
});

/// Whitespace and line terminators as a browser's `\s` and `trim()` see them.
pub(crate) fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{b}'
            | '\u{c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Field categories, in the order they are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Email,
    Phone,
    Name,
    Message,
}

impl FieldKind {
    pub const ALL: [FieldKind; 4] = [
        FieldKind::Email,
        FieldKind::Phone,
        FieldKind::Name,
        FieldKind::Message,
    ];
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
            Self::Name => write!(f, "name"),
            Self::Message => write!(f, "message"),
        }
    }
}

/// Validation failure for a single field. The display text is shown to
/// the visitor verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Please enter a valid phone number")]
    InvalidPhone,

    #[error("Name must be at least {min} characters")]
    NameTooShort { min: usize },

    #[error("Message must be at least {min} characters")]
    MessageTooShort { min: usize },
}

/// Outcome for one checked field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub kind: FieldKind,
    pub error: Option<FieldError>,
}

/// Result of validating a form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidation {
    checks: Vec<FieldCheck>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.error.is_none())
    }

    /// Human-readable error messages in field order.
    pub fn errors(&self) -> Vec<String> {
        self.field_errors().map(|(_, e)| e.to_string()).collect()
    }

    pub fn field_errors(&self) -> impl Iterator<Item = (FieldKind, &FieldError)> + '_ {
        self.checks
            .iter()
            .filter_map(|c| c.error.as_ref().map(|e| (c.kind, e)))
    }

    pub fn error_for(&self, kind: FieldKind) -> Option<&FieldError> {
        self.checks
            .iter()
            .find(|c| c.kind == kind)
            .and_then(|c| c.error.as_ref())
    }

    /// Fields that were present and non-empty.
    pub fn checked(&self) -> &[FieldCheck] {
        &self.checks
    }
}

/// Email check: something, `@`, something, `.`, something, with no
/// whitespace or extra `@`. Deliberately permissive.
pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Phone check: only digits, whitespace, `-`, `+`, `(` and `)`, with at
/// least ten digits.
pub fn validate_phone(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || is_js_whitespace(c) || matches!(c, '-' | '+' | '(' | ')'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    !phone.is_empty() && allowed && digits >= 10
}

/// Length of a value after trimming, counted the way a browser counts
/// string length (UTF-16 code units).
fn trimmed_len(value: &str) -> usize {
    value
        .trim_matches(is_js_whitespace)
        .encode_utf16()
        .count()
}

/// Form validator.
#[derive(Debug, Clone, Default)]
pub struct FormValidator {
    config: ValidationConfig,
}

impl FormValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Check a single non-empty value against the rule for its category.
    pub fn check_value(&self, kind: FieldKind, value: &str) -> Result<(), FieldError> {
        match kind {
            FieldKind::Email if !validate_email(value) => Err(FieldError::InvalidEmail),
            FieldKind::Phone if !validate_phone(value) => Err(FieldError::InvalidPhone),
            FieldKind::Name if trimmed_len(value) < self.config.min_name_len => {
                Err(FieldError::NameTooShort {
                    min: self.config.min_name_len,
                })
            }
            FieldKind::Message if trimmed_len(value) < self.config.min_message_len => {
                Err(FieldError::MessageTooShort {
                    min: self.config.min_message_len,
                })
            }
            _ => Ok(()),
        }
    }

    /// Validate a form and update the custom validity of every checked control.
    pub fn validate_form<F: FormSurface>(&self, form: &F) -> FormValidation {
        let mut checks = Vec::new();

        for kind in FieldKind::ALL {
            let control = match form.first(kind) {
                Some(c) => c,
                None => continue,
            };
            let value = control.value();
            if value.is_empty() {
                continue;
            }

            let error = self.check_value(kind, &value).err();
            match &error {
                Some(err) => {
                    debug!(field = %kind, error = %err, "Field invalid");
                    control.set_custom_validity(&err.to_string());
                }
                None => {
                    debug!(field = %kind, "Field valid");
                    control.set_custom_validity("");
                }
            }
            checks.push(FieldCheck { kind, error });
        }

        FormValidation { checks }
    }
}
