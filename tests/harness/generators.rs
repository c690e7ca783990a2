// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test data generators for submission simulation.

use form_guard::form::{MemoryControl, MemoryForm};

/// A contact form that passes validation.
pub fn valid_contact_form(i: usize) -> MemoryForm {
    MemoryForm::new()
        .with(
            MemoryControl::input("text")
                .named("name")
                .with_value(&format!("Visitor {}", i)),
        )
        .with(MemoryControl::input("email").with_value(&format!("visitor{}@example.org", i)))
        .with(MemoryControl::input("tel").with_value("+44 (0)20 7946 0958"))
        .with(MemoryControl::textarea().with_value("I would like to know more about the bastion."))
}

/// A contact form that fails validation on every field.
pub fn invalid_contact_form() -> MemoryForm {
    MemoryForm::new()
        .with(MemoryControl::input("text").named("name").with_value("x"))
        .with(MemoryControl::input("email").with_value("not-an-email"))
        .with(MemoryControl::input("tel").with_value("call me"))
        .with(MemoryControl::textarea().with_value("hi"))
}

/// Markup-bearing values a visitor might paste into a text field.
pub fn markup_payloads() -> Vec<&'static str> {
    vec![
        "<script>alert(1)</script>",
        "<img src=x onerror=alert(1)>",
        "\"><svg onload=alert(1)>",
        "Tom & Jerry",
        "a\u{a0}b",
        "</textarea><script>",
    ]
}

/// Email addresses that must be rejected.
pub fn malformed_emails() -> Vec<&'static str> {
    vec![
        "not-an-email",
        "missing-at.example.org",
        "two@@example.org",
        "no-dot@example",
        "space in@example.org",
        "@example.org",
        "trailing@example.",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_guard::form::FormSurface;

    #[test]
    fn test_generated_forms_have_all_fields() {
        assert_eq!(valid_contact_form(0).controls().len(), 4);
        assert_eq!(invalid_contact_form().controls().len(), 4);
    }
}
