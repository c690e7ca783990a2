// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Text sanitization for values typed into form fields.
//!
//! The escaping matches what a browser produces when a string is assigned as
//! an element's text content and the element's markup is read back: only
//! `&`, `<`, `>` and the no-break space are replaced. Quotes survive because
//! text nodes never need them escaped.

use serde_json::Value;
use std::borrow::Cow;

/// Escape text so it cannot be interpreted as markup.
///
/// Returns the input borrowed when nothing needs escaping.
pub fn escape_text(input: &str) -> Cow<'_, str> {
    let first = match input.find(needs_escape) {
        Some(idx) => idx,
        None => return Cow::Borrowed(input),
    };

    let mut output = String::with_capacity(input.len() + 8);
    output.push_str(&input[..first]);
    for ch in input[first..].chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '\u{a0}' => output.push_str("&nbsp;"),
            _ => output.push(ch),
        }
    }
    Cow::Owned(output)
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '&' | '<' | '>' | '\u{a0}')
}

/// Values that can pass through the sanitizer.
///
/// Strings are escaped; every other value is returned unchanged.
pub trait Sanitize: Sized {
    fn sanitize(self) -> Self;
}

impl Sanitize for String {
    fn sanitize(self) -> Self {
        match escape_text(&self) {
            Cow::Borrowed(_) => self,
            Cow::Owned(escaped) => escaped,
        }
    }
}

impl<'a> Sanitize for Cow<'a, str> {
    fn sanitize(self) -> Self {
        match self {
            Cow::Borrowed(s) => escape_text(s),
            Cow::Owned(s) => Cow::Owned(s.sanitize()),
        }
    }
}

impl Sanitize for Value {
    fn sanitize(self) -> Self {
        match self {
            Value::String(s) => Value::String(s.sanitize()),
            other => other,
        }
    }
}

impl<T: Sanitize> Sanitize for Option<T> {
    fn sanitize(self) -> Self {
        self.map(Sanitize::sanitize)
    }
}

macro_rules! passthrough {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Sanitize for $ty {
                fn sanitize(self) -> Self {
                    self
                }
            }
        )*
    };
}

passthrough!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Sanitize a value for safe display.
pub fn sanitize<T: Sanitize>(input: T) -> T {
    input.sanitize()
}
