// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Audit of the script sources loaded by a page.
//!
//! Flags every external script whose `src` is not an `http(s)` URL or a
//! root-relative path, for example `data:` or `blob:` URLs. Nothing is
//! removed; flagged sources are only reported.

use tracing::warn;

const TRUSTED_PREFIXES: &[&str] = &["https://", "http://", "/"];

/// A script source that failed the audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntrustedScript {
    /// Position of the script among the audited sources
    pub index: usize,
    pub src: String,
}

/// Whether a script source is loaded from an expected location.
/// Inline scripts (empty `src`) are not audited and count as trusted.
pub fn is_trusted_script_src(src: &str) -> bool {
    src.is_empty() || TRUSTED_PREFIXES.iter().any(|p| src.starts_with(p))
}

/// Audit script sources in document order, warning about each untrusted one.
pub fn audit_script_sources<I, S>(sources: I) -> Vec<UntrustedScript>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sources
        .into_iter()
        .enumerate()
        .filter(|(_, src)| !is_trusted_script_src(src.as_ref()))
        .map(|(index, src)| {
            let src = src.as_ref().to_string();
            warn!(src = %src, "Potentially unsafe script detected");
            UntrustedScript { index, src }
        })
        .collect()
}
