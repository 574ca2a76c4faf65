//! Slug derivation for industry page identifiers.

use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Lower-case `name` and replace every run of whitespace with one `-`.
///
/// Leading and trailing whitespace is not trimmed, so `"  Multi   Space "`
/// becomes `"-multi-space-"`. Distinct names that collapse to the same slug
/// are not detected.
pub fn slugify(name: &str) -> String {
    WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "-")
        .into_owned()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
