//! Email address pattern shared by request validation and mention scanning.

use regex::Regex;
use std::sync::LazyLock;

/// Local part, `@`, dot-separated domain labels, alphabetic top-level label.
const EMAIL_PATTERN: &str =
    r"[_A-Za-z0-9\-+]+(?:\.[_A-Za-z0-9\-]+)*@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9]+)*\.[A-Za-z]{2,}";

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

#[allow(clippy::expect_used)]
static EMAIL_EXACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("^(?:{EMAIL_PATTERN})$")).expect("email pattern compiles")
});

/// Returns whether the whole string is an email address.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_EXACT_RE.is_match(email)
}

/// Returns every email-shaped substring of `text`, in order of appearance.
///
/// Repeated mentions are kept; callers deduplicate.
#[must_use]
pub fn mentioned_emails(text: &str) -> Vec<&str> {
    EMAIL_RE.find_iter(text).map(|m| m.as_str()).collect()
}
