//! Response normalization
//!
//! Turns free-form completion text into a clean odai list. Models are
//! told to emit one odai per line, but in practice they number, bullet
//! or pad their output, so each line is stripped before filtering.

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest odai kept, in Unicode code points
pub const MAX_ODAI_CHARS: usize = 200;

// List markers stripped from line starts: "1. " / "2) ", then "・" / "-" / "*",
// then a bare leading number.
static NUMBERED_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+[.)]\s*").expect("valid numbered prefix pattern"));
static BULLET_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[・\-*]\s*").expect("valid bullet prefix pattern"));
static BARE_NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s*").expect("valid bare number prefix pattern"));

/// Normalize completion text into an odai list
///
/// Lines are trimmed, stripped of list markers and dropped when empty
/// or longer than [`MAX_ODAI_CHARS`]. Order is preserved. An empty
/// result is valid output, not an error.
pub fn parse_response(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_list_markers)
        .filter(|line| {
            let len = line.chars().count();
            len > 0 && len <= MAX_ODAI_CHARS
        })
        .collect()
}

/// Strip leading list markers from one line
///
/// Each pattern is applied once, in order, so "1. ・foo" loses both
/// the number and the bullet.
fn strip_list_markers(line: &str) -> String {
    let stripped = NUMBERED_PREFIX.replace(line, "");
    let stripped = BULLET_PREFIX.replace(&stripped, "");
    let stripped = BARE_NUMBER_PREFIX.replace(&stripped, "");
    stripped.trim().to_string()
}
