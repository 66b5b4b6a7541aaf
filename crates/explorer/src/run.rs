//! Run requests for runnable leaves

use explorer_tree::tree::NodeId;
use std::fmt;
use std::time::Duration;

/// A confirmed request to run a script after an activation delay
///
/// The explorer only produces these; executing them is up to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub target: NodeId,
    pub path: String,
    pub label: String,
    pub delay: Duration,
}

impl fmt::Display for RunRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Run {} with delay {}", self.label, self.delay.as_millis())
    }
}

/// Parse the delay field of the run dialog, in milliseconds
///
/// Leading whitespace is skipped and the longest run of digits is taken, so
/// `"250ms"` reads as 250. Anything without leading digits reads as 0, and
/// negative values are clamped to 0. Values too large for `u64` saturate.
pub fn parse_delay(input: &str) -> u64 {
    let input = input.trim_start();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if negative || digits.is_empty() {
        return 0;
    }

    digits.parse().unwrap_or(u64::MAX)
}
