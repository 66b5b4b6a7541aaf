//! Helpers for the inline label input used by create and rename

use std::ops::Range;

/// Normalise a submitted label
///
/// Surrounding whitespace is dropped. An empty result means the user
/// cancelled, so `None` is returned.
pub fn accept_label(input: &str) -> Option<String> {
    let label = input.trim();
    if label.is_empty() {
        None
    } else {
        Some(label.to_string())
    }
}

/// Byte range pre-selected when a rename input opens
///
/// The stem before the last `.` is selected so typing replaces the name but
/// keeps the extension. Labels without a dot, or whose only dot leads
/// (`.gitignore`), are selected whole.
pub fn rename_selection(label: &str) -> Range<usize> {
    match label.rfind('.') {
        Some(dot) if dot >= 1 => 0..dot,
        _ => 0..label.len(),
    }
}
