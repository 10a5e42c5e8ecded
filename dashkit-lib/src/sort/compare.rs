//! Numeric comparison of cell text.

use std::cmp::Ordering;

/// Coerce cell text to a number.
///
/// Surrounding whitespace is ignored and empty text counts as zero. Text that
/// is not a number (including a literal `NaN`) yields `None`.
pub fn coerce_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_nan() => None,
        Ok(n) => Some(n),
        Err(_) => None,
    }
}

/// Compare two cell texts numerically.
///
/// Values that are not numbers compare equal to each other and greater than
/// every number, so the ordering stays total.
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    match (coerce_number(a), coerce_number(b)) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
