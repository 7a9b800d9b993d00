//! Numeric parsing and reductions shared by the transforms

/// Parse a Spanish-formatted decimal: `.` groups thousands, `,` marks decimals
///
/// `"1.500,50"` is 1500.5 and `"2.000"` is 2000. Values that are already
/// plain (`"3000"`) parse as-is. Anything else is `None`.
#[must_use]
pub fn parse_locale_decimal(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().replace('.', "").replace(',', ".");
    parse_number(&cleaned)
}

/// Parse a plain number, `None` for blank, non-numeric or non-finite input
#[must_use]
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Median of a set of values; the mean of the two middle values for even counts
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Arithmetic mean
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}
