//! Coercion of free-form numeric fields.
//!
//! Widgets never reject what the user typed into a number box: anything that
//! does not parse to a finite number becomes the field's default.

/// Parses `raw` as a number, falling back to `0.0`.
#[must_use]
pub fn coerce_numeric(raw: &str) -> f64 {
    coerce_numeric_or(raw, 0.0)
}

/// Parses `raw` as a number, falling back to `default`.
///
/// Accepts a decimal comma (`"2,5"`) and surrounding whitespace.
#[must_use]
pub fn coerce_numeric_or(raw: &str, default: f64) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return default;
    }
    let normalized = if trimmed.contains('.') {
        trimmed.to_string()
    } else {
        trimmed.replacen(',', ".", 1)
    };
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => default,
    }
}
