//! Defensive arithmetic over possibly-empty or malformed numeric data.
//!
//! Every downstream stat computation routes through these helpers so that
//! empty collections and zero denominators resolve to caller-supplied
//! defaults instead of NaN or infinities leaking into derived scores.

/// Maximum of `values`, or `default` when the slice is empty.
pub fn safe_max(values: &[f64], default: f64) -> f64 {
    values.iter().copied().fold(None, |acc: Option<f64>, v| {
        Some(match acc {
            Some(current) => current.max(v),
            None => v,
        })
    })
    .unwrap_or(default)
}

/// Minimum of `values`, or `default` when the slice is empty.
pub fn safe_min(values: &[f64], default: f64) -> f64 {
    values.iter().copied().fold(None, |acc: Option<f64>, v| {
        Some(match acc {
            Some(current) => current.min(v),
            None => v,
        })
    })
    .unwrap_or(default)
}

/// Division that maps a zero or non-finite denominator (or a non-finite
/// result) to `default`.
pub fn safe_divide(numerator: f64, denominator: f64, default: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() {
        return default;
    }
    let result = numerator / denominator;
    if result.is_finite() {
        result
    } else {
        default
    }
}

/// `value / max` expressed as a percentage, with `default` on invalid input.
pub fn safe_percentage(value: f64, max: f64, default: f64) -> f64 {
    safe_divide(value, max, default) * 100.0
}

/// Inclusive min/max bounds over a set of values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

/// Bounds over `values`, or the provided defaults when the slice is empty.
pub fn safe_bounds(values: &[f64], default_min: f64, default_max: f64) -> Bounds {
    if values.is_empty() {
        return Bounds {
            min: default_min,
            max: default_max,
        };
    }
    Bounds {
        min: safe_min(values, default_min),
        max: safe_max(values, default_max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_of_empty_is_default_even_when_negative() {
        assert_eq!(safe_max(&[], -5.0), -5.0);
        assert_eq!(safe_max(&[], 0.0), 0.0);
    }

    #[test]
    fn max_ignores_default_for_nonempty_input() {
        assert_eq!(safe_max(&[-10.0, -3.0], 0.0), -3.0);
    }

    #[test]
    fn divide_by_zero_yields_default() {
        assert_eq!(safe_divide(10.0, 0.0, 7.0), 7.0);
        assert_eq!(safe_divide(-3.0, 0.0, 0.0), 0.0);
        assert_eq!(safe_divide(10.0, 4.0, 0.0), 2.5);
    }

    #[test]
    fn divide_by_nonfinite_yields_default() {
        assert_eq!(safe_divide(1.0, f64::NAN, 9.0), 9.0);
        assert_eq!(safe_divide(1.0, f64::INFINITY, 9.0), 9.0);
    }

    #[test]
    fn percentage_scales_by_hundred() {
        assert_eq!(safe_percentage(5.0, 10.0, 0.0), 50.0);
        assert_eq!(safe_percentage(5.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn bounds_over_empty_input_use_defaults() {
        let bounds = safe_bounds(&[], 1.0, 9.0);
        assert_eq!(bounds, Bounds { min: 1.0, max: 9.0 });
    }

    #[test]
    fn bounds_over_values() {
        let bounds = safe_bounds(&[4.0, 2.0, 8.0], 0.0, 0.0);
        assert_eq!(bounds, Bounds { min: 2.0, max: 8.0 });
    }
}
