//! Numeric conversion helpers centralizing safe numeric casts.

use num_traits::cast::cast;

/// Round a f64 and clamp it to the u32 range, returning 0 for NaN values.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).round();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Round to one decimal place, returning 0.0 for non-finite values.
#[must_use]
pub fn round_to_1dp(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    (value * 10.0).round() / 10.0
}

/// Arithmetic mean of a sample set, 0.0 when the set is empty.
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let mut sum = 0.0;
    let mut count: u32 = 0;
    for value in values {
        sum += value;
        count = count.saturating_add(1);
    }
    if count == 0 {
        return 0.0;
    }
    sum / f64::from(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounders_handle_non_finite() {
        assert_eq!(round_f64_to_u32(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(-3.0), 0);
        assert_eq!(round_f64_to_u32(74.5), 75);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn one_decimal_rounding() {
        assert!((round_to_1dp(1.249) - 1.2).abs() < f64::EPSILON);
        assert!((round_to_1dp(1.25) - 1.3).abs() < f64::EPSILON);
        assert!((round_to_1dp(f64::NAN) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn mean_over_samples() {
        assert!((mean([60.0, 90.0, 75.0]) - 75.0).abs() < f64::EPSILON);
        assert!((mean(std::iter::empty()) - 0.0).abs() < f64::EPSILON);
    }
}
