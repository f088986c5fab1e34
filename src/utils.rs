//! Zero-safe arithmetic shared by every sector module.

/// Euro amounts in the balance are reported in millions.
pub const MILLION: f64 = 1_000_000.0;

/// Divides `a` by `b`, returning `0.0` when `b` is zero.
///
/// Used for every ratio and percentage field so that municipalities without
/// activity in a sector never produce `NaN` or infinite values.
///
/// # Examples
///
/// ```
/// use climate_balance::utils::div;
///
/// assert_eq!(div(3.0, 0.0), 0.0);
/// assert_eq!(div(3.0, 2.0), 1.5);
/// ```
pub fn div(a: f64, b: f64) -> f64 {
    if b == 0.0 { 0.0 } else { a / b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero_is_zero() {
        for a in [-1.0e12, -3.5, 0.0, 1.0, 7.25, 1.0e12] {
            assert_eq!(div(a, 0.0), 0.0);
        }
    }

    #[test]
    fn div_by_negative_zero_is_zero() {
        assert_eq!(div(5.0, -0.0), 0.0);
    }

    #[test]
    fn zero_numerator_is_zero() {
        for b in [-2.0, 0.5, 3.0, 1.0e9] {
            assert_eq!(div(0.0, b), 0.0);
        }
    }

    #[test]
    fn plain_division_otherwise() {
        assert_eq!(div(9.0, 3.0), 3.0);
        assert_eq!(div(1.0, 3.0), 1.0 / 3.0);
        assert_eq!(div(-4.0, 8.0), -0.5);
    }
}
