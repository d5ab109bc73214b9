//! Annual discounting helpers used by the NPV calculation

/// Present value of a level benefit paid at the end of years 1..=years
///
/// Summed year by year in order so the floating point result is the same
/// on every run.
pub fn present_value_of_annuity(amount: f64, annual_rate: f64, years: u32) -> f64 {
    let mut pv = 0.0;
    for year in 1..=years {
        pv += amount / (1.0 + annual_rate).powf(f64::from(year));
    }
    pv
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_single_year() {
        let pv = present_value_of_annuity(110.0, 0.10, 1);
        assert_abs_diff_eq!(pv, 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_rate_annuity_is_simple_sum() {
        let pv = present_value_of_annuity(250.0, 0.0, 4);
        assert_abs_diff_eq!(pv, 1000.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_years() {
        assert_eq!(present_value_of_annuity(500.0, 0.05, 0), 0.0);
    }

    #[test]
    fn test_annuity_closed_form() {
        // 100/year for 5 years at 8%: 100 * (1 - 1.08^-5) / 0.08 ≈ 399.27
        let pv = present_value_of_annuity(100.0, 0.08, 5);
        let closed = 100.0 * (1.0 - 1.08f64.powi(-5)) / 0.08;
        assert_abs_diff_eq!(pv, closed, epsilon = 1e-9);
        assert_abs_diff_eq!(pv, 399.27, epsilon = 0.01);
    }

    #[test]
    fn test_long_horizon_converges_to_perpetuity() {
        let pv = present_value_of_annuity(1.0, 0.10, 1000);
        assert_abs_diff_eq!(pv, 10.0, epsilon = 1e-6);
    }
}
