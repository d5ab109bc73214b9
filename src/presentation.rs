//! Rounding and number formatting applied where results leave the crate
//!
//! Calculations run at full precision; only API responses and report text
//! are rounded to two decimals.

/// Round to 2 decimals, normalising -0.0 to 0.0
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Two-decimal text form used throughout the report
pub fn fixed2(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Payback period text: "x.xx years", or `never_label` when infinite
pub fn payback_text(payback_years: f64, never_label: &str) -> String {
    if payback_years.is_finite() {
        format!("{} years", fixed2(payback_years))
    } else {
        never_label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(26.928), 26.93);
        assert_eq!(round2(-0.001), 0.0);
        assert!(round2(-0.001).is_sign_positive());
        assert_eq!(round2(2.0), 2.0);
    }

    #[test]
    fn test_fixed2() {
        assert_eq!(fixed2(50.0), "50.00");
        assert_eq!(fixed2(13723.6034), "13723.60");
        assert_eq!(fixed2(-0.004), "0.00");
    }

    #[test]
    fn test_payback_text() {
        assert_eq!(payback_text(2.0, "Never"), "2.00 years");
        assert_eq!(payback_text(f64::INFINITY, "Never"), "Never");
    }
}
