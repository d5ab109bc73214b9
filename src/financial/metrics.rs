//! ROI, NPV and payback period

use super::discount::present_value_of_annuity;
use crate::error::{EconomicsError, Result};
use serde::{Deserialize, Serialize};

/// Discount rate used when the caller supplies none (10%)
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.10;

/// Longest analysis horizon accepted, in years
pub const MAX_YEARS: u32 = 1000;

/// Validated financial input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialInput {
    /// Upfront investment
    pub cost: f64,
    /// Benefit received at the end of each year
    pub annual_benefit: f64,
    /// Analysis horizon in whole years
    pub years: u32,
    /// Annual discount rate as a decimal (0.10 = 10%)
    pub discount_rate: f64,
}

impl FinancialInput {
    pub fn new(cost: f64, annual_benefit: f64, years: u32, discount_rate: f64) -> Result<Self> {
        for (field, value) in [
            ("cost", cost),
            ("annual_benefit", annual_benefit),
            ("discount_rate", discount_rate),
        ] {
            if !value.is_finite() {
                return Err(EconomicsError::invalid(field, "must be a finite number"));
            }
        }
        if cost < 0.0 {
            return Err(EconomicsError::invalid("cost", "must not be negative"));
        }
        if years < 1 {
            return Err(EconomicsError::invalid("years", "must be at least 1"));
        }
        if years > MAX_YEARS {
            return Err(EconomicsError::invalid("years", format!("must be at most {}", MAX_YEARS)));
        }
        if discount_rate <= -1.0 {
            return Err(EconomicsError::invalid("discount_rate", "must be greater than -1"));
        }
        // Metrics must stay finite so no NaN or inf reaches a response
        if !roi(cost, annual_benefit, years).is_finite() {
            return Err(EconomicsError::invalid("annual_benefit", "ROI overflows"));
        }
        if !npv(cost, annual_benefit, discount_rate, years).is_finite() {
            return Err(EconomicsError::invalid("annual_benefit", "NPV overflows"));
        }
        Ok(Self {
            cost,
            annual_benefit,
            years,
            discount_rate,
        })
    }
}

/// Financial metrics, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialResult {
    pub roi_percent: f64,
    pub npv: f64,
    /// Years to recover the cost; `f64::INFINITY` when it never pays back
    pub payback_years: f64,
}

impl FinancialResult {
    pub fn pays_back(&self) -> bool {
        self.payback_years.is_finite()
    }
}

/// Return on investment as a percentage of cost.
///
/// Returns 0 when cost is zero.
pub fn roi(cost: f64, annual_benefit: f64, years: u32) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    let total_benefit = annual_benefit * years as f64;
    (total_benefit - cost) / cost * 100.0
}

/// Net present value of a level annual benefit against an upfront cost
pub fn npv(cost: f64, annual_benefit: f64, discount_rate: f64, years: u32) -> f64 {
    -cost + present_value_of_annuity(annual_benefit, discount_rate, years)
}

/// Simple (undiscounted) payback period in years.
///
/// Returns `f64::INFINITY` when the annual benefit is zero or negative.
pub fn payback_period(cost: f64, annual_benefit: f64) -> f64 {
    if annual_benefit <= 0.0 {
        return f64::INFINITY;
    }
    cost / annual_benefit
}

/// Compute all three metrics for one input
pub fn analyze(input: &FinancialInput) -> FinancialResult {
    let result = FinancialResult {
        roi_percent: roi(input.cost, input.annual_benefit, input.years),
        npv: npv(input.cost, input.annual_benefit, input.discount_rate, input.years),
        payback_years: payback_period(input.cost, input.annual_benefit),
    };

    log::debug!(
        "Financial cost={} benefit={} years={} rate={} -> roi={:.4} npv={:.4} payback={}",
        input.cost,
        input.annual_benefit,
        input.years,
        input.discount_rate,
        result.roi_percent,
        result.npv,
        result.payback_years
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_roi() {
        // 3 years of 50k against 100k cost: +50%
        assert_relative_eq!(roi(100_000.0, 50_000.0, 3), 50.0);
        assert_relative_eq!(roi(100.0, 20.0, 2), -60.0);
    }

    #[test]
    fn test_roi_zero_cost_is_zero() {
        assert_eq!(roi(0.0, 1_000.0, 5), 0.0);
        assert_eq!(roi(0.0, -1_000.0, 1), 0.0);
        assert_eq!(roi(0.0, 0.0, 10), 0.0);
    }

    #[test]
    fn test_npv_zero_rate_is_simple_sum() {
        for (cost, benefit, years) in [(100.0, 30.0, 5), (5_000.0, 1_200.0, 3), (1.0, -2.0, 7)] {
            assert_abs_diff_eq!(
                npv(cost, benefit, 0.0, years),
                -cost + benefit * years as f64,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_npv_discounted() {
        // -1000 + 500/1.1 + 500/1.21 + 500/1.331 ≈ 243.43
        assert_abs_diff_eq!(npv(1_000.0, 500.0, 0.10, 3), 243.43, epsilon = 0.01);
    }

    #[test]
    fn test_payback() {
        assert_eq!(payback_period(100.0, 50.0), 2.0);
        assert_eq!(payback_period(100.0, 0.0), f64::INFINITY);
        assert_eq!(payback_period(100.0, -10.0), f64::INFINITY);
        assert_eq!(payback_period(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_analyze_combines_metrics() {
        let input = FinancialInput::new(100_000.0, 30_000.0, 5, DEFAULT_DISCOUNT_RATE).unwrap();
        let result = analyze(&input);
        assert_relative_eq!(result.roi_percent, 50.0);
        assert_abs_diff_eq!(result.npv, 13_723.60, epsilon = 0.01);
        assert_abs_diff_eq!(result.payback_years, 3.3333, epsilon = 1e-4);
        assert!(result.pays_back());
    }

    #[test]
    fn test_never_pays_back() {
        let input = FinancialInput::new(10.0, 0.0, 1, 0.1).unwrap();
        assert!(!analyze(&input).pays_back());
    }

    #[test]
    fn test_input_validation() {
        assert!(FinancialInput::new(-1.0, 10.0, 1, 0.1).is_err());
        assert!(FinancialInput::new(1.0, 10.0, 0, 0.1).is_err());
        assert!(FinancialInput::new(1.0, f64::NAN, 1, 0.1).is_err());
        assert!(FinancialInput::new(1.0, 10.0, 1, -1.0).is_err());
        assert!(FinancialInput::new(0.0, -10.0, 1, 0.0).is_ok());
    }

    #[test]
    fn test_years_upper_bound() {
        let input = FinancialInput::new(0.0, 1.0, MAX_YEARS, 0.1).unwrap();
        // Converges to benefit / rate
        assert_abs_diff_eq!(analyze(&input).npv, 10.0, epsilon = 1e-6);

        let err = FinancialInput::new(0.0, 1.0, MAX_YEARS + 1, 0.1).unwrap_err();
        assert!(matches!(err, EconomicsError::InvalidInput { ref field, .. } if field == "years"));
        assert!(FinancialInput::new(0.0, 1.0, u32::MAX, 0.1).is_err());
    }

    #[test]
    fn test_overflowing_metrics_rejected() {
        // benefit * years overflows f64
        assert!(FinancialInput::new(1.0, 1e308, 10, 0.0).is_err());
        // tiny cost blows up the ROI ratio
        assert!(FinancialInput::new(1e-300, 1e10, 1, 0.1).is_err());
        // huge but finite values are still accepted
        let input = FinancialInput::new(1e300, 1e299, 5, 0.1).unwrap();
        let result = analyze(&input);
        assert!(result.roi_percent.is_finite());
        assert!(result.npv.is_finite());
    }
}
