//! Financial viability metrics: ROI, NPV and payback period

mod discount;
mod metrics;

pub use discount::present_value_of_annuity;
pub use metrics::{
    analyze, npv, payback_period, roi, FinancialInput, FinancialResult, DEFAULT_DISCOUNT_RATE,
    MAX_YEARS,
};
