//! Risk score and category calculation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name used for risk items submitted without one
pub const DEFAULT_RISK_NAME: &str = "Unnamed Risk";

/// Upper bound (inclusive) of the Low band
const LOW_MAX: i64 = 5;
/// Upper bound (inclusive) of the Medium band
const MEDIUM_MAX: i64 = 15;

/// A named risk on the 1-5 probability and impact scales
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskItem {
    pub name: String,
    pub probability: i64,
    pub impact: i64,
}

impl RiskItem {
    pub fn new(name: impl Into<String>, probability: i64, impact: i64) -> Self {
        Self {
            name: name.into(),
            probability,
            impact,
        }
    }
}

impl Default for RiskItem {
    fn default() -> Self {
        Self::new(DEFAULT_RISK_NAME, 1, 1)
    }
}

/// Risk category band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub name: String,
    pub score: i64,
    pub category: RiskCategory,
}

/// Probability times impact. Out-of-range inputs are multiplied as given.
pub fn score(probability: i64, impact: i64) -> i64 {
    probability.saturating_mul(impact)
}

/// Band a score: <= 5 Low, 6..=15 Medium, > 15 High
pub fn categorize(score: i64) -> RiskCategory {
    if score <= LOW_MAX {
        RiskCategory::Low
    } else if score <= MEDIUM_MAX {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    }
}

/// Score every item, keeping input order
pub fn score_all(items: &[RiskItem]) -> Vec<RiskResult> {
    items
        .iter()
        .map(|item| {
            let score = score(item.probability, item.impact);
            RiskResult {
                name: item.name.clone(),
                score,
                category: categorize(score),
            }
        })
        .collect()
}
