//! Basic COCOMO effort, schedule and staffing calculation

use crate::error::{EconomicsError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Schedule model: dev_time = 2.5 * effort^0.38
const SCHEDULE_COEFFICIENT: f64 = 2.5;
const SCHEDULE_EXPONENT: f64 = 0.38;

/// COCOMO project complexity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectMode {
    /// Small teams, familiar problem domain
    #[default]
    Organic,
    /// Mixed experience, medium complexity
    SemiDetached,
    /// Tight hardware/software/operational constraints
    Embedded,
}

impl ProjectMode {
    /// Parse a mode name. Anything unrecognised falls back to `Organic`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "organic" => ProjectMode::Organic,
            "semi-detached" | "semidetached" | "semi_detached" => ProjectMode::SemiDetached,
            "embedded" => ProjectMode::Embedded,
            other => {
                log::debug!("Unknown project mode '{}', using organic", other);
                ProjectMode::Organic
            }
        }
    }

    /// Effort coefficients (a, b) for effort = a * KLOC^b
    pub fn coefficients(&self) -> (f64, f64) {
        match self {
            ProjectMode::Organic => (2.4, 1.05),
            ProjectMode::SemiDetached => (3.0, 1.12),
            ProjectMode::Embedded => (3.6, 1.20),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectMode::Organic => "organic",
            ProjectMode::SemiDetached => "semi-detached",
            ProjectMode::Embedded => "embedded",
        }
    }
}

impl fmt::Display for ProjectMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Validated estimation input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationInput {
    /// Project size in thousands of lines of code
    pub size_kloc: f64,
    pub mode: ProjectMode,
}

impl EstimationInput {
    /// Build an input, rejecting negative or non-finite sizes and sizes whose
    /// effort overflows
    pub fn new(size_kloc: f64, mode: ProjectMode) -> Result<Self> {
        if !size_kloc.is_finite() {
            return Err(EconomicsError::invalid("kloc", "must be a finite number"));
        }
        if size_kloc < 0.0 {
            return Err(EconomicsError::invalid("kloc", "must not be negative"));
        }
        let (a, b) = mode.coefficients();
        if !(a * size_kloc.powf(b)).is_finite() {
            return Err(EconomicsError::invalid("kloc", "too large for the model"));
        }
        Ok(Self { size_kloc, mode })
    }
}

/// COCOMO output, unrounded
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub effort_person_months: f64,
    pub dev_time_months: f64,
    /// effort / dev_time, or 0.0 when dev_time is zero
    pub average_staff: f64,
}

/// Run the basic COCOMO model
pub fn estimate(input: &EstimationInput) -> EstimationResult {
    let (a, b) = input.mode.coefficients();

    let effort = a * input.size_kloc.powf(b);
    let dev_time = SCHEDULE_COEFFICIENT * effort.powf(SCHEDULE_EXPONENT);

    // Only reachable at size_kloc == 0
    let average_staff = if dev_time > 0.0 { effort / dev_time } else { 0.0 };

    log::debug!(
        "COCOMO {} kloc={} -> effort={:.4} dev_time={:.4} staff={:.4}",
        input.mode, input.size_kloc, effort, dev_time, average_staff
    );

    EstimationResult {
        effort_person_months: effort,
        dev_time_months: dev_time,
        average_staff,
    }
}
