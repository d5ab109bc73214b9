//! Effort and schedule estimation using the basic COCOMO model

mod cocomo;

pub use cocomo::{estimate, EstimationInput, EstimationResult, ProjectMode};
