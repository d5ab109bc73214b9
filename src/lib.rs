//! Project Economics - software project effort, viability and risk analysis
//!
//! This library provides:
//! - Basic COCOMO effort, schedule and staffing estimates
//! - Financial viability metrics (ROI, NPV, payback period)
//! - Probability x impact risk scoring
//! - A combined PDF report and a transport-agnostic request router

pub mod api;
pub mod config;
pub mod error;
pub mod estimation;
pub mod financial;
pub mod presentation;
pub mod report;
pub mod request;
pub mod risk;

// Re-export commonly used types
pub use config::ReportConfig;
pub use error::EconomicsError;
pub use estimation::{estimate, EstimationInput, EstimationResult, ProjectMode};
pub use financial::{analyze, FinancialInput, FinancialResult};
pub use report::{Report, ReportAssembler};
pub use risk::{RiskCategory, RiskItem, RiskResult};
