//! Combined economics report: assembly and PDF rendering

mod document;
pub mod layout;
mod pdf;

pub use document::layout_report;
pub use pdf::{write_pdf, DocumentInfo};

use crate::config::ReportConfig;
use crate::error::Result;
use crate::estimation::{estimate, EstimationInput, EstimationResult};
use crate::financial::{analyze, FinancialInput, FinancialResult};
use crate::request::ReportRequest;
use crate::risk::{score_all, RiskResult};
use chrono::{DateTime, Local};
use serde::Serialize;

pub const CONTENT_TYPE: &str = "application/pdf";

/// Results of all three calculators for one request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub estimation_input: EstimationInput,
    pub estimation: EstimationResult,
    pub financial_input: FinancialInput,
    pub financial: FinancialResult,
    /// In submission order
    pub risks: Vec<RiskResult>,
}

/// Runs the calculators in order and renders the result
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    config: ReportConfig,
}

impl ReportAssembler {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn assemble(&self, request: &ReportRequest, generated_at: DateTime<Local>) -> Report {
        Report {
            generated_at,
            estimation_input: request.estimation,
            estimation: estimate(&request.estimation),
            financial_input: request.financial,
            financial: analyze(&request.financial),
            risks: score_all(&request.risks),
        }
    }

    /// Render a report to PDF bytes
    pub fn render(&self, report: &Report) -> Result<Vec<u8>> {
        let pages = layout_report(report, &self.config);
        let info = DocumentInfo {
            title: self.config.title.clone(),
            created: report.generated_at,
        };
        let bytes = write_pdf(&pages, &info)?;

        log::debug!(
            "Rendered report: {} page(s), {} risk row(s), {} bytes",
            pages.len(),
            report.risks.len(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Assemble and render in one step, timestamped now
    pub fn generate(&self, request: &ReportRequest) -> Result<Vec<u8>> {
        let report = self.assemble(request, Local::now());
        self.render(&report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimation::ProjectMode;
    use crate::risk::{RiskCategory, RiskItem};
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;

    fn request(risks: Vec<RiskItem>) -> ReportRequest {
        ReportRequest {
            estimation: EstimationInput::new(10.0, ProjectMode::Organic).unwrap(),
            financial: FinancialInput::new(100.0, 50.0, 5, 0.1).unwrap(),
            risks,
        }
    }

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle.as_bytes())
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 6, 30, 9, 15, 0).unwrap()
    }

    #[test]
    fn test_assemble_runs_all_calculators() {
        let assembler = ReportAssembler::default();
        let report = assembler.assemble(
            &request(vec![RiskItem::new("A", 3, 4), RiskItem::new("B", 5, 5)]),
            fixed_time(),
        );

        assert_abs_diff_eq!(report.estimation.effort_person_months, 26.93, epsilon = 0.01);
        assert_eq!(report.financial.payback_years, 2.0);
        assert_eq!(report.risks.len(), 2);
        assert_eq!(report.risks[0].category, RiskCategory::Medium);
        assert_eq!(report.risks[1].category, RiskCategory::High);
        assert_eq!(report.generated_at, fixed_time());
    }

    #[test]
    fn test_render_contains_sections() {
        let assembler = ReportAssembler::default();
        let report = assembler.assemble(&request(vec![RiskItem::new("Scope creep", 3, 4)]), fixed_time());
        let bytes = assembler.render(&report).unwrap();

        assert!(bytes.starts_with(b"%PDF-"));
        for text in [
            "(Software Project Economic Analysis Report)",
            "(Date: 2025-06-30)",
            "(COCOMO Estimation)",
            "(Financial Analysis)",
            "(Risk Analysis)",
            "(Scope creep)",
            "(Medium)",
            "(EUR 89.54)",
            "(2.00 years)",
        ] {
            assert!(contains(&bytes, text), "missing {}", text);
        }
    }

    #[test]
    fn test_empty_risks_omit_section() {
        let assembler = ReportAssembler::default();
        let report = assembler.assemble(&request(Vec::new()), fixed_time());
        let bytes = assembler.render(&report).unwrap();

        assert!(contains(&bytes, "(Financial Analysis)"));
        assert!(!contains(&bytes, "(Risk Analysis)"));
        assert!(!contains(&bytes, "(Category)"));
    }

    #[test]
    fn test_config_labels_used() {
        let config = ReportConfig {
            title: "Board Pack".to_string(),
            currency_label: "USD".to_string(),
            ..ReportConfig::default()
        };
        let assembler = ReportAssembler::new(config);
        let report = assembler.assemble(&request(Vec::new()), fixed_time());
        let bytes = assembler.render(&report).unwrap();

        assert!(contains(&bytes, "(Board Pack)"));
        assert!(contains(&bytes, "(USD 89.54)"));
    }

    #[test]
    fn test_generate() {
        let bytes = ReportAssembler::default().generate(&request(Vec::new())).unwrap();
        assert!(bytes.ends_with(b"%%EOF\n"));
    }
}
