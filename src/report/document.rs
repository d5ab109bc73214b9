//! Report page layout

use super::layout::{Align, Canvas, CellStyle, Font, Page};
use super::Report;
use crate::config::ReportConfig;
use crate::presentation::{fixed2, payback_text};

const ROW_HEIGHT: f64 = 10.0;
const FULL_WIDTH: f64 = 190.0;
const LABEL_WIDTH: f64 = 100.0;
const SECTION_GAP: f64 = 10.0;

/// Risk table column widths: name, score, category
const RISK_COLUMNS: [f64; 3] = [80.0, 40.0, 40.0];

/// Lay out the report as pages of text and table cells
pub fn layout_report(report: &Report, config: &ReportConfig) -> Vec<Page> {
    let mut canvas = Canvas::new();

    canvas.set_font(Font::Bold, 16.0);
    canvas.cell(FULL_WIDTH, ROW_HEIGHT, &config.title, CellStyle::LINE.aligned(Align::Center));

    canvas.set_font(Font::Regular, 10.0);
    let date = format!("Date: {}", report.generated_at.format("%Y-%m-%d"));
    canvas.cell(FULL_WIDTH, ROW_HEIGHT, &date, CellStyle::LINE.aligned(Align::Right));

    let input = &report.estimation_input;
    let estimation = &report.estimation;
    section_header(&mut canvas, "COCOMO Estimation");
    label_row(&mut canvas, "Project Size (KLOC):", &fixed2(input.size_kloc));
    label_row(&mut canvas, "Project Type:", input.mode.as_str());
    label_row(&mut canvas, "Effort (person-months):", &fixed2(estimation.effort_person_months));
    label_row(&mut canvas, "Development Time (months):", &fixed2(estimation.dev_time_months));
    label_row(&mut canvas, "Average Staff:", &fixed2(estimation.average_staff));

    let financial = &report.financial;
    canvas.ln(SECTION_GAP);
    section_header(&mut canvas, "Financial Analysis");
    label_row(&mut canvas, "ROI:", &format!("{}%", fixed2(financial.roi_percent)));
    label_row(&mut canvas, "NPV:", &format!("{} {}", config.currency_label, fixed2(financial.npv)));
    label_row(
        &mut canvas,
        "Payback Period:",
        &payback_text(financial.payback_years, &config.never_label),
    );

    if !report.risks.is_empty() {
        canvas.ln(SECTION_GAP);
        section_header(&mut canvas, "Risk Analysis");

        let header = CellStyle::INLINE.bordered().aligned(Align::Center);
        table_row(&mut canvas, ["Risk", "Score", "Category"], header);

        for risk in &report.risks {
            let score = risk.score.to_string();
            table_row(
                &mut canvas,
                [risk.name.as_str(), score.as_str(), risk.category.as_str()],
                CellStyle::INLINE.bordered(),
            );
        }
    }

    canvas.into_pages()
}

fn section_header(canvas: &mut Canvas, title: &str) {
    canvas.set_font(Font::Bold, 12.0);
    canvas.cell(FULL_WIDTH, ROW_HEIGHT, title, CellStyle::LINE);
    canvas.set_font(Font::Regular, 10.0);
}

fn label_row(canvas: &mut Canvas, label: &str, value: &str) {
    canvas.cell(LABEL_WIDTH, ROW_HEIGHT, label, CellStyle::INLINE);
    canvas.cell(LABEL_WIDTH, ROW_HEIGHT, value, CellStyle::LINE);
}

fn table_row(canvas: &mut Canvas, cells: [&str; 3], style: CellStyle) {
    let last = cells.len() - 1;
    for (i, (text, width)) in cells.iter().zip(RISK_COLUMNS).enumerate() {
        let style = CellStyle { line_break: i == last, ..style };
        canvas.cell(width, ROW_HEIGHT, text, style);
    }
}
