//! Input normalization
//!
//! Request bodies and query strings are loosely typed: numbers may arrive as
//! JSON numbers or numeric strings, and most fields are optional. Everything
//! is coerced here into the validated input records, so the calculators
//! never apply defaults of their own.

use crate::error::{EconomicsError, Result};
use crate::estimation::{EstimationInput, ProjectMode};
use crate::financial::{FinancialInput, DEFAULT_DISCOUNT_RATE, MAX_YEARS};
use crate::risk::{parse_risk_list, RiskItem, DEFAULT_RISK_NAME};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Years used by the financial API when none is given
pub const DEFAULT_API_YEARS: i64 = 1;
/// Years used by the report endpoint when none is given
pub const DEFAULT_REPORT_YEARS: i64 = 5;

/// Everything the report endpoint needs, already validated
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    pub estimation: EstimationInput,
    pub financial: FinancialInput,
    pub risks: Vec<RiskItem>,
}

/// Read-only view over a JSON object with coercing accessors
struct Fields<'a>(&'a Map<String, Value>);

impl<'a> Fields<'a> {
    /// Field value, treating null and empty strings as absent
    fn get(&self, name: &str) -> Option<&'a Value> {
        match self.0.get(name) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }

    fn f64_or(&self, name: &str, default: f64) -> Result<f64> {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(EconomicsError::invalid(name, format!("expected a number, got {}", value))),
        }
    }

    /// Integer field. JSON numbers with a fraction are truncated toward zero;
    /// strings must hold an integer.
    fn i64_or(&self, name: &str, default: i64) -> Result<i64> {
        let Some(value) = self.get(name) else {
            return Ok(default);
        };
        let parsed = match value {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v.trunc() as i64)),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        parsed.ok_or_else(|| {
            EconomicsError::invalid(name, format!("expected an integer, got {}", value))
        })
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

fn as_object<'a>(body: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| EconomicsError::invalid(what, "expected a JSON object"))
}

fn years_from(value: i64) -> Result<u32> {
    u32::try_from(value)
        .ok()
        .filter(|years| (1..=MAX_YEARS).contains(years))
        .ok_or_else(|| {
            EconomicsError::invalid(
                "years",
                format!("must be between 1 and {}, got {}", MAX_YEARS, value),
            )
        })
}

fn estimation_from(fields: &Fields) -> Result<EstimationInput> {
    let kloc = fields.f64_or("kloc", 0.0)?;
    let mode = fields
        .text("project_type")
        .map(|raw| ProjectMode::parse(&raw))
        .unwrap_or_default();
    EstimationInput::new(kloc, mode)
}

fn financial_from(fields: &Fields, default_years: i64) -> Result<FinancialInput> {
    let cost = fields.f64_or("cost", 0.0)?;
    let annual_benefit = fields.f64_or("annual_benefit", 0.0)?;
    let years = years_from(fields.i64_or("years", default_years)?)?;
    let discount_rate = fields.f64_or("discount_rate", DEFAULT_DISCOUNT_RATE)?;
    FinancialInput::new(cost, annual_benefit, years, discount_rate)
}

/// `{kloc, project_type}` body for the COCOMO endpoint
pub fn estimation_from_json(body: &Value) -> Result<EstimationInput> {
    estimation_from(&Fields(as_object(body, "body")?))
}

/// `{cost, annual_benefit, years, discount_rate}` body for the financial endpoint
pub fn financial_from_json(body: &Value) -> Result<FinancialInput> {
    financial_from(&Fields(as_object(body, "body")?), DEFAULT_API_YEARS)
}

/// `{risks: [{name, probability, impact}, ...]}` body for the risk endpoint
pub fn risks_from_json(body: &Value) -> Result<Vec<RiskItem>> {
    let fields = Fields(as_object(body, "body")?);
    let Some(risks) = fields.get("risks") else {
        return Ok(Vec::new());
    };
    let risks = risks
        .as_array()
        .ok_or_else(|| EconomicsError::invalid("risks", "expected an array"))?;

    risks
        .iter()
        .map(|risk| {
            let fields = Fields(as_object(risk, "risks[]")?);
            Ok(RiskItem {
                name: fields.text("name").unwrap_or_else(|| DEFAULT_RISK_NAME.to_string()),
                probability: fields.i64_or("probability", 1)?,
                impact: fields.i64_or("impact", 1)?,
            })
        })
        .collect()
}

/// Query parameters of the report endpoint
pub fn report_from_query(query: &HashMap<String, String>) -> Result<ReportRequest> {
    let map: Map<String, Value> = query
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect();
    let fields = Fields(&map);

    let estimation = estimation_from(&fields)?;
    let financial = financial_from(&fields, DEFAULT_REPORT_YEARS)?;
    let risks = query
        .get("risks")
        .map(|raw| parse_risk_list(raw))
        .unwrap_or_default();

    Ok(ReportRequest {
        estimation,
        financial,
        risks,
    })
}
