//! Transport-agnostic request router
//!
//! Bindings (the Lambda handler, tests) convert their native request into an
//! [`ApiRequest`] and send the returned [`ApiResponse`] back unchanged.

use crate::error::{EconomicsError, Result};
use crate::estimation::{estimate, EstimationResult};
use crate::financial::{analyze, FinancialResult};
use crate::presentation::round2;
use crate::report::{ReportAssembler, CONTENT_TYPE};
use crate::request::{estimation_from_json, financial_from_json, report_from_query, risks_from_json};
use crate::risk::{score_all, RiskResult};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::HashMap;

pub const COCOMO_PATH: &str = "/api/cocomo";
pub const FINANCIAL_PATH: &str = "/api/financial";
pub const RISK_PATH: &str = "/api/risk";
pub const REPORT_PATH: &str = "/generate-report";

/// Query keys read by the report endpoint
pub const REPORT_QUERY_KEYS: [&str; 7] = [
    "kloc",
    "project_type",
    "cost",
    "annual_benefit",
    "years",
    "discount_rate",
    "risks",
];

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.insert(key.to_string(), value.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl ApiResponse {
    fn new(status: u16, content_type: &str, body: Vec<u8>) -> Self {
        let mut headers = cors_headers();
        headers.push(("Content-Type".to_string(), content_type.to_string()));
        Self { status, headers, body }
    }

    fn json<T: Serialize>(body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => Self::new(200, JSON_CONTENT_TYPE, bytes),
            Err(e) => Self::error(500, &format!("Failed to encode response: {}", e)),
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message });
        Self::new(status, JSON_CONTENT_TYPE, body.to_string().into_bytes())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// True when the body is not UTF-8 text (the PDF download)
    pub fn is_binary(&self) -> bool {
        self.content_type() == Some(CONTENT_TYPE)
    }
}

fn cors_headers() -> Vec<(String, String)> {
    vec![
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        ("Access-Control-Allow-Methods".to_string(), "GET, POST, OPTIONS".to_string()),
        ("Access-Control-Allow-Headers".to_string(), "Content-Type".to_string()),
    ]
}

/// Rounded COCOMO result as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CocomoResponse {
    pub effort: f64,
    pub dev_time: f64,
    pub staff: f64,
}

impl From<&EstimationResult> for CocomoResponse {
    fn from(result: &EstimationResult) -> Self {
        Self {
            effort: round2(result.effort_person_months),
            dev_time: round2(result.dev_time_months),
            staff: round2(result.average_staff),
        }
    }
}

/// Rounded financial metrics as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialResponse {
    pub roi: f64,
    pub npv: f64,
    #[serde(serialize_with = "serialize_payback")]
    pub payback: f64,
}

impl From<&FinancialResult> for FinancialResponse {
    fn from(result: &FinancialResult) -> Self {
        Self {
            roi: round2(result.roi_percent),
            npv: round2(result.npv),
            payback: result.payback_years,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskResponse {
    pub risks: Vec<RiskResult>,
}

/// Finite paybacks as rounded numbers, a never-reached payback as "Infinity"
fn serialize_payback<S: Serializer>(payback: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    if payback.is_finite() {
        serializer.serialize_f64(round2(*payback))
    } else {
        serializer.serialize_str("Infinity")
    }
}

fn parse_body(request: &ApiRequest) -> Result<Value> {
    match request.body.as_deref().map(str::trim) {
        None | Some("") => Ok(Value::Object(Default::default())),
        Some(text) => serde_json::from_str(text)
            .map_err(|e| EconomicsError::invalid("body", format!("invalid JSON: {}", e))),
    }
}

fn cocomo(request: &ApiRequest) -> Result<ApiResponse> {
    let input = estimation_from_json(&parse_body(request)?)?;
    Ok(ApiResponse::json(&CocomoResponse::from(&estimate(&input))))
}

fn financial(request: &ApiRequest) -> Result<ApiResponse> {
    let input = financial_from_json(&parse_body(request)?)?;
    Ok(ApiResponse::json(&FinancialResponse::from(&analyze(&input))))
}

fn risk(request: &ApiRequest) -> Result<ApiResponse> {
    let items = risks_from_json(&parse_body(request)?)?;
    Ok(ApiResponse::json(&RiskResponse {
        risks: score_all(&items),
    }))
}

fn report(request: &ApiRequest, assembler: &ReportAssembler) -> Result<ApiResponse> {
    let report_request = report_from_query(&request.query)?;
    let bytes = assembler.generate(&report_request)?;

    let mut response = ApiResponse::new(200, CONTENT_TYPE, bytes);
    response.headers.push((
        "Content-Disposition".to_string(),
        format!("attachment; filename=\"{}\"", assembler.config().filename),
    ));
    Ok(response)
}

/// Route one request
pub fn handle(request: &ApiRequest, assembler: &ReportAssembler) -> ApiResponse {
    let method = request.method.to_ascii_uppercase();
    let path = match request.path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    };

    if method == "OPTIONS" {
        return ApiResponse::new(200, "text/plain", Vec::new());
    }

    let outcome = match (method.as_str(), path) {
        ("POST", COCOMO_PATH) => cocomo(request),
        ("POST", FINANCIAL_PATH) => financial(request),
        ("POST", RISK_PATH) => risk(request),
        ("GET", REPORT_PATH) => report(request, assembler),
        (_, COCOMO_PATH | FINANCIAL_PATH | RISK_PATH | REPORT_PATH) => {
            log::warn!("{} not allowed on {}", method, path);
            return ApiResponse::error(405, &format!("Method {} not allowed", method));
        }
        _ => {
            log::warn!("No route for {} {}", method, path);
            return ApiResponse::error(404, &format!("Not found: {}", path));
        }
    };

    match outcome {
        Ok(response) => {
            log::info!("{} {} -> {} ({} bytes)", method, path, response.status, response.body.len());
            response
        }
        Err(e) => {
            log::warn!("{} {} failed: {}", method, path, e);
            ApiResponse::error(e.status_code(), &e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn call(request: ApiRequest) -> ApiResponse {
        handle(&request, &ReportAssembler::default())
    }

    fn body_json(response: &ApiResponse) -> Value {
        serde_json::from_slice(&response.body).unwrap()
    }

    #[test]
    fn test_cocomo_endpoint() {
        let response = call(
            ApiRequest::new("POST", COCOMO_PATH).with_body(r#"{"kloc": 10, "project_type": "organic"}"#),
        );
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), Some("application/json"));

        let body = body_json(&response);
        assert_eq!(body["effort"], json!(26.93));
        let dev_time = body["dev_time"].as_f64().unwrap();
        let staff = body["staff"].as_f64().unwrap();
        assert_abs_diff_eq!(dev_time, 8.74, epsilon = 0.01);
        assert_abs_diff_eq!(staff, 26.93 / dev_time, epsilon = 0.01);
    }

    #[test]
    fn test_cocomo_zero_kloc() {
        let response = call(ApiRequest::new("POST", COCOMO_PATH).with_body("{}"));
        assert_eq!(body_json(&response), json!({"effort": 0.0, "dev_time": 0.0, "staff": 0.0}));
    }

    #[test]
    fn test_financial_endpoint() {
        let response = call(ApiRequest::new("POST", FINANCIAL_PATH).with_body(
            r#"{"cost": 100, "annual_benefit": 50, "years": 5, "discount_rate": 0.1}"#,
        ));
        assert_eq!(response.status, 200);
        assert_eq!(body_json(&response), json!({"roi": 150.0, "npv": 89.54, "payback": 2.0}));
    }

    #[test]
    fn test_financial_never_pays_back() {
        let response = call(
            ApiRequest::new("POST", FINANCIAL_PATH).with_body(r#"{"cost": 0, "annual_benefit": 0}"#),
        );
        let body = body_json(&response);
        assert_eq!(body["roi"], json!(0.0));
        assert_eq!(body["payback"], json!("Infinity"));
    }

    #[test]
    fn test_risk_endpoint() {
        let response = call(ApiRequest::new("POST", RISK_PATH).with_body(
            r#"{"risks": [{"name": "Scope creep", "probability": 3, "impact": 4}, {"probability": 5, "impact": 5}]}"#,
        ));
        assert_eq!(
            body_json(&response),
            json!({"risks": [
                {"name": "Scope creep", "score": 12, "category": "Medium"},
                {"name": "Unnamed Risk", "score": 25, "category": "High"}
            ]})
        );
    }

    #[test]
    fn test_invalid_input_is_400() {
        let response = call(ApiRequest::new("POST", COCOMO_PATH).with_body(r#"{"kloc": "ten"}"#));
        assert_eq!(response.status, 400);
        assert!(body_json(&response)["error"].as_str().unwrap().contains("kloc"));

        let response = call(ApiRequest::new("POST", RISK_PATH).with_body("not json"));
        assert_eq!(response.status, 400);
    }

    #[test]
    fn test_out_of_range_numbers_are_400() {
        let response = call(ApiRequest::new("POST", COCOMO_PATH).with_body(r#"{"kloc": 1e300}"#));
        assert_eq!(response.status, 400);

        let response = call(
            ApiRequest::new("GET", REPORT_PATH)
                .with_query("annual_benefit", "1")
                .with_query("years", "2147483648"),
        );
        assert_eq!(response.status, 400);
        assert!(body_json(&response)["error"].as_str().unwrap().contains("years"));
    }

    #[test]
    fn test_report_endpoint() {
        let response = call(
            ApiRequest::new("GET", REPORT_PATH)
                .with_query("kloc", "20")
                .with_query("project_type", "embedded")
                .with_query("cost", "50000")
                .with_query("annual_benefit", "20000")
                .with_query("risks", "Scope creep|3|4,missing impact|2,Turnover|5|5"),
        );
        assert_eq!(response.status, 200);
        assert!(response.is_binary());
        assert_eq!(
            response.header("content-disposition"),
            Some("attachment; filename=\"software_project_analysis.pdf\"")
        );
        assert!(response.body.starts_with(b"%PDF-"));

        let has = |needle: &str| response.body.windows(needle.len()).any(|w| w == needle.as_bytes());
        assert!(has("(Scope creep)"));
        assert!(has("(Turnover)"));
        assert!(!has("missing impact"));
    }

    #[test]
    fn test_report_with_defaults() {
        let response = call(ApiRequest::new("GET", "/generate-report/"));
        assert_eq!(response.status, 200);
        assert!(response.is_binary());
    }

    #[test]
    fn test_routing_errors() {
        assert_eq!(call(ApiRequest::new("GET", COCOMO_PATH)).status, 405);
        assert_eq!(call(ApiRequest::new("POST", "/api/unknown")).status, 404);
        assert_eq!(call(ApiRequest::new("GET", "/")).status, 404);
    }

    #[test]
    fn test_preflight() {
        let response = call(ApiRequest::new("OPTIONS", FINANCIAL_PATH));
        assert_eq!(response.status, 200);
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
    }
}
