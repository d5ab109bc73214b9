//! AWS Lambda handler for the economics API
//!
//! Accepts API Gateway HTTP API (v2) / Lambda Function URL events, routes them
//! through the shared router and returns JSON or a base64-encoded PDF.
//!
//! Report labels can be overridden with REPORT_TITLE, REPORT_CURRENCY and
//! REPORT_FILENAME.

use aws_lambda_events::apigw::{ApiGatewayV2httpRequest, ApiGatewayV2httpResponse};
use aws_lambda_events::encodings::Body;
use http::{HeaderMap, HeaderName, HeaderValue};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use project_economics::api::{handle, ApiRequest, ApiResponse, REPORT_QUERY_KEYS};
use project_economics::{ReportAssembler, ReportConfig};
use std::collections::HashMap;

fn error_response(status: i64, message: &str) -> ApiGatewayV2httpResponse {
    let mut headers = HeaderMap::new();
    headers.insert(http::header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(http::header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    ApiGatewayV2httpResponse {
        status_code: status,
        headers,
        body: Some(Body::Text(serde_json::json!({ "error": message }).to_string())),
        ..Default::default()
    }
}

fn to_api_request(event: &ApiGatewayV2httpRequest) -> ApiRequest {
    let path = event
        .raw_path
        .clone()
        .or_else(|| event.request_context.http.path.clone())
        .unwrap_or_else(|| "/".to_string());

    let query: HashMap<String, String> = REPORT_QUERY_KEYS
        .iter()
        .filter_map(|key| {
            event
                .query_string_parameters
                .first(key)
                .map(|value| (key.to_string(), value.to_string()))
        })
        .collect();

    ApiRequest {
        method: event.request_context.http.method.as_str().to_string(),
        path,
        query,
        body: event.body.clone(),
    }
}

fn to_lambda_response(response: ApiResponse) -> ApiGatewayV2httpResponse {
    let mut headers = HeaderMap::new();
    for (name, value) in &response.headers {
        match (HeaderName::from_bytes(name.as_bytes()), HeaderValue::from_str(value)) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => log::warn!("Dropping invalid response header {}: {}", name, value),
        }
    }

    let is_binary = response.is_binary();
    let body = if response.body.is_empty() {
        Body::Empty
    } else if is_binary {
        Body::Binary(response.body)
    } else {
        Body::Text(String::from_utf8_lossy(&response.body).into_owned())
    };

    ApiGatewayV2httpResponse {
        status_code: response.status as i64,
        headers,
        body: Some(body),
        is_base64_encoded: is_binary,
        ..Default::default()
    }
}

/// Lambda handler function
async fn handler(
    event: LambdaEvent<ApiGatewayV2httpRequest>,
    assembler: &ReportAssembler,
) -> Result<ApiGatewayV2httpResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    if request.is_base64_encoded && request.body.is_some() {
        return Ok(error_response(400, "Base64-encoded request bodies are not supported"));
    }

    let api_request = to_api_request(&request);
    let response = handle(&api_request, assembler);

    log::info!(
        "{} {} -> {} in {:?}",
        api_request.method,
        api_request.path,
        response.status,
        start.elapsed()
    );

    Ok(to_lambda_response(response))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let assembler = ReportAssembler::new(ReportConfig::from_env());
    let assembler = &assembler;

    run(service_fn(move |event| async move { handler(event, assembler).await })).await
}
