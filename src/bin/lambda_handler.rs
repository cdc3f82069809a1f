//! AWS Lambda handler for single-profile assessments
//!
//! Accepts a subject profile as JSON and returns life expectancy, the
//! eradication gain, survival samples and screening guidance.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use aws_lambda_events::event::lambda_function_urls::{LambdaFunctionUrlRequest, LambdaFunctionUrlResponse};
use aws_lambda_events::http::{HeaderMap, HeaderValue};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use screening_optimizer::{
    profile::SubjectProfile,
    projection::SimulationConfig,
    scenario::{Assessment, ScenarioRunner},
    Assumptions, ModelError,
};
use serde::{Deserialize, Serialize};

/// Input for one assessment
#[derive(Debug, Deserialize)]
pub struct AssessmentRequest {
    #[serde(flatten)]
    pub profile: SubjectProfile,

    /// Include the per-year cohort trace
    #[serde(default)]
    pub detailed_output: bool,
}

/// Output for one assessment
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub execution_time_us: u64,
}

fn cors_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Content-Type", HeaderValue::from_static("application/json"));
    headers.insert("Access-Control-Allow-Origin", HeaderValue::from_static("*"));
    headers.insert("Access-Control-Allow-Methods", HeaderValue::from_static("POST, OPTIONS"));
    headers.insert("Access-Control-Allow-Headers", HeaderValue::from_static("Content-Type"));
    headers
}

fn response(status_code: i64, body: Option<String>) -> LambdaFunctionUrlResponse {
    LambdaFunctionUrlResponse {
        status_code,
        headers: cors_headers(),
        body,
        is_base64_encoded: false,
        cookies: Vec::new(),
    }
}

fn error_response(status_code: i64, message: &str) -> LambdaFunctionUrlResponse {
    let body = serde_json::json!({ "error": message }).to_string();
    response(status_code, Some(body))
}

/// Lambda handler function
async fn handler(event: LambdaEvent<LambdaFunctionUrlRequest>) -> Result<LambdaFunctionUrlResponse, Error> {
    let start = std::time::Instant::now();
    let request = event.payload;

    // Handle CORS preflight
    if request.request_context.http.method.as_deref() == Some("OPTIONS") {
        return Ok(response(200, None));
    }

    if request.is_base64_encoded {
        return Ok(error_response(400, "Binary request bodies are not supported"));
    }

    let body = request.body.unwrap_or_else(|| "{}".to_string());
    let request: AssessmentRequest = match serde_json::from_str(&body) {
        Ok(r) => r,
        Err(e) => return Ok(error_response(400, &format!("Invalid JSON: {}", e))),
    };

    let config = SimulationConfig {
        detailed_output: request.detailed_output,
        ..Default::default()
    };
    let runner = ScenarioRunner::with_config(Assumptions::default_parameters(), config);

    let assessment = match runner.assess(&request.profile) {
        Ok(a) => a,
        Err(e @ ModelError::InvalidInput(_)) => return Ok(error_response(400, &e.to_string())),
        Err(e) => {
            log::error!("Assessment failed: {}", e);
            return Ok(error_response(500, &e.to_string()));
        }
    };

    log::info!(
        "Assessed age {} {} ({}) in {:?}",
        request.profile.age,
        request.profile.sex,
        request.profile.comorbidity,
        start.elapsed()
    );

    let body = serde_json::to_string(&AssessmentResponse {
        assessment,
        execution_time_us: start.elapsed().as_micros() as u64,
    })?;
    Ok(response(200, Some(body)))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
