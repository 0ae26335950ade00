use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn, Span};
pub use vercel_runtime::{Body, Error, Request, Response};

use crate::error::AppError;
use crate::otp::{generate_otp, otp_message};
use crate::sms::{provider_status, SemaphoreClient, PENDING_STATUS};

#[derive(Deserialize, Debug)]
struct RequestData {
    phone_number: Option<Value>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub otp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl ApiResponse {
    pub fn sent(otp: String) -> Self {
        Self {
            success: true,
            message: "OTP sent successfully".to_string(),
            otp: Some(otp),
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            otp: None,
            error: None,
        }
    }

    pub fn with_error(mut self, error: Value) -> Self {
        self.error = Some(error);
        self
    }
}

fn body_bytes(body: &Body) -> &[u8] {
    match body {
        Body::Binary(bytes) => {
            debug!("Received binary body with {} bytes", bytes.len());
            bytes.as_slice()
        }
        Body::Text(text) => {
            debug!("Received text body with {} characters", text.len());
            text.as_bytes()
        }
        Body::Empty => {
            debug!("Received empty body");
            &[]
        }
    }
}

/// Phone number carried by the payload.
///
/// Strings are taken as-is and numbers are stringified. Empty strings, zero,
/// null and any other JSON type count as missing.
fn payload_phone_number(value: Value) -> Option<String> {
    match value {
        Value::String(phone) if !phone.is_empty() => Some(phone),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    }
}

fn phone_number(req: &Request) -> Option<String> {
    let bytes = body_bytes(req.body());
    if bytes.is_empty() {
        return None;
    }

    match serde_json::from_slice::<RequestData>(bytes) {
        Ok(data) => {
            debug!("Parsed request data: {:?}", data);
            data.phone_number.and_then(payload_phone_number)
        }
        Err(e) => {
            warn!("Failed to parse JSON body: {}", e);
            None
        }
    }
}

/// Runs one OTP dispatch and maps the provider reply to a result.
async fn send_otp(client: &SemaphoreClient, req: &Request) -> Result<ApiResponse, AppError> {
    let phone = phone_number(req).ok_or(AppError::MissingPhoneNumber)?;

    let otp = generate_otp();
    let message = otp_message(&otp);

    let reply = client.send_otp(&phone, &message).await?;
    let status = provider_status(&reply).map(str::to_owned);
    if status.as_deref() == Some(PENDING_STATUS) {
        info!("OTP accepted by provider for: {}", phone);
        Ok(ApiResponse::sent(otp))
    } else {
        warn!("Provider did not accept OTP for {}: status {:?}", phone, status);
        Err(AppError::ProviderRejected(reply))
    }
}

#[instrument(level = "info", skip(client, req), fields(trace_id = tracing::field::Empty))]
pub async fn handler(client: &SemaphoreClient, req: Request) -> Result<Response<Body>, Error> {
    // Generate trace ID for this request
    let trace_id = uuid::Uuid::new_v4().to_string();
    Span::current().record("trace_id", trace_id.as_str());

    info!(
        "Processing {} request for path: {}",
        req.method(),
        req.uri().path()
    );

    let (status, api_response) = match send_otp(client, &req).await {
        Ok(response) => (StatusCode::OK, response),
        Err(e) => {
            error!("OTP request failed: {}", e);
            (e.status(), e.into_api_response())
        }
    };

    info!(
        "Request processing completed with {} - trace_id: {}",
        status, trace_id
    );

    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header(
            "Access-Control-Allow-Headers",
            "Content-Type, Authorization",
        )
        .header("X-Trace-Id", &trace_id)
        .body(match serde_json::to_string(&api_response) {
            Ok(json_str) => {
                debug!("Response serialized successfully");
                json_str.into()
            }
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                return Err(e.into());
            }
        })?)
}
