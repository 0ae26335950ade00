use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::config::Config;
use crate::error::AppError;

/// Status the provider reports for a message it accepted for delivery.
pub const PENDING_STATUS: &str = "Pending";

/// Client for the Semaphore OTP endpoint.
#[derive(Debug)]
pub struct SemaphoreClient {
    client: Client,
    config: Config,
}

impl SemaphoreClient {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, config })
    }

    /// Sends one form POST to the provider and returns its reply as JSON.
    ///
    /// The HTTP status is not checked; whatever JSON the provider answers with
    /// is handed back. A reply that is not JSON surfaces as a transport error.
    #[instrument(level = "info", skip(self, message))]
    pub async fn send_otp(&self, phone: &str, message: &str) -> Result<Value, AppError> {
        info!("Attempting to send OTP SMS to: {}", phone);
        debug!(
            "SMS details - Sender: {:?}, Message length: {}",
            self.config.sender_name,
            message.len()
        );

        let mut params = vec![
            ("apikey", self.config.api_key.expose_secret()),
            ("number", phone),
            ("message", message),
        ];
        if let Some(sender_name) = self.config.sender_name.as_deref() {
            params.push(("sendername", sender_name));
        }

        let response = self
            .client
            .post(&self.config.api_url)
            .form(&params)
            .send()
            .await?;

        debug!("Provider answered with HTTP {}", response.status());
        let reply: Value = response.json().await?;
        debug!("SMS response: {:#?}", reply);

        Ok(reply)
    }
}

/// Delivery status from a provider reply.
///
/// The OTP endpoint answers with a list of messages; a bare object is also
/// accepted. Only the first message is looked at.
pub fn provider_status(reply: &Value) -> Option<&str> {
    let message = match reply {
        Value::Array(messages) => messages.first()?,
        other => other,
    };
    message.get("status")?.as_str()
}
