use secrecy::SecretString;
use std::env;
use tracing::{debug, error};

use crate::error::AppError;

pub const API_KEY_ENV: &str = "SEMAPHORE_API_KEY";
pub const SENDER_NAME_ENV: &str = "SEMAPHORE_SENDER_NAME";
pub const API_URL_ENV: &str = "SEMAPHORE_API_URL";

/// Semaphore OTP endpoint.
pub const DEFAULT_API_URL: &str = "https://api.semaphore.co/api/v4/otp";

/// Function configuration, read once when the runtime starts.
#[derive(Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub sender_name: Option<String>,
    pub api_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>, sender_name: Option<String>) -> Self {
        Self {
            api_key: SecretString::from(api_key.into()),
            sender_name,
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Reads the configuration from the process environment.
    ///
    /// The API key is required; an empty value counts as missing. An empty
    /// sender name is treated as unset so the provider applies its default.
    pub fn from_env() -> Result<Self, AppError> {
        let api_key = match non_empty_var(API_KEY_ENV) {
            Some(key) => {
                debug!("Successfully loaded {}", API_KEY_ENV);
                key
            }
            None => {
                error!("Failed to load {}", API_KEY_ENV);
                return Err(AppError::MissingEnv(API_KEY_ENV));
            }
        };

        let sender_name = non_empty_var(SENDER_NAME_ENV);
        match &sender_name {
            Some(name) => debug!("Using sender name: {}", name),
            None => debug!("{} not set, provider default sender applies", SENDER_NAME_ENV),
        }

        let api_url = non_empty_var(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        debug!("SMS provider endpoint: {}", api_url);

        Ok(Self::new(api_key, sender_name).with_api_url(api_url))
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}
