//! Serverless function that generates a 6-digit one-time passcode and relays
//! it by SMS through the Semaphore API.
//!
//! The `handler` binary under `api/` is the Vercel entry point; everything it
//! needs lives here so it can be exercised without the runtime.

pub mod api;
pub mod config;
pub mod error;
pub mod otp;
pub mod sms;

pub use api::{handler, ApiResponse};
pub use config::Config;
pub use error::AppError;
pub use otp::generate_otp;
pub use sms::SemaphoreClient;
