use std::sync::Arc;

use semaphore_otp::{api, Config, SemaphoreClient};
use tracing::{debug, error, info};
use vercel_runtime::{run, Error};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_line_number(true)
        .init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) => debug!("No .env file loaded: {}", e),
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Initializing SMS client");
    let client = match SemaphoreClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!("Failed to initialize SMS client: {}", e);
            return Err(e.into());
        }
    };

    info!("OTP function initiated...");

    match run(move |req| {
        let client = Arc::clone(&client);
        async move { api::handler(&client, req).await }
    })
    .await
    {
        Ok(_) => {
            info!("API server shutdown gracefully");
            Ok(())
        }
        Err(e) => {
            error!("API server error: {}", e);
            Err(e)
        }
    }
}
