use std::time::Duration;

use crate::core::error::GatewayError;
use crate::infra::config::ProviderConfig;

/// Build the provider HTTP client. Timeouts come from config; the model
/// client itself sets none.
pub fn make_http_client_with(cfg: &ProviderConfig) -> Result<reqwest::Client, GatewayError> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(cfg.connect_timeout_ms))
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()?;
    Ok(client)
}
