use crate::utils::AppError;
use serde_json::Value;

const FORECAST_PATH: &str = "/weatherforecast";

/// Client for the companion forecast service, reachable by base address.
#[derive(Clone)]
pub struct ForecastClient {
    base_url: String,
}

impl ForecastClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the current forecast as an opaque JSON value.
    ///
    /// One GET, bounded by a 10 second timeout. No retries; a failed or
    /// slow upstream surfaces as `AppError::Upstream`.
    pub async fn fetch_forecast(&self) -> Result<Value, AppError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);

        log::info!("🌦️  Fetching forecast from {}", url);

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .header("Accept", "application/json")
            .timeout(std::time::Duration::from_secs(10))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to reach forecast service: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "forecast service error: {}",
                response.status()
            )));
        }

        let forecast: Value = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to parse forecast response: {}", e)))?;

        Ok(forecast)
    }
}
