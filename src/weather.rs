//! Client for the WeatherAPI.com forecast and history endpoints.

use crate::errors::WeatherError;
use crate::models::{DailyRecord, ProviderErrorBody, ProviderResponse};
use crate::season::{FORECAST_DAYS, Mode, ModeSelection};
use chrono::NaiveDate;
use reqwest::Client;
use tracing::{debug, instrument};

const USER_AGENT: &str = concat!("groundhog_check/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl WeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self, WeatherError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    /// Fetches the daily records that back `selection`: the upcoming forecast
    /// or the lookback window ending at the start of spring.
    #[instrument(skip(self, selection), fields(mode = ?selection.mode))]
    pub async fn fetch_daily_records(
        &self,
        location: &str,
        selection: &ModeSelection,
    ) -> Result<Vec<DailyRecord>, WeatherError> {
        let days = FORECAST_DAYS.to_string();
        let start = date_param(selection.date_range.start);
        let end = date_param(selection.date_range.end);

        let request = match selection.mode {
            Mode::Forecast => self
                .client
                .get(format!("{}/forecast.json", self.base_url))
                .query(&[
                    ("key", self.api_key.as_str()),
                    ("q", location),
                    ("days", days.as_str()),
                    ("aqi", "no"),
                    ("alerts", "no"),
                ]),
            Mode::Historical => self
                .client
                .get(format!("{}/history.json", self.base_url))
                .query(&[
                    ("key", self.api_key.as_str()),
                    ("q", location),
                    ("dt", start.as_str()),
                    ("end_dt", end.as_str()),
                    ("aqi", "no"),
                    ("alerts", "no"),
                ]),
        };

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ProviderErrorBody>(&body)
                .map(|body| body.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ProviderResponse = serde_json::from_str(&body)
            .map_err(|err| WeatherError::DataFormat(err.to_string()))?;
        let forecast_days = payload
            .forecast
            .and_then(|forecast| forecast.forecast_day)
            .ok_or_else(|| WeatherError::DataFormat("missing forecast.forecastday".to_string()))?;

        debug!(days = forecast_days.len(), "provider returned daily records");
        Ok(forecast_days.into_iter().map(DailyRecord::from).collect())
    }
}

fn date_param(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
