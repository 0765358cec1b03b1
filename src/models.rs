use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One day of weather as reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub max_temp_f: f64,
    pub min_temp_f: f64,
    pub condition_text: String,
    pub condition_icon: String,
}

#[derive(Debug, Deserialize)]
pub struct LocationRequest {
    pub location: String,
}

// Provider payloads. Forecast and history responses share this shape.

#[derive(Debug, Deserialize)]
pub struct ProviderResponse {
    pub forecast: Option<ProviderForecast>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderForecast {
    #[serde(rename = "forecastday")]
    pub forecast_day: Option<Vec<ProviderDay>>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderDay {
    pub date: NaiveDate,
    pub day: ProviderDaySummary,
}

#[derive(Debug, Deserialize)]
pub struct ProviderDaySummary {
    #[serde(rename = "maxtemp_f")]
    pub max_temp_f: f64,
    #[serde(rename = "mintemp_f")]
    pub min_temp_f: f64,
    pub condition: ProviderCondition,
}

#[derive(Debug, Deserialize)]
pub struct ProviderCondition {
    pub text: String,
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorBody {
    pub error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ProviderErrorDetail {
    pub message: String,
}

impl From<ProviderDay> for DailyRecord {
    fn from(day: ProviderDay) -> Self {
        let icon = day.day.condition.icon;
        let condition_icon = if icon.starts_with("//") {
            format!("https:{icon}")
        } else {
            icon
        };

        Self {
            date: day.date,
            max_temp_f: day.day.max_temp_f,
            min_temp_f: day.day.min_temp_f,
            condition_text: day.day.condition.text,
            condition_icon,
        }
    }
}
