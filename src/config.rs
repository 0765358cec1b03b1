use crate::errors::ConfigError;
use crate::prediction::Outcome;
use chrono::NaiveDate;
use std::env;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_BASE: &str = "https://api.weatherapi.com/v1";
pub const DEFAULT_LOCATION: &str = "Punxsutawney";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub api_key: String,
    pub api_base: String,
    pub default_location: String,
    /// The groundhog's call for this year.
    pub reference_outcome: Outcome,
    /// Pins the calendar instead of reading the system clock.
    pub fixed_today: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = non_empty("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let reference_outcome = match non_empty("APP_REFERENCE_OUTCOME") {
            Some(value) => value.parse::<Outcome>().map_err(|reason| ConfigError::Invalid {
                key: "APP_REFERENCE_OUTCOME",
                reason,
            })?,
            None => Outcome::MoreWinter,
        };

        let fixed_today = non_empty("APP_TODAY")
            .map(|value| {
                NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|err| ConfigError::Invalid {
                    key: "APP_TODAY",
                    reason: format!("'{value}' is not a YYYY-MM-DD date ({err})"),
                })
            })
            .transpose()?;

        Ok(Self {
            port,
            api_key: non_empty("WEATHER_API_KEY").unwrap_or_default(),
            api_base: non_empty("WEATHER_API_BASE")
                .map(|value| value.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            default_location: non_empty("APP_DEFAULT_LOCATION")
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            reference_outcome,
            fixed_today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_key, "");
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.default_location, "Punxsutawney");
        assert_eq!(config.reference_outcome, Outcome::MoreWinter);
        assert_eq!(config.fixed_today, None);
    }

    #[test]
    fn reads_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("WEATHER_API_KEY", "abc"),
            ("WEATHER_API_BASE", "http://127.0.0.1:5555/"),
            ("APP_DEFAULT_LOCATION", "Toronto"),
            ("APP_REFERENCE_OUTCOME", "early-spring"),
            ("APP_TODAY", "2025-02-02"),
        ]))
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.api_base, "http://127.0.0.1:5555");
        assert_eq!(config.default_location, "Toronto");
        assert_eq!(config.reference_outcome, Outcome::EarlySpring);
        assert_eq!(config.fixed_today, NaiveDate::from_ymd_opt(2025, 2, 2));
    }

    #[test]
    fn unparsable_port_falls_back() {
        let config = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn rejects_bad_date_and_outcome() {
        let err = Config::from_lookup(lookup(&[("APP_TODAY", "02/02/2025")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "APP_TODAY", .. }));

        let err = Config::from_lookup(lookup(&[("APP_REFERENCE_OUTCOME", "sunny")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "APP_REFERENCE_OUTCOME",
                ..
            }
        ));
    }
}
