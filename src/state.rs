use crate::clock::Clock;
use crate::config::Config;
use crate::report::ForecastReport;
use crate::weather::WeatherClient;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub weather: WeatherClient,
    pub query: Arc<Mutex<QueryState>>,
}

impl AppState {
    pub fn new(config: Config, clock: Arc<dyn Clock>, weather: WeatherClient) -> Self {
        let query = QueryState::new(config.default_location.clone());
        Self {
            config: Arc::new(config),
            clock,
            weather,
            query: Arc::new(Mutex::new(query)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum QueryStatus {
    Idle,
    Loading,
    Ready { report: ForecastReport },
    Failed { message: String },
}

/// The active location and the latest result fetched for it.
///
/// Every submission bumps `generation`; a fetch may only publish its result
/// while its generation is still the current one.
#[derive(Debug, Clone, Serialize)]
pub struct QueryState {
    pub location: String,
    pub generation: u64,
    #[serde(flatten)]
    pub status: QueryStatus,
}

impl QueryState {
    pub fn new(location: String) -> Self {
        Self {
            location,
            generation: 0,
            status: QueryStatus::Idle,
        }
    }

    pub fn begin(&mut self, location: String) -> u64 {
        self.generation += 1;
        self.location = location;
        self.status = QueryStatus::Loading;
        self.generation
    }

    /// Returns false when a newer submission superseded `generation`.
    pub fn complete(&mut self, generation: u64, result: Result<ForecastReport, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.status = match result {
            Ok(report) => QueryStatus::Ready { report },
            Err(message) => QueryStatus::Failed { message },
        };
        true
    }
}
