pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod prediction;
pub mod report;
pub mod season;
pub mod state;
pub mod ui;
pub mod weather;

pub use app::router;
pub use config::Config;
pub use state::AppState;
