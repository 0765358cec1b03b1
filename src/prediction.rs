use crate::models::DailyRecord;
use crate::season::Mode;
use serde::Serialize;
use std::{fmt, str::FromStr};

/// A day counts as warm when its high reaches this temperature.
pub const WARM_THRESHOLD_F: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    EarlySpring,
    MoreWinter,
}

impl Outcome {
    pub fn label(self) -> &'static str {
        match self {
            Outcome::EarlySpring => "Early Spring",
            Outcome::MoreWinter => "6 More Weeks of Winter",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "early-spring" => Ok(Outcome::EarlySpring),
            "more-winter" => Ok(Outcome::MoreWinter),
            other => Err(format!(
                "unknown outcome '{other}', expected 'early-spring' or 'more-winter'"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictionResult {
    pub warm_day_count: u32,
    pub total_days: u32,
    pub derived_outcome: Outcome,
    pub reference_outcome: Outcome,
    pub is_match: bool,
}

pub fn is_warm(record: &DailyRecord) -> bool {
    record.max_temp_f >= WARM_THRESHOLD_F
}

/// Early spring once warm days fill at least half of the window, rounded up.
pub fn derive_outcome(warm_day_count: u32, window_days: u32) -> Outcome {
    if warm_day_count >= window_days.div_ceil(2) {
        Outcome::EarlySpring
    } else {
        Outcome::MoreWinter
    }
}

/// Compares what the weather says against the `reference` prediction.
///
/// The window is fixed by `mode`, not by how many records came back, so a
/// short provider response can only lower the warm-day count.
pub fn evaluate(records: &[DailyRecord], mode: Mode, reference: Outcome) -> PredictionResult {
    let total_days = mode.window_days();
    let warm_day_count = records.iter().filter(|record| is_warm(record)).count();
    let warm_day_count = u32::try_from(warm_day_count).unwrap_or(u32::MAX);
    let derived_outcome = derive_outcome(warm_day_count, total_days);

    PredictionResult {
        warm_day_count,
        total_days,
        derived_outcome,
        reference_outcome: reference,
        is_match: derived_outcome == reference,
    }
}
