use crate::models::DailyRecord;
use crate::prediction::{Outcome, PredictionResult, WARM_THRESHOLD_F, evaluate};
use crate::season::{Mode, ModeSelection};
use serde::Serialize;

/// Everything the page needs to render one query.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub location: String,
    pub selection: ModeSelection,
    pub prediction: PredictionResult,
    pub summary: Summary,
    pub chart: ChartData,
    pub days: Vec<DailyRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub reference: String,
    pub derived: String,
    pub verdict: String,
    pub basis: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub title: String,
    pub labels: Vec<String>,
    pub highs: Vec<i64>,
    pub lows: Vec<i64>,
    pub threshold: Vec<f64>,
}

pub fn build_report(
    location: &str,
    selection: &ModeSelection,
    records: Vec<DailyRecord>,
    reference: Outcome,
) -> ForecastReport {
    let prediction = evaluate(&records, selection.mode, reference);

    ForecastReport {
        location: location.to_string(),
        selection: *selection,
        summary: build_summary(location, selection.mode, &prediction),
        chart: build_chart(selection, &records),
        prediction,
        days: records,
    }
}

fn build_summary(location: &str, mode: Mode, prediction: &PredictionResult) -> Summary {
    let derived_label = prediction.derived_outcome.label();
    let (derived, tense, basis) = match mode {
        Mode::Forecast => (
            format!("Our forecast for {location} predicts: {derived_label}"),
            "is",
            format!(
                "Based on the {}-day forecast, there are {} days with a high temperature of at least {WARM_THRESHOLD_F}°F.",
                prediction.total_days, prediction.warm_day_count
            ),
        ),
        Mode::Historical => (
            format!("Our historical data for {location} shows: {derived_label}"),
            "was",
            format!(
                "Based on historical weather data, there were {} days with a high temperature of at least {WARM_THRESHOLD_F}°F.",
                prediction.warm_day_count
            ),
        ),
    };
    let verdict = if prediction.is_match {
        format!("Groundhog {tense} correct!")
    } else {
        format!("Groundhog {tense} incorrect!")
    };

    Summary {
        reference: format!(
            "Groundhog's Prediction: {}",
            prediction.reference_outcome.label()
        ),
        derived,
        verdict,
        basis,
    }
}

fn build_chart(selection: &ModeSelection, records: &[DailyRecord]) -> ChartData {
    let title = match selection.mode {
        Mode::Forecast => "Forecast Temperature Data".to_string(),
        Mode::Historical => format!(
            "Historical Temperature Data ({} - {})",
            selection.date_range.start, selection.date_range.end
        ),
    };

    ChartData {
        title,
        labels: records
            .iter()
            .map(|record| record.date.format("%-m/%-d/%Y").to_string())
            .collect(),
        highs: records
            .iter()
            .map(|record| record.max_temp_f.round() as i64)
            .collect(),
        lows: records
            .iter()
            .map(|record| record.min_temp_f.round() as i64)
            .collect(),
        threshold: vec![WARM_THRESHOLD_F; records.len()],
    }
}
