//! Prediction Scoring
//!
//! Point rules the weekly processor applies, shown to players up front.

use crate::models::PredictionType;

/// Points for a correctly predicted new entry at `actual_position`
pub fn entry_points(actual_position: u32) -> u32 {
    match actual_position {
        0..=10 => 15,
        11..=50 => 10,
        _ => 5,
    }
}

/// Points for a position-change prediction, by distance from the actual change
pub fn position_change_points(predicted_change: i32, actual_change: i32) -> u32 {
    match (predicted_change - actual_change).unsigned_abs() {
        0 => 10,
        1..=5 => 5,
        6..=10 => 2,
        _ => 0,
    }
}

pub fn exit_points(is_correct: bool) -> u32 {
    if is_correct {
        10
    } else {
        0
    }
}

pub fn max_points(prediction_type: PredictionType) -> u32 {
    match prediction_type {
        PredictionType::Entry => 15,
        PredictionType::PositionChange => 10,
        PredictionType::Exit => 10,
    }
}

/// What a prediction could earn if it lands at the predicted spot
pub fn potential_points(prediction_type: PredictionType, position: Option<i32>) -> u32 {
    match (prediction_type, position) {
        (PredictionType::Entry, Some(p)) if p > 0 => entry_points(p as u32),
        (PredictionType::Exit, _) => exit_points(true),
        _ => max_points(prediction_type),
    }
}

pub fn rules_summary(prediction_type: PredictionType) -> &'static str {
    match prediction_type {
        PredictionType::Entry => "15 pts for a top-10 debut, 10 for top 50, 5 anywhere else",
        PredictionType::PositionChange => "10 pts exact, 5 within 5 spots, 2 within 10",
        PredictionType::Exit => "10 pts if the song drops off the chart",
    }
}
