//! Predictions Store
//!
//! Current contest, the user's predictions and the leaderboard.

use leptos::prelude::*;

use super::{claim, InitGuard};
use crate::api::{self, predictions::SubmitPredictionArgs};
use crate::error::ApiError;
use crate::models::{Contest, LeaderboardEntry, Prediction};
use crate::validation::{validate_prediction, FieldError, PredictionInput, ValidPrediction};

pub const FORM_FIELD: &str = "form";

/// Validate a submission against the form rules, the contest and what was already predicted
pub fn check_submission(
    contest: Option<&Contest>,
    existing: &[Prediction],
    input: &PredictionInput,
) -> Result<(u32, ValidPrediction), Vec<FieldError>> {
    let valid = validate_prediction(input)?;
    let Some(contest) = contest.filter(|c| c.is_open()) else {
        return Err(vec![FieldError {
            field: FORM_FIELD,
            message: "Predictions are closed for this week".to_string(),
        }]);
    };
    if is_duplicate(existing, contest.id, &valid) {
        return Err(vec![FieldError {
            field: FORM_FIELD,
            message: format!("You already made a {} prediction for this song", valid.prediction_type.label().to_lowercase()),
        }]);
    }
    Ok((contest.id, valid))
}

fn normalized(value: &str) -> String {
    value.trim().to_lowercase()
}

fn is_duplicate(existing: &[Prediction], contest_id: u32, candidate: &ValidPrediction) -> bool {
    let (name, artist) = (normalized(&candidate.target_name), normalized(&candidate.artist));
    existing.iter().any(|p| {
        p.contest_id == contest_id
            && p.prediction_type == candidate.prediction_type
            && normalized(&p.target_name) == name
            && normalized(&p.artist) == artist
    })
}

#[derive(Clone, Copy)]
pub struct PredictionsStore {
    pub contest: RwSignal<Option<Contest>>,
    pub predictions: RwSignal<Vec<Prediction>>,
    pub leaderboard: RwSignal<Vec<LeaderboardEntry>>,
    pub loading: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    pub error: RwSignal<Option<ApiError>>,
    guard: StoredValue<InitGuard>,
}

impl PredictionsStore {
    pub fn new() -> Self {
        Self {
            contest: RwSignal::new(None),
            predictions: RwSignal::new(Vec::new()),
            leaderboard: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            submitting: RwSignal::new(false),
            error: RwSignal::new(None),
            guard: StoredValue::new(InitGuard::new()),
        }
    }

    pub async fn init(&self, authenticated: bool) {
        if !claim(self.guard) {
            return;
        }
        let ok = self.reload(authenticated).await;
        self.guard.update_value(|g| g.finish(ok));
    }

    /// Contest and leaderboard in parallel, then the user's own predictions
    pub async fn reload(&self, authenticated: bool) -> bool {
        let client = api::client();
        self.loading.set(true);
        self.error.set(None);

        let (contest, leaderboard) = futures_util::future::join(
            api::predictions::current_contest(&client),
            api::predictions::leaderboard(&client),
        )
        .await;

        let mut ok = true;
        match contest {
            Ok(contest) => {
                if contest.is_none() {
                    tracing::info!("no contest running");
                }
                self.contest.set(contest);
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load contest");
                self.error.set(Some(e));
                ok = false;
            }
        }
        match leaderboard {
            Ok(entries) => self.leaderboard.set(entries),
            Err(e) => tracing::warn!(error = %e, "failed to load leaderboard"),
        }

        if authenticated {
            let contest_id = self.contest.with_untracked(|c| c.as_ref().map(|c| c.id));
            match api::predictions::user_predictions(&client, contest_id).await {
                Ok(predictions) => self.predictions.set(predictions),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load predictions");
                    self.error.set(Some(e));
                    ok = false;
                }
            }
        }

        self.loading.set(false);
        ok
    }

    pub async fn submit(&self, input: PredictionInput) -> Result<Prediction, Vec<FieldError>> {
        if self.submitting.get_untracked() {
            return Err(Vec::new());
        }
        let (contest_id, valid) = self.contest.with_untracked(|contest| {
            self.predictions
                .with_untracked(|existing| check_submission(contest.as_ref(), existing, &input))
        })?;

        let args = SubmitPredictionArgs {
            contest_id,
            prediction_type: valid.prediction_type,
            target_name: valid.target_name,
            artist: valid.artist,
            position: valid.position,
        };

        self.submitting.set(true);
        let result = api::predictions::submit_prediction(&api::client(), &args).await;
        self.submitting.set(false);

        match result {
            Ok(prediction) => {
                tracing::info!(contest = contest_id, kind = args.prediction_type.as_str(), "prediction submitted");
                self.predictions.update(|p| p.push(prediction.clone()));
                Ok(prediction)
            }
            Err(e) => {
                tracing::warn!(error = %e, "prediction rejected");
                Err(vec![FieldError { field: FORM_FIELD, message: e.user_message() }])
            }
        }
    }

    /// Forget the user's predictions (logout); contest data stays
    pub fn reset_user_data(&self) {
        self.predictions.set(Vec::new());
        self.guard.update_value(InitGuard::reset);
    }
}
