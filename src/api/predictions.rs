//! Prediction Contest Endpoints

use serde::{Deserialize, Serialize};

use super::{query_string, ApiClient};
use crate::error::ApiError;
use crate::models::{Contest, LeaderboardEntry, Prediction, PredictionType};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitPredictionArgs {
    pub contest_id: u32,
    pub prediction_type: PredictionType,
    pub target_name: String,
    pub artist: String,
    pub position: Option<i32>,
}

#[derive(Deserialize)]
struct PredictionsResponse {
    predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
struct LeaderboardResponse {
    leaderboard: Vec<LeaderboardEntry>,
}

/// The open contest, or None when the backend has none running
pub async fn current_contest(client: &ApiClient) -> Result<Option<Contest>, ApiError> {
    match client.get_public::<Contest>("predictions/contest/current").await {
        Ok(contest) => Ok(Some(contest)),
        Err(ApiError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn user_predictions(client: &ApiClient, contest_id: Option<u32>) -> Result<Vec<Prediction>, ApiError> {
    let id = contest_id.map(|id| id.to_string());
    let query = query_string(&[("contest_id", id.as_deref())]);
    let resp: PredictionsResponse = client.get(&format!("predictions/user{}", query)).await?;
    Ok(resp.predictions)
}

pub async fn submit_prediction(client: &ApiClient, args: &SubmitPredictionArgs) -> Result<Prediction, ApiError> {
    client.post("predictions", args).await
}

pub async fn leaderboard(client: &ApiClient) -> Result<Vec<LeaderboardEntry>, ApiError> {
    let resp: LeaderboardResponse = client.get_public("predictions/leaderboard").await?;
    Ok(resp.leaderboard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_missing_contest_is_none() {
        let transport = Rc::new(MockTransport::new("tok"));
        transport.route("/predictions/contest/current", 404, r#"{"error": "No active contest"}"#);
        let (client, _) = client_with_session(transport, None);

        assert_eq!(current_contest(&client).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_submit_serializes_type() {
        let transport = Rc::new(MockTransport::new("tok"));
        transport.route(
            "/predictions",
            201,
            r#"{"id": 5, "contest_id": 2, "prediction_type": "exit",
                "target_name": "Greedy", "artist": "Tate McRae", "position": null}"#,
        );
        let (client, _) = client_with_session(transport.clone(), Some("tok"));

        let args = SubmitPredictionArgs {
            contest_id: 2,
            prediction_type: PredictionType::Exit,
            target_name: "Greedy".into(),
            artist: "Tate McRae".into(),
            position: None,
        };
        let created = submit_prediction(&client, &args).await.unwrap();
        assert_eq!(created.id, 5);
        let body = transport.calls.borrow()[0].body.clone().unwrap();
        assert!(body.contains(r#""prediction_type":"exit""#));
    }
}
