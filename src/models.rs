//! Frontend Models
//!
//! Data structures matching backend entities.

use serde::{Deserialize, Serialize};

/// Chart entry (matches backend `songs[]`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub name: String,
    pub artist: String,
    pub position: u32,
    #[serde(default)]
    pub peak_position: Option<u32>,
    #[serde(default)]
    pub weeks_on_chart: Option<u32>,
    /// None for new entries and re-entries
    #[serde(default)]
    pub last_week_position: Option<u32>,
    #[serde(default, alias = "image_url")]
    pub image: Option<String>,
}

/// One row of the top-charts list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartData {
    pub title: String,
    pub week: String,
    pub info: String,
    pub songs: Vec<Song>,
}

/// Where the backend got the chart from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSource {
    Api,
    Database,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResponse {
    pub source: ChartSource,
    pub data: ChartData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopChartsResponse {
    pub source: ChartSource,
    pub data: Vec<ChartSummary>,
}

/// A favourited song's appearance on one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouriteChartEntry {
    pub favourite_id: u32,
    pub chart_id: String,
    #[serde(default)]
    pub chart_title: Option<String>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub peak_position: Option<u32>,
    #[serde(default)]
    pub weeks_on_chart: Option<u32>,
    #[serde(default)]
    pub last_week_position: Option<u32>,
    #[serde(default)]
    pub added_at: Option<String>,
}

/// Favourites grouped by song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouriteSong {
    pub song_id: u32,
    pub song_name: String,
    pub artist: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub charts: Vec<FavouriteChartEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    Open,
    Closed,
    Processed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contest {
    pub id: u32,
    /// `YYYY-MM-DD`
    pub start_date: String,
    pub end_date: String,
    pub chart_release_date: String,
    pub status: ContestStatus,
}

impl Contest {
    pub fn is_open(&self) -> bool {
        self.status == ContestStatus::Open
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionType {
    Entry,
    PositionChange,
    Exit,
}

impl PredictionType {
    pub const ALL: [PredictionType; 3] = [
        PredictionType::Entry,
        PredictionType::PositionChange,
        PredictionType::Exit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionType::Entry => "entry",
            PredictionType::PositionChange => "position_change",
            PredictionType::Exit => "exit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PredictionType::Entry => "New entry",
            PredictionType::PositionChange => "Position change",
            PredictionType::Exit => "Chart exit",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub id: u32,
    pub contest_id: u32,
    pub prediction_type: PredictionType,
    #[serde(alias = "song_name")]
    pub target_name: String,
    #[serde(alias = "artist_name")]
    pub artist: String,
    /// Predicted position (entry) or change (position_change); None for exit
    #[serde(default, alias = "predicted_position")]
    pub position: Option<i32>,
    #[serde(default)]
    pub is_correct: Option<bool>,
    #[serde(default, alias = "points_earned")]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: u32,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub total_points: i64,
    #[serde(default)]
    pub weekly_points: i64,
    #[serde(default)]
    pub predictions_made: i64,
    #[serde(default)]
    pub correct_predictions: i64,
}

impl User {
    /// Correct predictions as a percentage of those made
    pub fn accuracy(&self) -> Option<f64> {
        if self.predictions_made <= 0 {
            return None;
        }
        Some(self.correct_predictions as f64 * 100.0 / self.predictions_made as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: u32,
    pub username: String,
    pub points: i64,
}

/// First catalog hit for a chart song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppleMusicTrack {
    pub name: String,
    pub artist: String,
    /// Template with `{w}`/`{h}` placeholders
    pub artwork_url: Option<String>,
    pub preview_url: Option<String>,
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_chart_response() {
        let json = r#"{
            "source": "database",
            "data": {
                "title": "Billboard Hot 100",
                "week": "Week of March 8, 2025",
                "info": "The week's most popular songs",
                "songs": [
                    {"name": "Die With A Smile", "artist": "Lady Gaga & Bruno Mars", "position": 1,
                     "peak_position": 1, "weeks_on_chart": 28, "last_week_position": 2,
                     "image": "https://charts-static.billboard.com/img/a.jpg"},
                    {"name": "Espresso", "artist": "Sabrina Carpenter", "position": 2,
                     "peak_position": 1, "weeks_on_chart": 44, "last_week_position": null}
                ]
            }
        }"#;
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.source, ChartSource::Database);
        assert_eq!(resp.data.songs.len(), 2);
        assert_eq!(resp.data.songs[0].last_week_position, Some(2));
        assert_eq!(resp.data.songs[1].last_week_position, None);
        assert_eq!(resp.data.songs[1].image, None);
    }

    #[test]
    fn test_decode_favourites() {
        let json = r#"{"song_id": 3, "song_name": "Espresso", "artist": "Sabrina Carpenter",
            "image_url": null, "added_at": "2025-03-01T10:00:00",
            "charts": [{"favourite_id": 11, "chart_id": "hot-100", "chart_title": "Billboard Hot 100",
                        "position": 4, "peak_position": 1, "weeks_on_chart": 40, "last_week_position": 3,
                        "added_at": "2025-03-01T10:00:00"}]}"#;
        let fav: FavouriteSong = serde_json::from_str(json).unwrap();
        assert_eq!(fav.charts[0].favourite_id, 11);
        assert_eq!(fav.charts[0].chart_id, "hot-100");
    }

    #[test]
    fn test_decode_prediction_backend_names() {
        let json = r#"{"id": 1, "contest_id": 4, "prediction_type": "position_change",
            "song_name": "Greedy", "artist_name": "Tate McRae", "predicted_position": -3,
            "is_correct": true, "points_earned": 5}"#;
        let p: Prediction = serde_json::from_str(json).unwrap();
        assert_eq!(p.prediction_type, PredictionType::PositionChange);
        assert_eq!(p.target_name, "Greedy");
        assert_eq!(p.position, Some(-3));
        assert_eq!(p.points, Some(5));
    }

    #[test]
    fn test_unknown_contest_status() {
        let json = r#"{"id": 2, "start_date": "2025-03-04", "end_date": "2025-03-10",
            "chart_release_date": "2025-03-11", "status": "archived"}"#;
        let c: Contest = serde_json::from_str(json).unwrap();
        assert_eq!(c.status, ContestStatus::Unknown);
        assert!(!c.is_open());
    }

    #[test]
    fn test_user_accuracy() {
        let mut user = User::default();
        assert_eq!(user.accuracy(), None);
        user.predictions_made = 8;
        user.correct_predictions = 2;
        assert_eq!(user.accuracy(), Some(25.0));
    }

    #[test]
    fn test_prediction_type_parse() {
        for t in PredictionType::ALL {
            assert_eq!(PredictionType::parse(t.as_str()), Some(t));
        }
        assert_eq!(PredictionType::parse("bogus"), None);
    }
}
