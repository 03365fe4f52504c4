//! Auth Endpoints
//!
//! Register, login and current-user lookups.

use serde::{Deserialize, Serialize};

use super::{query_string, ApiClient};
use crate::error::ApiError;
use crate::models::{AuthResponse, User};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct LoginArgs<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterArgs<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Which identity field to check
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvailabilityField {
    Username,
    Email,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    username_exists: Option<bool>,
    #[serde(default)]
    email_exists: Option<bool>,
}

// ========================
// Commands
// ========================

pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<AuthResponse, ApiError> {
    client.post_public("auth/login", &LoginArgs { username, password }).await
}

pub async fn register(client: &ApiClient, username: &str, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
    client
        .post_public("auth/register", &RegisterArgs { username, email, password })
        .await
}

/// Profile of the signed-in user, points included
pub async fn current_user(client: &ApiClient) -> Result<User, ApiError> {
    client.get("auth/profile").await
}

/// True when the username/email is still free
pub async fn is_available(client: &ApiClient, field: AvailabilityField, value: &str) -> Result<bool, ApiError> {
    let query = match field {
        AvailabilityField::Username => query_string(&[("username", Some(value))]),
        AvailabilityField::Email => query_string(&[("email", Some(value))]),
    };
    let resp: AvailabilityResponse = client
        .get_public(&format!("auth/check-availability{}", query))
        .await?;
    let exists = match field {
        AvailabilityField::Username => resp.username_exists,
        AvailabilityField::Email => resp.email_exists,
    };
    Ok(!exists.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::*;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_login_decodes_tokens_and_user() {
        let transport = Rc::new(MockTransport::new("unused"));
        transport.route(
            "/auth/login",
            200,
            r#"{"access_token": "a1", "refresh_token": "r1",
                "user": {"id": 4, "username": "mia", "email": "mia@example.com"}}"#,
        );
        let (client, _) = client_with_session(transport.clone(), None);

        let resp = login(&client, "mia", "hunter22").await.unwrap();
        assert_eq!(resp.access_token, "a1");
        assert_eq!(resp.refresh_token.as_deref(), Some("r1"));
        assert_eq!(resp.user.username, "mia");

        let body = transport.calls.borrow()[0].body.clone().unwrap();
        assert!(body.contains(r#""username":"mia""#));
    }

    #[tokio::test]
    async fn test_current_user_reads_profile() {
        let transport = Rc::new(MockTransport::new("tok"));
        transport.route(
            "/auth/profile",
            200,
            r#"{"username": "mia", "email": "mia@example.com",
                "created_at": "Sat, 01 Mar 2025 10:00:00 GMT", "last_login": null,
                "total_points": 42, "weekly_points": 5,
                "predictions_made": 12, "correct_predictions": 4}"#,
        );
        let (client, _) = client_with_session(transport.clone(), Some("tok"));

        let user = current_user(&client).await.unwrap();
        assert_eq!(user.id, 0);
        assert_eq!(user.username, "mia");
        assert_eq!(user.total_points, 42);
        assert_eq!(user.correct_predictions, 4);
        assert_eq!(transport.calls.borrow()[0].url, "http://api.test/api/auth/profile");
    }

    #[tokio::test]
    async fn test_availability_query() {
        let transport = Rc::new(MockTransport::new("unused"));
        transport.route("/auth/check-availability", 200, r#"{"email_exists": true}"#);
        let (client, _) = client_with_session(transport.clone(), None);

        let free = is_available(&client, AvailabilityField::Email, "a+b@example.com").await.unwrap();
        assert!(!free);
        assert!(transport.calls.borrow()[0].url.ends_with("?email=a%2Bb%40example.com"));
    }
}
