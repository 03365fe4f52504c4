//! Auth Store
//!
//! Current user, session restore and the login/register/logout flows.

use leptos::prelude::*;

use super::{claim, InitGuard, LoadState};
use crate::api::{self, auth::AvailabilityField, ApiClient};
use crate::error::ApiError;
use crate::models::{AuthResponse, User};
use crate::storage::{get_json, set_json, USER_KEY};
use crate::validation::{self, FieldError};

/// Field name used for errors that belong to the whole form
pub const FORM_FIELD: &str = "form";

#[derive(Clone, Copy)]
pub struct AuthStore {
    pub user: RwSignal<Option<User>>,
    pub status: RwSignal<LoadState>,
    pub error: RwSignal<Option<String>>,
    guard: StoredValue<InitGuard>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self {
            user: RwSignal::new(None),
            status: RwSignal::new(LoadState::Idle),
            error: RwSignal::new(None),
            guard: StoredValue::new(InitGuard::new()),
        }
    }

    /// Tracked: re-runs reactive closures when the user changes
    pub fn is_authenticated(&self) -> bool {
        self.user.with(Option::is_some)
    }

    pub fn is_authenticated_untracked(&self) -> bool {
        self.user.with_untracked(Option::is_some)
    }

    /// Restore the cached user, then confirm the session with the backend
    pub async fn init(&self) {
        if !claim(self.guard) {
            return;
        }
        let client = api::client();
        let storage = client.storage();

        if !client.has_session() {
            storage.remove(USER_KEY);
            self.user.set(None);
            self.guard.update_value(|g| g.finish(true));
            return;
        }

        if let Some(cached) = get_json::<User>(storage.as_ref(), USER_KEY) {
            self.user.set(Some(cached));
        }

        self.status.set(LoadState::Loading);
        match api::auth::current_user(&client).await {
            Ok(profile) => {
                let user = self.user.with_untracked(|known| merge_profile(known.as_ref(), profile));
                tracing::info!(user = %user.username, "session restored");
                set_json(storage.as_ref(), USER_KEY, &user);
                self.user.set(Some(user));
                self.status.set(LoadState::Loaded);
            }
            Err(e) if e.is_unauthorized() => {
                tracing::info!("stored session rejected, signing out");
                client.clear_session();
                self.user.set(None);
                self.status.set(LoadState::Idle);
            }
            Err(e) => {
                // keep the cached user; the next authenticated call will sort it out
                tracing::warn!(error = %e, "could not validate session");
                self.status.set(LoadState::Failed);
            }
        }
        self.guard.update_value(|g| g.finish(true));
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), Vec<FieldError>> {
        let errors = validation::validate_login(username, password);
        if !errors.is_empty() {
            return Err(errors);
        }
        let client = api::client();
        let result = api::auth::login(&client, username.trim(), password).await;
        self.finish_auth(&client, result)
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(), Vec<FieldError>> {
        let errors = validation::validate_registration(username, email, password, confirm);
        if !errors.is_empty() {
            return Err(errors);
        }
        let client = api::client();
        let result = api::auth::register(&client, username.trim(), email.trim(), password).await;
        self.finish_auth(&client, result)
    }

    fn finish_auth(&self, client: &ApiClient, result: Result<AuthResponse, ApiError>) -> Result<(), Vec<FieldError>> {
        match result {
            Ok(resp) => {
                client.set_session(&resp.access_token, resp.refresh_token.as_deref());
                set_json(client.storage().as_ref(), USER_KEY, &resp.user);
                tracing::info!(user = %resp.user.username, "signed in");
                self.user.set(Some(resp.user));
                self.status.set(LoadState::Loaded);
                self.error.set(None);
                self.guard.update_value(|g| g.finish(true));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "authentication failed");
                let message = auth_failure_message(&e);
                self.error.set(Some(message.clone()));
                Err(vec![FieldError { field: FORM_FIELD, message }])
            }
        }
    }

    /// Re-fetch the user, e.g. after points change
    pub async fn reload_user(&self) {
        let client = api::client();
        if !client.has_session() {
            return;
        }
        match api::auth::current_user(&client).await {
            Ok(profile) => {
                let user = self.user.with_untracked(|known| merge_profile(known.as_ref(), profile));
                set_json(client.storage().as_ref(), USER_KEY, &user);
                self.user.set(Some(user));
            }
            Err(e) => tracing::debug!(error = %e, "user reload failed"),
        }
    }

    /// Sign out locally. User-scoped stores are reset by `AppContext::logout`.
    pub fn logout(&self) {
        let client = api::client();
        client.clear_session();
        client.storage().remove(USER_KEY);
        self.user.set(None);
        self.status.set(LoadState::Idle);
        self.error.set(None);
        tracing::info!("signed out");
    }

    /// Called by the client when a token refresh fails for good
    pub fn session_expired(&self) {
        self.user.set(None);
        self.status.set(LoadState::Idle);
        self.error
            .set(Some(ApiError::Unauthorized(String::new()).user_message()));
    }

    /// Errors as form messages; a failed lookup does not block the form
    pub async fn check_availability(&self, field: AvailabilityField, value: &str) -> Option<String> {
        let value = value.trim();
        let local = match field {
            AvailabilityField::Username => validation::validate_username(value),
            AvailabilityField::Email => validation::validate_email(value),
        };
        if local.is_err() {
            return None;
        }
        match api::auth::is_available(&api::client(), field, value).await {
            Ok(true) => None,
            Ok(false) => Some(taken_message(field)),
            Err(e) => {
                tracing::debug!(error = %e, "availability check failed");
                None
            }
        }
    }
}

/// The profile body has no id; keep the one from sign-in
fn merge_profile(known: Option<&User>, mut profile: User) -> User {
    if profile.id == 0 {
        if let Some(known) = known {
            profile.id = known.id;
        }
    }
    profile
}

fn taken_message(field: AvailabilityField) -> String {
    match field {
        AvailabilityField::Username => "That username is taken".to_string(),
        AvailabilityField::Email => "An account with that email already exists".to_string(),
    }
}

/// Login/register failures carry the server's reason rather than "session expired"
pub fn auth_failure_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized(msg) if !msg.is_empty() => msg.clone(),
        ApiError::Unauthorized(_) => "Invalid username or password".to_string(),
        other => other.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failure_message() {
        let bad = ApiError::from_status(401, r#"{"error": "Invalid credentials"}"#);
        assert_eq!(auth_failure_message(&bad), "Invalid credentials");
        assert_eq!(
            auth_failure_message(&ApiError::Unauthorized(String::new())),
            "Invalid username or password"
        );
        let taken = ApiError::from_status(409, r#"{"error": "Username already exists"}"#);
        assert_eq!(auth_failure_message(&taken), "Username already exists");
        assert_eq!(auth_failure_message(&ApiError::Timeout), ApiError::Timeout.user_message());
    }

    #[test]
    fn test_profile_keeps_known_id() {
        let known = User { id: 7, username: "mia".into(), total_points: 10, ..User::default() };
        let profile = User { username: "mia".into(), total_points: 25, ..User::default() };

        let merged = merge_profile(Some(&known), profile.clone());
        assert_eq!(merged.id, 7);
        assert_eq!(merged.total_points, 25);

        assert_eq!(merge_profile(None, profile).id, 0);
        let with_id = User { id: 9, ..User::default() };
        assert_eq!(merge_profile(Some(&known), with_id).id, 9);
    }

    #[test]
    fn test_taken_messages() {
        assert_eq!(taken_message(AvailabilityField::Username), "That username is taken");
        assert!(taken_message(AvailabilityField::Email).contains("email"));
    }
}
