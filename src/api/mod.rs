//! Backend API Client
//!
//! JSON over HTTP with bearer auth and a refresh-and-replay path for 401s.
//! Endpoint bindings live in the per-domain submodules.

pub mod apple_music;
pub mod auth;
pub mod charts;
pub mod favourites;
pub mod predictions;
mod refresh;
mod transport;

use std::cell::RefCell;
use std::rc::Rc;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::storage::{BrowserStorage, KeyValueStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY};

pub use refresh::TokenRefresher;
pub use transport::{ApiRequest, ApiResponse, GlooTransport, Method, Transport};

/// Characters left as-is in query values
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

/// Build `?k=v&k2=v2`, skipping `None` values
pub fn query_string(params: &[(&str, Option<&str>)]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| {
            value.map(|v| format!("{}={}", key, utf8_percent_encode(v, QUERY_VALUE)))
        })
        .collect();
    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// How a request is authorized
#[derive(Debug, Clone, PartialEq)]
enum Auth {
    /// Stored session token; 401 triggers refresh and one replay
    Session,
    /// No token (login, register, refresh, public data)
    Public,
    /// Caller-supplied token (Apple Music developer token), never refreshed
    Token(String),
}

#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

struct ClientInner {
    config: AppConfig,
    transport: Rc<dyn Transport>,
    storage: Rc<dyn KeyValueStore>,
    refresher: TokenRefresher,
    on_session_expired: RefCell<Option<Rc<dyn Fn()>>>,
}

impl ClientInner {
    fn clear_session(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }

    fn expire_session(&self) {
        tracing::info!("session expired, clearing tokens");
        self.clear_session();
        let hook = self.on_session_expired.borrow().clone();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// The refresh call itself. Runs once per batch of concurrent 401s.
    async fn refresh_access_token(self: Rc<Self>, refresh_token: String) -> Result<String, ApiError> {
        let mut request = ApiRequest::new(Method::Post, self.config.url("auth/refresh"));
        request.body = Some(serde_json::to_string(&RefreshRequest { refresh_token: &refresh_token })?);
        request.timeout_ms = Some(self.config.request_timeout_ms);

        let response = self.transport.send(&request).await?;
        if !response.is_success() {
            let err = ApiError::from_status(response.status, &response.body);
            tracing::warn!(status = response.status, "token refresh rejected");
            if matches!(err, ApiError::Unauthorized(_) | ApiError::Validation(_)) {
                self.expire_session();
                return Err(ApiError::Unauthorized("Session expired".into()));
            }
            return Err(err);
        }

        let refreshed: RefreshResponse = serde_json::from_str(&response.body)?;
        self.storage.set(ACCESS_TOKEN_KEY, &refreshed.access_token);
        if let Some(rotated) = &refreshed.refresh_token {
            self.storage.set(REFRESH_TOKEN_KEY, rotated);
        }
        tracing::info!("access token refreshed");
        Ok(refreshed.access_token)
    }
}

/// Shared handle to the backend. Cloning is cheap.
#[derive(Clone)]
pub struct ApiClient {
    inner: Rc<ClientInner>,
}

impl ApiClient {
    pub fn new(config: AppConfig, transport: Rc<dyn Transport>, storage: Rc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Rc::new(ClientInner {
                config,
                transport,
                storage,
                refresher: TokenRefresher::new(),
                on_session_expired: RefCell::new(None),
            }),
        }
    }

    /// Client for the browser: fetch transport, tokens in localStorage
    pub fn browser(config: AppConfig) -> Self {
        Self::new(config, Rc::new(GlooTransport), Rc::new(BrowserStorage::local()))
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn storage(&self) -> Rc<dyn KeyValueStore> {
        self.inner.storage.clone()
    }

    /// Called once whenever a refresh fails for good
    pub fn set_session_expired_hook(&self, hook: impl Fn() + 'static) {
        *self.inner.on_session_expired.borrow_mut() = Some(Rc::new(hook));
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.storage.get(ACCESS_TOKEN_KEY)
    }

    pub fn has_session(&self) -> bool {
        self.access_token().is_some()
    }

    pub fn set_session(&self, access_token: &str, refresh_token: Option<&str>) {
        self.inner.storage.set(ACCESS_TOKEN_KEY, access_token);
        if let Some(refresh) = refresh_token {
            self.inner.storage.set(REFRESH_TOKEN_KEY, refresh);
        }
    }

    pub fn clear_session(&self) {
        self.inner.clear_session();
    }

    pub fn refresh_count(&self) -> u64 {
        self.inner.refresher.started()
    }

    // ========================
    // Typed helpers
    // ========================

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::Get, path, None);
        decode(self.execute(request, Auth::Session).await?)
    }

    pub async fn get_with_timeout<T: DeserializeOwned>(&self, path: &str, timeout_ms: u32) -> Result<T, ApiError> {
        let mut request = self.request(Method::Get, path, None);
        request.timeout_ms = Some(timeout_ms);
        decode(self.execute(request, Auth::Session).await?)
    }

    pub async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::Get, path, None);
        decode(self.execute(request, Auth::Public).await?)
    }

    /// GET an absolute URL outside the backend with a caller-supplied token
    pub async fn get_external<T: DeserializeOwned>(&self, url: &str, token: &str) -> Result<T, ApiError> {
        let mut request = ApiRequest::new(Method::Get, url);
        request.timeout_ms = Some(self.inner.config.request_timeout_ms);
        decode(self.execute(request, Auth::Token(token.to_string())).await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        Ok(self.post_with_status(path, body).await?.1)
    }

    /// POST returning the success status as well (201 vs 200 carries meaning)
    pub async fn post_with_status<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(u16, T), ApiError> {
        let request = self.request(Method::Post, path, Some(serde_json::to_string(body)?));
        let response = self.execute(request, Auth::Session).await?;
        let status = response.status;
        Ok((status, decode(response)?))
    }

    pub async fn post_public<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let request = self.request(Method::Post, path, Some(serde_json::to_string(body)?));
        decode(self.execute(request, Auth::Public).await?)
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.request(Method::Delete, path, None);
        decode(self.execute(request, Auth::Session).await?)
    }

    // ========================
    // Core
    // ========================

    fn request(&self, method: Method, path: &str, body: Option<String>) -> ApiRequest {
        let mut request = ApiRequest::new(method, self.inner.config.url(path));
        request.body = body;
        request.timeout_ms = Some(self.inner.config.request_timeout_ms);
        request
    }

    async fn execute(&self, mut request: ApiRequest, auth: Auth) -> Result<ApiResponse, ApiError> {
        let used_token = match &auth {
            Auth::Session => self.access_token(),
            Auth::Public => None,
            Auth::Token(token) => Some(token.clone()),
        };
        request.bearer = used_token.clone();

        tracing::debug!(method = ?request.method, url = %request.url, "request");
        let response = self.inner.transport.send(&request).await?;

        if response.status != 401 || auth != Auth::Session {
            return check(response);
        }
        let Some(stale) = used_token else {
            return check(response);
        };

        let fresh = self.refreshed_token(&stale).await?;
        request.bearer = Some(fresh);
        tracing::debug!(url = %request.url, "replaying request after token refresh");

        // A second 401 is final
        check(self.inner.transport.send(&request).await?)
    }

    /// A token newer than `stale`, refreshing if nobody has yet
    async fn refreshed_token(&self, stale: &str) -> Result<String, ApiError> {
        match self.access_token() {
            Some(current) if current != stale => return Ok(current),
            Some(_) => {}
            // Another request already ended this session
            None => return Err(ApiError::Unauthorized("Session expired".into())),
        }

        let Some(refresh_token) = self.inner.storage.get(REFRESH_TOKEN_KEY) else {
            self.inner.expire_session();
            return Err(ApiError::Unauthorized("Session expired".into()));
        };

        let inner = self.inner.clone();
        self.inner
            .refresher
            .run(move || inner.refresh_access_token(refresh_token))
            .await
    }
}

fn check(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(ApiError::from_status(response.status, &response.body))
    }
}

fn decode<T: DeserializeOwned>(response: ApiResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| {
        tracing::warn!(error = %e, "could not decode response body");
        ApiError::Decode(e.to_string())
    })
}

thread_local! {
    static CLIENT: RefCell<Option<ApiClient>> = const { RefCell::new(None) };
}

/// Install the process-wide client (done once in `main`)
pub fn install(client: ApiClient) {
    CLIENT.with(|c| *c.borrow_mut() = Some(client));
}

/// The installed client, or a browser client with stored config if none was installed
pub fn client() -> ApiClient {
    CLIENT.with(|c| {
        c.borrow_mut()
            .get_or_insert_with(|| ApiClient::browser(AppConfig::load(&BrowserStorage::local())))
            .clone()
    })
}

/// `{"message": ...}` acknowledgement bodies
#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by the endpoint tests

    use super::*;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use std::cell::Cell;
    use tokio::sync::Notify;

    /// Answers by URL suffix; authenticated routes require `valid_token`
    pub struct MockTransport {
        pub calls: RefCell<Vec<ApiRequest>>,
        pub valid_token: RefCell<String>,
        /// 200 hands out "fresh"; anything else is returned as the refresh error
        pub refresh_status: u16,
        /// The refresh answers only after this many 401s went out
        pub hold_refresh_until: Cell<usize>,
        unauthorized_sent: Cell<usize>,
        gate: Notify,
        /// (url suffix, status, body) for routes that ignore auth
        pub routes: RefCell<Vec<(String, u16, String)>>,
    }

    impl MockTransport {
        pub fn new(valid_token: &str) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                valid_token: RefCell::new(valid_token.to_string()),
                refresh_status: 200,
                hold_refresh_until: Cell::new(0),
                unauthorized_sent: Cell::new(0),
                gate: Notify::new(),
                routes: RefCell::new(Vec::new()),
            }
        }

        pub fn route(&self, suffix: &str, status: u16, body: &str) {
            self.routes.borrow_mut().push((suffix.to_string(), status, body.to_string()));
        }

        pub fn count(&self, suffix: &str) -> usize {
            self.calls.borrow().iter().filter(|r| r.url.ends_with(suffix)).count()
        }

        fn unauthorized(&self, body: &str) -> ApiResponse {
            self.unauthorized_sent.set(self.unauthorized_sent.get() + 1);
            self.gate.notify_one();
            ApiResponse { status: 401, body: body.into() }
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.calls.borrow_mut().push(request.clone());

            if request.url.ends_with("/auth/refresh") {
                while self.unauthorized_sent.get() < self.hold_refresh_until.get() {
                    self.gate.notified().await;
                }
                return Ok(match self.refresh_status {
                    200 => {
                        *self.valid_token.borrow_mut() = "fresh".to_string();
                        ApiResponse { status: 200, body: r#"{"access_token": "fresh"}"#.into() }
                    }
                    401 => ApiResponse { status: 401, body: r#"{"error": "Invalid refresh token"}"#.into() },
                    status => ApiResponse { status, body: r#"{"error": "Service unavailable"}"#.into() },
                });
            }

            let path = request.url.split('?').next().unwrap_or_default().to_string();
            let routed = self
                .routes
                .borrow()
                .iter()
                .rev()
                .find(|(suffix, _, _)| path.ends_with(suffix.as_str()))
                .map(|(_, status, body)| (*status, body.clone()));
            if let Some((status, body)) = routed {
                if status == 401 {
                    return Ok(self.unauthorized(&body));
                }
                if status != 200 || request.bearer.as_deref() == Some(self.valid_token.borrow().as_str()) || request.bearer.is_none() {
                    return Ok(ApiResponse { status, body });
                }
            }

            if request.bearer.as_deref() == Some(self.valid_token.borrow().as_str()) {
                Ok(ApiResponse { status: 200, body: r#"{"ok": true}"#.into() })
            } else {
                Ok(self.unauthorized(r#"{"msg": "Token has expired"}"#))
            }
        }
    }

    pub fn test_config() -> AppConfig {
        AppConfig {
            api_base: "http://api.test/api".into(),
            ..AppConfig::default()
        }
    }

    /// Client whose stored session holds `token` (and a refresh token)
    pub fn client_with_session(transport: Rc<MockTransport>, token: Option<&str>) -> (ApiClient, Rc<MemoryStorage>) {
        let storage = Rc::new(MemoryStorage::new());
        let client = ApiClient::new(test_config(), transport, storage.clone());
        if let Some(token) = token {
            client.set_session(token, Some("refresh-1"));
        }
        (client, storage)
    }
}
