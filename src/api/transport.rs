//! HTTP Transport
//!
//! The seam between the API client and the network. The browser build uses
//! `gloo-net` (fetch); tests plug in scripted transports.

use async_trait::async_trait;
use futures_util::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute URL including query string
    pub url: String,
    /// JSON body
    pub body: Option<String>,
    pub bearer: Option<String>,
    pub timeout_ms: Option<u32>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            bearer: None,
            timeout_ms: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait Transport {
    /// Send one request. Non-2xx statuses are returned as responses, not errors.
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Fetch-based transport for the browser
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

fn is_offline() -> bool {
    web_sys::window()
        .map(|w| !w.navigator().on_line())
        .unwrap_or(false)
}

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        if is_offline() {
            return Err(ApiError::Offline);
        }

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Delete => Request::delete(&request.url),
        }
        .header("Accept", "application/json");

        if let Some(token) = &request.bearer {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }

        let built = match &request.body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(body.as_str()),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(format!("Request build error: {}", e)))?;

        let send = built.send();
        futures_util::pin_mut!(send);

        let result = match request.timeout_ms {
            Some(ms) => match select(send, TimeoutFuture::new(ms)).await {
                Either::Left((result, _)) => result,
                Either::Right(_) => {
                    tracing::warn!(url = %request.url, timeout_ms = ms, "request timed out");
                    return Err(ApiError::Timeout);
                }
            },
            None => send.await,
        };

        let response = result.map_err(|e| {
            if is_offline() {
                ApiError::Offline
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        Ok(ApiResponse { status, body })
    }
}
