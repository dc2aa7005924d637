//! Authenticated HTTP access to the budget backend.
//!
//! Every request carries the session's bearer token. A `401` on a normal
//! request triggers exactly one token refresh and one retry; if that fails
//! too, the session is cleared and the caller gets
//! [`ClientError::LoginRequired`].

use std::sync::Arc;
use std::time::Duration;

use filmbudget_shared::{AppConfig, AppError, RefreshRequest, TokenPair};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::cache::ReferenceCache;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;

const REFRESH_PATH: &str = "/auth/refresh";

/// Client of the budget backend.
#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<Session>,
    cache: ReferenceCache,
    refresh_lock: Mutex<()>,
}

/// Refresh response; the backend may keep the old refresh token.
#[derive(Deserialize)]
struct RefreshResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn new(config: &AppConfig, session: Arc<Session>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            session,
            cache: ReferenceCache::new(&config.cache),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Creates a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Http` if the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>, session: Arc<Session>) -> ClientResult<Self> {
        let mut config = AppConfig::default();
        config.api.base_url = base_url.into();
        Self::new(&config, session)
    }

    /// Backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session shared by all requests.
    #[must_use]
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Reference-data cache.
    #[must_use]
    pub fn cache(&self) -> &ReferenceCache {
        &self.cache
    }

    // ========================================================================
    // Typed helpers
    // ========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.send(Method::GET, path, &[], None).await?;
        decode(response).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let response = self.send(Method::GET, path, query, None).await?;
        decode(response).await
    }

    pub(crate) async fn get_bytes(&self, path: &str) -> ClientResult<Vec<u8>> {
        let response = self.send(Method::GET, path, &[], None).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.send(Method::POST, path, &[], Some(&body)).await?;
        decode(response).await
    }

    /// POST without a body; the response body is ignored when empty.
    pub(crate) async fn post_empty(&self, path: &str) -> ClientResult<Value> {
        let response = self.send(Method::POST, path, &[], None).await?;
        decode_or_null(response).await
    }

    pub(crate) async fn patch<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.send(Method::PATCH, path, &[], Some(&body)).await?;
        decode(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send(Method::DELETE, path, &[], None).await?;
        Ok(())
    }

    /// Unauthenticated POST used by login; no refresh on `401`.
    pub(crate) async fn post_anonymous<B, T>(&self, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode(body)?;
        let response = self.execute(&Method::POST, path, &[], Some(&body), None).await?;
        decode(check(response, &Method::POST, path).await?).await
    }

    // ========================================================================
    // Request pipeline
    // ========================================================================

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ClientResult<Response> {
        let token = self.session.access_token();
        let response = self.execute(&method, path, query, body, token.as_deref()).await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return check(response, &method, path).await;
        }
        if token.is_none() {
            debug!(%method, path, "Request rejected without a session");
            return Err(ClientError::LoginRequired);
        }

        warn!(%method, path, "Access token rejected, refreshing");
        self.refresh(token.as_deref()).await?;

        let token = self.session.access_token();
        let response = self.execute(&method, path, query, body, token.as_deref()).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!(%method, path, "Request rejected after refresh");
            self.expire();
            return Err(ClientError::LoginRequired);
        }
        check(response, &method, path).await
    }

    async fn execute(
        &self,
        method: &Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            error!(%method, path, error = %e, "Failed to send request");
            ClientError::Http(e)
        })?;
        debug!(%method, path, status = response.status().as_u16(), "Request completed");
        Ok(response)
    }

    /// Exchanges the refresh token for a new pair.
    ///
    /// `stale` is the access token that was rejected; if another request has
    /// already replaced it, nothing is done.
    async fn refresh(&self, stale: Option<&str>) -> ClientResult<()> {
        let _guard = self.refresh_lock.lock().await;
        if self.session.access_token().as_deref() != stale {
            debug!("Token already refreshed by a concurrent request");
            return Ok(());
        }

        let Some(refresh_token) = self.session.refresh_token() else {
            self.expire();
            return Err(ClientError::LoginRequired);
        };

        let request = RefreshRequest {
            refresh_token: refresh_token.clone(),
        };
        let response = self
            .http
            .post(format!("{}{}", self.base_url, REFRESH_PATH))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = response.status().as_u16(), "Token refresh rejected");
            self.expire();
            return Err(ClientError::LoginRequired);
        }

        let fresh: RefreshResponse = decode(response).await?;
        let tokens = TokenPair::new(
            fresh.access_token,
            fresh.refresh_token.unwrap_or(refresh_token),
            fresh.expires_in,
        );
        self.session.authenticate(tokens)?;
        info!("Access token refreshed");
        Ok(())
    }

    fn expire(&self) {
        self.cache.clear_all();
        self.session.clear().ok();
    }
}

async fn check(response: Response, method: &Method, path: &str) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(status, &body);
    warn!(%method, path, status = status.as_u16(), %message, "Backend rejected request");
    Err(AppError::from_status(status.as_u16(), message).into())
}

fn encode<B: Serialize + ?Sized>(body: &B) -> ClientResult<Value> {
    serde_json::to_value(body).map_err(|e| ClientError::Decode(e.to_string()))
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

async fn decode_or_null(response: Response) -> ClientResult<Value> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Human-readable message from an error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// `{"detail": [{"msg": "..."}]}` and `{"message": "..."}`.
fn error_message(status: StatusCode, body: &str) -> String {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let message = match parsed {
        Some(ErrorBody {
            detail: Some(Value::String(detail)),
            ..
        }) => detail,
        Some(ErrorBody {
            detail: Some(Value::Array(items)),
            ..
        }) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Some(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        _ => body.trim().to_string(),
    };

    if message.is_empty() {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        message
    }
}
