use std::sync::Arc;

use impacthub_domain::session::SessionStore;
use impacthub_domain::DomainError;
use log::{debug, warn};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use super::error_payload::ErrorPayload;
use super::{ApiError, ApiRequest};
use crate::config::ClientConfig;

const USER_AGENT: &str = concat!("impacthub-client/", env!("CARGO_PKG_VERSION"));
pub const TOKEN_REFRESH_PATH: &str = "/token/refresh/";

#[derive(Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Authenticated client for the ImpactHub REST API.
///
/// Every request carries the stored access token. A 401 triggers one
/// token refresh and one replay of the request; if the refresh is not
/// possible the stored session is cleared and the call fails with
/// [`ApiError::SessionExpired`].
pub struct ApiClient {
    http: Client,
    base_url: String,
    sessions: Arc<dyn SessionStore>,
    // Serializes refreshes so concurrent 401s share one refresh call
    refresh_gate: Mutex<()>,
    gateway_field_prefix: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, sessions: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        let timeouts = config.timeouts();
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeouts.http_request)
            .connect_timeout(timeouts.connect)
            .gzip(true)
            .build()?;

        Ok(Self {
            http,
            base_url: config.api_base_url().trim_end_matches('/').to_string(),
            sessions,
            refresh_gate: Mutex::new(()),
            gateway_field_prefix: config.gateway_field_prefix().to_string(),
        })
    }

    pub fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    pub(crate) fn gateway_field_prefix(&self) -> &str {
        &self.gateway_field_prefix
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return the successful response.
    pub async fn send(&self, mut request: ApiRequest) -> Result<Response, ApiError> {
        loop {
            let token = self.sessions.access_token().await?;
            let response = self.dispatch(&request, token.as_deref()).await?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && request.refreshes_on_unauthorized() {
                if request.is_retried() {
                    warn!(
                        "Request {} {} still unauthorized after refresh",
                        request.method(),
                        request.path()
                    );
                    return Err(ApiError::SessionExpired);
                }

                request.mark_retried();
                self.renew_after_unauthorized(token.as_deref()).await?;
                debug!("Replaying {} {} with renewed session", request.method(), request.path());
                continue;
            }

            return Err(Self::error_from_response(response).await);
        }
    }

    /// Send a request and decode the JSON response body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Renew the access token now, using the stored refresh token.
    pub async fn refresh_session(&self) -> Result<(), ApiError> {
        let current = self.sessions.access_token().await?;
        self.renew_after_unauthorized(current.as_deref()).await
    }

    async fn renew_after_unauthorized(&self, rejected_token: Option<&str>) -> Result<(), ApiError> {
        let _gate = self.refresh_gate.lock().await;

        let session = self.sessions.get().await?;

        // Another request renewed the session while this one waited
        if let Some(session) = &session {
            if rejected_token != Some(session.access_token()) {
                debug!("Session already renewed by a concurrent request");
                return Ok(());
            }
        }

        let Some(refresh_token) = session
            .as_ref()
            .and_then(|s| s.refresh_token())
            .map(str::to_string)
        else {
            warn!("Unauthorized response and no refresh token stored");
            self.sessions.clear().await?;
            return Err(ApiError::SessionExpired);
        };

        let reason = match self.request_access_token(&refresh_token).await {
            Ok(access) => match self.sessions.replace_access_token(access).await {
                Ok(()) => {
                    debug!("Access token refreshed");
                    return Ok(());
                }
                // unusable token in an otherwise successful response
                Err(DomainError::Validation(reason)) => reason,
                Err(e) => return Err(e.into()),
            },
            Err(e) => e.to_string(),
        };

        warn!("Token refresh failed: {}", reason);
        self.sessions.clear().await?;
        Err(ApiError::SessionExpired)
    }

    // Bypasses `send` so a failing refresh can never recurse
    async fn request_access_token(&self, refresh_token: &str) -> Result<String, ApiError> {
        let response = self
            .http
            .post(self.build_url(TOKEN_REFRESH_PATH))
            .json(&json!({ "refresh": refresh_token }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let bytes = response.bytes().await?;
        let body: RefreshResponse = serde_json::from_slice(&bytes)?;
        Ok(body.access)
    }

    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Response, ApiError> {
        let url = self.build_url(request.path());
        debug!("{} {}", request.method(), url);

        let mut builder = self
            .http
            .request(request.method().clone(), url)
            .headers(request.headers().clone());

        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body() {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = ErrorPayload::parse(&body).into_message(status);
        debug!("Request failed with status {}: {}", status, message);
        ApiError::Status { status, message }
    }
}
