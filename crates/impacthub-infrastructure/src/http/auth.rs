use async_trait::async_trait;
use impacthub_domain::auth::{AuthApi, Credentials, LoginGrant, Registration, User};
use impacthub_domain::session::Session;
use impacthub_domain::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ApiClient, ApiRequest};

#[derive(Deserialize)]
struct LoginResponse {
    access: String,
    #[serde(default)]
    refresh: Option<String>,
    #[serde(default)]
    user: Option<User>,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct RegisterResponse {
    user: User,
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginGrant, DomainError> {
        let request = ApiRequest::post("/login/")
            .json(credentials)?
            .without_refresh();
        let body: LoginResponse = self.send_json(request).await?;

        Ok(LoginGrant {
            session: Session::new(body.access, body.refresh)?,
            user: body.user,
        })
    }

    async fn register(&self, registration: &Registration) -> Result<User, DomainError> {
        let request = ApiRequest::post("/register/")
            .json(&RegisterBody {
                username: registration.username(),
                email: registration.email(),
                password: registration.password(),
            })?
            .without_refresh();
        let body: RegisterResponse = self.send_json(request).await?;
        Ok(body.user)
    }

    async fn verify_token(&self) -> Result<(), DomainError> {
        let token = self
            .sessions()
            .access_token()
            .await?
            .ok_or_else(|| DomainError::SessionExpired("Not logged in".to_string()))?;

        // The token travels in the body, so a replay after refresh would
        // re-send the stale one; the caller refreshes explicitly instead
        let request = ApiRequest::post("/token/verify/")
            .json(&json!({ "token": token }))?
            .without_refresh();

        match self.send(request).await {
            Ok(_) => Ok(()),
            Err(super::ApiError::Status { status: 401, .. }) => Err(DomainError::SessionExpired(
                "Access token is no longer valid".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn refresh_session(&self) -> Result<(), DomainError> {
        Ok(ApiClient::refresh_session(self).await?)
    }
}
