mod auth;
mod client;
mod donations;
mod error;
mod error_payload;
mod projects;
mod request;

pub use client::{ApiClient, TOKEN_REFRESH_PATH};
pub use error::{ApiError, SESSION_EXPIRED_MESSAGE};
pub use error_payload::{ErrorPayload, GENERIC_ERROR_MESSAGE};
pub use request::ApiRequest;
