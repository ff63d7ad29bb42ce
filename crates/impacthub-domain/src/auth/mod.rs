mod api;

use serde::{Deserialize, Serialize};

use crate::session::Session;
use crate::shared::{DomainError, UserId};

pub use api::AuthApi;

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Public profile of a platform user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self, DomainError> {
        let username = username.into();
        let password = password.into();

        if username.trim().is_empty() || password.is_empty() {
            return Err(DomainError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        Ok(Self { username, password })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Sign-up form, checked locally before it is sent
#[derive(Clone)]
pub struct Registration {
    username: String,
    email: String,
    password: String,
}

impl Registration {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        password_confirmation: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let username = username.into();
        let email = email.into();
        let password = password.into();
        let password_confirmation = password_confirmation.into();

        if username.trim().is_empty()
            || email.trim().is_empty()
            || password.is_empty()
            || password_confirmation.is_empty()
        {
            return Err(DomainError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        if password != password_confirmation {
            return Err(DomainError::Validation(
                "Passwords do not match".to_string(),
            ));
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters long",
                MIN_PASSWORD_LENGTH
            )));
        }

        if !looks_like_email(&email) {
            return Err(DomainError::Validation(
                "Please enter a valid email address".to_string(),
            ));
        }

        Ok(Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            password,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// `local@domain.tld`, each part non-blank and without whitespace
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => !local.is_empty() && !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Result of a successful login: the token pair plus the profile, when sent
#[derive(Debug, Clone)]
pub struct LoginGrant {
    pub session: Session,
    pub user: Option<User>,
}
