use serde_json::json;

use super::read_line;
use crate::application::services::SessionStatus;
use crate::presentation::error::CommandError;
use crate::presentation::output::Printer;
use crate::presentation::state::AppState;

pub async fn login(
    state: &AppState,
    printer: &Printer,
    username: String,
    password: Option<String>,
) -> Result<(), CommandError> {
    let password = match password {
        Some(p) => p,
        None => read_line("Password: ")?,
    };

    let user = state.services.auth.login(&username, &password).await?;

    let name = user
        .as_ref()
        .map(|u| u.display_name())
        .unwrap_or_else(|| username.clone());
    printer.emit(&json!({ "logged_in": true, "user": user }), || {
        format!("Welcome back, {}!", name)
    })
}

pub async fn register(
    state: &AppState,
    printer: &Printer,
    username: String,
    email: String,
    password: Option<String>,
) -> Result<(), CommandError> {
    let (password, confirmation) = match password {
        Some(p) => (p.clone(), p),
        None => (read_line("Password: ")?, read_line("Confirm password: ")?),
    };

    let user = state
        .services
        .auth
        .register(&username, &email, &password, &confirmation)
        .await?;

    printer.emit(&user, || {
        format!(
            "Account '{}' created. Run `impacthub login {}` to sign in.",
            user.username, user.username
        )
    })
}

pub async fn logout(state: &AppState, printer: &Printer) -> Result<(), CommandError> {
    state.services.auth.logout().await?;
    printer.emit(&json!({ "logged_in": false }), || "Logged out.".to_string())
}

pub async fn status(state: &AppState, printer: &Printer) -> Result<(), CommandError> {
    let status = state.services.auth.restore_session().await?;

    let (label, text) = match status {
        SessionStatus::Anonymous => ("anonymous", "Not logged in."),
        SessionStatus::Active => ("active", "Logged in."),
        SessionStatus::Expired => ("expired", "Session expired. Please login again."),
    };
    printer.emit(
        &json!({ "session": label, "api_url": state.config.api_base_url() }),
        || format!("{} ({})", text, state.config.api_base_url()),
    )
}
