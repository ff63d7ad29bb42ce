use std::sync::Arc;

use impacthub_domain::donation::CheckoutRequest;
use impacthub_domain::session::{Session, SessionStore};
use impacthub_infrastructure::config::ClientConfig;
use impacthub_infrastructure::gateway::{CheckoutCallback, CheckoutWidget};
use impacthub_lib::application::services::SessionStatus;
use impacthub_lib::presentation::state::AppState;

struct NoopWidget;

impl CheckoutWidget for NoopWidget {
    fn present(&self, _request: CheckoutRequest, callback: CheckoutCallback) {
        callback.dismiss();
    }
}

fn config(dir: &std::path::Path) -> ClientConfig {
    ClientConfig::default()
        .with_api_base_url("http://127.0.0.1:9/api")
        .expect("valid url")
        .with_data_dir(dir.to_path_buf())
}

#[tokio::test]
async fn fresh_install_is_anonymous() {
    let dir = tempfile::tempdir().expect("temp dir");

    let state = AppState::initialize(config(dir.path()), Arc::new(NoopWidget))
        .await
        .expect("initialize");

    assert!(dir.path().join("session.db").exists());
    let status = state.services.auth.restore_session().await.expect("restore");
    assert_eq!(status, SessionStatus::Anonymous);
}

#[tokio::test]
async fn stored_session_survives_restart_until_logout() {
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let state = AppState::initialize(config(dir.path()), Arc::new(NoopWidget))
            .await
            .expect("initialize");
        let session =
            Session::new("access".to_string(), Some("refresh".to_string())).expect("session");
        state.sessions.set(&session).await.expect("store session");
    }

    let state = AppState::initialize(config(dir.path()), Arc::new(NoopWidget))
        .await
        .expect("reinitialize");
    assert!(state.services.auth.is_authenticated().await.expect("check"));

    state.services.auth.logout().await.expect("logout");
    assert!(!state.services.auth.is_authenticated().await.expect("check"));
}

#[tokio::test]
async fn unreachable_backend_keeps_session() {
    let dir = tempfile::tempdir().expect("temp dir");
    let state = AppState::initialize(config(dir.path()), Arc::new(NoopWidget))
        .await
        .expect("initialize");
    let session = Session::new("access".to_string(), Some("refresh".to_string())).expect("session");
    state.sessions.set(&session).await.expect("store session");

    let result = state.services.auth.restore_session().await;

    assert!(result.is_err());
    assert!(state.services.auth.is_authenticated().await.expect("check"));
}
