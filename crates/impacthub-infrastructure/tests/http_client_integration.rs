use std::sync::atomic::Ordering;
use std::sync::Arc;

use impacthub_domain::auth::{AuthApi, Credentials, Registration};
use impacthub_domain::donation::{DonationAmount, DonationApi, DonationStatus, DonationVerification};
use impacthub_domain::project::{ProjectApi, SupportOutcome};
use impacthub_domain::session::SessionStore;
use impacthub_domain::{DomainError, ProjectId};
use impacthub_infrastructure::http::{ApiError, ApiRequest};
use impacthub_infrastructure::persistence::InMemorySessionStore;

mod test_helpers;

use test_helpers::{FRESH_ACCESS, STALE_ACCESS, VALID_REFRESH};

#[tokio::test]
async fn authorized_request_carries_bearer_token() {
    let server = test_helpers::spawn_backend().await;
    server.backend.accept_token(STALE_ACCESS);
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = server.client(store);

    let projects = client.list_projects().await.expect("list projects");

    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].title, "Clean Water");
    assert_eq!(server.backend.refresh_count(), 0);
}

#[tokio::test]
async fn unauthorized_request_refreshes_and_replays_once() {
    let server = test_helpers::spawn_backend().await;
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = server.client(store.clone());

    let projects = client.list_projects().await.expect("replayed request");

    assert_eq!(projects.len(), 1);
    assert_eq!(server.backend.refresh_count(), 1);
    assert_eq!(server.backend.project_count(), 2);
    assert_eq!(
        store.access_token().await.unwrap().as_deref(),
        Some(FRESH_ACCESS)
    );
    // refresh token is kept
    assert_eq!(
        store.refresh_token().await.unwrap().as_deref(),
        Some(VALID_REFRESH)
    );
}

#[tokio::test]
async fn failed_refresh_clears_session() {
    let server = test_helpers::spawn_backend().await;
    server.backend.refresh_succeeds.store(false, Ordering::SeqCst);
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = server.client(store.clone());

    let result = client.send(ApiRequest::get("/projects/")).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(server.backend.refresh_count(), 1);
    assert_eq!(server.backend.project_count(), 1);
    assert!(store.get().await.unwrap().is_none());
}

#[tokio::test]
async fn blank_refreshed_token_clears_session() {
    let server = test_helpers::spawn_backend().await;
    server.backend.refresh_blank.store(true, Ordering::SeqCst);
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = server.client(store.clone());

    let result = client.send(ApiRequest::get("/projects/")).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(server.backend.refresh_count(), 1);
    assert_eq!(server.backend.project_count(), 1);
    assert!(store.get().await.unwrap().is_none());
}

#[tokio::test]
async fn missing_refresh_token_expires_without_refresh_call() {
    let server = test_helpers::spawn_backend().await;
    let store = test_helpers::store_with(STALE_ACCESS, None).await;
    let client = server.client(store.clone());

    let result = client.list_projects().await;

    assert!(matches!(result, Err(DomainError::SessionExpired(_))));
    assert_eq!(server.backend.refresh_count(), 0);
    assert!(store.get().await.unwrap().is_none());
}

#[tokio::test]
async fn second_unauthorized_after_refresh_expires_session() {
    let server = test_helpers::spawn_backend().await;
    server.backend.accept_refreshed.store(false, Ordering::SeqCst);
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = server.client(store);

    let result = client.send(ApiRequest::get("/projects/")).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    // first attempt plus one replay, never a second refresh
    assert_eq!(server.backend.refresh_count(), 1);
    assert_eq!(server.backend.project_count(), 2);
}

#[tokio::test]
async fn concurrent_unauthorized_requests_share_one_refresh() {
    let server = test_helpers::spawn_backend().await;
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = Arc::new(server.client(store));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.list_projects().await })
        })
        .collect();

    for handle in handles {
        handle.await.expect("join").expect("request succeeds");
    }

    assert_eq!(server.backend.refresh_count(), 1);
}

#[tokio::test]
async fn login_unauthorized_shows_backend_message() {
    let server = test_helpers::spawn_backend().await;
    let client = server.client(Arc::new(InMemorySessionStore::new()));

    let credentials = Credentials::new("asha", "wrong-pass").unwrap();
    let result = client.login(&credentials).await;

    assert_eq!(
        result.unwrap_err(),
        DomainError::RequestFailed("No active account found with the given credentials".to_string())
    );
    assert_eq!(server.backend.refresh_count(), 0);
}

#[tokio::test]
async fn login_returns_token_pair_and_profile() {
    let server = test_helpers::spawn_backend().await;
    let client = server.client(Arc::new(InMemorySessionStore::new()));

    let credentials = Credentials::new("asha", "secret-pass").unwrap();
    let grant = client.login(&credentials).await.expect("login");

    assert_eq!(grant.session.access_token(), STALE_ACCESS);
    assert_eq!(grant.session.refresh_token(), Some(VALID_REFRESH));
    assert_eq!(grant.user.map(|u| u.username), Some("asha".to_string()));
}

#[tokio::test]
async fn register_error_uses_first_field_message() {
    let server = test_helpers::spawn_backend().await;
    let client = server.client(Arc::new(InMemorySessionStore::new()));

    let registration =
        Registration::new("taken", "taken@example.org", "long-password", "long-password").unwrap();
    let result = client.register(&registration).await;

    assert_eq!(
        result.unwrap_err().message(),
        "A user with that username already exists."
    );
}

#[tokio::test]
async fn verify_token_reports_expiry_without_refreshing() {
    let server = test_helpers::spawn_backend().await;
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = server.client(store.clone());

    let result = client.verify_token().await;

    assert!(matches!(result, Err(DomainError::SessionExpired(_))));
    assert_eq!(server.backend.refresh_count(), 0);
    // verification alone does not drop the session
    assert!(store.get().await.unwrap().is_some());
}

#[tokio::test]
async fn missing_project_maps_to_not_found() {
    let server = test_helpers::spawn_backend().await;
    let client = server.client(Arc::new(InMemorySessionStore::new()));

    let result = client.get_project(ProjectId::new(99)).await;

    assert_eq!(result.unwrap_err(), DomainError::NotFound("Not found.".to_string()));
}

#[tokio::test]
async fn support_reports_already_supported() {
    let server = test_helpers::spawn_backend().await;
    server.backend.accept_token(STALE_ACCESS);
    let store = test_helpers::store_with(STALE_ACCESS, Some(VALID_REFRESH)).await;
    let client = server.client(store);

    let outcome = client.support_project(ProjectId::new(1)).await.unwrap();

    assert_eq!(outcome, SupportOutcome::AlreadySupported);
}

#[tokio::test]
async fn donation_order_and_verification_wire_format() {
    let server = test_helpers::spawn_backend().await;
    let client = server.client(Arc::new(InMemorySessionStore::new()));

    let order = client
        .create_order(ProjectId::new(1), DonationAmount::from_major_units(250))
        .await
        .expect("create order");

    assert_eq!(order.order_id, "order_abc");
    assert_eq!(order.gateway_key, "rzp_test_key");
    assert_eq!(order.amount_minor_units(), 25_000);
    assert_eq!(
        server.backend.order_bodies.lock().unwrap()[0],
        serde_json::json!({ "project_id": 1, "amount": 250 })
    );

    let verification = DonationVerification {
        donation_id: order.donation_id,
        gateway_payment_id: "pay_1".to_string(),
        gateway_order_id: order.order_id.clone(),
        gateway_signature: "good-signature".to_string(),
    };
    client.verify_payment(&verification).await.expect("verified");

    let bodies = server.backend.verify_bodies.lock().unwrap().clone();
    assert_eq!(
        bodies[0],
        serde_json::json!({
            "donation_id": 42,
            "razorpay_payment_id": "pay_1",
            "razorpay_order_id": "order_abc",
            "razorpay_signature": "good-signature"
        })
    );
}

#[tokio::test]
async fn rejected_signature_fails_verification() {
    let server = test_helpers::spawn_backend().await;
    let client = server.client(Arc::new(InMemorySessionStore::new()));

    let verification = DonationVerification {
        donation_id: impacthub_domain::DonationId::new(42),
        gateway_payment_id: "pay_1".to_string(),
        gateway_order_id: "order_abc".to_string(),
        gateway_signature: "forged".to_string(),
    };

    assert!(client.verify_payment(&verification).await.is_err());
}

#[tokio::test]
async fn donation_history_parses_decimal_amounts() {
    let server = test_helpers::spawn_backend().await;
    let client = server.client(Arc::new(InMemorySessionStore::new()));

    let donations = client.my_donations().await.expect("history");

    assert_eq!(donations.len(), 1);
    assert_eq!(donations[0].amount, "250.50");
    assert_eq!(donations[0].status, DonationStatus::Paid);
}
