use std::sync::Arc;

use impacthub_domain::session::SessionStore;
use impacthub_domain::DomainError;
use impacthub_infrastructure::config::ClientConfig;
use impacthub_infrastructure::gateway::{CheckoutWidget, HostedCheckoutGateway};
use impacthub_infrastructure::http::ApiClient;
use impacthub_infrastructure::persistence::{Database, SqliteSessionStore};

use crate::application::services::{AuthService, DonationService, ProjectService};

pub struct Services {
    pub auth: AuthService,
    pub projects: ProjectService,
    pub donations: DonationService,
}

pub struct AppState {
    pub config: ClientConfig,
    pub sessions: Arc<dyn SessionStore>,
    pub services: Services,
}

impl AppState {
    /// Open the session database and wire the services to the backend.
    pub async fn initialize(
        config: ClientConfig,
        widget: Arc<dyn CheckoutWidget>,
    ) -> Result<Self, DomainError> {
        let db = Database::new(&config.database_path()).await?;
        db.run_migrations().await?;

        let sessions: Arc<dyn SessionStore> = Arc::new(SqliteSessionStore::new(db.pool().clone()));
        Self::with_session_store(config, sessions, widget)
    }

    pub fn with_session_store(
        config: ClientConfig,
        sessions: Arc<dyn SessionStore>,
        widget: Arc<dyn CheckoutWidget>,
    ) -> Result<Self, DomainError> {
        let api = Arc::new(ApiClient::new(&config, sessions.clone())?);
        let gateway = Arc::new(HostedCheckoutGateway::new(&config, widget)?);

        let services = Services {
            auth: AuthService::new(api.clone(), sessions.clone()),
            projects: ProjectService::new(api.clone()),
            donations: DonationService::new(api, gateway),
        };

        Ok(Self {
            config,
            sessions,
            services,
        })
    }
}
