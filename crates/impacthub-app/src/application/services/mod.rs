mod auth_service;
mod donation_service;
mod project_service;


pub use auth_service::{AuthService, SessionStatus};
pub use donation_service::{DonationOutcome, DonationService};
pub use project_service::ProjectService;
