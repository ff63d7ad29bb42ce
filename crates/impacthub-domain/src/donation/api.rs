use async_trait::async_trait;

use super::amount::DonationAmount;
use super::order::{DonationOrder, DonationRecord, DonationVerification};
use crate::shared::{DomainError, ProjectId};

/// Backend donation endpoints
#[async_trait]
pub trait DonationApi: Send + Sync {
    async fn create_order(
        &self,
        project_id: ProjectId,
        amount: DonationAmount,
    ) -> Result<DonationOrder, DomainError>;

    /// The backend checks the gateway signature and marks the donation paid.
    async fn verify_payment(&self, verification: &DonationVerification) -> Result<(), DomainError>;

    async fn my_donations(&self) -> Result<Vec<DonationRecord>, DomainError>;
}
