use std::sync::Arc;

use impacthub_domain::donation::{
    CheckoutRequest, DonationAmount, DonationApi, DonationFlow, DonationRecord, GatewayOutcome,
    PaymentGateway,
};
use impacthub_domain::{DomainError, DonationId};
use tracing::{info, warn};

/// How a submitted donation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonationOutcome {
    Completed {
        donation_id: DonationId,
        amount: DonationAmount,
    },
    /// The user closed the payment widget; the dialog is back at amount entry
    Dismissed,
    /// The widget never answered. Whether money moved is unknown until the
    /// donation shows up in the history.
    TimedOut { donation_id: DonationId },
}

/// Drives a [`DonationFlow`] through the backend and the payment widget
pub struct DonationService {
    api: Arc<dyn DonationApi>,
    gateway: Arc<dyn PaymentGateway>,
}

impl DonationService {
    pub fn new(api: Arc<dyn DonationApi>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { api, gateway }
    }

    /// Run one donation attempt for the amount currently in `flow`.
    ///
    /// Every failure leaves `flow` in a state from which the user can retry,
    /// with the error it returns also recorded as the flow's last error.
    pub async fn submit(
        &self,
        flow: &mut DonationFlow,
        project_title: &str,
    ) -> Result<DonationOutcome, DomainError> {
        let amount = flow.submit()?;

        if let Err(e) = self.gateway.load().await {
            warn!(error = %e, "Payment widget failed to load");
            return Err(flow.gateway_unavailable());
        }

        let order = match self.api.create_order(flow.project_id(), amount).await {
            Ok(order) => order,
            Err(e) => {
                warn!(project_id = %flow.project_id(), error = %e, "Order creation failed");
                let failure = flow.order_failed();
                return Err(if e.is_session_expired() { e } else { failure });
            }
        };
        let donation_id = order.donation_id;
        info!(order_id = %order.order_id, donation_id = %donation_id, "Donation order created");

        let request = CheckoutRequest::for_order(flow.order_created(order)?, project_title);

        let payment = match self.gateway.open(request).await {
            Ok(GatewayOutcome::Paid(payment)) => payment,
            Ok(GatewayOutcome::Dismissed) => {
                info!(donation_id = %donation_id, "Payment widget dismissed");
                flow.gateway_dismissed()?;
                return Ok(DonationOutcome::Dismissed);
            }
            Ok(GatewayOutcome::TimedOut) => {
                warn!(donation_id = %donation_id, "Payment widget gave no answer");
                flow.gateway_timed_out()?;
                return Ok(DonationOutcome::TimedOut { donation_id });
            }
            Err(e) => {
                warn!(error = %e, "Payment widget failed");
                return Err(flow.gateway_unavailable());
            }
        };

        let verification = flow.payment_captured(payment)?;

        match self.api.verify_payment(&verification).await {
            Ok(()) => {
                flow.verification_succeeded()?;
                info!(donation_id = %donation_id, "Donation verified");
                Ok(DonationOutcome::Completed {
                    donation_id,
                    amount,
                })
            }
            Err(e) => {
                warn!(donation_id = %donation_id, error = %e, "Payment verification failed");
                let failure = flow.verification_failed();
                Err(if e.is_session_expired() { e } else { failure })
            }
        }
    }

    pub async fn history(&self) -> Result<Vec<DonationRecord>, DomainError> {
        self.api.my_donations().await
    }
}
