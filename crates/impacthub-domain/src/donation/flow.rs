use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::amount::DonationAmount;
use super::order::{DonationOrder, DonationVerification, GatewayPayment};
use crate::shared::{DomainError, ProjectId};

pub const GATEWAY_UNAVAILABLE_MESSAGE: &str = "Failed to load payment gateway.";
pub const ORDER_FAILED_MESSAGE: &str = "Failed to initiate donation.";
pub const VERIFICATION_FAILED_MESSAGE: &str = "Payment verification failed.";
pub const CHECKOUT_TIMED_OUT_MESSAGE: &str =
    "No payment confirmation was received. If you completed the payment, check your donations before trying again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DonationState {
    Idle,
    AmountEntry,
    Creating,
    AwaitingGatewayCallback,
    Verifying,
    Succeeded,
    Failed,
}

impl std::fmt::Display for DonationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// State machine of one donation dialog.
///
/// Holds no I/O: the caller performs each network or widget step and reports
/// the result back through the matching transition. Every transition checks
/// the current state so steps cannot run out of order.
#[derive(Debug, Clone)]
pub struct DonationFlow {
    project_id: ProjectId,
    state: DonationState,
    amount: DonationAmount,
    order: Option<DonationOrder>,
    last_error: Option<DomainError>,
    // orders already handed to the widget, and orders already submitted for verification
    invoked_orders: HashSet<String>,
    verified_orders: HashSet<String>,
}

impl DonationFlow {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            state: DonationState::Idle,
            amount: DonationAmount::default(),
            order: None,
            last_error: None,
            invoked_orders: HashSet::new(),
            verified_orders: HashSet::new(),
        }
    }

    /// Idle → AmountEntry, with the default amount pre-filled
    pub fn open(&mut self) -> Result<(), DomainError> {
        self.expect_state(
            &[DonationState::Idle, DonationState::Succeeded],
            "open the donation dialog",
        )?;
        self.amount = DonationAmount::default();
        self.last_error = None;
        self.order = None;
        self.state = DonationState::AmountEntry;
        Ok(())
    }

    /// Close the dialog; not possible while a step is in flight
    pub fn close(&mut self) -> Result<(), DomainError> {
        self.expect_state(
            &[
                DonationState::AmountEntry,
                DonationState::Failed,
                DonationState::Succeeded,
            ],
            "close the donation dialog",
        )?;
        self.order = None;
        self.last_error = None;
        self.state = DonationState::Idle;
        Ok(())
    }

    pub fn set_amount(&mut self, amount: DonationAmount) -> Result<(), DomainError> {
        self.expect_state(
            &[DonationState::AmountEntry, DonationState::Failed],
            "change the amount",
        )?;
        self.amount = amount;
        Ok(())
    }

    /// AmountEntry → Creating.
    ///
    /// A below-minimum amount is rejected here, leaving the flow in
    /// AmountEntry, so no network call can follow.
    pub fn submit(&mut self) -> Result<DonationAmount, DomainError> {
        self.expect_state(
            &[DonationState::AmountEntry, DonationState::Failed],
            "submit a donation",
        )?;

        self.state = DonationState::AmountEntry;
        self.last_error = None;

        if let Err(e) = self.amount.validate() {
            self.last_error = Some(e.clone());
            return Err(e);
        }

        self.state = DonationState::Creating;
        Ok(self.amount)
    }

    /// The widget could not be loaded or opened; back to AmountEntry
    pub fn gateway_unavailable(&mut self) -> DomainError {
        let error = DomainError::GatewayUnavailable(GATEWAY_UNAVAILABLE_MESSAGE.to_string());
        if matches!(
            self.state,
            DonationState::Creating | DonationState::AwaitingGatewayCallback
        ) {
            self.order = None;
            self.state = DonationState::AmountEntry;
            self.last_error = Some(error.clone());
        }
        error
    }

    /// Order creation failed; back to AmountEntry so the user can retry
    pub fn order_failed(&mut self) -> DomainError {
        let error = DomainError::OrderCreationFailed(ORDER_FAILED_MESSAGE.to_string());
        if self.state == DonationState::Creating {
            self.state = DonationState::AmountEntry;
            self.last_error = Some(error.clone());
        }
        error
    }

    /// Creating → AwaitingGatewayCallback.
    ///
    /// Fails if this order was already handed to the widget; the flow then
    /// returns to AmountEntry so a fresh order can be requested.
    pub fn order_created(&mut self, order: DonationOrder) -> Result<&DonationOrder, DomainError> {
        self.expect_state(&[DonationState::Creating], "invoke the payment widget")?;

        if !self.invoked_orders.insert(order.order_id.clone()) {
            let error = DomainError::InvalidState(format!(
                "Order {} was already sent to the payment widget",
                order.order_id
            ));
            self.state = DonationState::AmountEntry;
            self.last_error = Some(error.clone());
            return Err(error);
        }

        self.state = DonationState::AwaitingGatewayCallback;
        let order = self.order.insert(order);
        Ok(&*order)
    }

    /// The user closed the widget: AmountEntry, no error shown
    pub fn gateway_dismissed(&mut self) -> Result<(), DomainError> {
        self.expect_state(
            &[DonationState::AwaitingGatewayCallback],
            "dismiss the payment widget",
        )?;
        self.order = None;
        self.last_error = None;
        self.state = DonationState::AmountEntry;
        Ok(())
    }

    /// The widget never answered: back to AmountEntry. The order stays spent,
    /// a payment may still have gone through for it.
    pub fn gateway_timed_out(&mut self) -> Result<(), DomainError> {
        self.expect_state(
            &[DonationState::AwaitingGatewayCallback],
            "give up on the payment widget",
        )?;
        self.order = None;
        self.last_error = None;
        self.state = DonationState::AmountEntry;
        Ok(())
    }

    /// AwaitingGatewayCallback → Verifying.
    ///
    /// Returns the verification to submit. A second callback for the same
    /// order is refused so verification goes out at most once.
    pub fn payment_captured(
        &mut self,
        payment: GatewayPayment,
    ) -> Result<DonationVerification, DomainError> {
        self.expect_state(
            &[DonationState::AwaitingGatewayCallback],
            "verify a payment",
        )?;

        let order = self.order.as_ref().ok_or_else(|| {
            DomainError::InvalidState("No order is awaiting payment".to_string())
        })?;

        if !self.verified_orders.insert(order.order_id.clone()) {
            return Err(DomainError::InvalidState(format!(
                "Payment for order {} was already submitted",
                order.order_id
            )));
        }

        let verification = DonationVerification::new(order.donation_id, payment);
        self.state = DonationState::Verifying;
        Ok(verification)
    }

    /// Verifying → Succeeded
    pub fn verification_succeeded(&mut self) -> Result<(), DomainError> {
        self.expect_state(&[DonationState::Verifying], "complete a donation")?;
        self.order = None;
        self.last_error = None;
        self.state = DonationState::Succeeded;
        Ok(())
    }

    /// Verifying → Failed. The order is spent; another attempt needs a new one.
    pub fn verification_failed(&mut self) -> DomainError {
        let error =
            DomainError::PaymentVerificationFailed(VERIFICATION_FAILED_MESSAGE.to_string());
        if self.state == DonationState::Verifying {
            self.order = None;
            self.state = DonationState::Failed;
            self.last_error = Some(error.clone());
        }
        error
    }

    fn expect_state(&self, allowed: &[DonationState], action: &str) -> Result<(), DomainError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(DomainError::InvalidState(format!(
                "Cannot {} while the donation is in state {}",
                action, self.state
            )))
        }
    }

    // Getters
    pub fn project_id(&self) -> ProjectId {
        self.project_id
    }

    pub fn state(&self) -> DonationState {
        self.state
    }

    pub fn amount(&self) -> DonationAmount {
        self.amount
    }

    pub fn current_order(&self) -> Option<&DonationOrder> {
        self.order.as_ref()
    }

    pub fn last_error(&self) -> Option<&DomainError> {
        self.last_error.as_ref()
    }

    /// Whether the dialog shows a spinner and blocks input
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            DonationState::Creating | DonationState::Verifying
        )
    }
}
