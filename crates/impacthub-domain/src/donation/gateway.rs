use async_trait::async_trait;

use super::order::{DonationOrder, GatewayPayment};
use crate::shared::DomainError;

pub const CHECKOUT_DESCRIPTION: &str = "Support this project";

/// Everything the payment widget needs to collect funds for one order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub key: String,
    pub order_id: String,
    pub amount_minor_units: u64,
    pub currency: String,
    /// Shown as the merchant line, the project title
    pub name: String,
    pub description: String,
}

impl CheckoutRequest {
    pub fn for_order(order: &DonationOrder, project_title: &str) -> Self {
        Self {
            key: order.gateway_key.clone(),
            order_id: order.order_id.clone(),
            amount_minor_units: order.amount_minor_units(),
            currency: order.currency.clone(),
            name: project_title.to_string(),
            description: CHECKOUT_DESCRIPTION.to_string(),
        }
    }
}

/// How a checkout ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOutcome {
    /// The widget captured the payment and returned its signed fields
    Paid(GatewayPayment),
    /// The user closed the widget before paying
    Dismissed,
    /// No answer arrived in time. The user may still have paid, so this is
    /// not a cancellation.
    TimedOut,
}

/// Third-party payment widget.
///
/// `load` makes the widget code available and must succeed before any order
/// is created. `open` resolves once the widget reports a payment or a
/// dismissal, or once it has stayed silent for too long.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn load(&self) -> Result<(), DomainError>;

    async fn open(&self, request: CheckoutRequest) -> Result<GatewayOutcome, DomainError>;
}
