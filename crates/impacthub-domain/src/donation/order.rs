use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::amount::DonationAmount;
use crate::shared::DonationId;

/// A server-signed payment order, created once per donation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationOrder {
    pub order_id: String,
    pub donation_id: DonationId,
    pub amount: DonationAmount,
    pub currency: String,
    pub gateway_key: String,
}

impl DonationOrder {
    pub fn amount_minor_units(&self) -> u64 {
        self.amount.minor_units()
    }
}

/// What the payment widget hands back after capturing funds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayPayment {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

/// The signed callback submitted to the backend for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationVerification {
    pub donation_id: DonationId,
    pub gateway_payment_id: String,
    pub gateway_order_id: String,
    pub gateway_signature: String,
}

impl DonationVerification {
    pub fn new(donation_id: DonationId, payment: GatewayPayment) -> Self {
        Self {
            donation_id,
            gateway_payment_id: payment.payment_id,
            gateway_order_id: payment.order_id,
            gateway_signature: payment.signature,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DonationStatus {
    Created,
    Paid,
    Failed,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DonationStatus::Created => "created",
            DonationStatus::Paid => "paid",
            DonationStatus::Failed => "failed",
            DonationStatus::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// One row of the "my donations" history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonationRecord {
    pub id: DonationId,
    #[serde(default)]
    pub project_title: String,
    /// Decimal amount as sent by the backend, e.g. `"100.00"`
    #[serde(deserialize_with = "decimal_as_string")]
    pub amount: String,
    pub status: DonationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn decimal_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected decimal amount, got {}",
            other
        ))),
    }
}
