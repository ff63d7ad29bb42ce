use async_trait::async_trait;
use impacthub_domain::donation::{
    DonationAmount, DonationApi, DonationOrder, DonationRecord, DonationVerification, CURRENCY,
};
use impacthub_domain::{DomainError, DonationId, ProjectId};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use super::{ApiClient, ApiRequest};

#[derive(Deserialize)]
struct CreateOrderResponse {
    order_id: String,
    #[serde(alias = "gateway_key", alias = "key")]
    razorpay_key: String,
    donation_id: DonationId,
}

#[derive(Deserialize)]
struct VerifyResponse {
    status: String,
}

impl ApiClient {
    /// Verification body with gateway fields named `<prefix>_payment_id` etc.
    fn verification_body(&self, verification: &DonationVerification) -> Value {
        let prefix = self.gateway_field_prefix();
        let mut body = Map::new();
        body.insert("donation_id".to_string(), json!(verification.donation_id));
        body.insert(
            format!("{}_payment_id", prefix),
            json!(verification.gateway_payment_id),
        );
        body.insert(
            format!("{}_order_id", prefix),
            json!(verification.gateway_order_id),
        );
        body.insert(
            format!("{}_signature", prefix),
            json!(verification.gateway_signature),
        );
        Value::Object(body)
    }
}

#[async_trait]
impl DonationApi for ApiClient {
    async fn create_order(
        &self,
        project_id: ProjectId,
        amount: DonationAmount,
    ) -> Result<DonationOrder, DomainError> {
        let request = ApiRequest::post("/donations/create_order/").json(&json!({
            "project_id": project_id,
            "amount": amount.to_wire_value(),
        }))?;
        let body: CreateOrderResponse = self.send_json(request).await?;

        Ok(DonationOrder {
            order_id: body.order_id,
            donation_id: body.donation_id,
            amount,
            currency: CURRENCY.to_string(),
            gateway_key: body.razorpay_key,
        })
    }

    async fn verify_payment(&self, verification: &DonationVerification) -> Result<(), DomainError> {
        let request =
            ApiRequest::post("/donations/verify_payment/").json(&self.verification_body(verification))?;
        let body: VerifyResponse = self.send_json(request).await?;

        if body.status == "success" {
            Ok(())
        } else {
            Err(DomainError::PaymentVerificationFailed(format!(
                "Unexpected verification status '{}'",
                body.status
            )))
        }
    }

    async fn my_donations(&self) -> Result<Vec<DonationRecord>, DomainError> {
        Ok(self.send_json(ApiRequest::get("/donations/my/")).await?)
    }
}
