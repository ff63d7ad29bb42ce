use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use tokio::sync::{oneshot, OnceCell};

use impacthub_domain::donation::{
    CheckoutRequest, GatewayOutcome, GatewayPayment, PaymentGateway, GATEWAY_UNAVAILABLE_MESSAGE,
};
use impacthub_domain::DomainError;

use crate::config::ClientConfig;

/// Hands the widget's verdict back to the waiting donation flow.
///
/// Consumed on use, so a checkout resolves at most once. Dropping it
/// without answering counts as a dismissal.
pub struct CheckoutCallback {
    sender: oneshot::Sender<GatewayOutcome>,
}

impl CheckoutCallback {
    /// A callback together with the receiver its answer arrives on
    pub fn pair() -> (Self, oneshot::Receiver<GatewayOutcome>) {
        let (sender, receiver) = oneshot::channel();
        (Self { sender }, receiver)
    }

    pub fn paid(self, payment: GatewayPayment) {
        if self.sender.send(GatewayOutcome::Paid(payment)).is_err() {
            warn!("Checkout result arrived after the flow stopped waiting");
        }
    }

    pub fn dismiss(self) {
        let _ = self.sender.send(GatewayOutcome::Dismissed);
    }
}

/// The user-facing payment surface, a browser popup or a terminal prompt
pub trait CheckoutWidget: Send + Sync {
    /// Show the checkout and answer through `callback` whenever the user is done.
    fn present(&self, request: CheckoutRequest, callback: CheckoutCallback);
}

/// Payment gateway backed by the hosted checkout script.
///
/// The script is fetched once per process; later loads reuse the result.
pub struct HostedCheckoutGateway {
    http: Client,
    script_url: String,
    loaded: OnceCell<()>,
    widget: Arc<dyn CheckoutWidget>,
    callback_timeout: Duration,
}

impl HostedCheckoutGateway {
    pub fn new(config: &ClientConfig, widget: Arc<dyn CheckoutWidget>) -> Result<Self, DomainError> {
        let timeouts = config.timeouts();
        let http = Client::builder()
            .timeout(timeouts.gateway_load)
            .connect_timeout(timeouts.connect)
            .build()
            .map_err(|e| DomainError::Infrastructure(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            script_url: config.gateway_script_url().to_string(),
            loaded: OnceCell::new(),
            widget,
            callback_timeout: timeouts.gateway_callback,
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    async fn fetch_script(&self) -> Result<(), DomainError> {
        let unavailable = |reason: String| {
            warn!("Payment widget unavailable: {}", reason);
            DomainError::GatewayUnavailable(GATEWAY_UNAVAILABLE_MESSAGE.to_string())
        };

        let response = self
            .http
            .get(&self.script_url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("status {}", response.status())));
        }

        let script = response.bytes().await.map_err(|e| unavailable(e.to_string()))?;
        if script.is_empty() {
            return Err(unavailable("empty script".to_string()));
        }

        info!("Payment widget loaded from {}", self.script_url);
        Ok(())
    }
}

#[async_trait]
impl PaymentGateway for HostedCheckoutGateway {
    async fn load(&self) -> Result<(), DomainError> {
        self.loaded
            .get_or_try_init(|| self.fetch_script())
            .await
            .map(|_| ())
    }

    async fn open(&self, request: CheckoutRequest) -> Result<GatewayOutcome, DomainError> {
        if !self.is_loaded() {
            return Err(DomainError::GatewayUnavailable(
                GATEWAY_UNAVAILABLE_MESSAGE.to_string(),
            ));
        }

        let order_id = request.order_id.clone();
        let (callback, receiver) = CheckoutCallback::pair();
        debug!("Opening checkout for order {}", order_id);
        self.widget.present(request, callback);

        match tokio::time::timeout(self.callback_timeout, receiver).await {
            Ok(Ok(outcome)) => Ok(outcome),
            // Widget dropped its callback without answering
            Ok(Err(_)) => Ok(GatewayOutcome::Dismissed),
            Err(_) => {
                warn!("Checkout for order {} got no answer in time", order_id);
                Ok(GatewayOutcome::TimedOut)
            }
        }
    }
}
