mod amount;
mod api;
mod flow;
mod gateway;
mod order;


pub use amount::{
    DonationAmount, CURRENCY, CURRENCY_SYMBOL, DEFAULT_DONATION_MINOR_UNITS,
    MIN_DONATION_MINOR_UNITS, MINOR_UNITS_PER_MAJOR,
};
pub use api::DonationApi;
pub use flow::{
    DonationFlow, DonationState, CHECKOUT_TIMED_OUT_MESSAGE, GATEWAY_UNAVAILABLE_MESSAGE,
    ORDER_FAILED_MESSAGE, VERIFICATION_FAILED_MESSAGE,
};
pub use gateway::{CheckoutRequest, GatewayOutcome, PaymentGateway, CHECKOUT_DESCRIPTION};
pub use order::{
    DonationOrder, DonationRecord, DonationStatus, DonationVerification, GatewayPayment,
};
