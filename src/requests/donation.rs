use rust_decimal::Decimal;
use serde::Deserialize;

/// Donor form posted from the donation page.
#[derive(Debug, Deserialize)]
pub struct DonationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub amount: Decimal,
}

/// Query attached to the browser's return leg from the gateway.
#[derive(Debug, Deserialize)]
pub struct ReturnQuery {
    pub m_payment_id: Option<String>,
}
