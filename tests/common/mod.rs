use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use lungisa::config::{PayFastSettings, ServerSettings};
use lungisa::database::donations::DonationStore;
use lungisa::models::donation::{Donation, DonationError, DonationUpdate, NewDonation};

/// In-memory stand-in for the donation collection. Lookup is a linear scan
/// over the records, like the hosted store's token lookup.
#[derive(Default)]
pub struct MemoryDonationStore {
    records: Mutex<Vec<Donation>>,
}

impl MemoryDonationStore {
    pub fn records(&self) -> Vec<Donation> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl DonationStore for MemoryDonationStore {
    async fn create(&self, donation: NewDonation) -> Result<Donation, DonationError> {
        let mut records = self.records.lock().unwrap();
        // Mirrors the UNIQUE constraint on payment_token.
        if records
            .iter()
            .any(|d| d.payment_token == donation.payment_token)
        {
            return Err(DonationError::Database(sqlx::Error::RowNotFound));
        }

        let record = Donation {
            id: Uuid::new_v4(),
            payment_token: donation.payment_token,
            gateway_payment_id: donation.gateway_payment_id,
            donor_name: donation.donor_name,
            first_name: donation.first_name,
            last_name: donation.last_name,
            email: donation.email,
            amount: donation.amount,
            status: donation.status,
            payment_reference: None,
            timestamp: donation.timestamp,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Donation>, DonationError> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|d| d.payment_token == token).cloned())
    }

    async fn patch(&self, id: Uuid, update: DonationUpdate) -> Result<Donation, DonationError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(DonationError::NotFound { id })?;

        if let Some(gateway_payment_id) = update.gateway_payment_id {
            record.gateway_payment_id = Some(gateway_payment_id);
        }
        if let Some(status) = update.status {
            record.status = status;
        }
        if let Some(payment_reference) = update.payment_reference {
            record.payment_reference = Some(payment_reference);
        }
        if let Some(timestamp) = update.timestamp {
            record.timestamp = timestamp;
        }
        Ok(record.clone())
    }

    async fn list(&self) -> Result<Vec<Donation>, DonationError> {
        let mut records = self.records.lock().unwrap().clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

pub fn payfast_settings() -> PayFastSettings {
    PayFastSettings {
        merchant_id: "10000100".to_string(),
        merchant_key: "46f0cd694581a".to_string(),
        passphrase: "secret phrase".to_string(),
        process_url: "https://sandbox.payfast.co.za/eng/process".to_string(),
        return_url: "https://example.org/api/donations/success".to_string(),
        cancel_url: "https://example.org/api/donations/cancel".to_string(),
        notify_url: "https://example.org/api/donations/notify".to_string(),
        item_name: "Donation to Lungisa NPO".to_string(),
    }
}

pub fn server_settings() -> ServerSettings {
    ServerSettings {
        host: "127.0.0.1".to_string(),
        port: 8080,
        frontend_url: "https://example.org".to_string(),
        allowed_origin: None,
    }
}

/// Seed data for a donation created outside the handlers.
pub fn pending_donation(token: &str) -> NewDonation {
    use lungisa::models::donation::DonationStatus;
    use rust_decimal::Decimal;

    NewDonation {
        payment_token: token.to_string(),
        gateway_payment_id: None,
        donor_name: "A B".to_string(),
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        email: "a@b.com".to_string(),
        amount: Decimal::new(10000, 2),
        status: DonationStatus::Pending,
        timestamp: Utc::now(),
    }
}
