use async_trait::async_trait;
use uuid::Uuid;

use crate::database::connection::DbPool;
use crate::models::donation::{Donation, DonationError, DonationRow, DonationUpdate, NewDonation};

/// Persistence contract for donation records. The payment flow only ever
/// creates, re-fetches by token and merges partial updates; the notify and
/// browser-return paths race, so callers re-fetch before every mutation
/// instead of holding a record across requests.
#[async_trait]
pub trait DonationStore: Send + Sync {
    async fn create(&self, donation: NewDonation) -> Result<Donation, DonationError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Donation>, DonationError>;
    async fn patch(&self, id: Uuid, update: DonationUpdate) -> Result<Donation, DonationError>;
    async fn list(&self) -> Result<Vec<Donation>, DonationError>;
}

pub struct PgDonationStore {
    pool: DbPool,
}

impl PgDonationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationStore for PgDonationStore {
    async fn create(&self, donation: NewDonation) -> Result<Donation, DonationError> {
        let row = sqlx::query_as::<_, DonationRow>(
            "INSERT INTO donations (id, payment_token, gateway_payment_id, donor_name, first_name, last_name, email, amount, status, timestamp)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(donation.payment_token)
        .bind(donation.gateway_payment_id)
        .bind(donation.donor_name)
        .bind(donation.first_name)
        .bind(donation.last_name)
        .bind(donation.email)
        .bind(donation.amount)
        .bind(donation.status.to_string())
        .bind(donation.timestamp)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Donation>, DonationError> {
        let row =
            sqlx::query_as::<_, DonationRow>("SELECT * FROM donations WHERE payment_token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Donation::from))
    }

    async fn patch(&self, id: Uuid, update: DonationUpdate) -> Result<Donation, DonationError> {
        let row = sqlx::query_as::<_, DonationRow>(
            "UPDATE donations
             SET gateway_payment_id = COALESCE($2, gateway_payment_id),
                 status = COALESCE($3, status),
                 payment_reference = COALESCE($4, payment_reference),
                 timestamp = COALESCE($5, timestamp)
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(update.gateway_payment_id)
        .bind(update.status.map(|s| s.to_string()))
        .bind(update.payment_reference)
        .bind(update.timestamp)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(row.into()),
            None => Err(DonationError::NotFound { id }),
        }
    }

    async fn list(&self) -> Result<Vec<Donation>, DonationError> {
        let rows =
            sqlx::query_as::<_, DonationRow>("SELECT * FROM donations ORDER BY timestamp DESC")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Donation::from).collect())
    }
}
