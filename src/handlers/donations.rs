use std::collections::BTreeMap;

use actix_web::{http::header, web, HttpMessage, HttpRequest, HttpResponse, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::config::ServerSettings;
use crate::database::donations::DonationStore;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::donation::{DonationStatus, DonationUpdate, NewDonation};
use crate::requests::donation::{DonationRequest, ReturnQuery};
use crate::services::payfast::{self, PayFastClient};
use crate::utils::helpers::ApiResponse;

/// Start a donation attempt: persist a Pending record keyed by a fresh
/// payment token, then send the browser to the gateway with a signed payload.
pub async fn initiate(
    store: web::Data<dyn DonationStore>,
    payfast: web::Data<PayFastClient>,
    request: web::Form<DonationRequest>,
) -> Result<HttpResponse> {
    if request.amount <= Decimal::ZERO {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::<()>::error(
            "Donation amount must be greater than zero".to_string(),
        )));
    }

    let payment_token = payfast::generate_payment_token();
    info!("Initiating donation {} for {}", payment_token, request.email);

    let donation = NewDonation {
        payment_token: payment_token.clone(),
        gateway_payment_id: None,
        donor_name: format!("{} {}", request.first_name, request.last_name)
            .trim()
            .to_string(),
        first_name: request.first_name.clone(),
        last_name: request.last_name.clone(),
        email: request.email.clone(),
        amount: request.amount,
        status: DonationStatus::Pending,
        timestamp: Utc::now(),
    };

    // No redirect unless the pending record is safely stored.
    if let Err(e) = store.create(donation).await {
        error!("Failed to persist pending donation {}: {}", payment_token, e);
        return Ok(HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
            "Failed to start donation".to_string(),
        )));
    }

    let fields = payfast.checkout_fields(
        &request.first_name,
        &request.last_name,
        &request.email,
        &payment_token,
        request.amount,
    );

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, payfast.checkout_redirect_url(&fields)))
        .finish())
}

/// Gateway's asynchronous server-to-server notification (ITN). Arrives out of
/// band from any browser session and races the return-leg handlers, so the
/// record is re-fetched by token before every mutation.
pub async fn notify(
    store: web::Data<dyn DonationStore>,
    payfast: web::Data<PayFastClient>,
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse> {
    if !req
        .content_type()
        .starts_with("application/x-www-form-urlencoded")
    {
        return Ok(HttpResponse::BadRequest().body("No form data"));
    }

    let mut fields: BTreeMap<String, String> =
        match serde_urlencoded::from_bytes::<Vec<(String, String)>>(&body) {
            Ok(pairs) => pairs.into_iter().collect(),
            Err(_) => return Ok(HttpResponse::BadRequest().body("No form data")),
        };

    let received_signature = fields.remove("signature").unwrap_or_default();
    if !payfast.verify_signature(&fields, &received_signature) {
        warn!(
            "Rejected gateway notification with invalid signature (m_payment_id={})",
            field(&fields, "m_payment_id")
        );
        return Ok(HttpResponse::BadRequest().body("Invalid signature"));
    }

    let amount = fields
        .get("amount_gross")
        .or_else(|| fields.get("amount"))
        .and_then(|raw| raw.parse::<Decimal>().ok())
        .unwrap_or_default();
    let status = DonationStatus::from_gateway(&field(&fields, "payment_status"));
    let payment_token = field(&fields, "m_payment_id");
    let gateway_payment_id = field(&fields, "pf_payment_id");

    let outcome = match store.find_by_token(&payment_token).await {
        Ok(Some(existing)) => {
            store
                .patch(
                    existing.id,
                    DonationUpdate {
                        gateway_payment_id: Some(gateway_payment_id),
                        status: Some(status),
                        payment_reference: None,
                        timestamp: Some(Utc::now()),
                    },
                )
                .await
                .map(|_| ())
        }
        Ok(None) => {
            let first_name = field(&fields, "name_first");
            let last_name = field(&fields, "name_last");
            store
                .create(NewDonation {
                    payment_token: payment_token.clone(),
                    gateway_payment_id: Some(gateway_payment_id),
                    donor_name: format!("{} {}", first_name, last_name).trim().to_string(),
                    first_name,
                    last_name,
                    email: field(&fields, "email_address"),
                    amount,
                    status,
                    timestamp: Utc::now(),
                })
                .await
                .map(|_| ())
        }
        Err(e) => Err(e),
    };

    match outcome {
        Ok(()) => {
            info!("Reconciled gateway notification for {}", payment_token);
            Ok(HttpResponse::Ok().body("ITN processed"))
        }
        Err(e) => {
            error!(
                "Failed to save donation {} from gateway notification: {}",
                payment_token, e
            );
            Ok(HttpResponse::InternalServerError().body("Failed to save donation"))
        }
    }
}

/// Browser returned from the gateway after paying.
pub async fn success(
    store: web::Data<dyn DonationStore>,
    server: web::Data<ServerSettings>,
    query: web::Query<ReturnQuery>,
) -> Result<HttpResponse> {
    finalize(
        store.get_ref(),
        DonationStatus::Success,
        query.m_payment_id.as_deref(),
    )
    .await;

    Ok(redirect_with_message(
        &server,
        "Thank you! Your donation was successful.",
    ))
}

/// Browser backed out of the gateway.
pub async fn cancel(
    store: web::Data<dyn DonationStore>,
    server: web::Data<ServerSettings>,
    query: web::Query<ReturnQuery>,
) -> Result<HttpResponse> {
    finalize(
        store.get_ref(),
        DonationStatus::Failed,
        query.m_payment_id.as_deref(),
    )
    .await;

    Ok(redirect_with_message(&server, "You cancelled the payment."))
}

pub async fn all(
    store: web::Data<dyn DonationStore>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse> {
    match store.list().await {
        Ok(donations) => Ok(HttpResponse::Ok().json(ApiResponse::success(donations))),
        Err(e) => {
            error!("Failed to fetch donations: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                "Failed to retrieve donations".to_string(),
            )))
        }
    }
}

/// Move the tracked donation to a terminal status. An absent or unknown token
/// is a silent no-op; the donor never sees a raw error on this path.
async fn finalize(store: &dyn DonationStore, status: DonationStatus, token: Option<&str>) {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return;
    };

    match store.find_by_token(token).await {
        Ok(Some(donation)) => {
            let update = DonationUpdate {
                status: Some(status),
                timestamp: Some(Utc::now()),
                ..Default::default()
            };
            if let Err(e) = store.patch(donation.id, update).await {
                error!("Failed to finalise donation {}: {}", token, e);
            }
        }
        Ok(None) => {}
        Err(e) => error!("Failed to load donation {}: {}", token, e),
    }
}

fn redirect_with_message(server: &ServerSettings, message: &str) -> HttpResponse {
    let location = format!(
        "{}/?message={}",
        server.frontend_url.trim_end_matches('/'),
        urlencoding::encode(message)
    );
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

fn field(fields: &BTreeMap<String, String>, name: &str) -> String {
    fields.get(name).cloned().unwrap_or_default()
}
