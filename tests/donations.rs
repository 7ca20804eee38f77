mod common;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{http::StatusCode, test, web, App};
use rust_decimal::Decimal;

use common::MemoryDonationStore;
use lungisa::database::donations::DonationStore;
use lungisa::models::donation::DonationStatus;
use lungisa::routes;
use lungisa::services::payfast::PayFastClient;

fn client() -> PayFastClient {
    PayFastClient::new(common::payfast_settings())
}

/// Form body for a gateway notification, signed unless a signature override
/// is supplied.
fn itn_form(
    client: &PayFastClient,
    pairs: &[(&str, &str)],
    signature_override: Option<&str>,
) -> Vec<(String, String)> {
    let fields: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let signature = match signature_override {
        Some(s) => s.to_string(),
        None => client.signature(&fields),
    };
    let mut form: Vec<(String, String)> = fields.into_iter().collect();
    form.push(("signature".to_string(), signature));
    form
}

fn token_from_location(location: &str) -> String {
    location
        .split("m_payment_id=")
        .nth(1)
        .expect("redirect carries the payment token")
        .split('&')
        .next()
        .unwrap()
        .to_string()
}

macro_rules! donation_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from($store.clone() as Arc<dyn DonationStore>))
                .app_data(web::Data::new(client()))
                .app_data(web::Data::new(common::server_settings()))
                .service(web::scope("/api").configure(routes::api::scoped_config)),
        )
        .await
    };
}

#[actix_web::test]
async fn initiate_stores_pending_record_and_redirects_to_gateway() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/donations/payfast")
        .set_form([
            ("first_name", "A"),
            ("last_name", "B"),
            ("email", "a@b.com"),
            ("amount", "100.00"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(location.starts_with("https://sandbox.payfast.co.za/eng/process?"));
    assert!(location.contains("amount=100.00"));
    assert!(location.contains("&signature="));

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, DonationStatus::Pending);
    assert_eq!(records[0].donor_name, "A B");
    assert_eq!(records[0].payment_token, token_from_location(&location));
    assert_eq!(records[0].payment_token.len(), 32);
}

#[actix_web::test]
async fn initiate_rejects_non_positive_amounts() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/donations/payfast")
        .set_form([
            ("first_name", "A"),
            ("last_name", "B"),
            ("email", "a@b.com"),
            ("amount", "0.00"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(store.records().is_empty());
}

#[actix_web::test]
async fn end_to_end_notification_reconciles_the_pending_record() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/donations/payfast")
        .set_form([
            ("first_name", "A"),
            ("last_name", "B"),
            ("email", "a@b.com"),
            ("amount", "100.00"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    let location = resp
        .headers()
        .get("location")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let token = token_from_location(&location);
    let before = store.records()[0].timestamp;

    let form = itn_form(
        &client(),
        &[
            ("m_payment_id", token.as_str()),
            ("pf_payment_id", "1089250"),
            ("payment_status", "COMPLETE"),
            ("amount_gross", "100.00"),
            ("name_first", "A"),
            ("name_last", "B"),
            ("email_address", "a@b.com"),
        ],
        None,
    );
    tokio::time::sleep(Duration::from_millis(5)).await;
    let req = test::TestRequest::post()
        .uri("/api/donations/notify")
        .set_form(&form)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body, web::Bytes::from_static(b"ITN processed"));

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].gateway_payment_id.as_deref(), Some("1089250"));
    assert_eq!(records[0].status, DonationStatus::Success);
    assert!(records[0].timestamp > before);
}

#[actix_web::test]
async fn repeated_notifications_update_the_same_record() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    store.create(common::pending_donation("feedface")).await.unwrap();

    let form = itn_form(
        &client(),
        &[
            ("m_payment_id", "feedface"),
            ("pf_payment_id", "1089250"),
            ("payment_status", "COMPLETE"),
            ("amount_gross", "100.00"),
        ],
        None,
    );

    let req = test::TestRequest::post()
        .uri("/api/donations/notify")
        .set_form(&form)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let first_timestamp = store.records()[0].timestamp;

    tokio::time::sleep(Duration::from_millis(5)).await;
    let req = test::TestRequest::post()
        .uri("/api/donations/notify")
        .set_form(&form)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].gateway_payment_id.as_deref(), Some("1089250"));
    assert!(records[0].timestamp > first_timestamp);
}

#[actix_web::test]
async fn tampered_notification_is_rejected_without_mutation() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    let pf = client();
    let signed: BTreeMap<String, String> = [
        ("m_payment_id", "feedface"),
        ("payment_status", "COMPLETE"),
        ("amount_gross", "100.00"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    let original_signature = pf.signature(&signed);

    let form = itn_form(
        &pf,
        &[
            ("m_payment_id", "feedface"),
            ("payment_status", "COMPLETE"),
            ("amount_gross", "999.00"),
        ],
        Some(&original_signature),
    );

    let req = test::TestRequest::post()
        .uri("/api/donations/notify")
        .set_form(&form)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, web::Bytes::from_static(b"Invalid signature"));
    assert!(store.records().is_empty());
}

#[actix_web::test]
async fn notification_without_form_body_is_rejected() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/donations/notify")
        .set_json(serde_json::json!({"m_payment_id": "feedface"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert_eq!(body, web::Bytes::from_static(b"No form data"));
}

#[actix_web::test]
async fn valid_notification_for_unknown_token_creates_a_record() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    let form = itn_form(
        &client(),
        &[
            ("m_payment_id", "cafebabe"),
            ("pf_payment_id", "1089251"),
            ("payment_status", "COMPLETE"),
            ("amount_gross", "250.00"),
            ("name_first", "C"),
            ("name_last", "D"),
            ("email_address", "c@d.com"),
        ],
        None,
    );

    let req = test::TestRequest::post()
        .uri("/api/donations/notify")
        .set_form(&form)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].payment_token, "cafebabe");
    assert_eq!(records[0].gateway_payment_id.as_deref(), Some("1089251"));
    assert_eq!(records[0].donor_name, "C D");
    assert_eq!(records[0].email, "c@d.com");
    assert_eq!(records[0].amount, Decimal::new(25000, 2));
    assert_eq!(records[0].status, DonationStatus::Success);
}

#[actix_web::test]
async fn browser_return_finalises_the_tracked_donation() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    store.create(common::pending_donation("feedface")).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/donations/success?m_payment_id=feedface")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp.headers().get("location").unwrap().to_str().unwrap();
    assert!(location.starts_with("https://example.org/?message="));

    let records = store.records();
    assert_eq!(records[0].status, DonationStatus::Success);
}

#[actix_web::test]
async fn browser_cancel_marks_the_donation_failed() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    store.create(common::pending_donation("feedface")).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/donations/cancel?m_payment_id=feedface")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.records()[0].status, DonationStatus::Failed);
}

#[actix_web::test]
async fn browser_return_without_token_is_a_silent_no_op() {
    let store = Arc::new(MemoryDonationStore::default());
    let app = donation_app!(store);

    store.create(common::pending_donation("feedface")).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/donations/success")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.records()[0].status, DonationStatus::Pending);
}
