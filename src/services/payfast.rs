//! PayFast checkout construction and ITN signature handling.
//!
//! The gateway signs the sorted field set with an MD5 digest; that format is
//! fixed by its legacy protocol and has to be reproduced byte for byte.

use md5::{Digest, Md5};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::config::PayFastSettings;

#[derive(Clone)]
pub struct PayFastClient {
    settings: PayFastSettings,
}

impl PayFastClient {
    pub fn new(settings: PayFastSettings) -> Self {
        Self { settings }
    }

    /// MD5 signature over the sorted field set, lowercase hex. The
    /// `signature` field itself and empty values never enter the digest; the
    /// passphrase is appended last when one is configured.
    pub fn signature(&self, fields: &BTreeMap<String, String>) -> String {
        let mut buffer = String::new();
        for (name, value) in fields {
            if name == "signature" || value.is_empty() {
                continue;
            }
            buffer.push_str(name);
            buffer.push('=');
            buffer.push_str(&encode_form_value(value));
            buffer.push('&');
        }

        if !self.settings.passphrase.is_empty() {
            buffer.push_str("passphrase=");
            buffer.push_str(&encode_form_value(&self.settings.passphrase));
        } else if buffer.ends_with('&') {
            buffer.pop();
        }

        hex::encode(Md5::digest(buffer.as_bytes()))
    }

    /// Recompute over the inbound fields and compare case-insensitively.
    /// Any mismatch fails closed.
    pub fn verify_signature(&self, fields: &BTreeMap<String, String>, received: &str) -> bool {
        self.signature(fields).eq_ignore_ascii_case(received)
    }

    /// Outbound field set for one checkout. The return and cancel URLs carry
    /// the payment token so the browser's return leg can identify the attempt
    /// without server-side session state.
    pub fn checkout_fields(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        payment_token: &str,
        amount: Decimal,
    ) -> BTreeMap<String, String> {
        let mut fields = BTreeMap::new();
        fields.insert("merchant_id".to_string(), self.settings.merchant_id.clone());
        fields.insert("merchant_key".to_string(), self.settings.merchant_key.clone());
        fields.insert(
            "return_url".to_string(),
            with_token(&self.settings.return_url, payment_token),
        );
        fields.insert(
            "cancel_url".to_string(),
            with_token(&self.settings.cancel_url, payment_token),
        );
        fields.insert("notify_url".to_string(), self.settings.notify_url.clone());
        fields.insert("name_first".to_string(), first_name.to_string());
        fields.insert("name_last".to_string(), last_name.to_string());
        fields.insert("email_address".to_string(), email.to_string());
        fields.insert("m_payment_id".to_string(), payment_token.to_string());
        fields.insert("amount".to_string(), format_amount(amount));
        fields.insert("item_name".to_string(), self.settings.item_name.clone());
        fields
    }

    /// Full redirect target: the fields as a query string in sorted order,
    /// signature appended last.
    pub fn checkout_redirect_url(&self, fields: &BTreeMap<String, String>) -> String {
        let signature = self.signature(fields);
        let query = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}&signature={}", self.settings.process_url, query, signature)
    }
}

/// Form-encode one value the way the gateway signs it: percent-encoding with
/// spaces rendered as `+`.
fn encode_form_value(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

fn with_token(url: &str, token: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}m_payment_id={token}")
}

/// Locale-invariant, exactly two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Fresh unguessable payment token: 128 bits of OS randomness, hex-encoded.
pub fn generate_payment_token() -> String {
    use rand::RngCore;
    use rand::rngs::OsRng;

    let mut bytes = [0u8; 16];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayFastSettings;

    fn settings(passphrase: &str) -> PayFastSettings {
        PayFastSettings {
            merchant_id: "10000100".to_string(),
            merchant_key: "46f0cd694581a".to_string(),
            passphrase: passphrase.to_string(),
            process_url: "https://sandbox.payfast.co.za/eng/process".to_string(),
            return_url: "https://example.org/api/donations/success".to_string(),
            cancel_url: "https://example.org/api/donations/cancel".to_string(),
            notify_url: "https://example.org/api/donations/notify".to_string(),
            item_name: "Donation to Lungisa NPO".to_string(),
        }
    }

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn signature_is_deterministic_and_insertion_order_independent() {
        let client = PayFastClient::new(settings("secret phrase"));
        let forwards = fields(&[("amount", "100.00"), ("m_payment_id", "abc"), ("name_first", "A")]);
        let backwards = fields(&[("name_first", "A"), ("m_payment_id", "abc"), ("amount", "100.00")]);

        let first = client.signature(&forwards);
        assert_eq!(first, client.signature(&forwards));
        assert_eq!(first, client.signature(&backwards));
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn empty_input_without_passphrase_is_the_md5_of_nothing() {
        let client = PayFastClient::new(settings(""));
        assert_eq!(
            client.signature(&BTreeMap::new()),
            "d41d8cd98f00b204e9800998ecf8427e"
        );
    }

    #[test]
    fn empty_values_and_signature_field_never_enter_the_digest() {
        let client = PayFastClient::new(settings("pf"));
        let plain = fields(&[("amount", "50.00"), ("name_first", "Jo")]);
        let with_noise = fields(&[
            ("amount", "50.00"),
            ("name_first", "Jo"),
            ("name_last", ""),
            ("signature", "deadbeefdeadbeefdeadbeefdeadbeef"),
        ]);
        assert_eq!(client.signature(&plain), client.signature(&with_noise));
    }

    #[test]
    fn round_trip_verifies_and_tampering_fails() {
        let client = PayFastClient::new(settings("secret phrase"));
        let original = fields(&[("amount", "100.00"), ("m_payment_id", "abc")]);
        let signature = client.signature(&original);

        assert!(client.verify_signature(&original, &signature));
        assert!(client.verify_signature(&original, &signature.to_uppercase()));

        let tampered = fields(&[("amount", "999.00"), ("m_payment_id", "abc")]);
        assert!(!client.verify_signature(&tampered, &signature));

        let other_passphrase = PayFastClient::new(settings("another phrase"));
        assert!(!other_passphrase.verify_signature(&original, &signature));
    }

    #[test]
    fn passphrase_changes_the_signature() {
        let input = fields(&[("amount", "10.00")]);
        let with_phrase = PayFastClient::new(settings("secret phrase")).signature(&input);
        let without = PayFastClient::new(settings("")).signature(&input);
        assert_ne!(with_phrase, without);
    }

    #[test]
    fn form_encoding_renders_spaces_as_plus() {
        assert_eq!(encode_form_value("John Smith"), "John+Smith");
        assert_eq!(encode_form_value("a@b.com"), "a%40b.com");
    }

    #[test]
    fn amounts_format_to_exactly_two_decimals() {
        assert_eq!(format_amount(Decimal::new(100, 0)), "100.00");
        assert_eq!(format_amount(Decimal::new(12349, 3)), "12.35");
        assert_eq!(format_amount(Decimal::new(5, 1)), "0.50");
    }

    #[test]
    fn payment_tokens_are_fresh_32_char_hex() {
        let a = generate_payment_token();
        let b = generate_payment_token();
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn checkout_redirect_appends_signature_last() {
        let client = PayFastClient::new(settings("secret phrase"));
        let fields = client.checkout_fields("A", "B", "a@b.com", "feedface", Decimal::new(10000, 2));
        let url = client.checkout_redirect_url(&fields);

        assert!(url.starts_with("https://sandbox.payfast.co.za/eng/process?"));
        let signature = client.signature(&fields);
        assert!(url.ends_with(&format!("&signature={signature}")));
        assert!(url.contains("m_payment_id=feedface"));
        assert!(url.contains("amount=100.00"));
    }

    #[test]
    fn return_urls_carry_the_payment_token() {
        let client = PayFastClient::new(settings(""));
        let fields = client.checkout_fields("A", "B", "a@b.com", "feedface", Decimal::new(100, 0));
        assert_eq!(
            fields["return_url"],
            "https://example.org/api/donations/success?m_payment_id=feedface"
        );
        assert_eq!(
            fields["cancel_url"],
            "https://example.org/api/donations/cancel?m_payment_id=feedface"
        );
    }
}
