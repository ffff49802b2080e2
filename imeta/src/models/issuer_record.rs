//! Issuer metadata record
//!
//! Every field is extracted independently from the upstream payload. A
//! missing, null or empty sub-field leaves that one field at its default and
//! never fails the whole record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel for fields the upstream payload did not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Issuer metadata for one card-range prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuerRecord {
    /// Card network (e.g. "Visa")
    pub scheme: String,
    /// Debit / credit / prepaid
    #[serde(rename = "type")]
    pub card_type: String,
    /// Product brand (e.g. "Visa/Dankort")
    pub brand: String,
    /// Issuing bank name
    pub bank: String,
    pub country_name: String,
    /// Flag emoji; empty when unknown
    pub country_emoji: String,
    pub country_alpha2: String,
    pub country_numeric: String,
    pub currency: String,
    pub latitude: String,
    pub longitude: String,
    /// Declared card number length
    pub length: String,
    /// Whether numbers in this range carry a checksum digit
    pub luhn: String,
}

impl Default for IssuerRecord {
    fn default() -> Self {
        let na = || NOT_AVAILABLE.to_string();
        Self {
            scheme: na(),
            card_type: na(),
            brand: na(),
            bank: na(),
            country_name: na(),
            country_emoji: String::new(),
            country_alpha2: na(),
            country_numeric: na(),
            currency: na(),
            latitude: na(),
            longitude: na(),
            length: na(),
            luhn: na(),
        }
    }
}

impl IssuerRecord {
    /// Build a record from an upstream payload object.
    ///
    /// The cache rejects non-object bodies as malformed before they get here.
    ///
    /// Payload shape (all parts optional):
    /// ```json
    /// {"number": {"length": 16, "luhn": true},
    ///  "scheme": "visa", "type": "debit", "brand": "Visa/Dankort",
    ///  "country": {"numeric": "208", "alpha2": "DK", "name": "Denmark",
    ///              "emoji": "🇩🇰", "currency": "DKK", "latitude": 56, "longitude": 10},
    ///  "bank": {"name": "Jyske Bank"}}
    /// ```
    pub fn from_payload(payload: &Value) -> Self {
        let mut record = Self::default();

        if let Some(v) = text_at(payload, &["scheme"]) {
            record.scheme = title_case(&v);
        }
        if let Some(v) = text_at(payload, &["type"]) {
            record.card_type = title_case(&v);
        }
        if let Some(v) = text_at(payload, &["brand"]) {
            record.brand = title_case(&v);
        }
        if let Some(v) = text_at(payload, &["bank", "name"]) {
            record.bank = title_case(&v);
        }
        if let Some(v) = text_at(payload, &["country", "name"]) {
            record.country_name = v;
        }
        if let Some(v) = text_at(payload, &["country", "emoji"]) {
            record.country_emoji = v;
        }
        if let Some(v) = text_at(payload, &["country", "alpha2"]) {
            record.country_alpha2 = v;
        }
        if let Some(v) = text_at(payload, &["country", "numeric"]) {
            record.country_numeric = v;
        }
        if let Some(v) = text_at(payload, &["country", "currency"]) {
            record.currency = v;
        }
        if let Some(v) = text_at(payload, &["country", "latitude"]) {
            record.latitude = v;
        }
        if let Some(v) = text_at(payload, &["country", "longitude"]) {
            record.longitude = v;
        }
        if let Some(v) = text_at(payload, &["number", "length"]) {
            record.length = v;
        }
        if let Some(v) = text_at(payload, &["number", "luhn"]) {
            record.luhn = v;
        }

        record
    }

    /// True when no field carries upstream data
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Follow `path` into `payload` and render the leaf as text.
///
/// Strings, numbers and booleans are accepted. Null, empty strings and
/// nested containers count as absent.
fn text_at(payload: &Value, path: &[&str]) -> Option<String> {
    let mut node = payload;
    for segment in path {
        node = node.get(segment)?;
    }

    match node {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Capitalize the first letter of each alphabetic run, lowercase the rest.
///
/// `"VISA/DANKORT"` → `"Visa/Dankort"`, `"jyske bank"` → `"Jyske Bank"`.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_alpha = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
