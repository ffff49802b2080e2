//! Outcome classification tests
//!
//! One test per rule plus the precedence cases where several rules match the
//! same text.

use imeta::classifier::{OutcomeTag, ResponseClassifier, DEFAULT_RULES};
use serde_json::json;

fn tag_of(text: &str) -> OutcomeTag {
    ResponseClassifier::new().classify(text).tag
}

// =============================================================================
// Literal cases
// =============================================================================

#[test]
fn test_literal_cases() {
    assert_eq!(tag_of("incorrect_cvc"), OutcomeTag::CcnLive);
    assert_eq!(tag_of(r#""status":"succeeded""#), OutcomeTag::Approved);
    assert_eq!(tag_of("your card has expired"), OutcomeTag::ExpiredCard);
    assert_eq!(tag_of("insufficient funds"), OutcomeTag::InsufficientFunds);
}

#[test]
fn test_unrelated_text_is_unknown() {
    let result = ResponseClassifier::new().classify("completely unrelated text");
    assert_eq!(result.tag, OutcomeTag::Unknown);
    assert_eq!(result.message, "Unknown");
    assert!(result.detail.is_none());
}

#[test]
fn test_empty_input_is_unknown() {
    assert_eq!(tag_of(""), OutcomeTag::Unknown);
    assert_eq!(tag_of("{not json"), OutcomeTag::Unknown);
}

#[test]
fn test_matching_is_case_insensitive() {
    assert_eq!(tag_of("APPROVED"), OutcomeTag::Approved);
    assert_eq!(tag_of("Your Card Has Expired."), OutcomeTag::ExpiredCard);
    assert_eq!(tag_of("Do Not Honor"), OutcomeTag::DeadCard);
}

// =============================================================================
// Precedence
// =============================================================================

#[test]
fn test_success_beats_decline_reasons() {
    assert_eq!(tag_of("approved, but insufficient funds"), OutcomeTag::Approved);
}

#[test]
fn test_specific_reasons_beat_generic_decline() {
    assert_eq!(
        tag_of("Your card was declined: insufficient funds"),
        OutcomeTag::InsufficientFunds
    );
    assert_eq!(
        tag_of(r#"{"code":"card_declined","decline_code":"lost_card"}"#),
        OutcomeTag::LostCard
    );
    assert_eq!(
        tag_of("card_declined / stolen_card"),
        OutcomeTag::StolenCard
    );
}

#[test]
fn test_ccn_live_beats_insufficient_funds_and_invalid_cvc() {
    assert_eq!(
        tag_of("incorrect_cvc; insufficient_funds"),
        OutcomeTag::CcnLive
    );
    assert_eq!(tag_of("incorrect_cvc invalid_cvc"), OutcomeTag::CcnLive);
}

#[test]
fn test_generic_decline_beats_fraudulent() {
    assert_eq!(
        tag_of(r#"{"message":"Your card was declined.","decline_code":"fraudulent"}"#),
        OutcomeTag::GenericDecline
    );
    assert_eq!(tag_of("fraudulent"), OutcomeTag::Fraudulent);
}

// =============================================================================
// One case per rule
// =============================================================================

#[test]
fn test_each_rule_reachable() {
    let cases = [
        ("Payment method successfully added", OutcomeTag::Approved),
        ("Your card's security code is incorrect.", OutcomeTag::CcnLive),
        ("insufficient_funds", OutcomeTag::InsufficientFunds),
        ("Your card's security code is invalid.", OutcomeTag::InvalidCvc),
        ("Your card does not support this type of purchase.", OutcomeTag::CardTypeUnsupported),
        ("expired_card", OutcomeTag::ExpiredCard),
        ("Your card's expiration month is invalid.", OutcomeTag::InvalidExpiryMonth),
        ("Your card's expiration year is invalid.", OutcomeTag::InvalidExpiryYear),
        ("Your card number is incorrect.", OutcomeTag::IncorrectCardNumber),
        ("do_not_honor", OutcomeTag::DeadCard),
        ("requires_action", OutcomeTag::ThreeDSecureChallenge),
        ("stolen_card", OutcomeTag::StolenCard),
        ("lost_card", OutcomeTag::LostCard),
        ("pickup_card", OutcomeTag::PickupCard),
        ("generic_decline", OutcomeTag::GenericDecline),
        ("merchant_blacklist", OutcomeTag::Fraudulent),
        ("payment_intent_authentication_failure", OutcomeTag::AuthenticationFailure),
        ("Invalid API Key provided: sk_test_****", OutcomeTag::UpstreamAuthError),
    ];

    assert_eq!(cases.len(), DEFAULT_RULES.len());
    for (text, expected) in cases {
        assert_eq!(tag_of(text), expected, "input: {}", text);
    }
}

// =============================================================================
// Structured input
// =============================================================================

#[test]
fn test_structured_auth_error_reports_detail() {
    let payload = json!({
        "error": {
            "code": "api_key_expired",
            "message": "Expired API Key provided",
            "type": "invalid_request_error"
        }
    });

    let result = ResponseClassifier::new().classify_value(&payload);
    assert_eq!(result.tag, OutcomeTag::UpstreamAuthError);
    assert_eq!(
        result.detail.as_deref(),
        Some("api_key_expired: Expired API Key provided")
    );
}

#[test]
fn test_structured_text_input_extracts_code() {
    let raw = r#"{"error":{"type":"authentication_error","message":"No valid key"}}"#;
    let result = ResponseClassifier::new().classify(raw);
    assert_eq!(result.tag, OutcomeTag::UpstreamAuthError);
    assert_eq!(
        result.detail.as_deref(),
        Some("authentication_error: No valid key")
    );
}

#[test]
fn test_classify_value_serializes_payload() {
    let classifier = ResponseClassifier::new();
    assert_eq!(
        classifier.classify_value(&json!({"status": "succeeded"})).tag,
        OutcomeTag::Approved
    );
    assert_eq!(
        classifier
            .classify_value(&json!({"error": {"decline_code": "insufficient_funds"}}))
            .tag,
        OutcomeTag::InsufficientFunds
    );
    assert_eq!(
        classifier.classify_value(&json!("Your card has expired")).tag,
        OutcomeTag::ExpiredCard
    );
    assert_eq!(
        classifier.classify_value(&json!({"status": "pending"})).tag,
        OutcomeTag::Unknown
    );
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_classification_is_idempotent() {
    let classifier = ResponseClassifier::new();
    for text in [
        "approved",
        "do not honor",
        r#"{"error":{"code":"invalid_api_key"}}"#,
        "nothing here",
    ] {
        assert_eq!(classifier.classify(text), classifier.classify(text));
    }
}

#[test]
fn test_serialized_classification_uses_canonical_tag() {
    let result = ResponseClassifier::new().classify("incorrect_cvc");
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["tag"], "CCN-Live");
    assert!(json.get("detail").is_none());
}
