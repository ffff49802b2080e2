//! Canonical outcome vocabulary
//!
//! Downstream consumers key their behavior on these tags, never on the
//! human-readable message text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical payment-attempt outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeTag {
    #[serde(rename = "Approved")]
    Approved,
    /// Card number accepted, security code rejected
    #[serde(rename = "CCN-Live")]
    CcnLive,
    #[serde(rename = "Insufficient-Funds")]
    InsufficientFunds,
    #[serde(rename = "Invalid-CVC")]
    InvalidCvc,
    #[serde(rename = "Card-Type-Unsupported")]
    CardTypeUnsupported,
    #[serde(rename = "Expired-Card")]
    ExpiredCard,
    #[serde(rename = "Invalid-Expiry-Month")]
    InvalidExpiryMonth,
    #[serde(rename = "Invalid-Expiry-Year")]
    InvalidExpiryYear,
    #[serde(rename = "Incorrect-Card-Number")]
    IncorrectCardNumber,
    #[serde(rename = "Dead-Card")]
    DeadCard,
    #[serde(rename = "ThreeD-Secure-Challenge")]
    ThreeDSecureChallenge,
    #[serde(rename = "Stolen-Card")]
    StolenCard,
    #[serde(rename = "Lost-Card")]
    LostCard,
    #[serde(rename = "Pickup-Card")]
    PickupCard,
    #[serde(rename = "Generic-Decline")]
    GenericDecline,
    #[serde(rename = "Fraudulent")]
    Fraudulent,
    #[serde(rename = "Authentication-Failure")]
    AuthenticationFailure,
    #[serde(rename = "Upstream-Auth-Error")]
    UpstreamAuthError,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl OutcomeTag {
    /// Every tag, in rule precedence order (Unknown last)
    pub const ALL: [OutcomeTag; 19] = [
        OutcomeTag::Approved,
        OutcomeTag::CcnLive,
        OutcomeTag::InsufficientFunds,
        OutcomeTag::InvalidCvc,
        OutcomeTag::CardTypeUnsupported,
        OutcomeTag::ExpiredCard,
        OutcomeTag::InvalidExpiryMonth,
        OutcomeTag::InvalidExpiryYear,
        OutcomeTag::IncorrectCardNumber,
        OutcomeTag::DeadCard,
        OutcomeTag::ThreeDSecureChallenge,
        OutcomeTag::StolenCard,
        OutcomeTag::LostCard,
        OutcomeTag::PickupCard,
        OutcomeTag::GenericDecline,
        OutcomeTag::Fraudulent,
        OutcomeTag::AuthenticationFailure,
        OutcomeTag::UpstreamAuthError,
        OutcomeTag::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeTag::Approved => "Approved",
            OutcomeTag::CcnLive => "CCN-Live",
            OutcomeTag::InsufficientFunds => "Insufficient-Funds",
            OutcomeTag::InvalidCvc => "Invalid-CVC",
            OutcomeTag::CardTypeUnsupported => "Card-Type-Unsupported",
            OutcomeTag::ExpiredCard => "Expired-Card",
            OutcomeTag::InvalidExpiryMonth => "Invalid-Expiry-Month",
            OutcomeTag::InvalidExpiryYear => "Invalid-Expiry-Year",
            OutcomeTag::IncorrectCardNumber => "Incorrect-Card-Number",
            OutcomeTag::DeadCard => "Dead-Card",
            OutcomeTag::ThreeDSecureChallenge => "ThreeD-Secure-Challenge",
            OutcomeTag::StolenCard => "Stolen-Card",
            OutcomeTag::LostCard => "Lost-Card",
            OutcomeTag::PickupCard => "Pickup-Card",
            OutcomeTag::GenericDecline => "Generic-Decline",
            OutcomeTag::Fraudulent => "Fraudulent",
            OutcomeTag::AuthenticationFailure => "Authentication-Failure",
            OutcomeTag::UpstreamAuthError => "Upstream-Auth-Error",
            OutcomeTag::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OutcomeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
