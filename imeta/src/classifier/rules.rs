//! Ordered outcome rule table
//!
//! Position in [`DEFAULT_RULES`] is precedence: the first matching rule wins.
//! Success phrases come first, narrow decline reasons before broad ones, and
//! the generic "declined" phrases after every specific reason.
//!
//! All phrases are lowercase; input is lowercased before matching.

use super::outcome::OutcomeTag;

/// How a rule decides whether it applies
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// Any phrase is a substring of the normalized text
    Contains(&'static [&'static str]),
    /// Try the structured `code` fields of a JSON payload first, then fall
    /// back to phrase containment on the serialized text
    Structured {
        codes: &'static [&'static str],
        phrases: &'static [&'static str],
    },
}

/// One entry of the decision list
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub matcher: Matcher,
    pub tag: OutcomeTag,
    pub message: &'static str,
}

const fn contains(
    phrases: &'static [&'static str],
    tag: OutcomeTag,
    message: &'static str,
) -> Rule {
    Rule {
        matcher: Matcher::Contains(phrases),
        tag,
        message,
    }
}

pub static DEFAULT_RULES: &[Rule] = &[
    contains(
        &[
            "approved",
            "succeeded",
            "payment method successfully added",
            "payment method added",
        ],
        OutcomeTag::Approved,
        "Approved",
    ),
    contains(
        &[
            "incorrect_cvc",
            "incorrect cvc",
            "security code is incorrect",
        ],
        OutcomeTag::CcnLive,
        "Security Code Incorrect (Card Live)",
    ),
    contains(
        &["insufficient funds", "insufficient_funds"],
        OutcomeTag::InsufficientFunds,
        "Insufficient Funds",
    ),
    contains(
        &[
            "invalid_cvc",
            "invalid cvc",
            "security code is invalid",
            "cvc_check_failed",
        ],
        OutcomeTag::InvalidCvc,
        "Invalid CVC",
    ),
    contains(
        &[
            "card_not_supported",
            "card type not supported",
            "does not support this type of purchase",
            "your card is not supported",
        ],
        OutcomeTag::CardTypeUnsupported,
        "Card Type Not Supported",
    ),
    contains(
        &["expired_card", "card has expired", "card is expired"],
        OutcomeTag::ExpiredCard,
        "Expired Card",
    ),
    contains(
        &[
            "invalid_expiry_month",
            "expiration month is invalid",
            "invalid expiry month",
        ],
        OutcomeTag::InvalidExpiryMonth,
        "Invalid Expiry Month",
    ),
    contains(
        &[
            "invalid_expiry_year",
            "expiration year is invalid",
            "invalid expiry year",
        ],
        OutcomeTag::InvalidExpiryYear,
        "Invalid Expiry Year",
    ),
    contains(
        &[
            "incorrect_number",
            "invalid_number",
            "card number is incorrect",
            "card number is invalid",
        ],
        OutcomeTag::IncorrectCardNumber,
        "Incorrect Card Number",
    ),
    contains(
        &[
            "do_not_honor",
            "do not honor",
            "transaction_not_allowed",
            "restricted_card",
            "invalid_account",
        ],
        OutcomeTag::DeadCard,
        "Do Not Honor",
    ),
    contains(
        &[
            "three_d_secure",
            "3d_secure",
            "3d secure",
            "requires_action",
            "authentication_required",
        ],
        OutcomeTag::ThreeDSecureChallenge,
        "3D Secure Required",
    ),
    contains(
        &["stolen_card", "stolen card"],
        OutcomeTag::StolenCard,
        "Stolen Card",
    ),
    contains(&["lost_card", "lost card"], OutcomeTag::LostCard, "Lost Card"),
    contains(
        &["pickup_card", "pick up card", "pickup card"],
        OutcomeTag::PickupCard,
        "Pickup Card",
    ),
    contains(
        &["generic_decline", "card_declined", "declined"],
        OutcomeTag::GenericDecline,
        "Card Declined",
    ),
    contains(
        &["fraudulent", "merchant_blacklist", "highest_risk_level"],
        OutcomeTag::Fraudulent,
        "Fraudulent",
    ),
    contains(
        &[
            "authentication failed",
            "authentication_failure",
            "payment_intent_authentication_failure",
        ],
        OutcomeTag::AuthenticationFailure,
        "Authentication Failed",
    ),
    Rule {
        matcher: Matcher::Structured {
            codes: &[
                "api_key_expired",
                "invalid_api_key",
                "authentication_error",
                "secret_key_required",
            ],
            phrases: &[
                "invalid api key",
                "api_key_expired",
                "api key expired",
                "invalid_api_key",
            ],
        },
        tag: OutcomeTag::UpstreamAuthError,
        message: "Upstream API Key Error",
    },
];
