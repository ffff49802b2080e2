//! Payment-outcome classifier
//!
//! Turns raw gateway/processor output into a canonical [`OutcomeTag`] by
//! walking an ordered decision list ([`rules::DEFAULT_RULES`]). First match
//! wins; no match yields `Unknown`. Classification is pure and never fails.

pub mod outcome;
pub mod rules;

pub use outcome::OutcomeTag;
pub use rules::{Matcher, Rule, DEFAULT_RULES};

use serde::Serialize;
use serde_json::Value;

/// Keys searched for an error code in structured payloads, in order
const CODE_KEYS: [&str; 3] = ["decline_code", "code", "type"];

/// Classification result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub tag: OutcomeTag,
    pub message: &'static str,
    /// Upstream `code: message` when a structured rule extracted one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Classification {
    fn unknown() -> Self {
        Self {
            tag: OutcomeTag::Unknown,
            message: "Unknown",
            detail: None,
        }
    }
}

/// Ordered first-match classifier
#[derive(Debug, Clone)]
pub struct ResponseClassifier {
    rules: Vec<Rule>,
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseClassifier {
    /// Classifier with the built-in rule table
    pub fn new() -> Self {
        Self::with_rules(DEFAULT_RULES.to_vec())
    }

    /// Classifier with a custom decision list
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Classify raw response text.
    ///
    /// Text that parses as JSON is also offered to structured rules.
    pub fn classify(&self, raw: &str) -> Classification {
        let structured = serde_json::from_str::<Value>(raw)
            .ok()
            .filter(|v| v.is_object());
        self.evaluate(&raw.to_lowercase(), structured.as_ref())
    }

    /// Classify a structured payload; it is serialized to text for phrase rules
    pub fn classify_value(&self, payload: &Value) -> Classification {
        let text = match payload {
            Value::String(s) => s.to_lowercase(),
            other => other.to_string().to_lowercase(),
        };
        self.evaluate(&text, Some(payload))
    }

    fn evaluate(&self, text: &str, structured: Option<&Value>) -> Classification {
        for rule in &self.rules {
            match rule.matcher {
                Matcher::Contains(phrases) => {
                    if contains_any(text, phrases) {
                        return Self::hit(rule, None);
                    }
                }
                Matcher::Structured { codes, phrases } => {
                    if let Some(error) = structured.and_then(extract_error) {
                        if codes.contains(&error.code.as_str()) {
                            let detail = match error.message {
                                Some(m) => format!("{}: {}", error.code, m),
                                None => error.code,
                            };
                            return Self::hit(rule, Some(detail));
                        }
                    }
                    if contains_any(text, phrases) {
                        return Self::hit(rule, None);
                    }
                }
            }
        }

        tracing::debug!("No classification rule matched");
        Classification::unknown()
    }

    fn hit(rule: &Rule, detail: Option<String>) -> Classification {
        tracing::debug!(tag = %rule.tag, "Classified response");
        Classification {
            tag: rule.tag,
            message: rule.message,
            detail,
        }
    }
}

fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|p| text.contains(p))
}

struct ExtractedError {
    code: String,
    message: Option<String>,
}

/// Pull `{code, message}` out of `{"error": {...}}` or a flat object
fn extract_error(payload: &Value) -> Option<ExtractedError> {
    let object = payload
        .get("error")
        .filter(|e| e.is_object())
        .unwrap_or(payload);

    let code = CODE_KEYS
        .iter()
        .filter_map(|key| object.get(key).and_then(Value::as_str))
        .map(|s| s.trim().to_lowercase())
        .find(|s| !s.is_empty())?;

    let message = object
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string);

    Some(ExtractedError { code, message })
}
