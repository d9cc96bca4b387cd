//! # SMS Messages
//!
//! Messages arrive from an SMS webhook as form fields, travel through the
//! print queue as JSON, and are printed as a single line of text:
//!
//! ```text
//! From=%2B15551234567&To=%2B15557654321&Body=hi      (webhook form)
//!        │
//!        ▼
//! {"from":"+15551234567","to":"+15557654321","body":"hi"}   (queue body)
//!        │
//!        ▼
//! "From +15551234567: hi"                                  (printed)
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CatprintError;

/// An SMS as carried through the print queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub body: String,
}

/// Form fields posted by the SMS provider's webhook.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookForm {
    #[serde(rename = "From", default)]
    pub from: String,
    #[serde(rename = "To", default)]
    pub to: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

impl SmsMessage {
    pub fn from_webhook_form(form: WebhookForm) -> Self {
        Self {
            from: form.from,
            to: form.to,
            body: form.body,
        }
    }

    /// Text that gets printed for this message.
    pub fn print_text(&self) -> String {
        format!("From {}: {}", self.from, self.body)
    }

    /// Serialize as a queue body.
    pub fn to_queue_body(&self) -> Result<String, CatprintError> {
        serde_json::to_string(self)
            .map_err(|e| CatprintError::Message(format!("Failed to encode message: {}", e)))
    }
}

/// Text to print for a raw queue body.
///
/// JSON objects are rendered as `"From {from}: {body}"`. String fields are
/// used as-is, other values in their JSON form, and missing or `null`
/// fields become empty. Anything that is not a JSON object is printed
/// verbatim.
///
/// ```
/// use catprint::message::text_from_queue_body;
///
/// assert_eq!(
///     text_from_queue_body(r#"{"from":"+1555","body":"hello"}"#),
///     "From +1555: hello"
/// );
/// assert_eq!(text_from_queue_body("plain text"), "plain text");
/// ```
pub fn text_from_queue_body(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(fields)) => format!(
            "From {}: {}",
            field_text(fields.get("from")),
            field_text(fields.get("body"))
        ),
        _ => raw.to_string(),
    }
}

fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
