use serde_json::{Map, Value};

pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred. Please try again.";

/// Shapes a backend error body can take
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload {
    /// `{"field": ["message", ...]}`
    FieldMessages { field: String, messages: Vec<String> },
    /// `{"field": "message"}`
    FieldMessage { field: String, message: String },
    /// `{"detail": "message"}`
    Detail(String),
    /// Anything else, including bodies that are not JSON at all
    Unrecognized,
}

impl ErrorPayload {
    /// Classify an error body. Only the first key of an object is considered
    /// for field errors, in the order the backend wrote them. Blank messages
    /// do not count.
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Self::from_object(&map),
            _ => ErrorPayload::Unrecognized,
        }
    }

    fn from_object(map: &Map<String, Value>) -> Self {
        if let Some((field, value)) = map.iter().next() {
            match value {
                Value::Array(items) => {
                    let messages: Vec<String> = items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect();
                    if matches!(items.first(), Some(Value::String(first)) if !first.trim().is_empty()) {
                        return ErrorPayload::FieldMessages {
                            field: field.clone(),
                            messages,
                        };
                    }
                }
                Value::String(message) if !message.trim().is_empty() => {
                    return ErrorPayload::FieldMessage {
                        field: field.clone(),
                        message: message.clone(),
                    };
                }
                _ => {}
            }
        }

        match map.get("detail") {
            Some(Value::String(detail)) if !detail.trim().is_empty() => {
                ErrorPayload::Detail(detail.clone())
            }
            _ => ErrorPayload::Unrecognized,
        }
    }

    /// The single message to show the user, when the body carried one
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorPayload::FieldMessages { messages, .. } => messages.first().map(String::as_str),
            ErrorPayload::FieldMessage { message, .. } => Some(message),
            ErrorPayload::Detail(detail) => Some(detail),
            ErrorPayload::Unrecognized => None,
        }
    }

    /// Message for a failed response with the given status
    pub fn into_message(self, status: u16) -> String {
        match self.message() {
            Some(message) if !message.trim().is_empty() => message.to_string(),
            _ if status > 0 => format!("Request failed with status code {}", status),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
