//! Failure-reason classification and normalization.
//!
//! Every failure channel in this crate (an `Err` from a future, a caught
//! panic payload, a synchronous `fail` call) funnels through [`Reason`]: the
//! raw value is classified into exactly one variant up front, and
//! [`Reason::normalize`] then maps each variant to a canonical
//! [`anyhow::Error`] with a human-readable message.

use std::any::Any;

use serde_json::Value;

/// A classified failure reason, one variant per normalization rule.
///
/// Construction happens through the `From` impls (and [`Reason::from_panic`]
/// for panic payloads), so every reason is classified exactly once before it
/// reaches the normalizer.
#[derive(Debug)]
pub enum Reason {
    /// The reason already carries error identity; passed through unchanged.
    Error(anyhow::Error),
    /// A textual reason; becomes the error message verbatim.
    Text(String),
    /// A structured value with a textual `message` field.
    Labeled { message: String },
    /// A structured value without a usable `message` field.
    Structured(Value),
    /// Null, absent, or an unrecognized shape.
    Opaque,
}

impl Reason {
    /// Classify a caught panic payload.
    ///
    /// Panics carry a `Box<dyn Any + Send>`; in practice the payload is a
    /// `String` (from `panic!` with formatting) or a `&'static str` (from a
    /// literal). Anything we cannot downcast is opaque.
    #[must_use]
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<String>() {
            Ok(text) => return Self::Text(*text),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<&'static str>() {
            Ok(text) => return Self::Text((*text).to_owned()),
            Err(payload) => payload,
        };
        let payload = match payload.downcast::<anyhow::Error>() {
            Ok(err) => return Self::Error(*err),
            Err(payload) => payload,
        };
        match payload.downcast::<Value>() {
            Ok(value) => Self::from(*value),
            Err(_) => Self::Opaque,
        }
    }

    /// Map this reason to a canonical error. Total; never panics.
    ///
    /// Pass-through reasons keep their identity (message, chain, and any
    /// downcastable source). Structured reasons without a `message` field are
    /// rendered as compact JSON — best effort, and potentially unreadable for
    /// deeply nested values; that is an accepted limitation of the coercion
    /// path, not something this crate tries to repair.
    #[must_use]
    pub fn normalize(self) -> anyhow::Error {
        match self {
            Self::Error(err) => err,
            Self::Text(message) => anyhow::anyhow!(message),
            Self::Labeled { message } => anyhow::anyhow!(message),
            Self::Structured(value) => {
                tracing::debug!("coercing structured failure reason to text");
                anyhow::anyhow!(value.to_string())
            }
            Self::Opaque => {
                tracing::debug!("failure reason carried no usable shape");
                anyhow::anyhow!("Unknown error")
            }
        }
    }
}

impl From<anyhow::Error> for Reason {
    fn from(err: anyhow::Error) -> Self {
        Self::Error(err)
    }
}

impl From<String> for Reason {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Reason {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<Value> for Reason {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            Value::Null => Self::Opaque,
            Value::Object(map) => match map.get("message").and_then(Value::as_str) {
                Some(message) => Self::Labeled {
                    message: message.to_owned(),
                },
                None => Self::Structured(Value::Object(map)),
            },
            other => Self::Structured(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Error as IoError;

    use serde_json::json;

    use super::*;

    #[test]
    fn error_reason_passes_through_with_identity() {
        let io = IoError::other("disk on fire");
        let reason = Reason::from(anyhow::Error::from(io));
        let normalized = reason.normalize();
        assert_eq!(normalized.to_string(), "disk on fire");
        assert!(normalized.downcast_ref::<IoError>().is_some());
    }

    #[test]
    fn text_reason_becomes_message_verbatim() {
        let normalized = Reason::from("connection reset").normalize();
        assert_eq!(normalized.to_string(), "connection reset");
    }

    #[test]
    fn json_string_classifies_as_text() {
        let reason = Reason::from(json!("bad input"));
        assert!(matches!(reason, Reason::Text(_)));
        assert_eq!(reason.normalize().to_string(), "bad input");
    }

    #[test]
    fn object_with_message_field_uses_that_field() {
        let reason = Reason::from(json!({ "message": "bad input", "code": 422 }));
        assert!(matches!(reason, Reason::Labeled { .. }));
        assert_eq!(reason.normalize().to_string(), "bad input");
    }

    #[test]
    fn object_with_non_string_message_is_coerced() {
        let reason = Reason::from(json!({ "message": 5 }));
        assert!(matches!(reason, Reason::Structured(_)));
        assert_eq!(reason.normalize().to_string(), r#"{"message":5}"#);
    }

    #[test]
    fn object_without_message_renders_compact_json() {
        let normalized = Reason::from(json!({ "code": 7 })).normalize();
        assert_eq!(normalized.to_string(), r#"{"code":7}"#);
    }

    #[test]
    fn null_falls_back_to_fixed_message() {
        let normalized = Reason::from(Value::Null).normalize();
        assert_eq!(normalized.to_string(), "Unknown error");
    }

    #[test]
    fn panic_payload_string_classifies_as_text() {
        let payload: Box<dyn Any + Send> = Box::new("boom".to_owned());
        assert_eq!(Reason::from_panic(payload).normalize().to_string(), "boom");
    }

    #[test]
    fn panic_payload_static_str_classifies_as_text() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(Reason::from_panic(payload).normalize().to_string(), "boom");
    }

    #[test]
    fn unrecognized_panic_payload_is_opaque() {
        let payload: Box<dyn Any + Send> = Box::new(42_u32);
        let normalized = Reason::from_panic(payload).normalize();
        assert_eq!(normalized.to_string(), "Unknown error");
    }
}
