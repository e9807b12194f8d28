use rust_decimal::Decimal;
use serde::Deserialize;

/// A successful (2xx) reply from the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReply {
    pub status: u16,
    /// Parsed JSON body, `Value::Null` when the body is empty or not JSON
    pub body: serde_json::Value,
}

impl ActionReply {
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    #[cfg(test)]
    pub fn empty(status: u16) -> Self {
        Self::new(status, serde_json::Value::Null)
    }

    pub fn close_position_receipt(&self) -> Option<ClosePositionReceipt> {
        serde_json::from_value(self.body.clone()).ok()
    }
}

/// Fill details returned when a position is closed
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClosePositionReceipt {
    pub price: Decimal,
    pub fee: Decimal,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// First JSON value of `body`. The backend can write a second object
/// after an error one (`{"error":"..."}{}`), so trailing data is ignored.
fn first_json<T: serde::de::DeserializeOwned>(body: &str) -> Option<T> {
    serde_json::Deserializer::from_str(body)
        .into_iter::<T>()
        .next()
        .and_then(|value| value.ok())
}

/// Text to show for a failed response: the `error` field of a JSON body,
/// else the trimmed body, else the status line.
pub fn failure_message(status: u16, body: &str) -> String {
    if let Some(parsed) = first_json::<ErrorBody>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status)
    } else {
        trimmed.to_string()
    }
}

pub fn parse_body(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    first_json(body).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_error_field_is_verbatim() {
        assert_eq!(failure_message(400, r#"{"error":"boom"}"#), "boom");
        assert_eq!(failure_message(400, r#"{"error":"此策略並未開倉"}"#), "此策略並未開倉");
        assert_eq!(failure_message(400, r#"{"error":"  padded  "}"#), "  padded  ");
    }

    #[test]
    fn test_error_object_followed_by_second_object() {
        assert_eq!(failure_message(400, r#"{"error":"Internal error"}{}"#), "Internal error");
        assert_eq!(
            failure_message(400, r#"{"error":"此策略並未開倉"}{"price":"1","fee":"0.1"}"#),
            "此策略並未開倉"
        );
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(failure_message(502, "Bad Gateway\n"), "Bad Gateway");
        assert_eq!(failure_message(500, ""), "HTTP 500");
        assert_eq!(failure_message(400, r#"{"message":"nope"}"#), r#"{"message":"nope"}"#);
    }

    #[test]
    fn test_close_position_receipt() {
        let reply = ActionReply::new(200, json!({"price": "27150.5", "fee": "1.3"}));
        let receipt = reply.close_position_receipt().unwrap();
        assert_eq!(receipt.price, dec!(27150.5));
        assert_eq!(receipt.fee, dec!(1.3));

        assert!(ActionReply::empty(200).close_position_receipt().is_none());
    }

    #[test]
    fn test_parse_body_tolerates_non_json() {
        assert_eq!(parse_body(""), serde_json::Value::Null);
        assert_eq!(parse_body("<html></html>"), serde_json::Value::Null);
        assert_eq!(parse_body("{}"), json!({}));
    }
}
