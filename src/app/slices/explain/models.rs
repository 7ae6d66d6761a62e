use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub code: Option<Value>,
}

impl ExplainRequest {
    /// The snippet to explain, or `None` when `code` is absent or falsy
    /// (`null`, `""`, `false`, `0`, `[]`, `{}`). Other non-string values are
    /// forwarded as their JSON text.
    pub fn into_code(self) -> Option<String> {
        match self.code? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::Array(items) if items.is_empty() => None,
            Value::Object(fields) if fields.is_empty() => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn code_of(body: Value) -> Option<String> {
        serde_json::from_value::<ExplainRequest>(body)
            .unwrap()
            .into_code()
    }

    #[test]
    fn test_falsy_code_values_are_missing() {
        let falsy = [
            json!(null),
            json!(""),
            json!(false),
            json!(0),
            json!(0.0),
            json!([]),
            json!({}),
        ];
        for code in falsy {
            assert_eq!(code_of(json!({ "code": code })), None, "{code}");
        }
        assert_eq!(code_of(json!({})), None);
    }

    #[test]
    fn test_code_text_is_kept() {
        assert_eq!(code_of(json!({ "code": "x = 1" })).as_deref(), Some("x = 1"));
        assert_eq!(code_of(json!({ "code": 42 })).as_deref(), Some("42"));
        assert_eq!(code_of(json!({ "code": [1, 2] })).as_deref(), Some("[1,2]"));
    }
}
