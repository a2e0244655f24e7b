//! Typed access to tool-call arguments.
//!
//! `null` is treated the same as an absent key.

use crate::catalog::DEFAULT_LIMIT;
use crate::error::{Result, ToolError};
use rmcp::model::JsonObject;
use serde_json::Value;

pub struct Arguments<'a> {
    inner: &'a JsonObject,
}

impl<'a> Arguments<'a> {
    #[must_use]
    pub fn new(inner: &'a JsonObject) -> Self {
        Self { inner }
    }

    fn present(&self, name: &str) -> Option<&'a Value> {
        self.inner.get(name).filter(|v| !v.is_null())
    }

    pub fn optional_str(&self, name: &'static str) -> Result<Option<String>> {
        match self.present(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(ToolError::InvalidArgument {
                name,
                expected: "string",
            }),
        }
    }

    pub fn required_str(&self, name: &'static str) -> Result<String> {
        self.optional_str(name)?
            .ok_or(ToolError::MissingArgument(name))
    }

    pub fn optional_i64(&self, name: &'static str) -> Result<Option<i64>> {
        match self.present(name) {
            None => Ok(None),
            Some(v) => v.as_i64().map(Some).ok_or(ToolError::InvalidArgument {
                name,
                expected: "integer",
            }),
        }
    }

    pub fn required_i64(&self, name: &'static str) -> Result<i64> {
        self.optional_i64(name)?
            .ok_or(ToolError::MissingArgument(name))
    }

    /// `limit`, defaulting to [`DEFAULT_LIMIT`].
    pub fn limit(&self) -> Result<i64> {
        Ok(self.optional_i64("limit")?.unwrap_or(DEFAULT_LIMIT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> JsonObject {
        match v {
            Value::Object(o) => o,
            _ => JsonObject::new(),
        }
    }

    #[test]
    fn limit_defaults_to_fifty() {
        let empty = JsonObject::new();
        assert_eq!(Arguments::new(&empty).limit().expect("limit"), 50);

        let explicit_null = obj(json!({"limit": null}));
        assert_eq!(Arguments::new(&explicit_null).limit().expect("limit"), 50);

        let set = obj(json!({"limit": 3}));
        assert_eq!(Arguments::new(&set).limit().expect("limit"), 3);
    }

    #[test]
    fn non_integer_limit_is_rejected() {
        for bad in [json!({"limit": "10"}), json!({"limit": 2.5})] {
            let args = obj(bad);
            let err = Arguments::new(&args).limit().unwrap_err();
            assert_eq!(err.to_string(), "invalid argument 'limit': expected integer");
        }
    }

    #[test]
    fn required_string_reports_missing_and_mistyped_values() {
        let missing = JsonObject::new();
        let err = Arguments::new(&missing)
            .required_str("customer_id")
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required argument 'customer_id'");

        let mistyped = obj(json!({"customer_id": 42}));
        let err = Arguments::new(&mistyped)
            .required_str("customer_id")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid argument 'customer_id': expected string"
        );
    }

    #[test]
    fn optional_string_passes_through_when_present() {
        let args = obj(json!({"status": "paid_out"}));
        let args = Arguments::new(&args);
        assert_eq!(
            args.optional_str("status").expect("ok").as_deref(),
            Some("paid_out")
        );
        assert_eq!(args.optional_str("mandate").expect("ok"), None);
    }
}
