//! Typed state property values.

use serde_json::{Number, Value};

use crate::case::camel_case_keys;
use crate::escape::escape_js_string;

/// A value stored under a state property name.
///
/// Each variant has its own serialization rule when the literal is built:
///
/// | Variant  | Output                                   |
/// |----------|------------------------------------------|
/// | `Null`   | `null`                                   |
/// | `Bool`   | `true` / `false`                         |
/// | `String` | single-quoted, JavaScript-escaped        |
/// | `Raw`    | verbatim expression                      |
/// | `Json`   | compact JSON                             |
#[derive(Clone, Debug, PartialEq)]
pub enum StateValue {
    /// JavaScript `null`.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// String literal.
    String(String),
    /// Raw expression, emitted as written (e.g. `[]`, `$persist(0)`).
    Raw(String),
    /// Structured value serialized as JSON.
    Json(Value),
}

impl StateValue {
    /// Create a raw expression value.
    #[must_use]
    pub fn raw(expr: impl Into<String>) -> Self {
        Self::Raw(expr.into())
    }

    /// Create a structured value, renaming object keys to camelCase.
    ///
    /// Scalars are mapped onto their dedicated variants so strings keep the
    /// single-quoted form.
    #[must_use]
    pub fn structured(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::String(s),
            other => Self::Json(camel_case_keys(other)),
        }
    }

    /// Create a structured value whose object keys are kept as given.
    ///
    /// Used for caller-keyed maps such as data rows keyed by field path.
    #[must_use]
    pub fn verbatim(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::String(s),
            other => Self::Json(other),
        }
    }

    /// Append the serialized form to `out`.
    pub(crate) fn write_to(&self, out: &mut String) {
        match self {
            Self::Null => out.push_str("null"),
            Self::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            Self::String(s) => {
                out.push('\'');
                out.push_str(&escape_js_string(s));
                out.push('\'');
            }
            Self::Raw(expr) => out.push_str(expr),
            Self::Json(value) => out.push_str(&value.to_string()),
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Value> for StateValue {
    fn from(value: Value) -> Self {
        Self::structured(value)
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, |n| Self::Json(Value::Number(n)))
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for StateValue {
                fn from(value: $ty) -> Self {
                    Self::Json(Value::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl<T: Into<StateValue>> From<Option<T>> for StateValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn serialize(value: impl Into<StateValue>) -> String {
        let mut out = String::new();
        value.into().write_to(&mut out);
        out
    }

    #[test]
    fn test_scalars() {
        assert_eq!(serialize(true), "true");
        assert_eq!(serialize(false), "false");
        assert_eq!(serialize(StateValue::Null), "null");
        assert_eq!(serialize(1), "1");
        assert_eq!(serialize(2.5), "2.5");
        assert_eq!(serialize(f64::NAN), "null");
    }

    #[test]
    fn test_string_is_single_quoted_and_escaped() {
        assert_eq!(serialize("it's"), r"'it\'s'");
        assert_eq!(serialize(String::from("a\nb")), r"'a\nb'");
    }

    #[test]
    fn test_raw_is_verbatim() {
        assert_eq!(serialize(StateValue::raw("[]")), "[]");
        assert_eq!(serialize(StateValue::raw("$persist(0)")), "$persist(0)");
    }

    #[test]
    fn test_option() {
        assert_eq!(serialize(None::<&str>), "null");
        assert_eq!(serialize(Some("x")), "'x'");
    }

    #[test]
    fn test_structured_renames_keys() {
        let value = StateValue::structured(json!([{ "href_text": "Open", "hidden": false }]));
        assert_eq!(serialize(value), r#"[{"hidden":false,"hrefText":"Open"}]"#);
    }

    #[test]
    fn test_structured_scalar_uses_scalar_variant() {
        assert_eq!(
            StateValue::structured(json!("plain")),
            StateValue::String("plain".to_owned())
        );
        assert_eq!(StateValue::structured(json!(null)), StateValue::Null);
    }

    #[test]
    fn test_verbatim_keeps_keys() {
        let value = StateValue::verbatim(json!({ "unit_price": 3 }));
        assert_eq!(serialize(value), r#"{"unit_price":3}"#);
    }
}
