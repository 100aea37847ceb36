//! Values accepted by the serializer.

use serde_json::Value;

use super::error::QueryError;

/// A mapping value: either a single scalar or a sequence of scalars.
///
/// Numbers and booleans are stored already rendered, the way a browser would
/// stringify them (`1`, `2.5`, `true`, `Infinity`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl QueryValue {
    /// Converts a dynamically-typed JSON value. `key` is only used for error reporting.
    pub fn from_json(key: &str, value: &Value) -> Result<Self, QueryError> {
        match value {
            Value::Array(items) => items
                .iter()
                .map(|item| json_scalar(key, item))
                .collect::<Result<Vec<_>, _>>()
                .map(QueryValue::Sequence),
            other => json_scalar(key, other).map(QueryValue::Scalar),
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(s) => Some(s),
            QueryValue::Sequence(_) => None,
        }
    }
}

fn json_scalar(key: &str, value: &Value) -> Result<String, QueryError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                Ok(format_float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Value::Null => Err(unsupported(key, "null")),
        Value::Array(_) => Err(unsupported(key, "nested array")),
        Value::Object(_) => Err(unsupported(key, "object")),
    }
}

pub(super) fn unsupported(key: &str, found: &'static str) -> QueryError {
    QueryError::UnsupportedValueType {
        key: key.to_string(),
        found,
    }
}

/// Renders a float the way JavaScript's `String(number)` does.
///
/// Magnitudes from `1e21` up and below `1e-6` use exponent form (`1e+21`,
/// `1.5e-7`); everything else is plain decimal with no trailing `.0`.
fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        let s = if v > 0.0 { "Infinity" } else { "-Infinity" };
        return s.to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }

    let abs = v.abs();
    if abs >= 1e21 || abs < 1e-6 {
        let exp = format!("{v:e}");
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
            _ => exp,
        }
    } else {
        v.to_string()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A value that renders to a single query-string scalar.
///
/// Sealed: only strings, booleans, integers and `f64` qualify, so a
/// `Vec<Vec<_>>` cannot become a `QueryValue`.
pub trait Scalar: sealed::Sealed {
    fn into_scalar(self) -> String;
}

macro_rules! impl_scalar {
    ($($t:ty => $render:expr),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                fn into_scalar(self) -> String {
                    let render: fn($t) -> String = $render;
                    render(self)
                }
            }

            impl From<$t> for QueryValue {
                fn from(v: $t) -> Self {
                    QueryValue::Scalar(v.into_scalar())
                }
            }
        )*
    };
}

impl_scalar! {
    String => |v| v,
    &str => |v| v.to_string(),
    &String => |v| v.clone(),
    bool => |v| v.to_string(),
    f64 => format_float,
    i32 => |v| v.to_string(),
    i64 => |v| v.to_string(),
    u32 => |v| v.to_string(),
    u64 => |v| v.to_string(),
    usize => |v| v.to_string(),
}

impl<T: Scalar> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        QueryValue::Sequence(items.into_iter().map(Scalar::into_scalar).collect())
    }
}
