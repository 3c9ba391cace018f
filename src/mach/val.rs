use crate::lang::parse_float;
use std::rc::Rc;

/// ## Register value
///
/// `Structure` only ever holds a JSON array or object. Scalars found inside a
/// structure are converted to the matching variant when read out of it.
#[derive(Debug, Clone, PartialEq)]
pub enum Val {
    Null,
    Number(f64),
    Boolean(bool),
    String(Rc<str>),
    Structure(Rc<serde_json::Value>),
}

impl Default for Val {
    fn default() -> Val {
        Val::Null
    }
}

impl From<serde_json::Value> for Val {
    fn from(value: serde_json::Value) -> Val {
        use serde_json::Value;
        match value {
            Value::Null => Val::Null,
            Value::Bool(b) => Val::Boolean(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Val::Number(f),
                None => Val::Null,
            },
            Value::String(s) => Val::String(s.into()),
            Value::Array(_) | Value::Object(_) => Val::Structure(Rc::new(value)),
        }
    }
}

impl Val {
    pub fn is_null(&self) -> bool {
        matches!(self, Val::Null)
    }

    /// Numeric value for arithmetic. Strings count when they hold a decimal
    /// literal; nothing else converts.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Val::Number(n) if n.is_finite() => Some(*n),
            Val::String(s) => parse_float(s),
            _ => None,
        }
    }

    /// Condition used by `jmpcond`.
    pub fn is_truthy(&self) -> bool {
        use serde_json::Value;
        match self {
            Val::Null => false,
            Val::Number(n) => *n != 0.0,
            Val::Boolean(b) => *b,
            Val::String(s) => !s.is_empty(),
            Val::Structure(v) => match &**v {
                Value::Array(a) => !a.is_empty(),
                Value::Object(o) => !o.is_empty(),
                _ => true,
            },
        }
    }

    /// Descend one step of a `reg.a.b` path.
    pub fn field(&self, name: &str) -> Option<Val> {
        use serde_json::Value;
        match self {
            Val::Structure(v) => match &**v {
                Value::Object(o) => o.get(name).cloned().map(Val::from),
                Value::Array(a) => name
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| a.get(i))
                    .cloned()
                    .map(Val::from),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Shortest text that reads back as the same number, without a trailing `.0`.
/// Magnitudes below 1e-6 or from 1e21 up use exponent form, as in `1e+21`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() < 1e-6 || n.abs() >= 1e21 {
        let s = format!("{:e}", n);
        match s.find('e') {
            Some(index) if !s[index + 1..].starts_with('-') => {
                format!("{}e+{}", &s[..index], &s[index + 1..])
            }
            _ => s,
        }
    } else {
        format!("{}", n)
    }
}

impl std::fmt::Display for Val {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Val::Null => write!(f, "null"),
            Val::Number(n) => write!(f, "{}", format_number(*n)),
            Val::Boolean(b) => write!(f, "{}", b),
            Val::String(s) => write!(f, "{}", s),
            Val::Structure(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(Val::Number(5.0).to_string(), "5");
        assert_eq!(Val::Number(-0.0).to_string(), "0");
        assert_eq!(Val::Number(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Val::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Val::Number(1e21).to_string(), "1e+21");
        assert_eq!(Val::Number(-2.5e30).to_string(), "-2.5e+30");
        assert_eq!(Val::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Val::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Val::Number(1.5e-8).to_string(), "1.5e-8");
        assert_eq!(Val::Number(0.000001).to_string(), "0.000001");
        assert_eq!(Val::Boolean(false).to_string(), "false");
        assert_eq!(Val::String("hi there".into()).to_string(), "hi there");
        assert_eq!(Val::from(json!({"a": [1, 2]})).to_string(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Val::Number(2.5).to_number(), Some(2.5));
        assert_eq!(Val::String("2".into()).to_number(), Some(2.0));
        assert_eq!(Val::String("two".into()).to_number(), None);
        assert_eq!(Val::Boolean(true).to_number(), None);
        assert_eq!(Val::Null.to_number(), None);
        assert_eq!(Val::Number(f64::NAN).to_number(), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Val::Null.is_truthy());
        assert!(!Val::Number(0.0).is_truthy());
        assert!(Val::Number(-1.0).is_truthy());
        assert!(Val::Number(f64::NAN).is_truthy());
        assert!(!Val::String("".into()).is_truthy());
        assert!(Val::String("0".into()).is_truthy());
        assert!(!Val::from(json!([])).is_truthy());
        assert!(!Val::from(json!({})).is_truthy());
        assert!(Val::from(json!([0])).is_truthy());
        assert!(Val::from(json!({"a": null})).is_truthy());
    }

    #[test]
    fn test_field() {
        let v = Val::from(json!({"a": {"b": [10, "x", null]}}));
        let b = v.field("a").and_then(|a| a.field("b")).unwrap();
        assert_eq!(b.field("0"), Some(Val::Number(10.0)));
        assert_eq!(b.field("1"), Some(Val::String("x".into())));
        assert_eq!(b.field("2"), Some(Val::Null));
        assert_eq!(b.field("3"), None);
        assert_eq!(v.field("missing"), None);
        assert_eq!(Val::Number(1.0).field("a"), None);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(Val::from(json!({"a": 1})), Val::from(json!({"a": 1})));
        assert_ne!(Val::Number(1.0), Val::String("1".into()));
        assert_ne!(Val::Number(f64::NAN), Val::Number(f64::NAN));
    }
}
