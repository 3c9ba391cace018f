use super::Val;
use crate::error;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

pub struct Operation {}

impl Operation {
    fn numbers(lhs: &Val, rhs: &Val) -> Result<(f64, f64)> {
        match (lhs.to_number(), rhs.to_number()) {
            (Some(l), Some(r)) => Ok((l, r)),
            _ => Err(error!(TypeMismatch;
                "Can't do math with {} and {}, one of those is not a number", lhs, rhs
            )),
        }
    }

    pub fn sum(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(&lhs, &rhs)?;
        Ok(Val::Number(l + r))
    }

    pub fn subtract(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(&lhs, &rhs)?;
        Ok(Val::Number(l - r))
    }

    pub fn multiply(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(&lhs, &rhs)?;
        Ok(Val::Number(l * r))
    }

    pub fn divide(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(&lhs, &rhs)?;
        if r == 0.0 {
            return Err(error!(DivisionByZero; "Can't divide by 0"));
        }
        Ok(Val::Number(l / r))
    }

    pub fn power(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(&lhs, &rhs)?;
        Ok(Val::Number(l.powf(r)))
    }

    /// Floating point remainder; the result takes the sign of `lhs`.
    pub fn modulo(lhs: Val, rhs: Val) -> Result<Val> {
        let (l, r) = Operation::numbers(&lhs, &rhs)?;
        Ok(Val::Number(l % r))
    }

    pub fn increment(name: &str, val: &Val) -> Result<Val> {
        match val.to_number() {
            Some(n) => Ok(Val::Number(n + 1.0)),
            None => Err(error!(TypeMismatch;
                "Can't inc non-numeric register value of {}", name
            )),
        }
    }

    pub fn decrement(name: &str, val: &Val) -> Result<Val> {
        match val.to_number() {
            Some(n) => Ok(Val::Number(n - 1.0)),
            None => Err(error!(TypeMismatch;
                "Can't dec non-numeric register value of {}", name
            )),
        }
    }

    /// `rev`: toggles 0 and 1, reverses strings, negates booleans.
    /// Any other value becomes null.
    pub fn reverse(val: Val) -> Val {
        match val {
            Val::Number(n) => Val::Number(if n == 0.0 { 1.0 } else { 0.0 }),
            Val::String(s) => Val::String(s.chars().rev().collect::<String>().into()),
            Val::Boolean(b) => Val::Boolean(!b),
            Val::Null | Val::Structure(_) => Val::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;
    use serde_json::json;

    fn s(v: &str) -> Val {
        Val::String(v.into())
    }

    #[test]
    fn test_numeric_strings_coerce() {
        assert_eq!(Operation::sum(s("2"), s("3")), Ok(Val::Number(5.0)));
        assert_eq!(Operation::multiply(Val::Number(4.0), s("0.5")), Ok(Val::Number(2.0)));
    }

    #[test]
    fn test_non_numbers_are_type_errors() {
        let e = Operation::sum(Val::Boolean(true), Val::Number(1.0)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
        let e = Operation::subtract(s("a"), Val::Number(1.0)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
        let e = Operation::power(Val::from(json!([1])), Val::Number(1.0)).unwrap_err();
        assert_eq!(e.code(), ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_divide() {
        assert_eq!(Operation::divide(Val::Number(7.0), s("2")), Ok(Val::Number(3.5)));
        let e = Operation::divide(s("4"), s("0")).unwrap_err();
        assert_eq!(e.code(), ErrorCode::DivisionByZero);
        assert_eq!(e.to_string(), "Can't divide by 0");
    }

    #[test]
    fn test_power_and_modulo() {
        assert_eq!(Operation::power(Val::Number(2.0), Val::Number(10.0)), Ok(Val::Number(1024.0)));
        assert_eq!(Operation::modulo(Val::Number(-7.0), Val::Number(3.0)), Ok(Val::Number(-1.0)));
        match Operation::modulo(Val::Number(1.0), Val::Number(0.0)) {
            Ok(Val::Number(n)) => assert!(n.is_nan()),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_increment_and_decrement() {
        assert_eq!(Operation::increment("rg0", &s("5")), Ok(Val::Number(6.0)));
        assert_eq!(Operation::decrement("rg0", &Val::Number(0.0)), Ok(Val::Number(-1.0)));
        let e = Operation::increment("rg0", &Val::Null).unwrap_err();
        assert_eq!(e.to_string(), "Can't inc non-numeric register value of rg0");
    }

    #[test]
    fn test_reverse_is_an_involution() {
        for v in vec![Val::Number(0.0), Val::Number(1.0), Val::Boolean(true), s("héllo")] {
            assert_eq!(Operation::reverse(Operation::reverse(v.clone())), v);
        }
        assert_eq!(Operation::reverse(Val::Number(5.0)), Val::Number(0.0));
        assert_eq!(Operation::reverse(s("abc")), s("cba"));
        assert_eq!(Operation::reverse(Val::from(json!({"a": 1}))), Val::Null);
    }
}
