use super::Val;
use crate::error;
use crate::lang::{validate_register_name, Error};
use indexmap::IndexMap;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

const INITIAL_REGISTERS: usize = 10;

/// ## Register bank
///
/// Registers keep the order they were created in so dumps read predictably.

#[derive(Debug, Clone)]
pub struct Registers {
    bank: IndexMap<Rc<str>, Val>,
}

impl Default for Registers {
    fn default() -> Registers {
        let bank = (0..INITIAL_REGISTERS)
            .map(|n| (Rc::from(format!("rg{}", n)), Val::Null))
            .collect();
        Registers { bank }
    }
}

impl Registers {
    pub fn new() -> Registers {
        Registers::default()
    }

    /// `newreg`. An existing register of the same name is reset to null.
    pub fn create(&mut self, name: &str) -> Result<()> {
        validate_register_name(name)?;
        match self.bank.get_mut(name) {
            Some(val) => *val = Val::Null,
            None => {
                self.bank.insert(name.into(), Val::Null);
            }
        }
        Ok(())
    }

    /// `delreg`. Deleting a register that does not exist is not an error.
    pub fn delete(&mut self, name: &str) -> bool {
        self.bank.shift_remove(name).is_some()
    }

    pub fn lookup(&self, name: &str) -> Option<&Val> {
        self.bank.get(name)
    }

    pub fn get(&self, name: &str) -> Result<&Val> {
        match self.bank.get(name) {
            Some(val) => Ok(val),
            None => Err(self.undefined(name)),
        }
    }

    pub fn set(&mut self, name: &str, value: Val) -> Result<()> {
        match self.bank.get_mut(name) {
            Some(val) => {
                *val = value;
                Ok(())
            }
            None => Err(self.undefined(name)),
        }
    }

    pub fn len(&self) -> usize {
        self.bank.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bank.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &Val)> {
        self.bank.iter()
    }

    fn undefined(&self, name: &str) -> Error {
        let names: Vec<&str> = self.bank.keys().map(|k| &**k).collect();
        error!(UndefinedRegister;
            "Register {} does not exist, valid registers are {}",
            name,
            names.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_initial_bank() {
        let r = Registers::new();
        assert_eq!(r.len(), 10);
        assert_eq!(r.get("rg0"), Ok(&Val::Null));
        assert_eq!(r.get("rg9"), Ok(&Val::Null));
        assert_eq!(r.get("rg10").unwrap_err().code(), ErrorCode::UndefinedRegister);
    }

    #[test]
    fn test_create_and_delete() {
        let mut r = Registers::new();
        r.create("count").unwrap();
        r.set("count", Val::Number(3.0)).unwrap();
        assert_eq!(r.get("count"), Ok(&Val::Number(3.0)));
        r.create("count").unwrap();
        assert_eq!(r.get("count"), Ok(&Val::Null));
        assert!(r.delete("count"));
        assert!(!r.delete("count"));
        assert!(r.get("count").is_err());
    }

    #[test]
    fn test_create_invalid() {
        let mut r = Registers::new();
        assert_eq!(
            r.create("42").unwrap_err().code(),
            ErrorCode::InvalidRegisterName
        );
        assert_eq!(
            r.create("a-b").unwrap_err().code(),
            ErrorCode::InvalidRegisterName
        );
        assert_eq!(r.len(), 10);
    }

    #[test]
    fn test_order_is_creation_order() {
        let mut r = Registers::new();
        r.create("zeta").unwrap();
        r.create("alpha").unwrap();
        r.delete("rg3");
        let names: Vec<&str> = r.iter().map(|(k, _)| &**k).collect();
        assert_eq!(
            names,
            vec!["rg0", "rg1", "rg2", "rg4", "rg5", "rg6", "rg7", "rg8", "rg9", "zeta", "alpha"]
        );
    }

    #[test]
    fn test_undefined_message_lists_registers() {
        let mut r = Registers::new();
        r.delete("rg9");
        let e = r.set("nope", Val::Null).unwrap_err();
        assert_eq!(
            e.to_string(),
            "Register nope does not exist, valid registers are rg0,rg1,rg2,rg3,rg4,rg5,rg6,rg7,rg8"
        );
    }
}
