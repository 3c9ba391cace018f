use super::{Registers, Val};
use crate::error;
use crate::lang::{parse_float, Error};

type Result<T> = std::result::Result<T, Error>;

/// ## Value resolver
///
/// Turns one operand into a value. Literals are tried in order: quoted
/// string, number, boolean, JSON structure. Anything else is a register
/// reference, optionally followed by a `.field` path.
///
/// A JSON literal that fails to parse is the only recoverable failure: it
/// resolves to null and the problem is pushed onto `warnings`.
pub fn resolve(src: &str, registers: &Registers, warnings: &mut Vec<Error>) -> Result<Val> {
    if let Some(s) = src.strip_prefix('"') {
        let s = s.strip_suffix('"').unwrap_or(s);
        return Ok(Val::String(s.into()));
    }
    if let Some(n) = parse_float(src) {
        return Ok(Val::Number(n));
    }
    match src {
        "true" => return Ok(Val::Boolean(true)),
        "false" => return Ok(Val::Boolean(false)),
        _ => {}
    }
    if src.starts_with('{') && src.ends_with('}') {
        return match serde_json::from_str::<serde_json::Value>(src) {
            Ok(value) => Ok(Val::from(value)),
            Err(e) => {
                warnings.push(error!(MalformedJson;
                    "Could not parse JSON: {}  Bad JSON: {}", e, src
                ));
                Ok(Val::Null)
            }
        };
    }
    register_path(src, registers)
}

fn register_path(src: &str, registers: &Registers) -> Result<Val> {
    let mut path = src.split('.');
    let register_name = path.next().unwrap_or_default();
    let mut val = match registers.lookup(register_name) {
        Some(val) => val.clone(),
        None => {
            return Err(error!(UndefinedRegister;
                "Invalid source register {}, did you mean to put a string in quotes?", src
            ))
        }
    };
    let mut parent = register_name;
    for segment in path {
        val = match val.field(segment) {
            Some(field) => field,
            None => {
                return Err(error!(UndefinedSubitem;
                    "Could not find subitem {} in parent {}  Item: {}", segment, parent, src
                ))
            }
        };
        parent = segment;
    }
    if val.is_null() {
        return Err(error!(NullSource;
            "Tried using value of register {} which is null. \
             Registers must not be null when used as source.",
            src
        ));
    }
    Ok(val)
}
