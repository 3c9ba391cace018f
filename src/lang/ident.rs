use super::{is_float, Error};

/// Register names are ASCII alphanumeric and must not read as a number,
/// otherwise an operand like `1e5` would be ambiguous.
pub fn validate_register_name(name: &str) -> Result<(), Error> {
    if is_float(name) {
        return Err(error!(InvalidRegisterName;
            "Register names must not consist solely of a number. \
             Make sure it is alphanumeric and not parseable to a numeric data type to fix this."
        ));
    }
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(error!(InvalidRegisterName;
            "Register names must consist of alphanumeric characters only"
        ));
    }
    Ok(())
}
