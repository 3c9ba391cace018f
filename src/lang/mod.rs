/*!
# Rust Language Module

This Rust module splits assembly source into lines, strips comments,
and groups the words of a line into a command and its operands.

*/

pub type LineNumber = Option<usize>;

#[macro_use]
mod error;
mod ident;
mod lex;
mod line;

pub use error::Error;
pub use error::ErrorCode;
pub use ident::validate_register_name;
pub use lex::{is_float, lex, parse_float, strip_comment};
pub use line::Line;
