/*!
## Rust Machine Module

This Rust module is the register machine: the program store built by the
preprocessing pass, the register bank, operand resolution and the
instruction dispatcher.

*/

/// A 1-based continuation index into the program's executable lines.
pub type Address = usize;

mod inspect;
mod listing;
mod opcode;
mod operand;
mod operation;
mod program;
mod register;
mod runtime;
mod stack;
mod val;

pub use inspect::inspect;
pub use inspect::Dump;
pub use listing::Listing;
pub use opcode::Opcode;
pub use operand::resolve;
pub use operation::Operation;
pub use program::Function;
pub use program::Program;
pub use register::Registers;
pub use runtime::Event;
pub use runtime::Frame;
pub use runtime::Runtime;
pub use stack::Stack;
pub use val::Val;

#[cfg(test)]
mod tests;
