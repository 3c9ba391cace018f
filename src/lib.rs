//! # asm
//!
//! A register machine for a small line-oriented assembly language.
//!
//! Programs are plain text files run with `asm <FILE> [FUNCTION]`.
//! ```text
//! mov rg0 "Hello World"
//! println rg0
//! ```
//!
//! Registers hold null, numbers, booleans, strings or JSON structures.
//! Labels and functions are collected before the first instruction runs,
//! and `async` calls run a function in a separate interpreter process.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

#[path = "doc/chapter_2.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_2;

#[path = "doc/chapter_3.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_3;

pub mod lang;
pub mod mach;
pub mod term;
