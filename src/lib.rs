//! # EZC
//!
//! A small dynamically typed, stack-based scripting language.
//!
//! Run `ezc` with no arguments for an interactive session, or
//! `ezc file.ezc` to run a program.
//! ```text
//! ezc> "Hello, World" print!
//! Hello, World
//! ezc> █
//! ```
//!
//! The `mach` module is the execution core and can be embedded on its own:
//! ```
//! use ezc::mach::{Runtime, Val};
//!
//! let program = ezc::lang::compile("doc", "2 10 ^").unwrap();
//! let mut runtime = Runtime::new();
//! runtime.execute(&program).unwrap();
//! assert_eq!(runtime.stack().last(), Some(&Val::Int(1024)));
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/functions.rs"]
#[allow(non_snake_case)]
pub mod __Functions;

pub mod lang;
pub mod mach;
pub mod term;
