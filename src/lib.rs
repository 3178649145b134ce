//! tickle - An embeddable Tcl-subset interpreter
//!
//! # Overview
//!
//! tickle interprets a subset of the Tcl scripting language. Lexing,
//! parsing, and evaluation happen in a single integrated pass: Tcl's
//! substitution rules make them mutually recursive, because a `[...]`
//! embedded command must be evaluated while the enclosing word is still
//! being parsed.
//!
//! # Core Concepts
//!
//! ## Words and substitution
//!
//! ```text
//! set greeting hello       # unquoted words, substitutions apply
//! puts "value: $greeting"  # quoted words, substitutions apply
//! puts {literal $text}     # braced words, no substitution at all
//! set line [set greeting]  # [...] evaluates inline during parsing
//! ```
//!
//! ## Frames and scoping
//!
//! Every command dispatch runs in a fresh frame whose parent is the
//! frame the command was parsed in. `set` and `global` act on the
//! caller's frame; `global` links a name to the interpreter's global
//! frame through an alias slot.
//!
//! ## Procedures and return
//!
//! ```text
//! proc greet {name} {
//!     return "hello, $name"
//! }
//! puts [greet world]
//! ```
//!
//! `return` raises a signal that stops the current script loop; a
//! procedure boundary absorbs it, so it never unwinds the caller.
//!
//! # Example
//!
//! ```rust
//! use tickle::Interp;
//!
//! let mut interp = Interp::new();
//! let result = interp.eval("set name a; set $name 99\nset a").unwrap();
//! assert_eq!(result, "99");
//! ```

pub mod commands;
pub mod cursor;
pub mod escape;
pub mod frame;
pub mod interp;
pub mod parser;
pub mod repl;

// Re-export commonly used items
pub use commands::{Command, Procedure};
pub use cursor::Cursor;
pub use frame::{Frame, Slot};
pub use interp::{Interp, TclError};

/// Convenience function to evaluate a script in a fresh interpreter
pub fn eval(input: &str) -> Result<String, String> {
    let mut interp = Interp::new();
    interp.eval(input).map_err(|e| e.to_string())
}
