//! The interpreter core
//!
//! `Interp` owns the command registry and the frame stack and drives the
//! parse-then-dispatch loop over a script. Parsing and evaluation are
//! mutually recursive: the word parsers call back into `dispatch` for
//! embedded `[...]` commands, and a procedure handler calls back into
//! `eval` for its body. Both re-entries go through the same `Interp`.
//!
//! # Frame discipline
//!
//! A frame is pushed on every command dispatch, not only on procedure
//! entry, and popped unconditionally when the dispatch completes. The pop
//! happens on the error path too, so a failing handler can never leak a
//! frame. Index 0 of the stack is the global frame and lives as long as
//! the interpreter.

use crate::commands::{self, Command};
use crate::cursor::Cursor;
use crate::frame::{Frame, Slot};
use crate::parser;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TclError {
    #[error("unclosed quote")]
    UnclosedQuote,
    #[error("unclosed brace")]
    UnclosedBrace,
    #[error("no such variable '{0}'")]
    UnknownVariable(String),
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("{0} escape sequences are not supported")]
    UnsupportedEscape(&'static str),
    #[error("{0}")]
    Usage(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A Tcl interpreter instance. Fully self-contained: two instances share
/// no state.
pub struct Interp {
    commands: HashMap<String, Rc<dyn Command>>,
    stack: Vec<Frame>,
    return_flag: bool,
    out: Box<dyn Write>,
}

impl Default for Interp {
    fn default() -> Self {
        Self::new()
    }
}

impl Interp {
    /// Index of the interpreter-lifetime global frame.
    pub const GLOBAL_FRAME: usize = 0;

    /// Create an interpreter with the built-in commands (`set`, `puts`,
    /// `global`, `proc`, `return`) registered and output going to stdout.
    pub fn new() -> Self {
        let mut interp = Interp {
            commands: HashMap::new(),
            stack: vec![Frame::new(None)],
            return_flag: false,
            out: Box::new(io::stdout()),
        };
        commands::register_builtins(&mut interp);
        interp
    }

    /// Evaluate a script and return the result of its last command.
    ///
    /// The loop stops early when a command sets the return flag; the
    /// result is then the result of that command. Blank lines and
    /// comment-only stretches produce no dispatch.
    pub fn eval(&mut self, script: &str) -> Result<String, TclError> {
        let mut cursor = Cursor::new(script);
        // A stale signal from an earlier eval must not truncate this one.
        self.return_flag = false;
        let mut result = String::new();
        while !cursor.at_end(0) {
            let words = parser::parse_command(self, &mut cursor, false)?;
            if words.is_empty() {
                continue;
            }
            result = self.dispatch(words)?;
            if self.return_flag {
                break;
            }
        }
        Ok(result)
    }

    /// Evaluate a word list as a command in a fresh frame.
    ///
    /// The first word is the command name, the rest are its arguments.
    /// The frame is popped whether the handler succeeds or fails.
    pub fn dispatch(&mut self, mut words: Vec<String>) -> Result<String, TclError> {
        if words.is_empty() {
            return Ok(String::new());
        }
        let name = words.remove(0);
        let handler = self
            .commands
            .get(&name)
            .cloned()
            .ok_or_else(|| TclError::UnknownCommand(name.clone()))?;

        let parent = self.stack.len() - 1;
        self.stack.push(Frame::new(Some(parent)));
        let result = handler.call(self, &words);
        self.stack.pop();
        result
    }

    /// Install a command. Replaces any existing command of the same name.
    pub fn add_command(&mut self, name: &str, handler: impl Command + 'static) {
        self.commands.insert(name.to_string(), Rc::new(handler));
    }

    // --- frames -----------------------------------------------------------

    /// Index of the current (innermost) frame. During a handler call this
    /// is the frame that was pushed for the dispatch.
    pub fn current_frame(&self) -> usize {
        self.stack.len() - 1
    }

    /// Index of the current frame's parent: the frame the command was
    /// parsed in. `set` and `global` mutate this frame, not their own.
    pub fn caller_frame(&self) -> usize {
        self.stack[self.current_frame()].parent.unwrap_or(0)
    }

    /// Read a variable from a frame, following one alias hop.
    pub fn get_var(&self, frame: usize, name: &str) -> Option<String> {
        match self.stack[frame].slot(name)? {
            Slot::Value(v) => Some(v.clone()),
            Slot::Alias { frame, name } => match self.stack[*frame].slot(name) {
                Some(Slot::Value(v)) => Some(v.clone()),
                _ => None,
            },
        }
    }

    /// Write a variable into a frame. If the name is aliased there, the
    /// write lands in the aliased frame instead.
    pub fn set_var(&mut self, frame: usize, name: &str, value: &str) {
        let target = match self.stack[frame].slot(name) {
            Some(Slot::Alias { frame, name }) => Some((*frame, name.clone())),
            _ => None,
        };
        match target {
            Some((frame, name)) => self.stack[frame].set_value(&name, value),
            None => self.stack[frame].set_value(name, value),
        }
    }

    /// Alias `name` in `frame` to `target_name` in `target_frame`.
    pub fn alias_var(&mut self, frame: usize, name: &str, target_frame: usize, target_name: &str) {
        self.stack[frame].set_alias(name, target_frame, target_name);
    }

    /// Set a variable in the global frame.
    pub fn set_global(&mut self, name: &str, value: &str) {
        self.set_var(Self::GLOBAL_FRAME, name, value);
    }

    /// Read a variable from the global frame.
    pub fn get_global(&self, name: &str) -> Option<String> {
        self.get_var(Self::GLOBAL_FRAME, name)
    }

    // --- return signal ----------------------------------------------------

    /// Raise the return signal. The script loop stops after the command
    /// that set it; a procedure boundary absorbs it.
    pub fn set_return_flag(&mut self) {
        self.return_flag = true;
    }

    pub fn return_flag(&self) -> bool {
        self.return_flag
    }

    /// Consume the return signal so it does not leak past a procedure
    /// boundary into the enclosing script.
    pub fn clear_return_flag(&mut self) {
        self.return_flag = false;
    }

    // --- output -----------------------------------------------------------

    /// The channel `puts` writes to. Stdout unless replaced.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Redirect `puts` output, e.g. to a buffer in tests.
    pub fn set_output(&mut self, out: Box<dyn Write>) {
        self.out = out;
    }
}
