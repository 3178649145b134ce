//! Call frames and variable slots
//!
//! Frames form the interpreter's scope stack. Each frame remembers its
//! parent as an *index* into the interpreter's frame arena rather than a
//! live reference, which keeps the parent chain acyclic and lets frames
//! be popped without ownership gymnastics.
//!
//! A variable slot is either a plain string value or an alias pointing at
//! a slot in another frame. Aliases are how `global` links a local name
//! to the global frame; both reads and writes resolve one alias hop
//! before acting.

use std::collections::HashMap;

/// One variable binding inside a frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// A plain string value.
    Value(String),
    /// A redirection to `name` inside the frame at `frame`.
    Alias { frame: usize, name: String },
}

/// One lexical scope on the interpreter's stack.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Index of the frame that was on top of the stack when this frame
    /// was created. `None` only for the root (global) frame.
    pub parent: Option<usize>,
    vars: HashMap<String, Slot>,
}

impl Frame {
    pub fn new(parent: Option<usize>) -> Self {
        Frame {
            parent,
            vars: HashMap::new(),
        }
    }

    pub fn slot(&self, name: &str) -> Option<&Slot> {
        self.vars.get(name)
    }

    /// Bind `name` to a plain value, replacing any existing slot.
    pub fn set_value(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), Slot::Value(value.to_string()));
    }

    /// Bind `name` to an alias for `target_name` in frame `target_frame`.
    pub fn set_alias(&mut self, name: &str, target_frame: usize, target_name: &str) {
        self.vars.insert(
            name.to_string(),
            Slot::Alias {
                frame: target_frame,
                name: target_name.to_string(),
            },
        );
    }
}
