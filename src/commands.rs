//! Built-in commands and the handler contract
//!
//! Every command, built-in or user-supplied, implements [`Command`]. A
//! handler runs inside the frame that `dispatch` pushed for it; the
//! variables it is meant to touch live one frame up, in the caller's
//! frame. `set` and `global` both act there.
//!
//! `proc` registers a [`Procedure`], which is just another `Command`
//! whose body is literal script text re-parsed on every invocation;
//! embedded substitutions in a body are call-time-sensitive, so the
//! parsed form cannot be cached.

use crate::interp::{Interp, TclError};
use std::io::Write;

/// The contract every command handler satisfies.
///
/// `words` holds the command's arguments (the command name itself has
/// already been stripped). A handler may mutate interpreter state only
/// through the documented frame and registry operations, and may re-enter
/// `Interp::eval`.
pub trait Command {
    fn call(&self, interp: &mut Interp, words: &[String]) -> Result<String, TclError>;
}

/// Register the built-in command set on a fresh interpreter.
pub fn register_builtins(interp: &mut Interp) {
    interp.add_command("set", SetCommand);
    interp.add_command("puts", PutsCommand);
    interp.add_command("global", GlobalCommand);
    interp.add_command("proc", ProcCommand);
    interp.add_command("return", ReturnCommand);
}

/// `set name ?value?` — read or write a variable in the caller's frame.
pub struct SetCommand;

impl Command for SetCommand {
    fn call(&self, interp: &mut Interp, words: &[String]) -> Result<String, TclError> {
        let frame = interp.caller_frame();
        match words {
            [name] => interp
                .get_var(frame, name)
                .ok_or_else(|| TclError::UnknownVariable(name.clone())),
            [name, value] => {
                interp.set_var(frame, name, value);
                Ok(value.clone())
            }
            _ => Err(TclError::Usage(
                "wrong # args: should be \"set varName ?newValue?\"".to_string(),
            )),
        }
    }
}

/// `puts string` — write one line to the interpreter's output channel.
pub struct PutsCommand;

impl Command for PutsCommand {
    fn call(&self, interp: &mut Interp, words: &[String]) -> Result<String, TclError> {
        match words {
            [value] => {
                writeln!(interp.output(), "{value}")?;
                Ok(String::new())
            }
            _ => Err(TclError::Usage(
                "wrong # args: should be \"puts string\"".to_string(),
            )),
        }
    }
}

/// `global name ...` — alias each name in the caller's frame to the
/// global frame, so later reads and writes of that name act globally.
pub struct GlobalCommand;

impl Command for GlobalCommand {
    fn call(&self, interp: &mut Interp, words: &[String]) -> Result<String, TclError> {
        if words.is_empty() {
            return Err(TclError::Usage(
                "wrong # args: should be \"global varName ?varName ...?\"".to_string(),
            ));
        }
        let frame = interp.caller_frame();
        for name in words {
            interp.alias_var(frame, name, Interp::GLOBAL_FRAME, name);
        }
        Ok(String::new())
    }
}

/// `proc name params body` — register a user-defined procedure.
pub struct ProcCommand;

impl Command for ProcCommand {
    fn call(&self, interp: &mut Interp, words: &[String]) -> Result<String, TclError> {
        match words {
            [name, params, body] => {
                let params = params.split_whitespace().map(String::from).collect();
                interp.add_command(name, Procedure::new(params, body.clone()));
                Ok(String::new())
            }
            _ => Err(TclError::Usage(
                "wrong # args: should be \"proc name args body\"".to_string(),
            )),
        }
    }
}

/// `return ?value?` — raise the return signal and yield the value.
pub struct ReturnCommand;

impl Command for ReturnCommand {
    fn call(&self, interp: &mut Interp, words: &[String]) -> Result<String, TclError> {
        interp.set_return_flag();
        Ok(words.first().cloned().unwrap_or_default())
    }
}

/// A user-defined procedure: parameter names plus literal body text.
pub struct Procedure {
    params: Vec<String>,
    body: String,
}

impl Procedure {
    pub fn new(params: Vec<String>, body: impl Into<String>) -> Self {
        Procedure {
            params,
            body: body.into(),
        }
    }
}

impl Command for Procedure {
    fn call(&self, interp: &mut Interp, words: &[String]) -> Result<String, TclError> {
        // Bind parameters positionally into the dispatch frame; the
        // shorter of the two lists wins, so extra parameters stay unbound
        // and extra arguments are discarded.
        let frame = interp.current_frame();
        for (param, value) in self.params.iter().zip(words) {
            interp.set_var(frame, param, value);
        }
        let result = interp.eval(&self.body);
        // A return stops the body, never the caller's script.
        interp.clear_return_flag();
        result
    }
}
