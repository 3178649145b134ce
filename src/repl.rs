//! Interactive read-eval-print loop
//!
//! A thin line loop over `rustyline`. Each line is evaluated as a
//! complete script in the shared interpreter; non-empty results are
//! echoed, errors go to stderr and do not end the session.

use crate::interp::Interp;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the REPL until EOF (Ctrl-D).
pub fn run(interp: &mut Interp) -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    println!("tickle {} (Ctrl-D to exit)", VERSION);

    loop {
        match editor.readline("% ") {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(&line);
                match interp.eval(&line) {
                    Ok(result) => {
                        if !result.is_empty() {
                            println!("{result}");
                        }
                    }
                    Err(e) => eprintln!("error: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
