//! tickle - An embeddable Tcl-subset interpreter
//!
//! Usage:
//!   tickle              Start interactive REPL
//!   tickle -c "script"  Evaluate a script given on the command line
//!   tickle file...      Run script files in a single interpreter

use std::env;
use std::fs;
use std::process::ExitCode;
use tickle::{repl, Interp};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_help() {
    println!(
        r#"tickle {} - An embeddable Tcl-subset interpreter

USAGE:
    tickle                  Start interactive REPL
    tickle -c <script>      Evaluate a script and print its result
    tickle <file>...        Run script files in a single interpreter
    tickle --help           Show this help message
    tickle --version        Show version

SYNTAX:
    word                    Unquoted word, substitutions apply
    "quoted $var"           Quoted word, substitutions apply
    {{braced $var}}          Braced word, taken literally
    [command args]          Embedded command, result substituted in place
    $var ${{var}} $a(i)      Variable references
    # comment               Comment (escaped newlines continue it)

BUILT-IN COMMANDS:
    set name ?value?        Read or write a variable in the caller's frame
    global name ...         Link names to the global frame
    puts string             Write one line to standard output
    proc name params body   Define a procedure
    return ?value?          Return early from a procedure body"#,
        VERSION
    );
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut interp = Interp::new();

    match args.first().map(String::as_str) {
        None => match repl::run(&mut interp) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("tickle: {e}");
                ExitCode::FAILURE
            }
        },
        Some("--help") | Some("-h") => {
            print_help();
            ExitCode::SUCCESS
        }
        Some("--version") | Some("-V") => {
            println!("tickle {VERSION}");
            ExitCode::SUCCESS
        }
        Some("-c") => {
            let Some(script) = args.get(1) else {
                eprintln!("tickle: -c requires a script argument");
                return ExitCode::FAILURE;
            };
            match interp.eval(script) {
                Ok(result) => {
                    if !result.is_empty() {
                        println!("{result}");
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("tickle: {e}");
                    ExitCode::FAILURE
                }
            }
        }
        Some(_) => {
            for path in &args {
                let source = match fs::read_to_string(path) {
                    Ok(source) => source,
                    Err(e) => {
                        eprintln!("tickle: {path}: {e}");
                        return ExitCode::FAILURE;
                    }
                };
                if let Err(e) = interp.eval(&source) {
                    eprintln!("tickle: {path}: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
    }
}
