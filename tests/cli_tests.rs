//! CLI driver tests
//!
//! Run the built binary against one-shot scripts and temp script files.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn runs_a_script_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "set greeting hello").unwrap();
    writeln!(file, "puts \"$greeting world\"").unwrap();

    Command::cargo_bin("tickle")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout("hello world\n");
}

#[test]
fn later_files_see_earlier_files_globals() {
    let mut first = NamedTempFile::new().unwrap();
    writeln!(first, "set from_first carried").unwrap();
    let mut second = NamedTempFile::new().unwrap();
    writeln!(second, "puts $from_first").unwrap();

    Command::cargo_bin("tickle")
        .unwrap()
        .arg(first.path())
        .arg(second.path())
        .assert()
        .success()
        .stdout("carried\n");
}

#[test]
fn dash_c_prints_the_result() {
    Command::cargo_bin("tickle")
        .unwrap()
        .args(["-c", "set a b"])
        .assert()
        .success()
        .stdout("b\n");
}

#[test]
fn dash_c_without_a_script_fails() {
    Command::cargo_bin("tickle")
        .unwrap()
        .arg("-c")
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a script"));
}

#[test]
fn parse_errors_are_reported_on_stderr() {
    Command::cargo_bin("tickle")
        .unwrap()
        .args(["-c", "set a \"unclosed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unclosed quote"));
}

#[test]
fn missing_script_file_fails() {
    Command::cargo_bin("tickle")
        .unwrap()
        .arg("/no/such/file.tcl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("/no/such/file.tcl"));
}

#[test]
fn version_flag_prints_the_version() {
    Command::cargo_bin("tickle")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("tickle "));
}

#[test]
fn help_flag_documents_the_builtins() {
    Command::cargo_bin("tickle")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("proc name params body"));
}
