//! Smoke tests against the actual `fsplc` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::str::contains;

fn source_file(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".fspl").tempfile().unwrap();
    file.write_all(source.as_bytes()).unwrap();
    file
}

#[test]
fn compiling_a_clean_program_prints_ir_to_stdout() {
    let file = source_file("program MAIN is begin end program.");
    Command::cargo_bin("fsplc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(contains("define void @MAIN"));
}

#[test]
fn a_compile_error_exits_non_zero_and_writes_nothing_to_stdout() {
    let file = source_file("program MAIN is integer X; integer X; begin end program.");
    Command::cargo_bin("fsplc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stderr(contains("may have already been defined"))
        .stdout(contains("define").not());
}

#[test]
fn output_flag_writes_ir_to_the_given_file() {
    let file = source_file("program MAIN is begin end program.");
    let out = tempfile::NamedTempFile::new().unwrap();
    Command::cargo_bin("fsplc")
        .unwrap()
        .arg(file.path())
        .arg("-o")
        .arg(out.path())
        .assert()
        .success();
    let written = std::fs::read_to_string(out.path()).unwrap();
    assert!(written.contains("define void @MAIN"));
}

#[test]
fn emit_tokens_flag_dumps_the_token_stream() {
    let file = source_file("program MAIN is begin end program.");
    Command::cargo_bin("fsplc")
        .unwrap()
        .arg(file.path())
        .arg("--emit-tokens")
        .assert()
        .success()
        .stdout(contains("KwProgram"));
}

#[test]
fn a_missing_input_file_fails_with_an_io_error() {
    Command::cargo_bin("fsplc")
        .unwrap()
        .arg("/no/such/file.fspl")
        .assert()
        .failure()
        .stderr(contains("fsplc:"));
}

#[test]
fn warnings_as_errors_turns_a_bare_warning_into_a_failure() {
    let file = source_file("program MAIN is begin end program");
    Command::cargo_bin("fsplc")
        .unwrap()
        .arg(file.path())
        .arg("-W")
        .assert()
        .failure();
}
