use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;

fn script_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("rlox_cli_test_{}_{}.lox", std::process::id(), name))
}

fn write_script(name: &str, source: &str) -> PathBuf {
    let path = script_path(name);
    fs::write(&path, source).expect("can write to the temp dir");
    path
}

#[test]
fn a_clean_run_exits_zero_and_prints_to_stdout() {
    let path = write_script("clean", "print 1 + 2;");
    Command::cargo_bin("rlox").unwrap().arg(&path).assert().success().stdout("3\n");
    let _ = fs::remove_file(path);
}

#[test]
fn a_compile_error_exits_65_and_prints_nothing_to_stdout() {
    let path = write_script("compile_error", "1 + ;");
    Command::cargo_bin("rlox").unwrap().arg(&path).assert().code(65).stdout("");
    let _ = fs::remove_file(path);
}

#[test]
fn a_runtime_error_exits_70() {
    let path = write_script("runtime_error", "print 1 + nil;");
    Command::cargo_bin("rlox").unwrap().arg(&path).assert().code(70);
    let _ = fs::remove_file(path);
}

#[test]
fn more_than_one_positional_argument_exits_64() {
    Command::cargo_bin("rlox").unwrap().arg("a.lox").arg("b.lox").assert().code(64);
}

#[test]
fn help_flag_prints_usage_and_exits_zero() {
    Command::cargo_bin("rlox")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout("Usage: rlox [-h|--help] [script]\n");
}

#[test]
fn short_help_flag_behaves_the_same_as_long() {
    Command::cargo_bin("rlox")
        .unwrap()
        .arg("-h")
        .assert()
        .success()
        .stdout("Usage: rlox [-h|--help] [script]\n");
}
