//! Runs the built binary for the argument-handling paths. None of these
//! may touch the display, so `DISPLAY` is removed from the environment.

use std::process::{Command, Output};

fn xidmon(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xidmon"))
        .args(args)
        .env_remove("DISPLAY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to spawn xidmon")
}

#[test]
fn help_prints_usage_and_exits_zero() {
    let out = xidmon(&["-h"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("Usage: xidmon [-h] [-V]"));
    assert!(out.stderr.is_empty());
}

#[test]
fn version_prints_name_and_license() {
    let out = xidmon(&["-V"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.starts_with(&format!("xidmon {}", env!("CARGO_PKG_VERSION"))));
    assert!(stdout.contains("License"));
}

#[test]
fn unknown_option_fails() {
    let out = xidmon(&["-x"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(String::from_utf8(out.stderr).unwrap(), "Unknown option -x\n");
}

#[test]
fn two_arguments_fail_without_connecting() {
    let out = xidmon(&["-h", "-V"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert_eq!(
        String::from_utf8(out.stderr).unwrap(),
        "Invalid number of arguments\n"
    );
}

#[test]
fn missing_display_is_a_connection_failure() {
    let out = xidmon(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
}
