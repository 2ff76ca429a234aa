// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing and the binary's exit behavior.

use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Output};

use clap::Parser;
use flavorbuild::cli::global::GlobalOptions;
use flavorbuild::cli::{Cli, Command};
use flavorbuild::pipeline::flavor::FlavorSelector;

const CI_VARS: &[&str] = &[
    "KEYSTORE_PASSWORD",
    "KEY_ALIAS",
    "BUILD_FLAVOR",
    "PATCH_FLAVOR",
    "VERSION_OVERRIDE",
    "GITHUB_OUTPUT",
];

/// Runs the binary in `dir` with the CI variables cleared.
fn flavorbuild(dir: &Path, args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut command = StdCommand::new(env!("CARGO_BIN_EXE_flavorbuild"));
    command.current_dir(dir).args(args);
    for var in CI_VARS {
        command.env_remove(var);
    }
    command.envs(envs.iter().copied());
    command.output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn cli_version_alias() {
    let cli = Cli::try_parse_from(["flavorbuild", "-v"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn cli_no_command() {
    let cli = Cli::try_parse_from(["flavorbuild"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn cli_repeated_ini_and_set() {
    let cli = Cli::try_parse_from([
        "flavorbuild",
        "--ini",
        "base.toml",
        "--ini",
        "ci.toml",
        "-s",
        "project.product=tracker",
        "-s",
        "tools.gradle_task=bundleRelease",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.inis,
        [PathBuf::from("base.toml"), PathBuf::from("ci.toml")]
    );
    assert_eq!(
        cli.global.options,
        ["project.product=tracker", "tools.gradle_task=bundleRelease"]
    );
}

#[test]
fn cli_file_log_level_overrides() {
    let global = GlobalOptions {
        log_level: Some(2),
        file_log_level: Some(5),
        log_file: Some(PathBuf::from("release.log")),
        ..GlobalOptions::default()
    };
    assert_eq!(
        global.to_config_overrides(),
        [
            "global.output_log_level=2",
            "global.file_log_level=5",
            "global.log_file=release.log",
        ]
    );
}

#[test]
fn cli_release_flavor_is_case_insensitive() {
    let cli = Cli::try_parse_from(["flavorbuild", "release", "-f", "Standard"]).unwrap();
    let Some(Command::Release(args)) = cli.command else {
        panic!("expected release command");
    };
    assert_eq!(args.flavor, FlavorSelector::Standard);
}

// =============================================================================
// Binary
// =============================================================================

#[test]
fn binary_version() {
    let temp = tempfile::tempdir().unwrap();
    let output = flavorbuild(temp.path(), &["version"], &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), env!("CARGO_PKG_VERSION"));
}

#[test]
fn binary_no_command_fails() {
    let temp = tempfile::tempdir().unwrap();
    let output = flavorbuild(temp.path(), &[], &[]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn binary_flavors() {
    let temp = tempfile::tempdir().unwrap();
    let output = flavorbuild(temp.path(), &["flavors"], &[]);
    assert!(output.status.success());

    let out = stdout(&output);
    let names: Vec<_> = out
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, ["standard", "foss"]);
}

#[test]
fn binary_options_reads_env_and_hides_password() {
    let temp = tempfile::tempdir().unwrap();
    let output = flavorbuild(
        temp.path(),
        &["-s", "project.product=tracker", "options"],
        &[
            ("FLAVORBUILD_SIGNING__KEY_ALIAS", "upload"),
            ("FLAVORBUILD_SIGNING__STORE_PASSWORD", "hunter2"),
        ],
    );
    assert!(output.status.success());

    let out = stdout(&output);
    let line = |key: &str| {
        out.lines()
            .find(|l| l.split_whitespace().next() == Some(key))
            .map(|l| l.split_once(" = ").map_or("", |(_, v)| v).to_string())
    };
    assert_eq!(line("signing.key_alias").as_deref(), Some("upload"));
    assert_eq!(line("signing.store_password").as_deref(), Some("[hidden]"));
    assert_eq!(line("project.product").as_deref(), Some("tracker"));
    assert!(!out.contains("hunter2"));
}

#[test]
fn binary_invalid_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("flavorbuild.toml"), "[project]\nproduct = \"\"\n").unwrap();

    let output = flavorbuild(temp.path(), &["options"], &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("product"));
}

#[test]
fn binary_inis_lists_files_in_order() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(temp.path().join("flavorbuild.toml"), "").unwrap();
    std::fs::write(temp.path().join("ci.toml"), "").unwrap();

    let output = flavorbuild(temp.path(), &["--ini", "ci.toml", "inis"], &[]);
    assert!(output.status.success());

    let out = stdout(&output);
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2, "{out}");
    assert!(lines[0].starts_with("1. [optional]") && lines[0].ends_with("flavorbuild.toml"));
    assert!(lines[1].starts_with("2. [file]") && lines[1].ends_with("ci.toml"));
}

#[test]
fn binary_patch_ignores_release_selector() {
    let temp = tempfile::tempdir().unwrap();

    let output = flavorbuild(
        temp.path(),
        &["patch", "--manifest-only"],
        &[("BUILD_FLAVOR", "all")],
    );
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("rationale-intent-filter file missing"));

    let output = flavorbuild(
        temp.path(),
        &["patch", "--manifest-only"],
        &[("PATCH_FLAVOR", "all")],
    );
    assert!(!output.status.success());
}
