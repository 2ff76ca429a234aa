// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::ProcessBuilder;
use crate::error::ProcessError;

#[cfg(not(windows))]
fn shell(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").args(["-c", script])
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_success() {
    shell("echo hello").run().await.expect("echo should succeed");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_nonzero_exit_is_typed_error() {
    let err = shell("exit 3").name("failing").run().await.unwrap_err();

    match err.downcast_ref::<ProcessError>() {
        Some(ProcessError::NonZeroExit { code, command }) => {
            assert_eq!(*code, 3);
            assert_eq!(command, "/bin/sh -c \"exit 3\"");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[cfg(not(windows))]
#[tokio::test(flavor = "current_thread")]
async fn test_process_failure_reports_kept_stderr() {
    use crate::tools::test_utils::run_with_logs;

    let ((), logs) = run_with_logs(|| async {
        let err = shell("echo 'Execution failed for task :app:compileReleaseKotlin' >&2; exit 1")
            .name("gradle")
            .keep_stderr()
            .run()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("exited with code 1"), "{err}");
        Ok(())
    })
    .await
    .unwrap();

    assert!(logs.contains("process error output"), "{logs}");
    assert!(logs.contains("Execution failed for task :app:compileReleaseKotlin"), "{logs}");
}

#[cfg(not(windows))]
#[tokio::test(flavor = "current_thread")]
async fn test_process_stderr_not_reported_unless_kept() {
    use crate::tools::test_utils::run_with_logs;

    let ((), logs) = run_with_logs(|| async {
        shell("echo 'noise' >&2; exit 1").run().await.unwrap_err();
        Ok(())
    })
    .await
    .unwrap();

    assert!(!logs.contains("noise"), "{logs}");
}

#[cfg(not(windows))]
#[tokio::test]
async fn test_process_env_overlay_and_cwd() {
    let temp = tempfile::tempdir().unwrap();

    shell("echo \"$APP_VARIANT-$HOME_IS_SET\" > variant.txt; test -n \"$PATH\"")
        .env("APP_VARIANT", "foss")
        .env("HOME_IS_SET", "yes")
        .cwd(temp.path())
        .run()
        .await
        .expect("process should succeed");

    let written = std::fs::read_to_string(temp.path().join("variant.txt")).unwrap();
    insta::assert_snapshot!(written.trim(), @"foss-yes");
}

#[tokio::test]
async fn test_process_spawn_failure() {
    let err = ProcessBuilder::new("/definitely/not/here/prebuild")
        .run()
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::SpawnFailed { .. })
    ));
}

#[test]
fn test_command_line_quotes_spaces() {
    let builder = ProcessBuilder::new("npx").args(["expo", "prebuild", "a b"]);
    assert_eq!(builder.command_line(), "npx expo prebuild \"a b\"");
}

#[test]
fn test_executable_lookup_found() {
    // cargo is on PATH whenever the tests run
    let builder = ProcessBuilder::which("cargo").expect("cargo should be found in PATH");
    assert!(builder.program().exists());

    let path = ProcessBuilder::find("cargo").expect("cargo should be found");
    assert_eq!(path, builder.program());
}

#[test]
fn test_executable_lookup_not_found() {
    let program = "nonexistent_program_12345";

    let err = ProcessBuilder::which(program).unwrap_err();
    assert!(err.to_string().contains(program), "{err}");
    assert!(ProcessBuilder::find(program).is_none());
}
