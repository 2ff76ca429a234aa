// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, FsError, PipelineError, ProcessError, VersionError};

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "signing".to_string(),
        key: "key_alias".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'key_alias' in section '[signing]'"
    );
}

#[test]
fn test_version_error_display() {
    let err = VersionError::ComponentOutOfRange {
        component: "minor",
        value: 100,
        max: 99,
    };
    insta::assert_snapshot!(err.to_string(), @"version component minor is 100, maximum is 99");
}

#[test]
fn test_stage_failed_names_flavor_and_stage() {
    let err = PipelineError::StageFailed {
        flavor: "foss".to_string(),
        stage: "compile".to_string(),
        message: "gradlew exited with code 1".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"flavor 'foss' failed during compile: gradlew exited with code 1"
    );
}

#[test]
fn test_typed_errors_survive_anyhow() {
    let err: anyhow::Error = ProcessError::NonZeroExit {
        command: "gradle".to_string(),
        code: 1,
    }
    .into();
    let err = err.context("Failed to run gradlew");

    assert!(matches!(
        err.downcast_ref::<ProcessError>(),
        Some(ProcessError::NonZeroExit { code: 1, .. })
    ));
    insta::assert_snapshot!(
        format!("{err:#}"),
        @"Failed to run gradlew: process 'gradle' exited with code 1"
    );
}

#[test]
fn test_fs_error_keeps_source() {
    let err = FsError::IoError {
        path: "android".to_string(),
        source: std::io::Error::other("busy"),
    };
    assert_eq!(err.to_string(), "I/O error on 'android': busy");
    assert!(std::error::Error::source(&err).is_some());
    assert_eq!(FsError::NotFound("x".to_string()).to_string(), "path not found: x");
}
