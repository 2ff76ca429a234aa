// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;
use std::sync::Arc;

use super::flavors::describe_flavor;
use super::patch::{format_report, run_patch_command};
use super::release::build_run_config;
use crate::cli::release::{PatchArgs, ReleaseArgs, SigningArgs};
use crate::config::Config;
use crate::patch::manifest::ManifestPatcher;
use crate::pipeline::flavor::{FOSS, FlavorSelector, STANDARD};

const MANIFEST: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
  <application android:name=".MainApplication">
    <activity android:name=".MainActivity" android:exported="true">
      <intent-filter>
        <action android:name="android.intent.action.MAIN"/>
      </intent-filter>
    </activity>
  </application>
</manifest>
"#;

#[test]
fn test_describe_flavor() {
    insta::assert_snapshot!(describe_flavor(&STANDARD), @"standard   Standard   suffix=(none)   features=sdk,abi-splits");
    insta::assert_snapshot!(describe_flavor(&FOSS), @"foss       FOSS       suffix=-foss    features=abi-splits");
}

#[test]
fn test_build_run_config() {
    let mut config = Config::for_root("/src/tracker").unwrap();
    config.signing.key_alias = "upload".to_string();

    let args = ReleaseArgs {
        flavor: FlavorSelector::Foss,
        version_override: Some("  ".to_string()),
        ci_output: Some(PathBuf::from("/tmp/out")),
        signing: SigningArgs {
            keystore_password: Some("hunter2".to_string()),
            key_alias: None,
        },
    };
    let run = build_run_config(&args, Arc::new(config), true);

    assert_eq!(run.selector(), FlavorSelector::Foss);
    assert_eq!(run.version_override(), None);
    assert_eq!(run.ci_output(), Some(PathBuf::from("/tmp/out").as_path()));
    assert_eq!(run.credentials().key_alias(), "upload");
    assert!(run.credentials().is_complete());
    assert!(run.is_dry_run());
}

#[test]
fn test_build_run_config_trims_override() {
    let args = ReleaseArgs {
        version_override: Some(" 1.2.3 ".to_string()),
        ..ReleaseArgs::default()
    };
    let run = build_run_config(&args, Arc::new(Config::for_root("/src/tracker").unwrap()), false);
    assert_eq!(run.version_override(), Some("1.2.3"));
    assert_eq!(run.selector(), FlavorSelector::All);
}

#[tokio::test]
async fn test_format_report_missing_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("AndroidManifest.xml");
    let config = Config::for_root(temp.path()).unwrap();

    let report = ManifestPatcher::new(&config.manifest)
        .unwrap()
        .run(&path, false)
        .await
        .unwrap();

    let prefix = path.display().to_string();
    let lines = format_report(&report);
    assert_eq!(
        lines,
        [
            format!("{prefix}: rationale-intent-filter file missing"),
            format!("{prefix}: rationale-activities file missing"),
            format!("{prefix}: health-query file missing"),
        ]
    );
}

#[tokio::test]
async fn test_patch_command_manifest_only_is_idempotent() {
    let temp = tempfile::tempdir().unwrap();
    let config = Config::for_root(temp.path()).unwrap();
    let manifest = config.paths.manifest().unwrap();
    std::fs::create_dir_all(manifest.parent().unwrap()).unwrap();
    std::fs::write(&manifest, MANIFEST).unwrap();

    let args = PatchArgs {
        flavor: FOSS,
        manifest_only: true,
        signing: SigningArgs::default(),
    };

    run_patch_command(&args, &config, false).await.unwrap();
    let once = std::fs::read_to_string(&manifest).unwrap();
    assert!(once.contains("ViewPermissionUsageActivity"));
    assert!(once.contains("androidx.health.ACTION_SHOW_PERMISSIONS_RATIONALE"));
    assert!(!config.paths.app_build_gradle().unwrap().exists());

    run_patch_command(&args, &config, false).await.unwrap();
    assert_eq!(std::fs::read_to_string(&manifest).unwrap(), once);
}

#[tokio::test]
async fn test_patch_command_dry_run_writes_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let config = Config::for_root(temp.path()).unwrap();
    let manifest = config.paths.manifest().unwrap();
    std::fs::create_dir_all(manifest.parent().unwrap()).unwrap();
    std::fs::write(&manifest, MANIFEST).unwrap();

    let args = PatchArgs {
        flavor: STANDARD,
        manifest_only: false,
        signing: SigningArgs::default(),
    };
    run_patch_command(&args, &config, true).await.unwrap();

    assert_eq!(std::fs::read_to_string(&manifest).unwrap(), MANIFEST);
}
