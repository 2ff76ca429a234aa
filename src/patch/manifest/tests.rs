// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{
    HealthQueryPatch, ManifestPatcher, RATIONALE_ACTION, RationaleActivitiesPatch,
    RationaleIntentPatch,
};
use crate::config::types::ManifestConfig;
use crate::patch::{PatchOutcome, apply_patch};

const GENERATED: &str = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android" xmlns:tools="http://schemas.android.com/tools">
  <uses-permission android:name="android.permission.INTERNET"/>
  <queries>
    <intent>
      <action android:name="android.intent.action.VIEW"/>
      <category android:name="android.intent.category.BROWSABLE"/>
      <data android:scheme="https"/>
    </intent>
  </queries>
  <application android:name=".MainApplication" android:label="@string/app_name" android:allowBackup="true">
    <activity android:name=".MainActivity" android:configChanges="keyboard|orientation" android:launchMode="singleTask" android:exported="true">
      <intent-filter>
        <action android:name="android.intent.action.MAIN"/>
        <category android:name="android.intent.category.LAUNCHER"/>
      </intent-filter>
    </activity>
  </application>
</manifest>
"#;

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn run_all(text: &str) -> (String, Vec<PatchOutcome>) {
    let patcher = ManifestPatcher::new(&ManifestConfig::default()).unwrap();
    let mut text = text.to_string();
    let outcomes = patcher
        .patches()
        .iter()
        .map(|patch| apply_patch(*patch, &mut text))
        .collect();
    (text, outcomes)
}

#[test]
fn test_intent_filter_follows_last_filter() {
    let patch = RationaleIntentPatch::new(".MainActivity").unwrap();
    let mut text = GENERATED.to_string();

    assert_eq!(apply_patch(&patch, &mut text), PatchOutcome::Applied);

    let launcher = text.find("LAUNCHER").unwrap();
    let rationale = text.find(RATIONALE_ACTION).unwrap();
    let close = text.find("</activity>").unwrap();
    assert!(launcher < rationale && rationale < close);
    assert!(text.contains(
        "      </intent-filter>\n      <intent-filter>\n        <action android:name=\"androidx.health.ACTION_SHOW_PERMISSIONS_RATIONALE\"/>\n      </intent-filter>\n    </activity>"
    ));
}

#[test]
fn test_intent_filter_without_existing_filters() {
    let text = r#"<application>
    <activity android:name=".MainActivity" android:exported="true">
    </activity>
</application>"#;
    let patch = RationaleIntentPatch::new(".MainActivity").unwrap();
    let mut text = text.to_string();

    assert_eq!(apply_patch(&patch, &mut text), PatchOutcome::Applied);
    assert!(text.contains(
        "android:exported=\"true\">\n      <intent-filter>\n        <action android:name=\"androidx.health.ACTION_SHOW_PERMISSIONS_RATIONALE\"/>"
    ));
}

#[test]
fn test_intent_filter_matches_qualified_name() {
    let text = r#"<activity android:name="org.example.tracker.MainActivity">
  <intent-filter/>
</activity>"#;
    let patch = RationaleIntentPatch::new(".MainActivity").unwrap();
    let mut text = text.to_string();
    assert_eq!(apply_patch(&patch, &mut text), PatchOutcome::Applied);
}

#[test]
fn test_intent_filter_missing_activity() {
    let text = "<manifest><application></application></manifest>";
    let patch = RationaleIntentPatch::new(".MainActivity").unwrap();
    let mut patched = text.to_string();

    assert_eq!(apply_patch(&patch, &mut patched), PatchOutcome::AnchorMissing);
    assert_eq!(patched, text);
}

#[test]
fn test_intent_filter_self_closing_activity_is_missing_anchor() {
    let text = r#"<application><activity android:name=".MainActivity"/></application>"#;
    let patch = RationaleIntentPatch::new(".MainActivity").unwrap();
    let mut patched = text.to_string();
    assert_eq!(apply_patch(&patch, &mut patched), PatchOutcome::AnchorMissing);
}

#[test]
fn test_rationale_activity_does_not_satisfy_intent_patch() {
    let activities = RationaleActivitiesPatch::new(".PermissionsRationaleActivity", ".MainActivity");
    let intent = RationaleIntentPatch::new(".MainActivity").unwrap();
    let mut text = GENERATED.to_string();

    assert_eq!(apply_patch(&activities, &mut text), PatchOutcome::Applied);
    assert_eq!(apply_patch(&intent, &mut text), PatchOutcome::Applied);
    assert_eq!(count(&text, RATIONALE_ACTION), 2);
}

#[test]
fn test_activities_before_application_close() {
    let patch = RationaleActivitiesPatch::new(".PermissionsRationaleActivity", ".MainActivity");
    let mut text = GENERATED.to_string();

    assert_eq!(apply_patch(&patch, &mut text), PatchOutcome::Applied);

    let alias = text.find("ViewPermissionUsageActivity").unwrap();
    let app_close = text.find("</application>").unwrap();
    assert!(alias < app_close);
    assert!(text.contains("android:targetActivity=\".MainActivity\""));
    assert!(text.contains("android.permission.START_VIEW_PERMISSION_USAGE"));
    assert!(text.contains("android.intent.category.HEALTH_PERMISSIONS"));
    assert!(text.contains("    </activity-alias>\n  </application>"));
}

#[test]
fn test_query_inside_existing_queries() {
    let patch = HealthQueryPatch::new("com.google.android.apps.healthdata");
    let mut text = GENERATED.to_string();

    assert_eq!(apply_patch(&patch, &mut text), PatchOutcome::Applied);
    assert_eq!(count(&text, "<queries>"), 1);
    assert!(text.contains(
        "    </intent>\n    <package android:name=\"com.google.android.apps.healthdata\"/>\n  </queries>"
    ));
}

#[test]
fn test_query_creates_block_before_application() {
    let text = "<manifest>\n  <application>\n  </application>\n</manifest>\n";
    let patch = HealthQueryPatch::new("com.google.android.apps.healthdata");
    let mut text = text.to_string();

    assert_eq!(apply_patch(&patch, &mut text), PatchOutcome::Applied);
    insta::assert_snapshot!(text, @r#"
    <manifest>
      <queries>
        <package android:name="com.google.android.apps.healthdata"/>
      </queries>
      <application>
      </application>
    </manifest>
    "#);
}

#[test]
fn test_all_patches_then_idempotent() {
    let (once, outcomes) = run_all(GENERATED);
    assert_eq!(outcomes, [PatchOutcome::Applied; 3]);

    let (twice, outcomes) = run_all(&once);
    assert_eq!(outcomes, [PatchOutcome::AlreadyApplied; 3]);
    assert_eq!(once, twice);

    assert_eq!(count(&twice, "ViewPermissionUsageActivity"), 1);
    assert_eq!(count(&twice, "com.google.android.apps.healthdata"), 1);
}

#[test]
fn test_missing_anchors_leave_text_untouched() {
    let text = "<manifest/>";
    let (patched, outcomes) = run_all(text);
    assert_eq!(outcomes, [PatchOutcome::AnchorMissing; 3]);
    assert_eq!(patched, text);
}

#[test]
fn test_missing_main_activity_still_applies_other_patches() {
    let text = r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android">
  <queries>
    <intent>
      <action android:name="android.intent.action.VIEW"/>
    </intent>
  </queries>
  <application android:name=".MainApplication">
    <activity android:name=".SplashActivity" android:exported="true"/>
  </application>
</manifest>
"#;
    let (patched, outcomes) = run_all(text);

    assert_eq!(
        outcomes,
        [
            PatchOutcome::AnchorMissing,
            PatchOutcome::Applied,
            PatchOutcome::Applied
        ]
    );
    assert_eq!(count(&patched, "ViewPermissionUsageActivity"), 1);
    assert_eq!(count(&patched, "com.google.android.apps.healthdata"), 1);
    assert_eq!(count(&patched, "<queries>"), 1);
    assert!(!patched.contains(".SplashActivity\" android:exported=\"true\">"));

    let (again, outcomes) = run_all(&patched);
    assert_eq!(
        outcomes,
        [
            PatchOutcome::AnchorMissing,
            PatchOutcome::AlreadyApplied,
            PatchOutcome::AlreadyApplied
        ]
    );
    assert_eq!(again, patched);
}

#[tokio::test]
async fn test_run_writes_file_once() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("AndroidManifest.xml");
    std::fs::write(&path, GENERATED).unwrap();
    let patcher = ManifestPatcher::new(&ManifestConfig::default()).unwrap();

    let report = patcher.run(&path, false).await.unwrap();
    assert_eq!(report.warning_count(), 0);
    assert_eq!(
        report.outcome("health-query"),
        Some(PatchOutcome::Applied)
    );
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("ViewPermissionUsageActivity"));

    let report = patcher.run(&path, false).await.unwrap();
    assert!(
        report
            .outcomes()
            .iter()
            .all(|(_, outcome)| *outcome == PatchOutcome::AlreadyApplied)
    );
    assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
}

#[tokio::test]
async fn test_run_dry_run_and_missing_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("AndroidManifest.xml");
    let patcher = ManifestPatcher::new(&ManifestConfig::default()).unwrap();

    let report = patcher.run(&path, false).await.unwrap();
    assert_eq!(report.warning_count(), 3);
    assert!(!path.exists());

    std::fs::write(&path, GENERATED).unwrap();
    let report = patcher.run(&path, true).await.unwrap();
    assert_eq!(report.outcome("rationale-activities"), Some(PatchOutcome::Applied));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), GENERATED);
}
