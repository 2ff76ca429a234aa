// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AppConfig, PackageManifest};
use crate::version::Version;
use serde_json::{Value, json};

fn document(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

#[test]
fn test_configure_sets_release_identity() {
    let mut app = AppConfig::from_document(document(json!({
        "expo": {
            "name": "Tracker",
            "version": "0.0.0",
            "android": {
                "package": "org.example.tracker",
                "googleServicesFile": "./google-services.json"
            }
        }
    })));

    app.configure(&Version::new(2, 5, 13).unwrap(), "foss")
        .unwrap();

    let expo = &app.document()["expo"];
    assert_eq!(expo["version"], "2.5.13");
    assert_eq!(expo["android"]["versionCode"], 20513);
    assert_eq!(expo["android"]["package"], "org.example.tracker");
    assert!(expo["android"].get("googleServicesFile").is_none());
    assert_eq!(expo["extra"]["flavor"], "foss");
}

#[test]
fn test_configure_preserves_key_order() {
    let mut app = AppConfig::from_document(document(json!({
        "expo": { "name": "Tracker", "slug": "tracker", "version": "1.0.0" },
        "zzz": true
    })));

    app.configure(&Version::new(1, 0, 1).unwrap(), "standard")
        .unwrap();

    let expo_keys: Vec<_> = app.document()["expo"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(expo_keys, ["name", "slug", "version", "android", "extra"]);

    let top_keys: Vec<_> = app.document().keys().cloned().collect();
    assert_eq!(top_keys, ["expo", "zzz"]);
}

#[test]
fn test_configure_creates_missing_expo() {
    let mut app = AppConfig::from_document(serde_json::Map::new());
    app.configure(&Version::new(0, 0, 1).unwrap(), "standard")
        .unwrap();
    assert_eq!(app.document()["expo"]["android"]["versionCode"], 1);
}

#[test]
fn test_configure_rejects_non_object_android() {
    let mut app = AppConfig::from_document(document(json!({
        "expo": { "android": "nope" }
    })));
    let err = app
        .configure(&Version::new(1, 0, 0).unwrap(), "standard")
        .unwrap_err();
    assert!(err.to_string().contains("android"), "{err}");
}

#[test]
fn test_render_trailing_newline() {
    let app = AppConfig::from_document(document(json!({ "expo": { "name": "x" } })));
    let text = app.render().unwrap();
    assert!(text.ends_with("}\n"));
    assert!(text.contains("\n  \"expo\": {\n"));
}

#[tokio::test]
async fn test_package_manifest_round_trip_on_disk() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("package.json");
    std::fs::write(
        &path,
        r#"{"name":"tracker","version":"1.2.3","scripts":{"start":"expo start"}}"#,
    )
    .unwrap();

    let mut manifest = PackageManifest::load(&path).await.unwrap();
    assert_eq!(manifest.version(), Some("1.2.3"));

    manifest.set_version(&Version::new(1, 3, 0).unwrap());
    manifest.save(&path).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let reparsed: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(reparsed["version"], "1.3.0");
    assert_eq!(reparsed["scripts"]["start"], "expo start");
    let keys: Vec<_> = reparsed.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["name", "version", "scripts"]);
}

#[tokio::test]
async fn test_load_rejects_array() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("app.json");
    std::fs::write(&path, "[1, 2]").unwrap();

    assert!(AppConfig::load(&path).await.is_err());
}
