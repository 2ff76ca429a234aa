// flavorbuild: Multi-flavor Android release orchestrator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `AndroidManifest.xml` patches for the health-data integration.
//!
//! ```text
//! <manifest>
//!   <queries>
//!     <package android:name="{health package}"/>        HealthQueryPatch
//!   </queries>
//!   <application>
//!     <activity android:name="{main}">
//!       <intent-filter>..MAIN..</intent-filter>
//!       <intent-filter>..SHOW_PERMISSIONS_RATIONALE..</intent-filter>   RationaleIntentPatch
//!     </activity>
//!     <activity android:name="{rationale}">..</activity>              RationaleActivitiesPatch
//!     <activity-alias android:name="ViewPermissionUsageActivity">..</activity-alias>
//!   </application>
//! </manifest>
//! ```
//!
//! Applied in the order above (intent filter, activities, query) to every
//! flavor.

use std::ops::Range;
use std::path::Path;

use anyhow::Context;
use regex::Regex;

use super::text::{indent_at, indent_lines, insert_after, insert_before, xml_attr};
use super::{FilePatchReport, TextPatch, patch_file};
use crate::config::types::ManifestConfig;
use crate::error::Result;

pub const RATIONALE_ACTION: &str = "androidx.health.ACTION_SHOW_PERMISSIONS_RATIONALE";
pub const PERMISSION_USAGE_ALIAS: &str = "ViewPermissionUsageActivity";

/// Whether an `android:name` value refers to the configured activity.
///
/// A leading dot in `wanted` is relative to the package, so
/// `com.example.MainActivity` matches `.MainActivity`.
fn names_activity(value: &str, wanted: &str) -> bool {
    value == wanted || (wanted.starts_with('.') && value.ends_with(wanted))
}

/// Finds the `<activity>` element with a given name.
#[derive(Debug, Clone)]
struct ActivityLocator {
    name: String,
    open_tag: Regex,
    name_attr: Regex,
}

impl ActivityLocator {
    fn new(name: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            open_tag: Regex::new(r"<activity\s[^>]*>")
                .context("failed to compile activity tag regex")?,
            name_attr: Regex::new(r#"android:name\s*=\s*"([^"]*)""#)
                .context("failed to compile android:name regex")?,
        })
    }

    /// Opening tag span and body span of the activity.
    ///
    /// Self-closing activities have no body and are reported as absent.
    fn find(&self, text: &str) -> Option<(Range<usize>, Range<usize>)> {
        for tag in self.open_tag.find_iter(text) {
            let Some(caps) = self.name_attr.captures(tag.as_str()) else {
                continue;
            };
            if !names_activity(&caps[1], &self.name) {
                continue;
            }
            if tag.as_str().ends_with("/>") {
                return None;
            }
            let close = text[tag.end()..].find("</activity>")? + tag.end();
            return Some((tag.range(), tag.end()..close));
        }
        None
    }
}

fn intent_filter_lines(action: &str) -> Vec<String> {
    vec![
        "<intent-filter>".to_string(),
        format!("  <action android:name=\"{action}\"/>"),
        "</intent-filter>".to_string(),
    ]
}

/// Adds the rationale intent filter to the main activity.
#[derive(Debug, Clone)]
pub struct RationaleIntentPatch {
    main_activity: ActivityLocator,
}

impl RationaleIntentPatch {
    /// # Errors
    ///
    /// Returns an error if the tag patterns fail to compile.
    pub fn new(main_activity: impl Into<String>) -> Result<Self> {
        Ok(Self {
            main_activity: ActivityLocator::new(main_activity)?,
        })
    }
}

impl TextPatch for RationaleIntentPatch {
    fn name(&self) -> &'static str {
        "rationale-intent-filter"
    }

    fn marker(&self) -> &'static str {
        RATIONALE_ACTION
    }

    fn anchor(&self) -> &'static str {
        "main <activity> block"
    }

    // Scoped to the main activity: the rationale activity carries the same
    // action and must not count.
    fn is_applied(&self, text: &str) -> bool {
        self.main_activity
            .find(text)
            .is_some_and(|(_, body)| text[body].contains(RATIONALE_ACTION))
    }

    fn insert(&self, text: &str) -> Option<String> {
        let (open_tag, body) = self.main_activity.find(text)?;
        let lines = intent_filter_lines(RATIONALE_ACTION);

        match text[body.clone()].rfind("</intent-filter>") {
            Some(rel) => {
                let at = body.start + rel;
                let block = indent_lines(&lines, indent_at(text, at));
                Some(insert_after(text, at + "</intent-filter>".len(), &block))
            }
            None => {
                let base = format!("{}  ", indent_at(text, open_tag.start));
                let block = indent_lines(&lines, &base);
                Some(insert_after(text, open_tag.end, &block))
            }
        }
    }
}

/// Declares the rationale activity and the permission-usage alias.
#[derive(Debug, Clone)]
pub struct RationaleActivitiesPatch {
    rationale_activity: String,
    main_activity: String,
}

impl RationaleActivitiesPatch {
    #[must_use]
    pub fn new(rationale_activity: impl Into<String>, main_activity: impl Into<String>) -> Self {
        Self {
            rationale_activity: rationale_activity.into(),
            main_activity: main_activity.into(),
        }
    }
}

impl TextPatch for RationaleActivitiesPatch {
    fn name(&self) -> &'static str {
        "rationale-activities"
    }

    fn marker(&self) -> &'static str {
        PERMISSION_USAGE_ALIAS
    }

    fn anchor(&self) -> &'static str {
        "</application>"
    }

    fn insert(&self, text: &str) -> Option<String> {
        let at = text.rfind("</application>")?;

        let mut lines = vec![format!(
            "<activity android:name=\"{}\" android:exported=\"true\">",
            xml_attr(&self.rationale_activity)
        )];
        lines.extend(intent_filter_lines(RATIONALE_ACTION).into_iter().map(|l| format!("  {l}")));
        lines.push("</activity>".to_string());
        lines.push(format!(
            "<activity-alias android:name=\"{PERMISSION_USAGE_ALIAS}\" android:exported=\"true\" \
             android:targetActivity=\"{}\" \
             android:permission=\"android.permission.START_VIEW_PERMISSION_USAGE\">",
            xml_attr(&self.main_activity)
        ));
        lines.push("  <intent-filter>".to_string());
        lines.push(
            "    <action android:name=\"android.intent.action.VIEW_PERMISSION_USAGE\"/>".to_string(),
        );
        lines.push(
            "    <category android:name=\"android.intent.category.HEALTH_PERMISSIONS\"/>"
                .to_string(),
        );
        lines.push("  </intent-filter>".to_string());
        lines.push("</activity-alias>".to_string());

        let base = format!("{}  ", indent_at(text, at));
        Some(insert_before(text, at, &indent_lines(&lines, &base)))
    }
}

/// Makes the health-data provider visible to the app.
#[derive(Debug, Clone)]
pub struct HealthQueryPatch {
    marker: String,
}

impl HealthQueryPatch {
    #[must_use]
    pub fn new(package: &str) -> Self {
        Self {
            marker: format!("<package android:name=\"{}\"", xml_attr(package)),
        }
    }

    fn package_line(&self) -> String {
        format!("{}/>", self.marker)
    }
}

impl TextPatch for HealthQueryPatch {
    fn name(&self) -> &'static str {
        "health-query"
    }

    fn marker(&self) -> &str {
        &self.marker
    }

    fn anchor(&self) -> &'static str {
        "<queries> or <application>"
    }

    fn insert(&self, text: &str) -> Option<String> {
        if let Some(at) = text.find("</queries>") {
            let base = format!("{}  ", indent_at(text, at));
            return Some(insert_before(text, at, &indent_lines(&[self.package_line()], &base)));
        }

        let at = text.find("<application")?;
        let lines = [
            "<queries>".to_string(),
            format!("  {}", self.package_line()),
            "</queries>".to_string(),
        ];
        Some(insert_before(text, at, &indent_lines(&lines, indent_at(text, at))))
    }
}

/// Runs the manifest patches for one flavor.
#[derive(Debug, Clone)]
pub struct ManifestPatcher {
    intent: RationaleIntentPatch,
    activities: RationaleActivitiesPatch,
    query: HealthQueryPatch,
}

impl ManifestPatcher {
    /// # Errors
    ///
    /// Returns an error if a patch fails to build its patterns.
    pub fn new(config: &ManifestConfig) -> Result<Self> {
        Ok(Self {
            intent: RationaleIntentPatch::new(&config.main_activity)?,
            activities: RationaleActivitiesPatch::new(
                &config.rationale_activity,
                &config.main_activity,
            ),
            query: HealthQueryPatch::new(&config.query_package),
        })
    }

    /// The patches in application order.
    #[must_use]
    pub fn patches(&self) -> [&dyn TextPatch; 3] {
        [&self.intent, &self.activities, &self.query]
    }

    /// Patches the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing manifest cannot be read or rewritten.
    pub async fn run(&self, path: &Path, dry_run: bool) -> Result<FilePatchReport> {
        patch_file(path, &self.patches(), dry_run).await
    }
}

#[cfg(test)]
mod tests;
