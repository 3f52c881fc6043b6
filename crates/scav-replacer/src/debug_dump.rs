//! Debug pass summaries
//!
//! Appends a human-readable entry to `<mod_root>/_debug/patched_summary.txt`
//! for each pass. Failures never reach the caller.

use std::fmt::{self, Display, Formatter};
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use scav_patch::{IdentifierSet, PatchResult};

/// Directory under the mod root receiving debug output
pub const DEBUG_DIR: &str = "_debug";

/// Summary file name
pub const SUMMARY_FILE: &str = "patched_summary.txt";

const SEPARATOR_WIDTH: usize = 60;

/// What triggered a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugTag {
    /// Load-time pass
    Startup,
    /// Raid route pass
    RoutePatch,
    /// Bot-generation payload pass
    BotGenerate,
}

impl Display for DebugTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Startup => "Startup",
            Self::RoutePatch => "RoutePatch",
            Self::BotGenerate => "BotGenerate",
        })
    }
}

/// Path of the summary file under a mod root
#[must_use]
pub fn summary_path(mod_root: &Path) -> PathBuf {
    mod_root.join(DEBUG_DIR).join(SUMMARY_FILE)
}

/// Render one summary entry
#[must_use]
pub fn format_summary(at: DateTime<Local>, tag: DebugTag, ids: &IdentifierSet, result: &PatchResult) -> String {
    let mut lines = vec![
        "=".repeat(SEPARATOR_WIDTH),
        format!("{} - {tag}", at.format("%Y-%m-%d %H:%M:%S")),
        ids.to_string(),
        format!("TotalReplaced={}", result.total_replaced),
    ];

    if result.replaced_by_map.is_empty() {
        lines.push("(no map changes)".to_string());
    } else {
        for (map, replaced) in result.maps_ignoring_case() {
            lines.push(format!("{map}: replaced {replaced}"));
        }
    }
    lines.push(String::new());

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Append a summary entry, ignoring failures
pub fn append_summary(mod_root: &Path, tag: DebugTag, ids: &IdentifierSet, result: &PatchResult) {
    let entry = format_summary(Local::now(), tag, ids, result);
    if let Err(err) = try_append(mod_root, &entry) {
        tracing::debug!("debug summary not written: {}", err);
    }
}

fn try_append(mod_root: &Path, entry: &str) -> io::Result<()> {
    let path = summary_path(mod_root);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    file.write_all(entry.as_bytes())
}
