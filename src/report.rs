//! Override report sink.
//!
//! One report object is created per build and shared with every resolver
//! plugin. It accumulates the overrides actually applied and renders them
//! exactly once; after the first render it stays consumed for the rest of
//! the build no matter how many more overrides are recorded.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// Write-once accumulator of applied overrides.
///
/// The host pipeline may probe resolvers from parallel threads, so the
/// entry map sits behind a mutex. Entries are keyed by the original path;
/// recording the same original path twice overwrites the stored override
/// path (last write wins — a quirk carried over deliberately, see
/// `DESIGN.md`).
#[derive(Debug)]
pub struct OverrideReport {
    /// Project root prefix stripped from recorded paths for readability.
    root: String,
    state: Mutex<ReportState>,
}

#[derive(Debug, Default)]
struct ReportState {
    entries: BTreeMap<String, String>,
    reported: bool,
}

impl OverrideReport {
    /// Create an empty report for a build rooted at `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_string_lossy().into_owned(),
            state: Mutex::new(ReportState::default()),
        }
    }

    /// Record one applied override.
    pub fn record(&self, original_path: &str, override_path: &str) {
        let mut state = self.lock();
        state.entries.insert(
            self.strip_root(original_path),
            self.strip_root(override_path),
        );
    }

    /// Whether there is nothing (left) to report.
    ///
    /// True when no overrides were recorded or the report was already
    /// rendered once.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let state = self.lock();
        state.entries.is_empty() || state.reported
    }

    /// Render the report.
    ///
    /// The first call marks the report consumed and returns one
    /// `"<original> => <override>"` line per entry, prefixed with a
    /// newline. Every later call returns an empty string, even if more
    /// overrides were recorded in between.
    #[must_use]
    pub fn render(&self) -> String {
        let mut state = self.lock();
        if state.reported {
            return String::new();
        }
        state.reported = true;

        let lines: Vec<String> = state
            .entries
            .iter()
            .map(|(original, replacement)| format!("{original} => {replacement}"))
            .collect();
        format!("\n{}", lines.join("\n"))
    }

    fn strip_root(&self, path: &str) -> String {
        path.strip_prefix(&self.root).unwrap_or(path).to_string()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ReportState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
