//! Override configuration loading.
//!
//! Reads `override.json` from the project root: a JSON object mapping
//! override-point keys (package paths like `"venia-ui/components/Tabs"`)
//! to project-relative replacement source paths.

use crate::error::Error;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Conventional config file name, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = "override.json";

/// Parsed override configuration.
///
/// Keys iterate in a deterministic order so resolver registration and the
/// final report are stable across builds.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct OverrideConfig(BTreeMap<String, String>);

impl OverrideConfig {
    /// Load the configuration from `root`.
    ///
    /// An absent file (or a non-file at the conventional name) is not an
    /// error and yields an empty configuration. Malformed JSON is a fatal
    /// configuration error and propagates to the caller.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE_NAME);

        let Ok(meta) = fs::metadata(&path) else {
            return Ok(Self::default());
        };
        if !meta.is_file() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigParse { path, source })
    }

    /// Whether no override points are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of configured override points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(override point key, replacement source path)` entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
