//! Path override resolver.
//!
//! One [`PathOverridePlugin`] is built per configured override point. It
//! watches the pipeline's file-existence check and, when the candidate path
//! falls under the rule's original prefix and the substituted path exists
//! as a regular file, resolves the attempt with the rewritten request.
//! Everything else passes through silently.

use crate::paths;
use crate::pipeline::{ResolvePlugin, ResolveRequest, Rewrite};
use crate::report::OverrideReport;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An immutable (name, original prefix, override prefix) triple.
///
/// Both prefixes are lexically normalized absolute paths; matching is a
/// literal string-prefix test over them, never segment-aware.
#[derive(Debug, Clone)]
pub struct OverrideRule {
    name: String,
    original_path: String,
    override_path: String,
}

impl OverrideRule {
    /// Build a rule from one configuration entry.
    ///
    /// `key` is resolved under `modules_root` (the dependency root) to the
    /// original prefix; `target` is resolved under `project_root` to the
    /// override prefix. The registration name is the key with its first
    /// `/` turned into `.`, suffixed with `.override.resolver`.
    #[must_use]
    pub fn from_entry(key: &str, target: &str, modules_root: &Path, project_root: &Path) -> Self {
        Self {
            name: format!("{}.override.resolver", key.replacen('/', ".", 1)),
            original_path: paths::resolve_lexical(modules_root, Path::new(key))
                .to_string_lossy()
                .into_owned(),
            override_path: paths::resolve_lexical(project_root, Path::new(target))
                .to_string_lossy()
                .into_owned(),
        }
    }

    /// Registration name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute prefix that triggers the override.
    #[must_use]
    pub fn original_path(&self) -> &str {
        &self.original_path
    }

    /// Absolute prefix substituted in on a match.
    #[must_use]
    pub fn override_path(&self) -> &str {
        &self.override_path
    }
}

/// Existence-check plugin bound to one override rule.
pub struct PathOverridePlugin {
    rule: OverrideRule,
    report: Arc<OverrideReport>,
}

impl PathOverridePlugin {
    /// Bind `rule` to the shared per-build report.
    #[must_use]
    pub fn new(rule: OverrideRule, report: Arc<OverrideReport>) -> Self {
        Self { rule, report }
    }
}

impl ResolvePlugin for PathOverridePlugin {
    fn name(&self) -> &str {
        self.rule.name()
    }

    fn existing_file(&self, request: &ResolveRequest) -> Option<Rewrite> {
        let current = request.path.as_ref()?;
        let current = current.to_string_lossy();

        let suffix = current.strip_prefix(self.rule.original_path())?;
        let override_file = format!("{}{suffix}", self.rule.override_path());

        // Probe failures and non-files fall through to the host's normal
        // chain; only a regular file at the substituted path rewrites.
        match fs::metadata(&override_file) {
            Ok(meta) if meta.is_file() => {
                self.report.record(&current, &override_file);
                Some(Rewrite {
                    request: ResolveRequest {
                        path: Some(PathBuf::from(&override_file)),
                        request: None,
                    },
                    description: format!("resolved by {} to {override_file}", self.rule.name()),
                })
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn project() -> (TempDir, PathBuf, PathBuf) {
        let dir = tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let modules = root.join("node_modules");
        fs::create_dir_all(&modules).unwrap();
        (dir, root, modules)
    }

    fn rule_for(root: &Path, modules: &Path) -> OverrideRule {
        OverrideRule::from_entry(
            "venia-ui/components/Tabs",
            "src/overrides/venia-ui/components/Tabs",
            modules,
            root,
        )
    }

    fn plugin_for(root: &Path, modules: &Path) -> (PathOverridePlugin, Arc<OverrideReport>) {
        let report = Arc::new(OverrideReport::new(root));
        let plugin = PathOverridePlugin::new(rule_for(root, modules), Arc::clone(&report));
        (plugin, report)
    }

    #[test]
    fn test_rule_name_replaces_first_slash_only() {
        let (_dir, root, modules) = project();
        let rule = rule_for(&root, &modules);
        assert_eq!(rule.name(), "venia-ui.components/Tabs.override.resolver");
    }

    #[test]
    fn test_rule_paths_are_absolute() {
        let (_dir, root, modules) = project();
        let rule = rule_for(&root, &modules);
        assert_eq!(
            rule.original_path(),
            modules
                .join("venia-ui/components/Tabs")
                .to_string_lossy()
                .as_ref()
        );
        assert_eq!(
            rule.override_path(),
            root.join("src/overrides/venia-ui/components/Tabs")
                .to_string_lossy()
                .as_ref()
        );
    }

    #[test]
    fn test_rewrites_when_override_target_exists() {
        let (_dir, root, modules) = project();
        let override_dir = root.join("src/overrides/venia-ui/components/Tabs");
        fs::create_dir_all(&override_dir).unwrap();
        fs::write(override_dir.join("tabs.js"), "export default {}").unwrap();

        let (plugin, report) = plugin_for(&root, &modules);
        let original = modules.join("venia-ui/components/Tabs/tabs.js");
        let request = ResolveRequest {
            path: Some(original.clone()),
            request: Some("venia-ui/components/Tabs/tabs.js".to_string()),
        };

        let rewrite = plugin.existing_file(&request).unwrap();
        assert_eq!(
            rewrite.request.path,
            Some(override_dir.join("tabs.js")),
        );
        // Raw-request processing must not continue on the rewritten request.
        assert_eq!(rewrite.request.request, None);
        assert!(rewrite.description.contains(plugin.name()));
        assert!(!report.is_empty());
    }

    #[test]
    fn test_suffix_copied_verbatim() {
        let (_dir, root, modules) = project();
        let override_dir = root.join("src/overrides/venia-ui/components/Tabs/nested");
        fs::create_dir_all(&override_dir).unwrap();
        fs::write(override_dir.join("item.module.css"), "").unwrap();

        let (plugin, _report) = plugin_for(&root, &modules);
        let request = ResolveRequest {
            path: Some(modules.join("venia-ui/components/Tabs/nested/item.module.css")),
            request: None,
        };

        let rewrite = plugin.existing_file(&request).unwrap();
        assert_eq!(
            rewrite.request.path,
            Some(override_dir.join("item.module.css")),
        );
    }

    #[test]
    fn test_passes_through_without_path() {
        let (_dir, root, modules) = project();
        let (plugin, report) = plugin_for(&root, &modules);

        let request = ResolveRequest {
            path: None,
            request: Some("venia-ui/components/Tabs".to_string()),
        };
        assert!(plugin.existing_file(&request).is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn test_passes_through_on_prefix_mismatch() {
        let (_dir, root, modules) = project();
        let (plugin, report) = plugin_for(&root, &modules);

        let request = ResolveRequest {
            path: Some(modules.join("venia-ui/components/Carousel/carousel.js")),
            request: None,
        };
        assert!(plugin.existing_file(&request).is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn test_passes_through_when_override_target_absent() {
        let (_dir, root, modules) = project();
        let (plugin, report) = plugin_for(&root, &modules);

        let request = ResolveRequest {
            path: Some(modules.join("venia-ui/components/Tabs/tabs.js")),
            request: None,
        };
        assert!(plugin.existing_file(&request).is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn test_passes_through_when_override_target_is_directory() {
        let (_dir, root, modules) = project();
        fs::create_dir_all(root.join("src/overrides/venia-ui/components/Tabs/tabs.js")).unwrap();

        let (plugin, report) = plugin_for(&root, &modules);
        let request = ResolveRequest {
            path: Some(modules.join("venia-ui/components/Tabs/tabs.js")),
            request: None,
        };
        assert!(plugin.existing_file(&request).is_none());
        assert!(report.is_empty());
    }

    #[test]
    fn test_records_one_entry_per_applied_override() {
        let (_dir, root, modules) = project();
        let override_dir = root.join("src/overrides/venia-ui/components/Tabs");
        fs::create_dir_all(&override_dir).unwrap();
        fs::write(override_dir.join("tabs.js"), "").unwrap();

        let (plugin, report) = plugin_for(&root, &modules);
        let request = ResolveRequest {
            path: Some(modules.join("venia-ui/components/Tabs/tabs.js")),
            request: None,
        };
        plugin.existing_file(&request).unwrap();

        let rendered = report.render();
        assert_eq!(
            rendered,
            "\n/node_modules/venia-ui/components/Tabs/tabs.js => /src/overrides/venia-ui/components/Tabs/tabs.js"
        );
    }
}
