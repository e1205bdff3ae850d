//! Resolver registration.
//!
//! Wires the configured override points into a host pipeline: builds one
//! resolver plugin per entry, merges the set into the resolve options for
//! both resolution kinds, and flushes the override report through the
//! logging facility when the build completes.

use crate::config::OverrideConfig;
use crate::error::Error;
use crate::pipeline::{HostPipeline, ResolutionKind, ResolveOptions, ResolvePlugin};
use crate::report::OverrideReport;
use crate::resolver::{OverrideRule, PathOverridePlugin};
use std::path::Path;
use std::sync::Arc;

/// Install the configured overrides into `pipeline`.
///
/// Reads `override.json` from `project_root`. An absent or empty
/// configuration is a valid terminal state: no plugins are registered, no
/// completion listener is attached, and `Ok(None)` is returned. Otherwise
/// returns a handle to the per-build report.
///
/// Malformed configuration propagates as a fatal [`Error`]; everything the
/// resolvers themselves encounter at build time is a silent pass-through.
pub fn install(
    pipeline: &mut dyn HostPipeline,
    project_root: &Path,
) -> Result<Option<Arc<OverrideReport>>, Error> {
    let config = OverrideConfig::load(project_root)?;
    if config.is_empty() {
        return Ok(None);
    }

    let modules_root = project_root.join("node_modules");
    let report = Arc::new(OverrideReport::new(project_root));

    let plugins: Vec<Arc<dyn ResolvePlugin>> = config
        .entries()
        .map(|(key, target)| {
            let rule = OverrideRule::from_entry(key, target, &modules_root, project_root);
            Arc::new(PathOverridePlugin::new(rule, Arc::clone(&report))) as Arc<dyn ResolvePlugin>
        })
        .collect();

    for kind in [ResolutionKind::Normal, ResolutionKind::Context] {
        pipeline.merge_resolve_options(kind, ResolveOptions::with_plugins(plugins.clone()));
    }

    let flush = Arc::clone(&report);
    pipeline.on_build_complete(Box::new(move || {
        if flush.is_empty() {
            return;
        }
        // Render outside the macro: tracing skips argument evaluation when
        // the event is disabled, and rendering must consume the report even
        // if nothing subscribes.
        let rendered = flush.render();
        tracing::info!(target: "override_report", "{rendered}");
    }));

    Ok(Some(report))
}
