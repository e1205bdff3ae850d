//! Host pipeline abstraction.
//!
//! The composition layer only needs two capabilities from the build system
//! it hooks into: merging extra plugins into the resolve options for a
//! resolution kind, and a once-per-build completion event. Both live behind
//! the [`HostPipeline`] trait so the core is testable without a concrete
//! host.
//!
//! Resolver plugins themselves implement [`ResolvePlugin`]; the host invokes
//! them at its file-existence check through
//! [`ResolveOptions::check_existing_file`].

use std::path::PathBuf;
use std::sync::Arc;

/// Category of a resolve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionKind {
    /// Concrete file resolution.
    Normal,
    /// Directory (context) resolution.
    Context,
}

/// A resolution request as carried by the file-existence hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Concrete candidate path the pipeline is about to confirm.
    pub path: Option<PathBuf>,
    /// Pending unresolved specifier, if raw-request processing is still in
    /// flight. Cleared by a rewrite so the host treats the result as a
    /// freshly resolved file.
    pub request: Option<String>,
}

/// Terminal `Rewritten` outcome of one resolution attempt.
#[derive(Debug, Clone)]
pub struct Rewrite {
    /// The rewritten request, resolved in place of the original.
    pub request: ResolveRequest,
    /// Human-readable note for the host's own tracing/verbose output.
    pub description: String,
}

/// A plugin invoked at the pipeline's file-existence check.
///
/// Returning `None` passes the request through unchanged and lets the
/// host continue its normal resolution chain.
pub trait ResolvePlugin: Send + Sync {
    /// Registration name, used in rewrite descriptions.
    fn name(&self) -> &str;

    /// Called when the pipeline is about to confirm that `request.path`
    /// exists. Return `Some` to resolve the attempt with a rewritten
    /// request instead.
    fn existing_file(&self, request: &ResolveRequest) -> Option<Rewrite>;
}

/// Resolve options contributed to the pipeline for one resolution kind.
#[derive(Clone, Default)]
pub struct ResolveOptions {
    plugins: Vec<Arc<dyn ResolvePlugin>>,
}

impl ResolveOptions {
    /// Options carrying the given plugin set.
    #[must_use]
    pub fn with_plugins(plugins: Vec<Arc<dyn ResolvePlugin>>) -> Self {
        Self { plugins }
    }

    /// Merge `other` into these options.
    ///
    /// Plugin lists are concatenated, never replaced, so plugins already
    /// present from other sources survive. Concatenation keeps the merge
    /// associative.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.plugins.extend(other.plugins);
        self
    }

    /// Registered plugins, in invocation order.
    #[must_use]
    pub fn plugins(&self) -> &[Arc<dyn ResolvePlugin>] {
        &self.plugins
    }

    /// Run the file-existence hook across all plugins.
    ///
    /// First plugin to return a rewrite wins; `None` means every plugin
    /// passed the request through.
    #[must_use]
    pub fn check_existing_file(&self, request: &ResolveRequest) -> Option<Rewrite> {
        self.plugins
            .iter()
            .find_map(|plugin| plugin.existing_file(request))
    }
}

impl std::fmt::Debug for ResolveOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("ResolveOptions")
            .field("plugins", &names)
            .finish()
    }
}

/// Handler fired once when the build completes.
pub type BuildCompleteHandler = Box<dyn FnOnce() + Send>;

/// Extension points the composition layer consumes from the host.
pub trait HostPipeline {
    /// Merge `extra` into the resolve options for `kind`.
    ///
    /// Implementations must apply [`ResolveOptions::merge`] semantics:
    /// merge plugin lists, do not replace options from other sources.
    fn merge_resolve_options(&mut self, kind: ResolutionKind, extra: ResolveOptions);

    /// Subscribe to the build-completion event, fired exactly once per
    /// build after all resolution is done.
    fn on_build_complete(&mut self, handler: BuildCompleteHandler);
}
