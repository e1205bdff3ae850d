use std::path::{Component, Path, PathBuf};

/// Resolve `spec` against `base` without touching the filesystem.
///
/// Joins the two when `spec` is relative, then strips `.` components and
/// folds `..` lexically. Override prefixes are compared as literal strings,
/// so both sides of a rule must go through the same normalization before
/// any matching happens.
#[must_use]
pub fn resolve_lexical(base: &Path, spec: &Path) -> PathBuf {
    let joined = if spec.is_absolute() {
        spec.to_path_buf()
    } else {
        base.join(spec)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays clamped at the root.
                out.pop();
            }
            c => out.push(c.as_os_str()),
        }
    }
    out
}
