//! Webpack chunk names for code-split route components.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::ServicePaths;
use crate::paths;

static SCRIPT_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.[jt]sx?$").expect("Invalid script extension regex"));

/// Derive the chunk name for a component module.
///
/// Components inside the source root are named by their path below it.
/// Anything else is named by the path as written in the route tree.
pub fn chunk_name(component: &str, paths: &ServicePaths) -> String {
    let anchored = paths::resolve(&paths.cwd, component);
    let src_root = paths::resolve(&paths.cwd, &paths.abs_src_path);

    let name = match paths::strip_base(&anchored, &src_root) {
        Some(below_src) if !below_src.is_empty() => normalize_entry(below_src),
        _ => normalize_entry(&paths::win_path(component)),
    };
    tracing::trace!(component, chunk = %name, "Derived chunk name");
    name
}

/// Flatten a module path into a single identifier.
///
/// `./pages/users/index.js` becomes `pages__users__index`.
pub fn normalize_entry(path: &str) -> String {
    let path = paths::win_path(path);
    let trimmed = path
        .strip_prefix("./")
        .unwrap_or(path.as_str())
        .trim_start_matches('/');
    let flattened = trimmed.replace('/', "__");
    SCRIPT_EXT_RE.replace(&flattened, "").into_owned()
}
