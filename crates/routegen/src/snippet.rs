//! JavaScript snippet generators for route components.
//!
//! Paths are embedded verbatim between single quotes; callers pass paths that
//! already went through [`crate::paths`].

/// `require('<path>').default`
pub fn require_default(path: &str) -> String {
    format!("require('{path}').default")
}

/// Code-split import with an optional loading component.
///
/// The chunk name is wrapped in `^` instead of quotes so it survives being
/// embedded in a JSON string; the consumer of the template swaps them back.
pub fn dynamic_import(chunk_name: &str, import_path: &str, loading: Option<&str>) -> String {
    let options = match loading {
        Some(loading) => format!("{{ loading: {} }}", require_default(loading)),
        None => "{}".to_string(),
    };
    format!(
        "dynamic(() => import(/* webpackChunkName: ^{chunk_name}^ */'{import_path}'), {options})"
    )
}

/// Placeholder rendered for a page that has not been compiled yet.
pub fn compiling_placeholder(compiling_component: &str, route_path: &str) -> String {
    format!(
        "() => React.createElement({}, {{ route: '{route_path}' }})",
        require_default(compiling_component)
    )
}

/// Drop a trailing `/index` segment; module resolution finds it anyway.
pub fn strip_index(import_path: &str) -> &str {
    match import_path.strip_suffix("/index") {
        Some(dir) if !dir.is_empty() => dir,
        _ => import_path,
    }
}
