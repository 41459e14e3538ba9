//! The `modifyRouteComponent` extension point.

use serde::Serialize;

use crate::config::ServiceConfig;

/// Name of the hook, as host plugins know it.
pub const MODIFY_ROUTE_COMPONENT: &str = "modifyRouteComponent";

/// Context passed to a hook alongside the generated snippet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteComponentArgs {
    /// Page module path relative to the router entry file
    #[serde(rename = "pageJSFile")]
    pub page_js_file: String,

    /// Path used inside the generated `import(...)`
    pub import_path: String,

    /// Chunk the component is split into
    pub webpack_chunk_name: String,

    /// Service configuration in effect
    pub config: ServiceConfig,
}

/// Hook that may rewrite a generated dynamic-import snippet.
///
/// The returned string replaces the snippet in the output.
pub trait ModifyRouteComponent: Send + Sync {
    fn modify_route_component(
        &self,
        initial_value: String,
        args: &RouteComponentArgs,
    ) -> Result<String, HookError>;
}

impl<F> ModifyRouteComponent for F
where
    F: Fn(String, &RouteComponentArgs) -> Result<String, HookError> + Send + Sync,
{
    fn modify_route_component(
        &self,
        initial_value: String,
        args: &RouteComponentArgs,
    ) -> Result<String, HookError> {
        self(initial_value, args)
    }
}

/// Error raised by a hook.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
