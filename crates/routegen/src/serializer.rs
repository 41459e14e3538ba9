//! Route tree to JSON template serializer.
//!
//! The output is a JSON array shaped exactly like the input tree. `component`
//! and `Route` values are replaced by JavaScript snippets that the router
//! entry template embeds literally, so the string values are code, not data.

use std::collections::HashSet;
use std::fmt;

use crate::chunk;
use crate::config::{Env, ServiceConfig, ServicePaths};
use crate::hook::{HookError, ModifyRouteComponent, RouteComponentArgs, MODIFY_ROUTE_COMPONENT};
use crate::paths;
use crate::route::{GeneratedRoute, RouteComponent, RouteNode};
use crate::snippet;

/// Configuration, paths and hooks of the host build.
pub struct Service<'h> {
    pub config: ServiceConfig,
    pub paths: ServicePaths,
    hook: Option<&'h dyn ModifyRouteComponent>,
}

impl<'h> Service<'h> {
    pub fn new(config: ServiceConfig, paths: ServicePaths) -> Self {
        Self {
            config,
            paths,
            hook: None,
        }
    }

    /// Install a `modifyRouteComponent` hook.
    pub fn with_hook(mut self, hook: &'h dyn ModifyRouteComponent) -> Self {
        self.hook = Some(hook);
        self
    }
}

impl fmt::Debug for Service<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("config", &self.config)
            .field("paths", &self.paths)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Per-call options.
#[derive(Debug, Clone, Default)]
pub struct SerializeOptions {
    pub env: Env,
    pub compile_on_demand: Option<CompileOnDemand>,
}

impl SerializeOptions {
    pub fn new(env: Env) -> Self {
        Self {
            env,
            compile_on_demand: None,
        }
    }

    pub fn with_compile_on_demand(mut self, compile_on_demand: CompileOnDemand) -> Self {
        self.compile_on_demand = Some(compile_on_demand);
        self
    }
}

/// Route paths that have been requested in the dev server so far.
///
/// In development, pages whose route was not requested yet render the
/// compiling placeholder instead of importing the page module.
#[derive(Debug, Clone, Default)]
pub struct CompileOnDemand {
    requested: HashSet<String>,
}

impl CompileOnDemand {
    pub fn new<I, S>(requested: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            requested: requested.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_requested(&self, route_path: &str) -> bool {
        self.requested.contains(route_path)
    }
}

/// Errors that can occur while serializing routes.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("modifyRouteComponent hook failed: {0}")]
    Hook(#[from] HookError),

    #[error("Failed to stringify routes: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize a route tree into the JSON template for the router entry file.
pub fn routes_to_json(
    routes: &[RouteNode],
    service: &Service<'_>,
    options: &SerializeOptions,
) -> Result<String, SerializeError> {
    let generated = routes_to_value(routes, service, options)?;
    Ok(serde_json::to_string(&generated)?)
}

/// Transform a route tree without stringifying it.
pub fn routes_to_value(
    routes: &[RouteNode],
    service: &Service<'_>,
    options: &SerializeOptions,
) -> Result<Vec<GeneratedRoute>, SerializeError> {
    tracing::debug!(env = %options.env, routes = routes.len(), "Serializing routes");
    RouteSerializer { service, options }.transform_all(routes, None)
}

struct RouteSerializer<'a, 'h> {
    service: &'a Service<'h>,
    options: &'a SerializeOptions,
}

impl RouteSerializer<'_, '_> {
    fn transform_all(
        &self,
        routes: &[RouteNode],
        inherited_chunk: Option<&str>,
    ) -> Result<Vec<GeneratedRoute>, SerializeError> {
        routes
            .iter()
            .map(|node| self.transform(node, inherited_chunk))
            .collect()
    }

    fn transform(
        &self,
        node: &RouteNode,
        inherited_chunk: Option<&str>,
    ) -> Result<GeneratedRoute, SerializeError> {
        let chunk_name = match &node.component {
            Some(RouteComponent::Module(module)) => Some(match inherited_chunk {
                Some(inherited) => inherited.to_string(),
                None => chunk::chunk_name(module, &self.service.paths),
            }),
            _ => None,
        };

        let component = match &node.component {
            Some(RouteComponent::Expression(code)) => Some(code.clone()),
            Some(RouteComponent::Module(module)) => Some(self.component_snippet(
                module,
                node.path.as_deref(),
                chunk_name.as_deref().unwrap_or_default(),
            )?),
            None => None,
        };

        let route = node.route.as_deref().map(|r| self.route_snippet(r));

        // Children share the parent's chunk, except below the root layout.
        let child_chunk = if node.path.as_deref() == Some("/") {
            None
        } else {
            chunk_name.as_deref().or(inherited_chunk)
        };
        let routes = node
            .routes
            .as_deref()
            .map(|children| self.transform_all(children, child_chunk))
            .transpose()?;

        Ok(node.map_parts(component, route, routes))
    }

    fn component_snippet(
        &self,
        module: &str,
        route_path: Option<&str>,
        chunk_name: &str,
    ) -> Result<String, SerializeError> {
        let Service {
            config,
            paths: service_paths,
            ..
        } = self.service;
        let import_path = self.import_path(module);

        if let (Some(on_demand), Some(route_path)) = (&self.options.compile_on_demand, route_path) {
            if self.options.env.is_development() && !on_demand.is_requested(route_path) {
                tracing::debug!(route = route_path, "Route not requested yet, using placeholder");
                return Ok(snippet::compiling_placeholder(
                    &paths::win_path(&service_paths.abs_compiling_component_path),
                    route_path,
                ));
            }
        }

        if !(self.options.env.is_production() && config.dynamic_import()) {
            return Ok(snippet::require_default(&import_path));
        }

        let loading = config
            .loading_component()
            .map(|loading| paths::join(&service_paths.abs_src_path, loading));
        let initial_value = snippet::dynamic_import(chunk_name, &import_path, loading.as_deref());
        tracing::debug!(component = module, chunk = chunk_name, "Generated dynamic import");

        let Some(hook) = self.service.hook else {
            return Ok(initial_value);
        };

        let args = RouteComponentArgs {
            page_js_file: import_path.clone(),
            import_path,
            webpack_chunk_name: chunk_name.to_string(),
            config: config.clone(),
        };
        tracing::trace!(hook = MODIFY_ROUTE_COMPONENT, component = module, "Applying hook");
        Ok(hook.modify_route_component(initial_value, &args)?)
    }

    /// Path of `module` as seen from the router entry file.
    fn import_path(&self, module: &str) -> String {
        let service_paths = &self.service.paths;
        let entry_dir = paths::resolve(&service_paths.cwd, &service_paths.tmp_dir_path);
        let target = paths::resolve(&service_paths.cwd, module);

        let relative = paths::relative(&entry_dir, &target);
        let relative = snippet::strip_index(&relative);
        if relative.starts_with('.') || paths::is_absolute(relative) {
            relative.to_string()
        } else {
            // A bare specifier would be resolved from node_modules.
            format!("./{relative}")
        }
    }

    fn route_snippet(&self, route: &str) -> String {
        snippet::require_default(&paths::join(&self.service.paths.cwd, route))
    }
}
