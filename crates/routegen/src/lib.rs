//! Route tree serialization for generated router entry files.
//!
//! This crate turns a route configuration tree into a JSON template whose
//! `component` and `Route` values are JavaScript snippets: plain `require`
//! calls, or code-split `dynamic(() => import(...))` expressions for
//! production builds.

pub mod chunk;
pub mod config;
pub mod hook;
pub mod paths;
pub mod route;
pub mod serializer;
pub mod snippet;

pub use config::{Env, ExportStaticConfig, ReactConfig, ServiceConfig, ServicePaths};
pub use hook::{HookError, ModifyRouteComponent, RouteComponentArgs, MODIFY_ROUTE_COMPONENT};
pub use route::{GeneratedRoute, RouteComponent, RouteNode};
pub use serializer::{
    routes_to_json, routes_to_value, CompileOnDemand, SerializeError, SerializeOptions, Service,
};
