//! Route tree data model.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::{self, DeserializeOwned};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A node of the route tree.
///
/// `C` is the type of the `component` field: [`RouteComponent`] on input and
/// the generated snippet (`String`) on output. Fields that are absent stay
/// absent when serialized, and fields this crate does not know about are kept
/// in `extra` and written back unchanged. A node read from JSON or YAML is
/// written back with its keys in the order they were read; an explicit
/// `null` on a known key is kept as `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteNode<C = RouteComponent> {
    /// URL path pattern (e.g. "/users/:id")
    pub path: Option<String>,

    /// Page component
    pub component: Option<C>,

    /// Route wrapper module, resolved against the project root
    pub route: Option<String>,

    /// Nested routes
    pub routes: Option<Vec<RouteNode<C>>>,

    /// Any other fields (exact, redirect, title, ...), plus known keys that
    /// were explicitly `null`
    pub extra: Map<String, Value>,

    /// Key order as read
    keys: Vec<String>,
}

/// A route node whose `component` and `Route` values are generated code.
pub type GeneratedRoute = RouteNode<String>;

const KNOWN_KEYS: [&str; 4] = ["path", "component", "Route", "routes"];

impl<C> Default for RouteNode<C> {
    fn default() -> Self {
        Self {
            path: None,
            component: None,
            route: None,
            routes: None,
            extra: Map::new(),
            keys: Vec::new(),
        }
    }
}

impl<C> RouteNode<C> {
    /// Build a node with another component type, keeping path, extra fields
    /// and key order of `self`.
    pub(crate) fn map_parts<D>(
        &self,
        component: Option<D>,
        route: Option<String>,
        routes: Option<Vec<RouteNode<D>>>,
    ) -> RouteNode<D> {
        RouteNode {
            path: self.path.clone(),
            component,
            route,
            routes,
            extra: self.extra.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<C: Serialize> RouteNode<C> {
    /// Write `key` from its typed field. Returns false when the field is unset.
    fn serialize_known<M: SerializeMap>(&self, key: &str, map: &mut M) -> Result<bool, M::Error> {
        match key {
            "path" => match &self.path {
                Some(path) => map.serialize_entry(key, path)?,
                None => return Ok(false),
            },
            "component" => match &self.component {
                Some(component) => map.serialize_entry(key, component)?,
                None => return Ok(false),
            },
            "Route" => match &self.route {
                Some(route) => map.serialize_entry(key, route)?,
                None => return Ok(false),
            },
            "routes" => match &self.routes {
                Some(routes) => map.serialize_entry(key, routes)?,
                None => return Ok(false),
            },
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl<C: Serialize> Serialize for RouteNode<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Keys as read first, then anything set programmatically.
        let mut order: Vec<&str> = self.keys.iter().map(String::as_str).collect();
        order.extend(KNOWN_KEYS);
        order.extend(self.extra.keys().map(String::as_str));

        let mut map = serializer.serialize_map(None)?;
        let mut written: Vec<&str> = Vec::new();
        for key in order {
            if written.contains(&key) {
                continue;
            }
            if !self.serialize_known(key, &mut map)? {
                let Some(value) = self.extra.get(key) else {
                    continue;
                };
                map.serialize_entry(key, value)?;
            }
            written.push(key);
        }
        map.end()
    }
}

impl<'de, C: DeserializeOwned> Deserialize<'de> for RouteNode<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;

        let mut node = RouteNode::default();
        for (key, value) in fields {
            node.keys.push(key.clone());
            if value.is_null() || !KNOWN_KEYS.contains(&key.as_str()) {
                node.extra.insert(key, value);
                continue;
            }
            match key.as_str() {
                "path" => node.path = Some(from_value(value)?),
                "component" => node.component = Some(from_value(value)?),
                "Route" => node.route = Some(from_value(value)?),
                "routes" => node.routes = Some(from_value(value)?),
                _ => {}
            }
        }
        Ok(node)
    }
}

fn from_value<T: DeserializeOwned, E: de::Error>(value: Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(E::custom)
}

impl RouteNode {
    /// A node with only a `component`.
    pub fn component(component: impl Into<String>) -> Self {
        Self {
            component: Some(RouteComponent::from(component.into())),
            ..Self::default()
        }
    }

    /// A node with only a `Route` wrapper.
    pub fn route(route: impl Into<String>) -> Self {
        Self {
            route: Some(route.into()),
            ..Self::default()
        }
    }
}

impl<C> RouteNode<C> {
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_routes(mut self, routes: Vec<RouteNode<C>>) -> Self {
        self.routes = Some(routes);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// The value of a `component` field.
///
/// Strings are classified once, when they enter the model: source code that
/// already is a function expression is kept verbatim, everything else is a
/// module path to import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RouteComponent {
    /// Inline function source, e.g. `() => A`
    Expression(String),

    /// Module path, e.g. `./pages/users`
    Module(String),
}

// Arrow functions (`() =>`, `(a, b) =>`, `a =>`) and function expressions,
// optionally async.
static FUNCTION_EXPR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:async\s+)?(?:(?:\([^)]*\)|[A-Za-z_$][\w$]*)\s*=>|function\b\s*\*?\s*[\w$]*\s*\()",
    )
    .expect("Invalid function expression regex")
});

impl RouteComponent {
    /// Classify a raw `component` string.
    pub fn classify(value: String) -> Self {
        if FUNCTION_EXPR_RE.is_match(&value) {
            RouteComponent::Expression(value)
        } else {
            RouteComponent::Module(value)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RouteComponent::Expression(s) | RouteComponent::Module(s) => s,
        }
    }

    pub fn is_expression(&self) -> bool {
        matches!(self, RouteComponent::Expression(_))
    }
}

impl From<String> for RouteComponent {
    fn from(value: String) -> Self {
        Self::classify(value)
    }
}

impl From<&str> for RouteComponent {
    fn from(value: &str) -> Self {
        Self::classify(value.to_string())
    }
}

impl From<RouteComponent> for String {
    fn from(component: RouteComponent) -> Self {
        match component {
            RouteComponent::Expression(s) | RouteComponent::Module(s) => s,
        }
    }
}
