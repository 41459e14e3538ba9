//! Service configuration and resolved project paths.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User configuration relevant to route code generation.
///
/// Serializes with the host tool's camelCase keys, which is also the shape
/// handed to `modifyRouteComponent` hooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfig {
    /// React specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub react: Option<ReactConfig>,

    /// Static HTML export options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_static: Option<ExportStaticConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactConfig {
    /// Code-split route components in production builds
    #[serde(default)]
    pub dynamic_import: bool,

    /// Component rendered while a split chunk loads, relative to the source root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loading_component: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStaticConfig {
    /// Route paths carry an optional `.html` suffix
    #[serde(default)]
    pub html_suffix: bool,
}

impl ServiceConfig {
    pub fn dynamic_import(&self) -> bool {
        self.react.as_ref().is_some_and(|r| r.dynamic_import)
    }

    pub fn loading_component(&self) -> Option<&str> {
        self.react
            .as_ref()
            .and_then(|r| r.loading_component.as_deref())
    }

    pub fn html_suffix(&self) -> bool {
        self.export_static.as_ref().is_some_and(|e| e.html_suffix)
    }
}

/// Project paths the generated snippets are resolved against.
///
/// Values are used lexically; they do not need to exist on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePaths {
    /// Project root. `Route` entries and relative paths are anchored here.
    pub cwd: String,

    /// Source root. Chunk names and the loading component are rooted here.
    pub abs_src_path: String,

    /// Directory of the generated router entry file.
    pub tmp_dir_path: String,

    /// Placeholder component shown while a page compiles on demand.
    #[serde(default)]
    pub abs_compiling_component_path: String,
}

/// Build environment the routes are generated for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Env {
    Production,
    Development,
    Test,
    Other(String),
    /// No environment given
    #[default]
    Unspecified,
}

impl Env {
    pub fn is_production(&self) -> bool {
        matches!(self, Env::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Env::Development)
    }
}

impl FromStr for Env {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "production" => Env::Production,
            "development" => Env::Development,
            "test" => Env::Test,
            "" => Env::Unspecified,
            other => Env::Other(other.to_string()),
        })
    }
}

impl fmt::Display for Env {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Env::Production => f.write_str("production"),
            Env::Development => f.write_str("development"),
            Env::Test => f.write_str("test"),
            Env::Other(name) => f.write_str(name),
            Env::Unspecified => f.write_str("unspecified"),
        }
    }
}
