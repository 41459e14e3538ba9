//! Route tree build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use routegen::{
    paths, CompileOnDemand, Env, ExportStaticConfig, HookError, ModifyRouteComponent,
    ReactConfig, RouteComponentArgs, RouteNode, SerializeOptions, Service, ServiceConfig,
    ServicePaths,
};
use serde::Deserialize;

/// Configuration file structure (routegen.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    paths: PathsConfig,
    #[serde(default)]
    react: ReactSection,
    #[serde(default)]
    export_static: ExportStaticSection,
    #[serde(default)]
    hooks: HooksSection,
}

#[derive(Debug, Deserialize)]
struct PathsConfig {
    #[serde(default = "default_cwd")]
    cwd: String,
    #[serde(default = "default_src")]
    abs_src_path: String,
    #[serde(default = "default_tmp_dir")]
    tmp_dir_path: String,
    abs_compiling_component_path: Option<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            cwd: default_cwd(),
            abs_src_path: default_src(),
            tmp_dir_path: default_tmp_dir(),
            abs_compiling_component_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ReactSection {
    #[serde(default)]
    dynamic_import: bool,
    loading_component: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct ExportStaticSection {
    #[serde(default)]
    html_suffix: bool,
}

#[derive(Debug, Deserialize, Default)]
struct HooksSection {
    /// Template for rewriting dynamic imports
    modify_route_component: Option<String>,
}

fn default_cwd() -> String {
    ".".to_string()
}
fn default_src() -> String {
    "src".to_string()
}
fn default_tmp_dir() -> String {
    "src/pages/.umi".to_string()
}

impl ConfigFile {
    fn service_config(&self) -> ServiceConfig {
        let react = (self.react.dynamic_import || self.react.loading_component.is_some()).then(|| {
            ReactConfig {
                dynamic_import: self.react.dynamic_import,
                loading_component: self.react.loading_component.clone(),
            }
        });
        let export_static = self
            .export_static
            .html_suffix
            .then_some(ExportStaticConfig { html_suffix: true });

        ServiceConfig {
            react,
            export_static,
        }
    }

    /// Anchor configured paths on `current_dir` so generated requires are absolute.
    fn service_paths(&self, current_dir: &Path) -> ServicePaths {
        let cwd = paths::resolve(&current_dir.to_string_lossy(), &self.paths.cwd);

        ServicePaths {
            abs_src_path: paths::resolve(&cwd, &self.paths.abs_src_path),
            tmp_dir_path: paths::resolve(&cwd, &self.paths.tmp_dir_path),
            abs_compiling_component_path: self
                .paths
                .abs_compiling_component_path
                .as_deref()
                .map(|p| paths::resolve(&cwd, p))
                .unwrap_or_default(),
            cwd,
        }
    }
}

/// Load configuration from the config file if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(config_path: &Path) -> Result<ConfigFile> {
    if config_path.exists() {
        let content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        tracing::info!("Loaded config from {}", config_path.display());
        return Ok(config);
    }
    tracing::debug!("{} not found, using defaults", config_path.display());
    Ok(ConfigFile::default())
}

/// Read a route tree from JSON, or YAML for `.yaml`/`.yml` files.
fn read_routes(path: &Path) -> Result<Vec<RouteNode>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    );
    let routes = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse routes in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse routes in {}", path.display()))?
    };

    Ok(routes)
}

/// Hook configured in `[hooks]`: wraps each dynamic import in a template.
#[derive(Debug)]
struct TemplateHook {
    template: String,
}

impl TemplateHook {
    fn new(template: String) -> Result<Self> {
        if !template.contains("{}") {
            anyhow::bail!("hooks.modify_route_component must contain {{}}: {template}");
        }
        Ok(Self { template })
    }
}

impl ModifyRouteComponent for TemplateHook {
    fn modify_route_component(
        &self,
        initial_value: String,
        args: &RouteComponentArgs,
    ) -> Result<String, HookError> {
        Ok(self
            .template
            .replace("{chunk}", &args.webpack_chunk_name)
            .replace("{}", &initial_value))
    }
}

/// Arguments of the build command.
#[derive(Debug)]
pub struct BuildArgs {
    pub routes: PathBuf,
    pub env: String,
    pub output: Option<PathBuf>,
    pub pretty: bool,
    pub requested: Option<Vec<String>>,
}

/// Run the build command.
pub fn run(config_path: &Path, args: BuildArgs) -> Result<()> {
    tracing::info!("Serializing routes from {}", args.routes.display());

    let file_config = load_config(config_path)?;
    let routes = read_routes(&args.routes)?;
    let current_dir = std::env::current_dir().context("Failed to read current directory")?;

    let hook = file_config
        .hooks
        .modify_route_component
        .clone()
        .map(TemplateHook::new)
        .transpose()?;

    let mut service = Service::new(
        file_config.service_config(),
        file_config.service_paths(&current_dir),
    );
    if let Some(hook) = &hook {
        service = service.with_hook(hook);
    }
    tracing::debug!(?service, "Resolved service");

    let env: Env = args.env.parse()?;
    let mut options = SerializeOptions::new(env);
    if let Some(requested) = args.requested {
        options = options.with_compile_on_demand(CompileOnDemand::new(requested));
    }

    let json = if args.pretty {
        let generated = routegen::routes_to_value(&routes, &service, &options)?;
        serde_json::to_string_pretty(&generated)?
    } else {
        routegen::routes_to_json(&routes, &service, &options)?
    };

    match args.output {
        Some(output) => {
            fs::write(&output, &json)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            tracing::info!("Wrote {} routes to {}", routes.len(), output.display());
        }
        None => println!("{json}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use tempfile::tempdir;

    use crate::commands::init::DEFAULT_CONFIG;

    #[test]
    fn missing_config_uses_defaults() {
        let temp = tempdir().unwrap();

        let config = load_config(&temp.path().join("routegen.toml")).unwrap();

        assert_eq!(config.paths.cwd, ".");
        assert_eq!(config.paths.abs_src_path, "src");
        assert_eq!(config.paths.tmp_dir_path, "src/pages/.umi");
        assert_eq!(config.service_config(), ServiceConfig::default());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("routegen.toml");
        fs::write(&config_path, "[react\ndynamic_import = ").unwrap();

        assert!(load_config(&config_path).is_err());
    }

    #[test]
    fn default_config_parses() {
        let config: ConfigFile = toml::from_str(DEFAULT_CONFIG).unwrap();

        assert!(!config.react.dynamic_import);
        assert!(config.hooks.modify_route_component.is_none());
    }

    #[test]
    fn maps_sections_to_service_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[react]
dynamic_import = true
loading_component = "./components/Loading"

[export_static]
html_suffix = true
"#,
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(config.service_config()).unwrap(),
            json!({
                "react": { "dynamicImport": true, "loadingComponent": "./components/Loading" },
                "exportStatic": { "htmlSuffix": true }
            })
        );
    }

    #[test]
    fn anchors_paths_on_current_dir() {
        let config = ConfigFile::default();

        let paths = config.service_paths(Path::new("/work/app"));

        assert_eq!(
            paths,
            ServicePaths {
                cwd: "/work/app".to_string(),
                abs_src_path: "/work/app/src".to_string(),
                tmp_dir_path: "/work/app/src/pages/.umi".to_string(),
                abs_compiling_component_path: String::new(),
            }
        );
    }

    #[test]
    fn template_hook_requires_placeholder() {
        assert!(TemplateHook::new("withTracking()".to_string()).is_err());
    }

    #[test]
    fn template_hook_substitutes_snippet_and_chunk() {
        let hook = TemplateHook::new("track({}, '{chunk}')".to_string()).unwrap();
        let args = RouteComponentArgs {
            page_js_file: "../A".to_string(),
            import_path: "../A".to_string(),
            webpack_chunk_name: "pages__A".to_string(),
            config: ServiceConfig::default(),
        };

        let modified = hook
            .modify_route_component("dynamic(A, {})".to_string(), &args)
            .unwrap();

        assert_eq!(modified, "track(dynamic(A, {}), 'pages__A')");
    }

    #[test]
    fn reads_yaml_routes() {
        let temp = tempdir().unwrap();
        let routes_path = temp.path().join("routes.yml");
        fs::write(
            &routes_path,
            "- path: /\n  component: ./layouts/index\n  routes:\n    - path: /a\n      component: ./pages/a\n      exact: true\n",
        )
        .unwrap();

        let routes = read_routes(&routes_path).unwrap();

        assert_eq!(routes.len(), 1);
        let children = routes[0].routes.as_ref().unwrap();
        assert_eq!(children[0].path.as_deref(), Some("/a"));
        assert_eq!(children[0].extra.get("exact"), Some(&json!(true)));
    }

    #[test]
    fn builds_routes_into_output_file() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("routegen.toml");
        let routes_path = temp.path().join("routes.json");
        let output_path = temp.path().join("routes.out.json");

        fs::write(
            &config_path,
            "[paths]\ncwd = '/app'\n\n[react]\ndynamic_import = true\n\n[hooks]\nmodify_route_component = \"track({}, '{chunk}')\"\n",
        )
        .unwrap();
        fs::write(
            &routes_path,
            r#"[{ "path": "/users", "component": "./src/pages/users" }, { "Route": "./routes/Auth" }]"#,
        )
        .unwrap();

        run(
            &config_path,
            BuildArgs {
                routes: routes_path,
                env: "production".to_string(),
                output: Some(output_path.clone()),
                pretty: false,
                requested: None,
            },
        )
        .unwrap();

        let output: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(
            output,
            json!([
                {
                    "path": "/users",
                    "component": "track(dynamic(() => import(/* webpackChunkName: ^pages__users^ */'../users'), {}), 'pages__users')"
                },
                { "Route": "require('/app/routes/Auth').default" }
            ])
        );
    }

    #[test]
    fn development_build_uses_placeholders() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("routegen.toml");
        let routes_path = temp.path().join("routes.json");
        let output_path = temp.path().join("out.json");

        fs::write(
            &config_path,
            "[paths]\ncwd = '/app'\nabs_compiling_component_path = 'tools/Compiling'\n",
        )
        .unwrap();
        fs::write(
            &routes_path,
            r#"[{ "path": "/a", "component": "./src/pages/a" }, { "path": "/b", "component": "./src/pages/b" }]"#,
        )
        .unwrap();

        run(
            &config_path,
            BuildArgs {
                routes: routes_path,
                env: "development".to_string(),
                output: Some(output_path.clone()),
                pretty: true,
                requested: Some(vec!["/a".to_string()]),
            },
        )
        .unwrap();

        let output: Value = serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(
            output,
            json!([
                { "path": "/a", "component": "require('../a').default" },
                {
                    "path": "/b",
                    "component": "() => React.createElement(require('/app/tools/Compiling').default, { route: '/b' })"
                }
            ])
        );
    }
}
