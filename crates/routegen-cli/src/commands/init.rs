//! Write a starter config file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'routegen build --routes <FILE>' to serialize a route tree.");

    Ok(())
}

pub(crate) const DEFAULT_CONFIG: &str = r#"# routegen configuration

[paths]
# Project root; relative paths below are resolved against it
cwd = "."

# Source root, used for chunk names and the loading component
abs_src_path = "src"

# Directory of the generated router entry file
tmp_dir_path = "src/pages/.umi"

# Placeholder component for pages compiled on demand
# abs_compiling_component_path = "node_modules/umi/lib/Compiling"

[react]
# Code-split route components in production builds
dynamic_import = false

# Component shown while a chunk loads (relative to abs_src_path)
# loading_component = "./components/PageLoading"

[export_static]
# Route paths carry an optional .html suffix
html_suffix = false

[hooks]
# Rewrites every dynamic import; {} is the generated snippet, {chunk} its chunk name
# modify_route_component = "withTracking({}, '{chunk}')"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_default_config() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("routegen.toml");

        run(&config_path, false).unwrap();

        assert_eq!(fs::read_to_string(&config_path).unwrap(), DEFAULT_CONFIG);
    }

    #[test]
    fn keeps_existing_config_without_yes() {
        let temp = tempdir().unwrap();
        let config_path = temp.path().join("routegen.toml");
        fs::write(&config_path, "# mine").unwrap();

        run(&config_path, false).unwrap();
        assert_eq!(fs::read_to_string(&config_path).unwrap(), "# mine");

        run(&config_path, true).unwrap();
        assert_eq!(fs::read_to_string(&config_path).unwrap(), DEFAULT_CONFIG);
    }
}
