//! Config file sources: global XDG file and workspace files.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

/// Path of the global config file: `~/.config/baize/config.toml`.
pub fn xdg_config_path() -> Option<PathBuf> {
    let base = directories::BaseDirs::new()?;
    Some(base.home_dir().join(".config").join("baize").join("config.toml"))
}

/// Add the global XDG config file to the builder, if present.
pub fn add_global(
    builder: ConfigBuilder<DefaultState>,
    path: Option<&Path>,
) -> ConfigBuilder<DefaultState> {
    let resolved = path.map(PathBuf::from).or_else(xdg_config_path);
    match resolved {
        Some(p) if p.exists() => {
            builder.add_source(File::from(p).required(false))
        }
        _ => builder,
    }
}

/// Add workspace config files to the builder.
/// Precedence: config/config.toml (base) then config/{BAIZE_ENV}.toml.
pub fn add_workspace(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_dir = workspace_root.join("config");
    let env_name = std::env::var("BAIZE_ENV").unwrap_or_else(|_| "development".to_string());

    let mut builder = builder;

    let base_config_path = config_dir.join("config.toml");
    if base_config_path.exists() {
        builder = builder.add_source(File::from(base_config_path).required(false));
    }

    let env_config_path = config_dir.join(format!("{}.toml", env_name));
    if env_config_path.exists() {
        builder = builder.add_source(File::from(env_config_path).required(false));
    }

    Ok(builder)
}
