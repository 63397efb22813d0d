//! Configuration loading facade.

use std::path::{Path, PathBuf};

use config::ConfigError;
use config::File;
use tracing::debug;

use super::merge::builder_with_defaults;
use super::sources::{add_global, add_workspace, xdg_config_path};
use super::BaizeConfig;

/// Layered configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the given workspace root.
    ///
    /// Layer order (lowest to highest): defaults, global XDG file,
    /// workspace files.
    pub fn load(workspace_root: &Path) -> Result<BaizeConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = add_global(builder, None);
        let builder = add_workspace(builder, workspace_root)?;

        let merged = builder.build()?;
        let config: BaizeConfig = merged.try_deserialize()?;
        debug!("Configuration loaded for {:?}", workspace_root);
        Ok(config)
    }

    /// Load configuration from a single explicit file, skipping the
    /// layered sources.
    pub fn load_from_file(path: &Path) -> Result<BaizeConfig, ConfigError> {
        let merged = builder_with_defaults()?
            .add_source(File::from(PathBuf::from(path)).required(true))
            .build()?;
        merged.try_deserialize()
    }

    /// Path of the global config file, when a home directory exists.
    pub fn global_config_path() -> Option<PathBuf> {
        xdg_config_path()
    }
}
