//! Generator configuration for attrgen
//!
//! Settings live in an optional TOML file (`attrgen.toml`), which sits
//! alongside the design by default. Every field has a default, so an empty
//! file and no file at all behave the same.
//!
//! ```toml
//! runtime_path = "crate::runtime"
//! private_suffix = "Raw"
//! header = "Cellar API types"
//! derive_serde = false
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up next to a design when no config path is given.
pub const CONFIG_FILE_NAME: &str = "attrgen.toml";

/// Settings that shape generated code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path of the runtime module called by generated code
    pub runtime_path: String,
    /// Suffix of private struct names (`Bottle` → `BottlePrivate`)
    pub private_suffix: String,
    /// Suffix of view struct names (`Bottle` + `tiny` → `BottleTinyView`)
    pub view_suffix: String,
    /// Extra comment line below the generated-code marker
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    /// Whether generated structs derive `Serialize`/`Deserialize`
    pub derive_serde: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            runtime_path: "attrgen::runtime".to_string(),
            private_suffix: "Private".to_string(),
            view_suffix: "View".to_string(),
            header: None,
            derive_serde: true,
        }
    }
}

impl GeneratorConfig {
    /// Apply `ATTRGEN_RUNTIME_PATH`, `ATTRGEN_PRIVATE_SUFFIX` and
    /// `ATTRGEN_VIEW_SUFFIX` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values are
    /// ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(path) = get("ATTRGEN_RUNTIME_PATH") {
            self.runtime_path = path;
        }
        if let Some(suffix) = get("ATTRGEN_PRIVATE_SUFFIX") {
            self.private_suffix = suffix;
        }
        if let Some(suffix) = get("ATTRGEN_VIEW_SUFFIX") {
            self.view_suffix = suffix;
        }
    }
}

/// Load generator configuration from a TOML file
///
/// # Returns
///
/// Returns `Ok(Some(config))` if the file exists and parses successfully,
/// `Ok(None)` if it doesn't exist (not an error),
/// `Err` if it exists but fails to parse.
pub fn load_config(config_path: &Path) -> anyhow::Result<Option<GeneratorConfig>> {
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

    let config: GeneratorConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config: {}", config_path.display()))?;

    Ok(Some(config))
}

/// Looks for `attrgen.toml` in the same directory as the design.
pub fn auto_detect_config_path(design_path: &Path) -> Option<PathBuf> {
    let config_path = design_path.parent()?.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Resolve the config path
///
/// Priority:
/// 1. Explicitly provided path (via CLI)
/// 2. Auto-detected alongside the design
/// 3. None (defaults)
pub fn resolve_config_path(explicit_path: Option<&Path>, design_path: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    auto_detect_config_path(design_path)
}

/// Resolve, load and apply environment overrides in one step.
///
/// An explicit path that does not exist is an error; a missing auto-detected
/// file is not.
pub fn load_effective_config(
    explicit_path: Option<&Path>,
    design_path: &Path,
) -> anyhow::Result<GeneratorConfig> {
    let mut config = match resolve_config_path(explicit_path, design_path) {
        Some(path) => match load_config(&path)? {
            Some(config) => config,
            None if explicit_path.is_some() => {
                anyhow::bail!("Config file not found: {}", path.display())
            }
            None => GeneratorConfig::default(),
        },
        None => GeneratorConfig::default(),
    };
    config.apply_env();
    Ok(config)
}
