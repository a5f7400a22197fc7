use crate::error::{Result, ScoringError};
use crate::types::config::ScoringConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "golf.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".golf/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/golf-scoring/config.toml";

/// Load config for the event stored in `event_dir`.
///
/// Returns `None` when the directory has no `golf.toml`; the global and
/// local layers only apply on top of it.
pub fn load_config(event_dir: &Path) -> Result<Option<ScoringConfig>> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(event_dir, global.as_deref())
}

pub(crate) fn load_config_with_global(
    event_dir: &Path,
    global_path: Option<&Path>,
) -> Result<Option<ScoringConfig>> {
    let event_path = event_dir.join(DEFAULT_CONFIG_FILE);
    if !event_path.exists() {
        return Ok(None);
    }

    let mut merged = Value::Table(Map::new());
    if let Some(path) = global_path {
        merge_file_if_exists(&mut merged, path)?;
    }
    merge_file_if_exists(&mut merged, &event_path)?;
    merge_file_if_exists(&mut merged, &event_dir.join(DEFAULT_LOCAL_FILE))?;

    let cfg: ScoringConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| ScoringError::ConfigParse(e.to_string()))?;
    cfg.validate()?;
    tracing::debug!(path = %event_path.display(), "config loaded");
    Ok(Some(cfg))
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(())
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| ScoringError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}
