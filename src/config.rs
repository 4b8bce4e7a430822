use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "people-seed";
const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_DATABASE: &str = "database.db";

/// Settings as written in the YAML file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub database_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Resolve settings: CLI flag, then config file, then defaults.
    pub fn load(config_path: Option<&Path>, database: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => read_file_config(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => read_file_config(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::resolve(file, database)
    }

    fn resolve(file: FileConfig, database: Option<&Path>) -> Result<Self> {
        let database_path = database
            .map(Path::to_path_buf)
            .or(file.database_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));
        let database_path = expand_path(&database_path)
            .ok_or_else(|| anyhow::anyhow!("cannot expand path {}", database_path.display()))?;
        let log_file = match file.log_file {
            Some(p) => Some(
                expand_path(&p)
                    .ok_or_else(|| anyhow::anyhow!("cannot expand path {}", p.display()))?,
            ),
            None => None,
        };
        Ok(Self {
            database_path,
            log_level: file.log_level,
            log_file,
        })
    }
}

/// `<os config dir>/people-seed/config.yaml`, if the OS exposes a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs_next::home_dir().map(|h| h.join(".config"))
    } else {
        dirs_next::config_dir()
    }?;
    Some(base.join(APP_NAME).join(CONFIG_FILE))
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    let data = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    // An empty document deserializes to unit, not a map.
    if data.iter().all(u8::is_ascii_whitespace) {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_slice(&data)
        .with_context(|| format!("failed to parse YAML at {}", path.display()))
}

/// Expand a leading `~` and `$VAR` / `%VAR%` components.
pub fn expand_path(path: &Path) -> Option<PathBuf> {
    let mut expanded_path = PathBuf::new();
    let mut path_iter = path.iter();
    if path.starts_with("~") {
        path_iter.next()?;
        expanded_path = expanded_path.join(dirs_next::home_dir()?);
    }
    for part in path_iter {
        // Non UTF-8 components cannot name a variable; keep them verbatim.
        let Some(name) = part.to_str() else {
            expanded_path.push(part);
            continue;
        };
        expanded_path = if cfg!(unix) && name.starts_with('$') {
            expanded_path.join(std::env::var(name.strip_prefix('$')?).unwrap_or_default())
        } else if cfg!(windows) && name.starts_with('%') && name.ends_with('%') {
            expanded_path
                .join(std::env::var(name.strip_prefix('%')?.strip_suffix('%')?).unwrap_or_default())
        } else {
            expanded_path.join(name)
        }
    }
    Some(expanded_path)
}
