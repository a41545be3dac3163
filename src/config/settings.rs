use crate::utils::error::{CliError, Result};
use std::path::{Path, PathBuf};
use std::{env, fmt};

pub const DEFAULT_BASE_URL: &str = "https://api.sideko.dev/v1";

/// Persistent configuration keys, stored as environment variables and in the
/// dotenv-format config file
#[derive(Debug, Clone, Copy)]
pub enum ConfigKey {
    ApiKey,
    BaseUrl,
    ConfigPath,
}

impl ConfigKey {
    pub fn get_env(&self) -> Option<String> {
        env::var(self.to_string()).ok()
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let env_var = match self {
            ConfigKey::ApiKey => "SIDEKO_API_KEY",
            ConfigKey::BaseUrl => "SIDEKO_BASE_URL",
            ConfigKey::ConfigPath => "SIDEKO_CONFIG_PATH",
        };
        write!(f, "{env_var}")
    }
}

/// Loads the config file into the process environment, if it exists
pub fn load() -> Result<()> {
    let cfg_path = config_path()?;
    if cfg_path.exists() {
        dotenvy::from_path(&cfg_path).map_err(|e| {
            CliError::config(format!(
                "Failed loading sideko config {}: {e}",
                cfg_path.display()
            ))
        })?;
        tracing::debug!("Loaded config: {}", cfg_path.display());
    }
    Ok(())
}

pub fn get_api_key() -> Option<String> {
    ConfigKey::ApiKey.get_env()
}

/// Base URL from the environment, defaulting to production
pub fn get_base_url() -> String {
    let url = ConfigKey::BaseUrl
        .get_env()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    if !url.ends_with("/v1") {
        tracing::warn!("Sideko API base url does not end with `/v1`, this is probably wrong");
    }

    url
}

/// `$SIDEKO_CONFIG_PATH`, defaulting to `$HOME/.sideko`
pub fn config_path() -> Result<PathBuf> {
    if let Some(p) = ConfigKey::ConfigPath.get_env() {
        return Ok(PathBuf::from(p));
    }

    let home = env::var("HOME").map_err(|_| {
        CliError::config("Unable to build default config path: $HOME is not set")
    })?;
    Ok(Path::new(&home).join(".sideko"))
}

/// Persists the API key by rewriting or appending its line in the config file
pub fn store_api_key(api_key: &str) -> Result<PathBuf> {
    let cfg_path = config_path()?;
    set_key_in_file(&cfg_path, ConfigKey::ApiKey, api_key)?;
    Ok(cfg_path)
}

/// Updates the dotenv file by replacing an existing entry for the key or
/// appending a new line
pub(crate) fn set_key_in_file(cfg_path: &Path, key: ConfigKey, value: &str) -> Result<()> {
    let sh_safe = shlex::try_quote(value)
        .map(String::from)
        .unwrap_or_else(|_| value.to_string());
    let entry = format!("{key}={sh_safe}");

    let current: Vec<String> = if cfg_path.exists() {
        let dotenv_string = std::fs::read_to_string(cfg_path).map_err(|e| {
            CliError::config(format!(
                "Failed loading sideko config file to update {key}: {e}"
            ))
        })?;
        dotenv_string.split('\n').map(String::from).collect()
    } else {
        vec![]
    };

    let mut replaced = false;
    let mut updated: Vec<String> = current
        .into_iter()
        .map(|line| {
            if line.starts_with(&format!("{key}=")) {
                replaced = true;
                entry.clone()
            } else {
                line
            }
        })
        .collect();

    if !replaced {
        updated.push(entry);
    }

    std::fs::write(cfg_path, updated.join("\n")).map_err(|e| {
        CliError::config(format!("Failed updating sideko config {key}: {e}"))
    })?;

    tracing::debug!("Set config {key}: {}", cfg_path.display());
    Ok(())
}
