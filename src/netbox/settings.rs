//! Connection settings resolution from multiple sources

use log::debug;
use reqwest::Url;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{defaults, env};
use crate::error::{NbError, Result};

/// Immutable connection settings, loaded once per invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub token: String,
    pub timeout: Duration,
    pub insecure: bool,
}

impl Settings {
    /// Token with everything but the last four characters masked
    pub fn masked_token(&self) -> Option<String> {
        mask_token(&self.token)
    }
}

/// Values passed on the command line, which win over every other source
#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsOverrides {
    pub timeout: Option<f64>,
    pub insecure: bool,
}

/// Settings resolution with fallback logic
pub struct SettingsResolver {
    env_file: Option<PathBuf>,
}

impl SettingsResolver {
    /// Create a resolver; `env_file` is an explicit dotenv path (`--env-file`)
    pub fn new(env_file: Option<&Path>) -> Self {
        Self {
            env_file: env_file.map(Path::to_path_buf),
        }
    }

    /// Resolve settings, each key checked in order:
    /// 1. CLI flag (timeout and insecure only)
    /// 2. Process environment variable
    /// 3. Dotenv file (explicit path, ./.env, or <config dir>/nbcli/.env)
    /// 4. Built-in default (timeout and insecure only)
    pub fn resolve(&self, overrides: SettingsOverrides) -> Result<Settings> {
        let file_vars = self.read_env_file()?;
        resolve_from(|key| std::env::var(key).ok(), &file_vars, overrides)
    }

    fn read_env_file(&self) -> Result<HashMap<String, String>> {
        let path = match &self.env_file {
            Some(path) => {
                if !path.is_file() {
                    return Err(NbError::Config(format!(
                        "Env file {} not found",
                        path.display()
                    )));
                }
                path.clone()
            }
            None => match Self::default_env_file() {
                Some(path) => path,
                None => {
                    debug!("No {} file found, using environment only", env::FILE_NAME);
                    return Ok(HashMap::new());
                }
            },
        };

        debug!("Reading settings from {}", path.display());
        parse_env_file(&path)
    }

    /// First existing default dotenv file
    fn default_env_file() -> Option<PathBuf> {
        let local = PathBuf::from(env::FILE_NAME);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|p| p.join(env::CONFIG_DIR_NAME).join(env::FILE_NAME))
            .filter(|p| p.is_file())
    }
}

/// Parse a dotenv file into a map without touching the process environment
pub fn parse_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| {
        NbError::Config(format!("Could not read {}: {}", path.display(), e))
    })?;

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| {
            NbError::Config(format!("Could not parse {}: {}", path.display(), e))
        })?;
        vars.insert(key, value);
    }
    Ok(vars)
}

/// Merge the sources into validated settings
pub fn resolve_from<F>(
    env_lookup: F,
    file_vars: &HashMap<String, String>,
    overrides: SettingsOverrides,
) -> Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| -> Option<String> {
        let present = |v: &String| !v.trim().is_empty();
        env_lookup(key)
            .filter(present)
            .or_else(|| file_vars.get(key).cloned().filter(present))
    };

    let (base_url, token) = match (lookup(env::URL), lookup(env::TOKEN)) {
        (Some(url), Some(token)) => (url.trim().to_string(), token.trim().to_string()),
        _ => {
            return Err(NbError::Config(format!(
                "Missing {} or {} in {}",
                env::URL,
                env::TOKEN,
                env::FILE_NAME
            )))
        }
    };
    validate_base_url(&base_url)?;

    let timeout_secs = match overrides.timeout {
        Some(secs) => secs,
        None => match lookup(env::TIMEOUT) {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                NbError::Config(format!("{} must be a number, got '{}'", env::TIMEOUT, raw))
            })?,
            None => defaults::TIMEOUT_SECS,
        },
    };
    let timeout = Duration::try_from_secs_f64(timeout_secs)
        .ok()
        .filter(|d| !d.is_zero())
        .ok_or_else(|| {
            NbError::Config(format!(
                "Timeout must be a positive number of seconds, got {}",
                timeout_secs
            ))
        })?;

    let insecure = if overrides.insecure {
        true
    } else {
        match lookup(env::INSECURE) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                NbError::Config(format!("{} must be true or false, got '{}'", env::INSECURE, raw))
            })?,
            None => false,
        }
    };

    Ok(Settings {
        base_url,
        token,
        timeout,
        insecure,
    })
}

fn validate_base_url(base_url: &str) -> Result<()> {
    let url = Url::parse(base_url).map_err(|e| {
        NbError::Config(format!("{} '{}' is not a valid URL: {}", env::URL, base_url, e))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(NbError::Config(format!(
            "{} must use http or https, got '{}'",
            env::URL,
            scheme
        ))),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Keep the last four characters, mask the rest
pub fn mask_token(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return Some("*".repeat(chars.len()));
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    Some(format!("{}{}", "*".repeat(chars.len() - 4), visible))
}
