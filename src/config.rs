use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_BASE: &str = "EUR";
pub const DEFAULT_REFERENCE: &str = "CAD,USD";

const FIXER_KEY: &str = "FIXER_KEY";
const FIXER_URL: &str = "FIXER_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct FixerConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub fixer: FixerConfig,
    pub base: String,
    /// Comma-joined currency codes, passed to the provider as is.
    pub reference: String,
}

impl AppConfig {
    /// Resolves provider settings from the process environment, falling back
    /// to the values of `env_file`. The file must exist.
    pub fn load<P: AsRef<Path>>(env_file: P, base: &str, reference: &str) -> Result<Self> {
        Self::load_with_env(env_file, |name| std::env::var(name).ok(), base, reference)
    }

    /// Same as [`AppConfig::load`] with `env` standing in for the process
    /// environment.
    pub fn load_with_env<P, F>(env_file: P, env: F, base: &str, reference: &str) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = env_file.as_ref();
        let file_vars = load_env_file(path)?;
        Self::from_lookup(
            |name| env(name).or_else(|| file_vars.get(name).cloned()),
            base,
            reference,
        )
        .with_context(|| {
            format!(
                "Failed to resolve provider settings from the environment or {}",
                path.display()
            )
        })
    }

    pub fn from_lookup<F>(lookup: F, base: &str, reference: &str) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name).ok_or_else(|| anyhow!("Environment variable {name} is not set"))
        };

        let config = AppConfig {
            fixer: FixerConfig {
                api_key: require(FIXER_KEY)?,
                base_url: require(FIXER_URL)?,
            },
            base: base.to_string(),
            reference: reference.to_string(),
        };
        debug!(
            base = %config.base,
            reference = %config.reference,
            url = %config.fixer.base_url,
            "Loaded config"
        );
        Ok(config)
    }
}

pub fn load_env_file<P: AsRef<Path>>(path: P) -> Result<HashMap<String, String>> {
    let path = path.as_ref();
    let vars = dotenvy::from_path_iter(path)
        .with_context(|| format!("Failed to read env file: {}", path.display()))?
        .collect::<Result<HashMap<_, _>, _>>()
        .with_context(|| format!("Failed to parse env file: {}", path.display()))?;
    debug!("Loaded {} variables from {}", vars.len(), path.display());
    Ok(vars)
}
