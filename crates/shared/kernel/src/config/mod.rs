use config::{Config, Environment, File};
use keel_domain::constants::{DEFAULT_CONFIG_FILE, ENV_PREFIX};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Custom error type for config loading.
#[keel_derive::keel_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a base file overlaid by environment variables.
///
/// 1. **Base File**: Loads settings from a file (e.g., `keel.toml`). Without a path it defaults to `"keel"`,
///    letting the `config` crate pick the extension.
/// 2. **Environment Overrides**: Overlays variables prefixed with `KEEL__`.
///    Nested keys use double underscores (e.g., `KEEL__DISCOVERY__PRODUCT` maps to `discovery.product`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file cannot be found, the environment is malformed,
/// or the merged content does not match `T`.
///
/// # Example
/// ```rust,ignore
/// use keel_kernel::config::load_config;
/// use keel_kernel::domain::config::KeelConfig;
///
/// let cfg: KeelConfig = load_config(Some("config/local")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(true))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        );

    info!("Loading config from {}", effective_path.display());

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
