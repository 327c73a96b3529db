use crate::constants::{
    BUSINESS, BUSINESS_PATTERN, DATA_ACCESS, DATA_ACCESS_PATTERN, DEFAULT_EXTENSION,
    DEFAULT_PRODUCT, DOMAIN_SERVICES, DOMAIN_SERVICES_PATTERN, INTEGRATION, INTEGRATION_PATTERN,
};
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration of the composition root and its host.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeelConfigInner {
    pub discovery: DiscoveryConfig,
    pub logging: LoggingConfig,
    pub interface: InterfaceConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct KeelConfig {
    #[serde(flatten, default)]
    inner: Arc<KeelConfigInner>,
}

impl Deref for KeelConfig {
    type Target = KeelConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for KeelConfig {
    fn deref_mut(&mut self) -> &mut KeelConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where modules are looked up and which of them form the required subsystems.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Directory scanned for module files. `None` means the executable's directory.
    pub base_dir: Option<PathBuf>,
    /// Substring every module file name must contain (case-sensitive).
    pub product: String,
    /// Module file extension, without the dot.
    pub extension: String,
    /// Required subsystems in scan order. Later subsystems shadow earlier ones.
    pub subsystems: Vec<SubsystemConfig>,
}

/// A required subsystem, selected by a lowercase substring of the module file name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubsystemConfig {
    pub name: String,
    pub pattern: String,
}

impl SubsystemConfig {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self { name: name.into(), pattern: pattern.into() }
    }
}

/// Logging knobs consumed by the host when it installs the subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<PathBuf>,
    pub json: bool,
    pub filter: Option<String>,
}

/// Location of the interface-URL XML document, if the host uses one.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InterfaceConfig {
    pub path: Option<PathBuf>,
}

// --- Default ---

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            product: DEFAULT_PRODUCT.to_owned(),
            extension: DEFAULT_EXTENSION.to_owned(),
            subsystems: vec![
                SubsystemConfig::new(DOMAIN_SERVICES, DOMAIN_SERVICES_PATTERN),
                SubsystemConfig::new(BUSINESS, BUSINESS_PATTERN),
                SubsystemConfig::new(INTEGRATION, INTEGRATION_PATTERN),
                SubsystemConfig::new(DATA_ACCESS, DATA_ACCESS_PATTERN),
            ],
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_owned(), directory: None, json: false, filter: None }
    }
}
