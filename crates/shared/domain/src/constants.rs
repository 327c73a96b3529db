//! Discovery conventions shared by the locator, the configuration defaults and the host.

/// Substring every module file name must contain to be considered at all.
pub const DEFAULT_PRODUCT: &str = "Keel.Flight";
/// File extension of module manifests (without the leading dot).
pub const DEFAULT_EXTENSION: &str = "module";
/// Environment prefix for configuration overrides (`KEEL__DISCOVERY__PRODUCT`).
pub const ENV_PREFIX: &str = "KEEL";
/// Default configuration file stem.
pub const DEFAULT_CONFIG_FILE: &str = "keel";

// Required subsystems, in scan order.
pub const DOMAIN_SERVICES: &str = "domain-services";
pub const BUSINESS: &str = "business";
pub const INTEGRATION: &str = "integration";
pub const DATA_ACCESS: &str = "data-access";

// Lowercase file-name patterns selecting each subsystem. All but domain-services are anchored
// to the file ending, so companions like `Biz.Contracts.module` do not match.
pub const DOMAIN_SERVICES_PATTERN: &str = "dsf.core";
pub const BUSINESS_PATTERN: &str = "biz.module";
pub const INTEGRATION_PATTERN: &str = "integration.module";
pub const DATA_ACCESS_PATTERN: &str = "dal.module";
