//! # Discovery
//!
//! Locates the application's modules at startup.
//!
//! A module is a small TOML manifest on disk (`module = "<name>"`) sitting next to the
//! executable. The name is resolved against a compiled [`ModuleCatalog`], which yields the
//! module's declared types. Files are filtered by a product-name substring and an extension:
//!
//! ```text
//! <exe dir>/
//!   Keel.Flight.Dsf.Core.module   module = "flight.domain"
//!   Keel.Flight.Biz.module        module = "flight.business"
//!   Keel.Flight.Integration.module
//!   Keel.Flight.Dal.module
//! ```
//!
//! Every failure is fatal: an unreadable directory, a malformed manifest or an unknown
//! module name all abort discovery with a [`DiscoveryError`].

mod catalog;
mod error;
mod locator;
mod manifest;
mod subsystem;

pub use catalog::{ModuleCatalog, ModuleTable};
pub use error::{DiscoveryError, DiscoveryErrorExt};
pub use locator::{ModuleLocator, load_module};
pub use manifest::ModuleManifest;
pub use subsystem::{select, select_all};
