//! Facade crate for the Keel composition root.
//! Re-exports the domain, kernel, container and discovery crates and provides [`bootstrap`],
//! the single startup call that turns module files into a frozen [`Composition`].
//! Keep this crate thin: it should compose other crates, not implement registration logic.
//!
//! ## Usage
//! ```rust,ignore
//! let catalog = keel::ModuleCatalog::new()
//!     .module("flight.business", business::declared_types);
//!
//! let composition = keel::bootstrap(&config, &catalog)?;
//! let quotes = composition.container().find::<dyn QuoteEngine>();
//! ```
//!
//! Types are declared with [`service`] and [`profile`]; the generated code refers to
//! `keel_kernel`, so declaring crates depend on `keel-kernel` as well.

mod bootstrap;
mod error;

pub use bootstrap::{Composition, bootstrap, compose};
pub use error::{BootstrapError, BootstrapErrorExt};

pub use keel_container as container;
pub use keel_discovery as discovery;
pub use keel_kernel as kernel;
pub use keel_kernel::domain;

pub use keel_container::Container;
pub use keel_derive::{profile, service};
pub use keel_discovery::ModuleCatalog;
