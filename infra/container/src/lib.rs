//! # Container
//!
//! Turns declared types into singleton bindings:
//!
//! 1. [`classify`] decides whether a [`CandidateType`](keel_kernel::domain::registry::CandidateType)
//!    is a service and under which keys.
//! 2. [`Registrar`] accumulates the resulting registrations across modules.
//! 3. [`Registrar::build`] consumes the registrar and freezes a [`Container`] with one eagerly
//!    constructed instance per `(capability, key)` slot. Later registrations win.
//!
//! ```rust,ignore
//! let mut registrar = Registrar::new();
//! registrar.register_module(&module);
//! let container = registrar.build();
//!
//! let engine = container.find::<dyn QuoteEngine>();
//! let cached = container.find_by_key::<dyn FareCache>("domestic");
//! ```
//!
//! Mapping profiles take a separate route through [`aggregate_profiles`].

mod classifier;
mod container;
mod mapping;
mod registrar;

pub use classifier::{Classification, Ineligibility, classify, registrations};
pub use container::{BindingInfo, Container};
pub use mapping::aggregate_profiles;
pub use registrar::Registrar;
