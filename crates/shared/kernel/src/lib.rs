//! Kernel utilities shared across the composition root.
//! Keep this crate lightweight; it re-exports the domain and the helpers the bootstrap and its
//! host call: layered config loading, lenient value coercion and interface-URL validation.
//!
//! ## Config loading
//! ```rust,ignore
//! use keel_kernel::config::load_config;
//! use keel_kernel::domain::config::KeelConfig;
//!
//! let cfg: KeelConfig = load_config(Some("keel")).unwrap_or_default();
//! ```
//!
//! ## Coercion
//! ```rust
//! use keel_kernel::convert::{convert_by_type, convert_type};
//!
//! assert_eq!(convert_by_type::<u16>(" 443 "), Some(443));
//! assert_eq!(convert_type("n/a", 0_i32), 0);
//! ```
pub mod config;
pub mod convert;
pub mod interface;

pub use keel_domain as domain;
