#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the composition root.
//! This crate provides attribute macros that replace runtime type scanning with
//! compiled declarations, plus the error-enum attribute used by every crate.
//!
//! ## Usage
//! Consumers of [`service`] and [`profile`] must depend on `keel-kernel` directly,
//! because the generated code refers to `::keel_kernel::domain::registry`.
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Declares a type as a registrable service of its module.
///
/// Generates an implementation of `keel_kernel::domain::registry::Declare`
/// whose `CandidateType` carries the listed capabilities, keys and constructor.
///
/// # Arguments
///
/// * `implements(dyn A, dyn B, ...)` - Capabilities in declaration order. Only the first is bound.
/// * `key = <expr>` - A binding key. Repeat for several keys; unsuffixed integer literals are `i64`.
/// * `constructor = path` - Zero-argument constructor. Defaults to `Default::default`.
/// * `name = "a::b::Type"` - Overrides the fully-qualified name.
/// * `global` - Places the type in the global namespace (opts it out of registration).
///
/// # Errors
///
/// Emits a compile-time error for generic types and for unknown arguments.
///
/// # Example
///
/// ```rust,ignore
/// #[keel::service(implements(dyn QuoteEngine), key = "domestic", key = 2)]
/// #[derive(Default)]
/// pub struct DomesticQuoteEngine;
/// ```
#[proc_macro_attribute]
pub fn service(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::declare::expand_service(args.into(), input).into()
}

/// Declares a type as a mapping profile of its module.
///
/// The type must implement `MappingProfile`; it is constructed with `Default::default`
/// unless `constructor = path` is given. Generic types are rejected.
///
/// # Example
///
/// ```rust,ignore
/// #[keel::profile]
/// #[derive(Default)]
/// pub struct FareProfile;
///
/// impl MappingProfile for FareProfile {
///     fn configure(&self, config: &mut MapperConfiguration) {
///         config.create_map(|fare: &Fare| FareView::from(fare));
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn profile(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::declare::expand_profile(args.into(), input).into()
}

/// Attribute macro for defining crate error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `Debug` and `thiserror::Error` unless already derived.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants made of exactly a `source`
///   (or `#[source]`) field and a `context` field, enabling the `?` operator.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal` variant exists.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a source must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[keel_derive::keel_error]
/// pub enum DiscoveryError {
///     #[error("I/O error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal discovery error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &Path) -> Result<String, DiscoveryError> {
///     std::fs::read_to_string(path).context("Reading module manifest")
/// }
/// ```
#[proc_macro_attribute]
pub fn keel_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
