//! # Domain Models
//!
//! This crate contains the pure types of the composition root with a single dependency (`serde`).
//! Keep it lean: no I/O, no discovery, no container logic. Just data and simple helpers.

pub mod config;
pub mod constants;
pub mod mapping;
pub mod registry;
