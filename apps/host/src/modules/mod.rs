//! Sample subsystem modules. Each exposes `declared_types`, the table its manifest names.

pub mod business;
pub mod data;
pub mod domain;
pub mod integration;
