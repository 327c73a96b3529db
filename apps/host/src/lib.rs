//! # Keel Host
//!
//! Sample host for the composition root: four flight-booking subsystems
//! (domain services, business rules, integration, data access) declared with
//! `#[keel::service]`, found on disk through their module manifests and resolved
//! from the frozen container.
//!
//! ## Example
//! ```no_run
//! use keel::domain::config::KeelConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let composition = keel::bootstrap(&KeelConfig::default(), &keel_host::catalog())?;
//!     let booking = keel_host::book_sample_flight(&composition, 2, None)?;
//!     assert_eq!(booking.quote.passengers, 2);
//!     Ok(())
//! }
//! ```

pub mod models;
pub mod modules;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use keel::domain::config::KeelConfig;
use keel::{Composition, ModuleCatalog};
use models::{Booking, BookingSummary, Route};
use modules::business::QuoteService;
use modules::data::BookingRepository;
use modules::integration::AirlineGateway;
use std::path::{Path, PathBuf};
use tracing::info;

/// Catalog of every module this host knows how to load.
#[must_use]
pub fn catalog() -> ModuleCatalog {
    ModuleCatalog::new()
        .module("flight.domain", modules::domain::declared_types)
        .module("flight.business", modules::business::declared_types)
        .module("flight.integration", modules::integration::declared_types)
        .module("flight.data", modules::data::declared_types)
}

/// Resolves the relative paths of `config` against the directory holding `config_file`,
/// so the host behaves the same whatever the working directory is. Absolute paths are kept.
pub fn anchor_paths(config: &mut KeelConfig, config_file: &Path) {
    let Some(root) = config_file.parent() else {
        return;
    };

    if let Some(base_dir) = config.discovery.base_dir.as_mut() {
        anchor(base_dir, root);
    }
    if let Some(directory) = config.logging.directory.as_mut() {
        anchor(directory, root);
    }
    if let Some(path) = config.interface.path.as_mut() {
        anchor(path, root);
    }
}

fn anchor(path: &mut PathBuf, root: &Path) {
    if path.is_relative() {
        *path = root.join(&*path);
    }
}

/// Quotes, stores and confirms one domestic booking through the resolved services.
///
/// # Errors
/// Returns an error if a required service is not registered in the container.
pub fn book_sample_flight(
    composition: &Composition,
    passengers: u32,
    departure: Option<NaiveDateTime>,
) -> Result<Booking> {
    let container = composition.container();
    let quotes = container
        .find_by_key::<dyn QuoteService>("domestic")
        .context("No domestic quote service registered")?;
    let bookings =
        container.find::<dyn BookingRepository>().context("No booking repository registered")?;
    let gateway = container.find::<dyn AirlineGateway>().context("No airline gateway registered")?;

    let route = Route::new("KBP", "LWO");
    let departure = departure.unwrap_or_else(default_departure);
    let quote = quotes.quote(&route, passengers);
    let booking = bookings.save(Booking { id: 0, route, departure, quote });

    let confirmation = gateway.confirm(&booking);
    info!(carrier = gateway.carrier(), %confirmation, stored = bookings.count(), "Booking confirmed");

    if let Some(summary) = composition.mapper().map::<Booking, BookingSummary>(&booking) {
        info!(reference = %summary.reference, itinerary = %summary.itinerary, total = %summary.total, "Booking summary");
    }

    Ok(booking)
}

fn default_departure() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 12, 1)
        .and_then(|date| date.and_hms_opt(9, 30, 0))
        .unwrap_or_default()
}
