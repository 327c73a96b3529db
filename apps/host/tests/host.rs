use chrono::NaiveDate;
use keel::domain::config::KeelConfig;
use keel_host::models::BookingSummary;
use keel_host::modules::business::QuoteService;
use keel_host::modules::data::BookingRepository;
use keel_host::modules::domain::FareCalculator;
use keel_host::{anchor_paths, book_sample_flight, catalog};
use keel_kernel::config::load_config;
use keel_kernel::interface;
use std::path::{Path, PathBuf};

fn manifest_dir() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR"))
}

fn shipped_config() -> KeelConfig {
    let mut config = KeelConfig::default();
    config.discovery.base_dir = Some(manifest_dir().join("modules"));
    config
}

#[test]
fn shipped_modules_compose() {
    let composition = keel::bootstrap(&shipped_config(), &catalog()).expect("bootstrap");
    let container = composition.container();

    // fare calculator, two quote keys plus the numeric alias, gateway, repository
    assert_eq!(container.len(), 6);
    assert!(container.find::<dyn QuoteService>().is_none());
    assert!(container.find_by_key::<dyn QuoteService>(2_i64).is_some());
    assert_eq!(container.find::<dyn FareCalculator>().map(|f| f.total(1_000, 1)), Some(1_120));
    assert_eq!(composition.mapper().profiles().len(), 1);
}

#[test]
fn sample_booking_is_stored_and_summarised() {
    let composition = keel::bootstrap(&shipped_config(), &catalog()).expect("bootstrap");
    let departure = NaiveDate::from_ymd_opt(2026, 11, 20).and_then(|d| d.and_hms_opt(7, 5, 0));

    let booking = book_sample_flight(&composition, 3, departure).expect("booked");
    assert_eq!(booking.id, 1);
    assert_eq!(booking.quote.total_cents, 16_464);

    let repository = composition.container().find::<dyn BookingRepository>().expect("repository");
    assert_eq!(repository.find(1), Some(booking.clone()));

    let summary: BookingSummary = composition.mapper().map(&booking).expect("mapped");
    assert_eq!(summary.reference, "KEEL-000001");
    assert_eq!(summary.itinerary, "KBP -> LWO on 2026-11-20 07:05");
    assert_eq!(summary.total, "164.64");
}

#[test]
fn shipped_configuration_files_are_valid() {
    let config: KeelConfig = load_config(Some(manifest_dir().join("keel.toml"))).expect("keel.toml");
    assert_eq!(config.discovery.subsystems.len(), 4);

    let urls = interface::configure(manifest_dir().join("interface.xml")).expect("interface.xml");
    assert_eq!(urls.len(), 2);
}

#[test]
fn shipped_config_paths_follow_the_config_file() {
    let config_file = manifest_dir().join("keel.toml");
    let mut config: KeelConfig = load_config(Some(&config_file)).expect("keel.toml");
    anchor_paths(&mut config, &config_file);

    assert_eq!(config.discovery.base_dir, Some(manifest_dir().join("modules")));
    assert_eq!(config.interface.path, Some(manifest_dir().join("interface.xml")));

    let composition = keel::bootstrap(&config, &catalog()).expect("bootstrap");
    assert_eq!(composition.container().len(), 6);
}

#[test]
fn absolute_paths_are_not_anchored() {
    let mut config = KeelConfig::default();
    let absolute = std::env::temp_dir().join("keel-modules");
    config.discovery.base_dir = Some(absolute.clone());
    config.logging.directory = Some(PathBuf::from("logs"));

    anchor_paths(&mut config, Path::new("/etc/keel/keel.toml"));

    assert_eq!(config.discovery.base_dir, Some(absolute));
    assert_eq!(config.logging.directory, Some(PathBuf::from("/etc/keel/logs")));
}
