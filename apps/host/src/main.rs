use anyhow::Context;
use chrono::NaiveDateTime;
use keel::domain::config::KeelConfig;
use keel_kernel::config::load_config;
use keel_kernel::convert::{convert_by_type, convert_type};
use keel_kernel::interface;
use keel_logger::Logger;
use std::path::PathBuf;
use tracing::{info, warn};

/// Usage: `keel-host [config] [passengers] [departure]`
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let passengers = args.next().map_or(1, |raw| convert_type(raw, 1_u32));
    let departure = args.next().and_then(convert_by_type::<NaiveDateTime>);

    let (config, config_error) = match load_config::<KeelConfig>(config_path.as_deref()) {
        Ok(mut config) => {
            if let Some(path) = &config_path {
                keel_host::anchor_paths(&mut config, path);
            }
            (config, None)
        },
        Err(error) => (KeelConfig::default(), Some(error)),
    };

    let _log = Logger::builder()
        .name(env!("CARGO_PKG_NAME"))
        .configure(&config.logging)
        .context("Critical: logging configuration is invalid")?
        .init()?;

    if let Some(error) = config_error {
        warn!(%error, "Configuration not loaded, using defaults");
    }

    if let Some(path) = &config.interface.path {
        let urls = interface::configure(path).context("Critical: interface configuration is unreadable")?;
        info!(count = urls.len(), "Interface URLs configured");
    }

    let composition =
        keel::bootstrap(&config, &keel_host::catalog()).context("Critical: composition root failed")?;

    let booking = keel_host::book_sample_flight(&composition, passengers, departure)?;
    info!(id = booking.id, total_cents = booking.quote.total_cents, "Done");

    Ok(())
}
