use crate::error::DiscoveryError;
use keel_kernel::domain::config::SubsystemConfig;
use keel_kernel::domain::registry::ModuleDescriptor;
use std::borrow::Cow;
use tracing::debug;

/// Picks the single module whose lowercase file name contains the subsystem's pattern.
///
/// # Errors
/// [`DiscoveryError::MissingSubsystem`] when nothing matches and
/// [`DiscoveryError::AmbiguousSubsystem`] when more than one module does.
pub fn select<'a>(
    modules: &'a [ModuleDescriptor],
    subsystem: &SubsystemConfig,
) -> Result<&'a ModuleDescriptor, DiscoveryError> {
    let pattern = subsystem.pattern.to_lowercase();
    let matches: Vec<&ModuleDescriptor> = modules
        .iter()
        .filter(|module| {
            module.file_name().is_some_and(|name| name.to_lowercase().contains(&pattern))
        })
        .collect();

    match matches.as_slice() {
        [module] => {
            debug!(subsystem = %subsystem.name, module = module.name(), "Subsystem selected");
            Ok(*module)
        },
        [] => Err(DiscoveryError::MissingSubsystem {
            subsystem: Cow::Owned(subsystem.name.clone()),
            pattern: Cow::Owned(subsystem.pattern.clone()),
            context: None,
        }),
        several => Err(DiscoveryError::AmbiguousSubsystem {
            subsystem: Cow::Owned(subsystem.name.clone()),
            candidates: Cow::Owned(
                several.iter().filter_map(|module| module.file_name()).collect::<Vec<_>>().join(", "),
            ),
            context: None,
        }),
    }
}

/// Selects every subsystem, in order. Fails on the first one that is missing or ambiguous,
/// so nothing is registered unless all of them resolve.
///
/// # Errors
/// See [`select`].
pub fn select_all<'a>(
    modules: &'a [ModuleDescriptor],
    subsystems: &[SubsystemConfig],
) -> Result<Vec<&'a ModuleDescriptor>, DiscoveryError> {
    subsystems.iter().map(|subsystem| select(modules, subsystem)).collect()
}
