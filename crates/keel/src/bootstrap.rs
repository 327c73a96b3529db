use crate::error::{BootstrapError, BootstrapErrorExt};
use keel_container::{Container, Registrar, aggregate_profiles};
use keel_discovery::{ModuleCatalog, ModuleLocator, select_all};
use keel_kernel::domain::config::{KeelConfig, SubsystemConfig};
use keel_kernel::domain::mapping::Mapper;
use keel_kernel::domain::registry::ModuleDescriptor;
use tracing::info;

/// The frozen result of startup: service bindings plus the object mapper.
///
/// Both halves are immutable and cheap to clone; pass the composition (or either half)
/// to whatever needs it.
#[derive(Debug, Clone)]
pub struct Composition {
    container: Container,
    mapper: Mapper,
}

impl Composition {
    #[must_use]
    pub const fn container(&self) -> &Container {
        &self.container
    }

    #[must_use]
    pub const fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    #[must_use]
    pub fn into_parts(self) -> (Container, Mapper) {
        (self.container, self.mapper)
    }
}

/// Discovers modules as configured and composes them.
///
/// # Errors
/// Returns [`BootstrapError::Discovery`] when the base directory cannot be scanned, a module
/// file is malformed or unknown, or a required subsystem is missing or ambiguous.
pub fn bootstrap(config: &KeelConfig, catalog: &ModuleCatalog) -> Result<Composition, BootstrapError> {
    let locator = ModuleLocator::from_config(&config.discovery).context("Resolving module directory")?;
    let modules = locator.locate(catalog).context("Locating modules")?;
    compose(&modules, &config.discovery.subsystems)
}

/// Composes already located modules.
///
/// Mapping profiles are collected from every module. Services are registered only from the
/// required subsystems, in the given order, so a later subsystem shadows an earlier one.
/// All subsystems are resolved before anything is registered.
///
/// # Errors
/// Returns [`BootstrapError::Discovery`] when a subsystem is missing or ambiguous, and
/// [`BootstrapError::Internal`] when no subsystems are configured.
pub fn compose(
    modules: &[ModuleDescriptor],
    subsystems: &[SubsystemConfig],
) -> Result<Composition, BootstrapError> {
    if subsystems.is_empty() {
        return Err("No required subsystems configured".into());
    }

    let mapper = aggregate_profiles(modules);
    let selected = select_all(modules, subsystems).context("Selecting subsystems")?;

    let mut registrar = Registrar::new();
    for (subsystem, module) in subsystems.iter().zip(selected) {
        let registered = registrar.register_module(module);
        info!(subsystem = %subsystem.name, module = module.name(), registered, "Subsystem scanned");
    }

    let container = registrar.build();
    Ok(Composition { container, mapper })
}
