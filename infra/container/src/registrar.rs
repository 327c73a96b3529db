use crate::classifier::{Classification, classify};
use crate::container::{Binding, Container};
use fxhash::FxHashMap;
use keel_kernel::domain::registry::{
    BindingSlot, CandidateType, ModuleDescriptor, Registration,
};
use tracing::{debug, info, trace, warn};

/// Build-time registration list, shared by every scanned module.
///
/// Append-only. [`Registrar::build`] consumes it, so nothing can be registered
/// after the container exists and a container can only be built once.
#[derive(Debug, Default)]
pub struct Registrar {
    registrations: Vec<Registration>,
}

impl Registrar {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Classifies a declared type and records its registrations.
    /// Returns how many registrations were recorded.
    pub fn register_type(&mut self, candidate: &CandidateType) -> usize {
        let classification = classify(candidate);
        if let Classification::Ineligible(reason) = &classification {
            trace!(type_name = candidate.name(), %reason, "Skipping declared type");
            return 0;
        }

        let produced = classification.into_registrations(candidate);
        for registration in &produced {
            debug!(
                type_name = registration.type_name(),
                capability = %registration.capability(),
                key = ?registration.key(),
                "Registering service"
            );
        }

        let count = produced.len();
        self.registrations.extend(produced);
        count
    }

    /// Registers every declared type of `module`, in declaration order.
    pub fn register_module(&mut self, module: &ModuleDescriptor) -> usize {
        let count = module.types().iter().map(|candidate| self.register_type(candidate)).sum();
        info!(module = module.name(), origin = %module.origin().display(), registrations = count, "Module scanned");
        count
    }

    #[must_use]
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Freezes the registrations into a [`Container`].
    ///
    /// Registrations are folded in order, so a later one replaces an earlier one in the same
    /// `(capability, key)` slot. Survivors are then constructed eagerly, once each, in the
    /// order their slots were first registered.
    #[must_use]
    pub fn build(self) -> Container {
        let mut order: Vec<BindingSlot> = Vec::new();
        let mut surviving: FxHashMap<BindingSlot, Registration> = FxHashMap::default();
        for registration in self.registrations {
            let slot = registration.slot();
            if !surviving.contains_key(&slot) {
                order.push(slot.clone());
            }
            if let Some(shadowed) = surviving.insert(slot, registration) {
                debug!(
                    capability = %shadowed.capability(),
                    key = ?shadowed.key(),
                    shadowed = shadowed.type_name(),
                    "Registration replaced by a later one"
                );
            }
        }

        let mut bindings = FxHashMap::default();
        for slot in order {
            let Some(registration) = surviving.remove(&slot) else {
                continue;
            };
            let Some(instance) = registration.activate() else {
                warn!(
                    type_name = registration.type_name(),
                    capability = %slot.capability,
                    "Constructed instance does not match its capability, skipping"
                );
                continue;
            };
            bindings.insert(slot, Binding::new(registration.type_name(), instance));
        }

        info!(bindings = bindings.len(), "Container built");
        Container::new(bindings)
    }
}
