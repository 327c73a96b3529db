use keel_kernel::domain::registry::{BindingKey, CandidateType, Capability, Registration};
use std::fmt;

/// Why a declared type produces no registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ineligibility {
    /// Declared without a namespace: the convention for opting out.
    GlobalNamespace,
    /// Implements no capability, so there is nothing to bind it to.
    NoCapabilities,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlobalNamespace => f.write_str("declared in the global namespace"),
            Self::NoCapabilities => f.write_str("implements no capability"),
        }
    }
}

/// How a declared type is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Ineligible(Ineligibility),
    /// One unkeyed registration under the first declared capability.
    Default { capability: Capability },
    /// One registration per distinct key, all under the first declared capability.
    Keyed { capability: Capability, keys: Vec<BindingKey> },
}

impl Classification {
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        !matches!(self, Self::Ineligible(_))
    }

    #[must_use]
    pub const fn capability(&self) -> Option<Capability> {
        match self {
            Self::Ineligible(_) => None,
            Self::Default { capability } | Self::Keyed { capability, .. } => Some(*capability),
        }
    }

    /// Number of registrations this classification expands to.
    #[must_use]
    pub fn registration_count(&self) -> usize {
        match self {
            Self::Ineligible(_) => 0,
            Self::Default { .. } => 1,
            Self::Keyed { keys, .. } => keys.len(),
        }
    }

    /// Expands this classification of `candidate` into its registrations.
    #[must_use]
    pub fn into_registrations(self, candidate: &CandidateType) -> Vec<Registration> {
        let Some(binding) = candidate.first_capability() else {
            return Vec::new();
        };

        match self {
            Self::Ineligible(_) => Vec::new(),
            Self::Default { .. } => vec![Registration::new(candidate, binding, None)],
            Self::Keyed { keys, .. } => keys
                .into_iter()
                .map(|key| Registration::new(candidate, binding, Some(key)))
                .collect(),
        }
    }
}

/// Classifies a declared type. The namespace check runs before the capability check.
#[must_use]
pub fn classify(candidate: &CandidateType) -> Classification {
    if candidate.namespace().is_none() {
        return Classification::Ineligible(Ineligibility::GlobalNamespace);
    }

    let Some(binding) = candidate.first_capability() else {
        return Classification::Ineligible(Ineligibility::NoCapabilities);
    };
    let capability = binding.capability();

    let keys = distinct_keys(candidate.keys());
    if keys.is_empty() {
        Classification::Default { capability }
    } else {
        Classification::Keyed { capability, keys }
    }
}

/// Expands a declared type into the registrations its classification calls for.
#[must_use]
pub fn registrations(candidate: &CandidateType) -> Vec<Registration> {
    classify(candidate).into_registrations(candidate)
}

/// Keys in first-seen order with duplicates removed.
fn distinct_keys(keys: &[BindingKey]) -> Vec<BindingKey> {
    let mut distinct: Vec<BindingKey> = Vec::with_capacity(keys.len());
    for key in keys {
        if !distinct.contains(key) {
            distinct.push(key.clone());
        }
    }
    distinct
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_kernel::domain::registry::TypeDeclaration;
    use std::sync::Arc;

    trait Ping: Send + Sync {}
    trait Pong: Send + Sync {}

    #[derive(Default)]
    struct Paddle;
    impl Ping for Paddle {}
    impl Pong for Paddle {}

    fn paddle() -> TypeDeclaration<Paddle> {
        TypeDeclaration::new(Paddle::default).named("arena::Paddle")
    }

    #[test]
    fn test_global_namespace_wins_over_missing_capabilities() {
        let candidate = paddle().named("Paddle").declare();
        assert_eq!(classify(&candidate), Classification::Ineligible(Ineligibility::GlobalNamespace));
    }

    #[test]
    fn test_explicit_global_is_ineligible() {
        let candidate =
            paddle().global().implements::<dyn Ping>(|it| it as Arc<dyn Ping>).declare();
        assert!(!classify(&candidate).is_eligible());
        assert!(registrations(&candidate).is_empty());
    }

    #[test]
    fn test_no_capabilities() {
        let classification = classify(&paddle().declare());
        assert_eq!(classification, Classification::Ineligible(Ineligibility::NoCapabilities));
        assert_eq!(classification.registration_count(), 0);
    }

    #[test]
    fn test_default_binds_first_capability() {
        let candidate = paddle()
            .implements::<dyn Pong>(|it| it as Arc<dyn Pong>)
            .implements::<dyn Ping>(|it| it as Arc<dyn Ping>)
            .declare();

        let classification = classify(&candidate);
        assert_eq!(classification, Classification::Default { capability: Capability::of::<dyn Pong>() });
        assert_eq!(classification.capability(), Some(Capability::of::<dyn Pong>()));
    }

    #[test]
    fn test_duplicate_keys_collapse_in_first_seen_order() {
        let candidate = paddle()
            .implements::<dyn Ping>(|it| it as Arc<dyn Ping>)
            .keyed("b")
            .keyed(1_i32)
            .keyed("b")
            .keyed("a")
            .declare();

        let Classification::Keyed { keys, .. } = classify(&candidate) else {
            panic!("expected keyed classification");
        };
        assert_eq!(keys, vec![BindingKey::from("b"), BindingKey::Number(1), BindingKey::from("a")]);
        assert_eq!(registrations(&candidate).len(), 3);
    }

    #[test]
    fn test_expansion_matches_classification() {
        let candidate = paddle()
            .implements::<dyn Ping>(|it| it as Arc<dyn Ping>)
            .keyed("left")
            .keyed("right")
            .declare();

        let classification = classify(&candidate);
        let count = classification.registration_count();
        let produced = classification.into_registrations(&candidate);

        assert_eq!(produced.len(), count);
        assert!(produced.iter().all(|registration| registration.capability() == Capability::of::<dyn Ping>()));
        assert_eq!(produced[1].key(), Some(&BindingKey::from("right")));
    }

    #[test]
    fn test_ineligibility_display() {
        assert_eq!(Ineligibility::NoCapabilities.to_string(), "implements no capability");
    }
}
