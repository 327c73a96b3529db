use fxhash::FxHashMap;
use keel_kernel::domain::registry::{BindingKey, BindingSlot, BoundInstance, Capability};
use std::fmt;
use std::sync::Arc;

pub(crate) struct Binding {
    type_name: String,
    instance: BoundInstance,
}

impl Binding {
    pub(crate) fn new(type_name: &str, instance: BoundInstance) -> Self {
        Self { type_name: type_name.to_owned(), instance }
    }
}

struct ContainerInner {
    bindings: FxHashMap<BindingSlot, Binding>,
}

/// Frozen singleton bindings. Cheap to clone and safe to share across threads.
///
/// Every lookup returns the same `Arc` for the lifetime of the container, or `None` on a miss.
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

/// Diagnostic view of one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingInfo {
    pub capability: &'static str,
    pub key: Option<BindingKey>,
    pub type_name: String,
}

impl Container {
    pub(crate) fn new(bindings: FxHashMap<BindingSlot, Binding>) -> Self {
        Self { inner: Arc::new(ContainerInner { bindings }) }
    }

    /// Resolves the default (unkeyed) binding of `C`.
    #[must_use]
    pub fn find<C: ?Sized + 'static>(&self) -> Option<Arc<C>> {
        self.resolve(&BindingSlot::default_for(Capability::of::<C>()))
    }

    /// Resolves the binding of `C` registered under `key`.
    #[must_use]
    pub fn find_by_key<C: ?Sized + 'static>(&self, key: impl Into<BindingKey>) -> Option<Arc<C>> {
        self.resolve(&BindingSlot::new(Capability::of::<C>(), Some(key.into())))
    }

    /// Whether a binding exists for `C` under `key` (`None` is the default binding).
    #[must_use]
    pub fn contains<C: ?Sized + 'static>(&self, key: Option<BindingKey>) -> bool {
        self.inner.bindings.contains_key(&BindingSlot::new(Capability::of::<C>(), key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.bindings.is_empty()
    }

    /// Lists the bindings, ordered by capability name then key.
    #[must_use]
    pub fn bindings(&self) -> Vec<BindingInfo> {
        let mut listed: Vec<BindingInfo> = self
            .inner
            .bindings
            .iter()
            .map(|(slot, binding)| BindingInfo {
                capability: slot.capability.name(),
                key: slot.key.clone(),
                type_name: binding.type_name.clone(),
            })
            .collect();
        listed.sort_by(|a, b| {
            a.capability.cmp(b.capability).then_with(|| {
                let a_key = a.key.as_ref().map(ToString::to_string);
                a_key.cmp(&b.key.as_ref().map(ToString::to_string))
            })
        });
        listed
    }

    fn resolve<C: ?Sized + 'static>(&self, slot: &BindingSlot) -> Option<Arc<C>> {
        self.inner
            .bindings
            .get(slot)
            .and_then(|binding| binding.instance.downcast_ref::<Arc<C>>())
            .cloned()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container").field("bindings", &self.bindings()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Registrar;
    use keel_kernel::domain::registry::TypeDeclaration;

    trait Clock: Send + Sync {
        fn now(&self) -> u64;
    }

    struct Fixed(u64);

    impl Clock for Fixed {
        fn now(&self) -> u64 {
            self.0
        }
    }

    fn container() -> Container {
        let mut registrar = Registrar::new();
        registrar.register_type(
            &TypeDeclaration::new(|| Fixed(1))
                .named("time::Fixed")
                .implements::<dyn Clock>(|it| it as Arc<dyn Clock>)
                .declare(),
        );
        registrar.register_type(
            &TypeDeclaration::new(|| Fixed(2))
                .named("time::Utc")
                .implements::<dyn Clock>(|it| it as Arc<dyn Clock>)
                .keyed("utc")
                .declare(),
        );
        registrar.build()
    }

    #[test]
    fn test_default_and_keyed_are_separate_slots() {
        let container = container();
        assert_eq!(container.len(), 2);
        assert_eq!(container.find::<dyn Clock>().map(|c| c.now()), Some(1));
        assert_eq!(container.find_by_key::<dyn Clock>("utc").map(|c| c.now()), Some(2));
        assert!(container.contains::<dyn Clock>(None));
        assert!(!container.contains::<dyn Clock>(Some(BindingKey::from("local"))));
    }

    #[test]
    fn test_bindings_are_listed_in_stable_order() {
        let listed = container().bindings();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].key, None);
        assert_eq!(listed[1].key, Some(BindingKey::from("utc")));
        assert_eq!(listed[1].type_name, "time::Utc");
    }

    #[test]
    fn test_debug_lists_bindings() {
        let rendered = format!("{:?}", container());
        assert!(rendered.contains("time::Fixed"));
    }
}
