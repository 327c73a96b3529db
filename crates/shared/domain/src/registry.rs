//! Compiled registration table.
//! A module declares its types as [`CandidateType`] values; the classifier turns them into
//! [`Registration`]s, which the container freezes into singleton bindings.

use crate::mapping::MappingProfile;
use serde::{Deserialize, Serialize};
use std::any::{Any, TypeId, type_name};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A constructed service, erased to its concrete type.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// A constructed service already cast to its capability: an `Arc<dyn Capability>` behind `Any`.
pub type BoundInstance = Box<dyn Any + Send + Sync>;

type Factory = Arc<dyn Fn() -> Instance + Send + Sync>;
type Upcast = Arc<dyn Fn(Instance) -> Option<BoundInstance> + Send + Sync>;
type ProfileFactory = Arc<dyn Fn() -> Box<dyn MappingProfile> + Send + Sync>;

/// Identity of a trait-object type (`dyn Trait`) services are registered and resolved by.
#[derive(Clone, Copy)]
pub struct Capability {
    id: TypeId,
    name: &'static str,
}

impl Capability {
    #[must_use]
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self { id: TypeId::of::<C>(), name: type_name::<C>() }
    }

    #[must_use]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for Capability {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Capability {}

impl Hash for Capability {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Capability").field(&self.name).finish()
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Distinguishes several registrations of the same capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindingKey {
    Number(i64),
    Text(Cow<'static, str>),
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&'static str> for BindingKey {
    fn from(s: &'static str) -> Self {
        Self::Text(Cow::Borrowed(s))
    }
}

impl From<String> for BindingKey {
    fn from(s: String) -> Self {
        Self::Text(Cow::Owned(s))
    }
}

impl From<Cow<'static, str>> for BindingKey {
    fn from(s: Cow<'static, str>) -> Self {
        Self::Text(s)
    }
}

macro_rules! number_keys {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for BindingKey {
                fn from(n: $ty) -> Self {
                    Self::Number(i64::from(n))
                }
            }
        )*
    };
}

number_keys!(i8, i16, i32, i64, u8, u16, u32);

/// One capability a declared type exposes, with the cast from the concrete instance.
#[derive(Clone)]
pub struct CapabilityBinding {
    capability: Capability,
    upcast: Upcast,
}

impl CapabilityBinding {
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    fn bind(&self, instance: Instance) -> Option<BoundInstance> {
        (self.upcast)(instance)
    }
}

impl fmt::Debug for CapabilityBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapabilityBinding").field(&self.capability.name).finish()
    }
}

/// A type declared by a module: its name, ordered capabilities, binding keys and constructor.
#[derive(Clone)]
pub struct CandidateType {
    name: Cow<'static, str>,
    global: bool,
    capabilities: Vec<CapabilityBinding>,
    keys: Vec<BindingKey>,
    factory: Factory,
    profile: Option<ProfileFactory>,
}

impl CandidateType {
    /// Fully-qualified name, e.g. `flight::biz::QuoteService`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Everything before the last `::` of the name, ignoring generic arguments.
    /// `None` means the global namespace.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        if self.global {
            return None;
        }
        let path = self.name.split('<').next().unwrap_or_default();
        path.rsplit_once("::").map(|(namespace, _)| namespace).filter(|ns| !ns.trim().is_empty())
    }

    /// Capabilities in declaration order.
    pub fn capabilities(&self) -> impl ExactSizeIterator<Item = Capability> + '_ {
        self.capabilities.iter().map(CapabilityBinding::capability)
    }

    #[must_use]
    pub fn first_capability(&self) -> Option<&CapabilityBinding> {
        self.capabilities.first()
    }

    #[must_use]
    pub fn keys(&self) -> &[BindingKey] {
        &self.keys
    }

    #[must_use]
    pub const fn is_mapping_profile(&self) -> bool {
        self.profile.is_some()
    }

    /// Instantiates the type as a mapping profile, if it was declared as one.
    #[must_use]
    pub fn mapping_profile(&self) -> Option<Box<dyn MappingProfile>> {
        self.profile.as_ref().map(|factory| factory())
    }
}

impl fmt::Debug for CandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateType")
            .field("name", &self.name)
            .field("global", &self.global)
            .field("capabilities", &self.capabilities)
            .field("keys", &self.keys)
            .field("profile", &self.profile.is_some())
            .finish()
    }
}

/// Implemented by types that can describe themselves to a module catalog.
/// Usually generated by `#[keel::service]` or `#[keel::profile]`.
pub trait Declare {
    fn declare() -> CandidateType;
}

/// Typed builder for a [`CandidateType`].
///
/// ```rust
/// use keel_domain::registry::TypeDeclaration;
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_owned()
///     }
/// }
///
/// let declared = TypeDeclaration::new(English::default)
///     .implements::<dyn Greeter>(|it| it as Arc<dyn Greeter>)
///     .keyed("en")
///     .declare();
///
/// assert_eq!(declared.keys().len(), 1);
/// ```
pub struct TypeDeclaration<T> {
    name: Cow<'static, str>,
    global: bool,
    constructor: Arc<dyn Fn() -> T + Send + Sync>,
    capabilities: Vec<CapabilityBinding>,
    keys: Vec<BindingKey>,
    profile: Option<ProfileFactory>,
}

impl<T: Send + Sync + 'static> TypeDeclaration<T> {
    /// Starts a declaration named after the Rust type path of `T`.
    pub fn new(constructor: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            name: Cow::Borrowed(type_name::<T>()),
            global: false,
            constructor: Arc::new(constructor),
            capabilities: Vec::new(),
            keys: Vec::new(),
            profile: None,
        }
    }

    /// Overrides the fully-qualified name used for namespace checks and diagnostics.
    #[must_use]
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    /// Places the type in the global namespace, which opts it out of service registration.
    #[must_use]
    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    /// Adds a capability. Declaration order matters: only the first one is bound.
    #[must_use]
    pub fn implements<C>(mut self, upcast: impl Fn(Arc<T>) -> Arc<C> + Send + Sync + 'static) -> Self
    where
        C: ?Sized + 'static,
        Arc<C>: Send + Sync,
    {
        let upcast: Upcast = Arc::new(move |instance: Instance| {
            instance.downcast::<T>().ok().map(|concrete| Box::new(upcast(concrete)) as BoundInstance)
        });
        self.capabilities.push(CapabilityBinding { capability: Capability::of::<C>(), upcast });
        self
    }

    #[must_use]
    pub fn keyed(mut self, key: impl Into<BindingKey>) -> Self {
        self.keys.push(key.into());
        self
    }

    #[must_use]
    pub fn declare(self) -> CandidateType {
        let constructor = self.constructor;
        let factory: Factory = Arc::new(move || Arc::new(constructor()) as Instance);

        CandidateType {
            name: self.name,
            global: self.global,
            capabilities: self.capabilities,
            keys: self.keys,
            factory,
            profile: self.profile,
        }
    }
}

impl<T: MappingProfile + 'static> TypeDeclaration<T> {
    /// Marks the type as a mapping profile, constructed with the declaration's constructor.
    #[must_use]
    pub fn mapping_profile(mut self) -> Self {
        let constructor = Arc::clone(&self.constructor);
        self.profile = Some(Arc::new(move || Box::new(constructor()) as Box<dyn MappingProfile>));
        self
    }
}

impl<T> fmt::Debug for TypeDeclaration<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDeclaration")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

/// The `(capability, key)` pair a registration occupies. `key: None` is the default binding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BindingSlot {
    pub capability: Capability,
    pub key: Option<BindingKey>,
}

impl BindingSlot {
    #[must_use]
    pub const fn new(capability: Capability, key: Option<BindingKey>) -> Self {
        Self { capability, key }
    }

    #[must_use]
    pub const fn default_for(capability: Capability) -> Self {
        Self { capability, key: None }
    }
}

/// A type bound to a single capability, optionally under a key. Lifetime is always singleton.
#[derive(Clone)]
pub struct Registration {
    type_name: Cow<'static, str>,
    binding: CapabilityBinding,
    key: Option<BindingKey>,
    factory: Factory,
}

impl Registration {
    #[must_use]
    pub fn new(candidate: &CandidateType, binding: &CapabilityBinding, key: Option<BindingKey>) -> Self {
        Self {
            type_name: candidate.name.clone(),
            binding: binding.clone(),
            key,
            factory: Arc::clone(&candidate.factory),
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.binding.capability
    }

    #[must_use]
    pub const fn key(&self) -> Option<&BindingKey> {
        self.key.as_ref()
    }

    #[must_use]
    pub fn slot(&self) -> BindingSlot {
        BindingSlot::new(self.binding.capability, self.key.clone())
    }

    /// Constructs the instance and casts it to the bound capability.
    #[must_use]
    pub fn activate(&self) -> Option<BoundInstance> {
        self.binding.bind((self.factory)())
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("type_name", &self.type_name)
            .field("capability", &self.binding.capability)
            .field("key", &self.key)
            .finish()
    }
}

/// A loaded module: where it came from and the types it declares.
/// Only lives for the duration of the scan.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    origin: PathBuf,
    name: String,
    types: Vec<CandidateType>,
}

impl ModuleDescriptor {
    pub fn new(origin: impl Into<PathBuf>, name: impl Into<String>, types: Vec<CandidateType>) -> Self {
        Self { origin: origin.into(), name: name.into(), types }
    }

    #[must_use]
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.origin.file_name().and_then(|name| name.to_str())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn types(&self) -> &[CandidateType] {
        &self.types
    }
}
