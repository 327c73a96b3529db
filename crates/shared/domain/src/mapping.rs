//! Object-mapping profiles and the frozen mapper they configure.

use fxhash::FxHashMap;
use std::any::{Any, TypeId, type_name};
use std::fmt;
use std::sync::Arc;

type Converter = Box<dyn Fn(&dyn Any) -> Option<Box<dyn Any>> + Send + Sync>;

/// A set of `source -> destination` maps contributed by one module.
pub trait MappingProfile: Send + Sync {
    /// Name recorded in [`Mapper::profiles`].
    fn name(&self) -> &str {
        type_name::<Self>()
    }

    fn configure(&self, config: &mut MapperConfiguration);
}

/// Mutable map registry; frozen into a [`Mapper`] with [`MapperConfiguration::build`].
#[derive(Default)]
pub struct MapperConfiguration {
    maps: FxHashMap<(TypeId, TypeId), Converter>,
    profiles: Vec<String>,
}

impl MapperConfiguration {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a map from `S` to `D`. A later map for the same pair replaces the earlier one.
    pub fn create_map<S, D>(&mut self, map: impl Fn(&S) -> D + Send + Sync + 'static) -> &mut Self
    where
        S: 'static,
        D: 'static,
    {
        let converter: Converter = Box::new(move |source: &dyn Any| {
            source.downcast_ref::<S>().map(|source| Box::new(map(source)) as Box<dyn Any>)
        });
        self.maps.insert((TypeId::of::<S>(), TypeId::of::<D>()), converter);
        self
    }

    /// Applies a profile and records its name.
    pub fn add_profile(&mut self, profile: &dyn MappingProfile) -> &mut Self {
        profile.configure(self);
        self.profiles.push(profile.name().to_owned());
        self
    }

    #[must_use]
    pub fn build(self) -> Mapper {
        Mapper { inner: Arc::new(MapperInner { maps: self.maps, profiles: self.profiles }) }
    }
}

impl fmt::Debug for MapperConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperConfiguration")
            .field("maps", &self.maps.len())
            .field("profiles", &self.profiles)
            .finish()
    }
}

struct MapperInner {
    maps: FxHashMap<(TypeId, TypeId), Converter>,
    profiles: Vec<String>,
}

/// Immutable, cheaply clonable object mapper.
#[derive(Clone)]
pub struct Mapper {
    inner: Arc<MapperInner>,
}

impl Mapper {
    /// Maps `source` into a new `D`, or `None` when no `S -> D` map was configured.
    #[must_use]
    pub fn map<S: 'static, D: 'static>(&self, source: &S) -> Option<D> {
        let converter = self.inner.maps.get(&(TypeId::of::<S>(), TypeId::of::<D>()))?;
        converter(source as &dyn Any).and_then(|mapped| mapped.downcast::<D>().ok()).map(|mapped| *mapped)
    }

    #[must_use]
    pub fn has_map<S: 'static, D: 'static>(&self) -> bool {
        self.inner.maps.contains_key(&(TypeId::of::<S>(), TypeId::of::<D>()))
    }

    /// Names of the applied profiles, in application order.
    #[must_use]
    pub fn profiles(&self) -> &[String] {
        &self.inner.profiles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.maps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.maps.is_empty()
    }
}

impl Default for Mapper {
    fn default() -> Self {
        MapperConfiguration::default().build()
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("maps", &self.inner.maps.len())
            .field("profiles", &self.inner.profiles)
            .finish()
    }
}
