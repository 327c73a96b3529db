use keel_kernel::domain::mapping::{Mapper, MapperConfiguration};
use keel_kernel::domain::registry::ModuleDescriptor;
use tracing::{debug, info};

/// Applies every mapping profile declared by `modules`, in module then declaration order,
/// and freezes the result.
#[must_use]
pub fn aggregate_profiles<'a>(modules: impl IntoIterator<Item = &'a ModuleDescriptor>) -> Mapper {
    let mut configuration = MapperConfiguration::new();

    for module in modules {
        for profile in module.types().iter().filter_map(|candidate| candidate.mapping_profile()) {
            debug!(module = module.name(), profile = profile.name(), "Applying mapping profile");
            configuration.add_profile(profile.as_ref());
        }
    }

    let mapper = configuration.build();
    info!(profiles = mapper.profiles().len(), maps = mapper.len(), "Mapper built");
    mapper
}

#[cfg(test)]
mod tests {
    use super::*;
    use keel_kernel::domain::mapping::MappingProfile;
    use keel_kernel::domain::registry::TypeDeclaration;

    #[derive(Default)]
    struct Celsius;

    impl MappingProfile for Celsius {
        fn configure(&self, config: &mut MapperConfiguration) {
            config.create_map(|kelvin: &f64| kelvin - 273.15);
        }
    }

    #[derive(Default)]
    struct Rounded;

    impl MappingProfile for Rounded {
        fn name(&self) -> &str {
            "rounded"
        }

        fn configure(&self, config: &mut MapperConfiguration) {
            config.create_map(|value: &f64| value.round() as i64);
        }
    }

    #[test]
    fn test_profiles_apply_across_modules_in_order() {
        let first = ModuleDescriptor::new(
            "a.module",
            "a",
            vec![TypeDeclaration::new(Celsius::default).mapping_profile().declare()],
        );
        let second = ModuleDescriptor::new(
            "b.module",
            "b",
            vec![TypeDeclaration::new(Rounded::default).mapping_profile().declare()],
        );

        let mapper = aggregate_profiles([&first, &second]);

        assert_eq!(mapper.profiles().len(), 2);
        assert_eq!(mapper.profiles()[1], "rounded");
        assert_eq!(mapper.map::<f64, i64>(&2.6), Some(3));
        assert!(mapper.has_map::<f64, f64>());
    }

    #[test]
    fn test_plain_types_are_not_profiles() {
        let module = ModuleDescriptor::new(
            "c.module",
            "c",
            vec![TypeDeclaration::new(Celsius::default).declare()],
        );
        assert!(aggregate_profiles([&module]).is_empty());
    }
}
