use keel_discovery::{DiscoveryError, ModuleCatalog, ModuleLocator, load_module, select_all};
use keel_kernel::domain::config::DiscoveryConfig;
use keel_kernel::domain::registry::{CandidateType, TypeDeclaration};
use std::fs;
use std::path::Path;

#[derive(Default)]
struct Marker;

fn two_types() -> Vec<CandidateType> {
    vec![
        TypeDeclaration::new(Marker::default).named("flight::A").declare(),
        TypeDeclaration::new(Marker::default).named("flight::B").declare(),
    ]
}

fn no_types() -> Vec<CandidateType> {
    Vec::new()
}

fn catalog() -> ModuleCatalog {
    ModuleCatalog::new()
        .module("flight.domain", no_types)
        .module("flight.business", two_types)
        .module("flight.integration", no_types)
        .module("flight.data", no_types)
}

fn write(dir: &Path, file: &str, module: &str) {
    fs::write(dir.join(file), format!("module = \"{module}\"\n")).expect("write manifest");
}

fn flight_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(dir.path(), "Keel.Flight.Dsf.Core.module", "flight.domain");
    write(dir.path(), "Keel.Flight.Biz.module", "flight.business");
    write(dir.path(), "Keel.Flight.Integration.module", "flight.integration");
    write(dir.path(), "Keel.Flight.Dal.module", "flight.data");
    dir
}

#[test]
fn locates_matching_files_sorted_by_name() {
    let dir = flight_dir();
    write(dir.path(), "Other.Product.module", "flight.domain");
    fs::write(dir.path().join("Keel.Flight.Notes.txt"), "not a module").expect("write");

    let locator = ModuleLocator::new(dir.path(), "Keel.Flight", "module");
    let modules = locator.locate(&catalog()).expect("located");

    let files: Vec<_> = modules.iter().filter_map(|module| module.file_name()).collect();
    assert_eq!(
        files,
        [
            "Keel.Flight.Biz.module",
            "Keel.Flight.Dal.module",
            "Keel.Flight.Dsf.Core.module",
            "Keel.Flight.Integration.module",
        ]
    );
    assert_eq!(modules[0].name(), "flight.business");
    assert_eq!(modules[0].types().len(), 2);
}

#[test]
fn subdirectories_are_not_scanned() {
    let dir = tempfile::tempdir().expect("tempdir");
    let nested = dir.path().join("Keel.Flight.plugins");
    fs::create_dir(&nested).expect("mkdir");
    write(&nested, "Keel.Flight.Biz.module", "flight.business");

    let locator = ModuleLocator::new(dir.path(), "Keel.Flight", "module");
    assert!(locator.locate(&catalog()).expect("located").is_empty());
}

#[test]
fn missing_directory_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let locator = ModuleLocator::new(dir.path().join("absent"), "Keel.Flight", "module");

    assert!(matches!(locator.locate(&catalog()), Err(DiscoveryError::Walk { .. })));
}

#[test]
fn malformed_manifest_is_fatal() {
    let dir = flight_dir();
    fs::write(dir.path().join("Keel.Flight.Broken.module"), "module = [").expect("write");

    let locator = ModuleLocator::new(dir.path(), "Keel.Flight", "module");
    let error = locator.locate(&catalog()).expect_err("malformed");
    assert!(matches!(error, DiscoveryError::Manifest { context: Some(_), .. }));
    assert!(error.to_string().contains("Keel.Flight.Broken.module"));
}

#[test]
fn unknown_module_is_fatal() {
    let dir = flight_dir();
    write(dir.path(), "Keel.Flight.Extra.module", "flight.unknown");

    let locator = ModuleLocator::new(dir.path(), "Keel.Flight", "module");
    let error = locator.locate(&catalog()).expect_err("unknown");
    let DiscoveryError::UnknownModule { module, .. } = &error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(module, "flight.unknown");
}

#[test]
fn load_module_reads_a_single_file() {
    let dir = flight_dir();
    let path = dir.path().join("Keel.Flight.Biz.module");

    let module = load_module(&path, &catalog()).expect("loaded");
    assert_eq!(module.origin(), path);
    assert_eq!(module.name(), "flight.business");
}

#[test]
fn default_subsystems_resolve_in_scan_order() {
    let dir = flight_dir();
    let locator = ModuleLocator::new(dir.path(), "Keel.Flight", "module");
    let modules = locator.locate(&catalog()).expect("located");

    let selected = select_all(&modules, &DiscoveryConfig::default().subsystems).expect("selected");
    let names: Vec<_> = selected.iter().map(|module| module.name()).collect();
    assert_eq!(names, ["flight.domain", "flight.business", "flight.integration", "flight.data"]);
}

#[test]
fn companion_modules_do_not_make_subsystems_ambiguous() {
    let dir = flight_dir();
    write(dir.path(), "Keel.Flight.Biz.Contracts.module", "flight.integration");
    write(dir.path(), "Keel.Flight.Dal.Migrations.module", "flight.data");

    let locator = ModuleLocator::new(dir.path(), "Keel.Flight", "module");
    let modules = locator.locate(&catalog()).expect("located");
    assert_eq!(modules.len(), 6);

    let selected = select_all(&modules, &DiscoveryConfig::default().subsystems).expect("selected");
    let files: Vec<_> = selected.iter().filter_map(|module| module.file_name()).collect();
    assert_eq!(
        files,
        [
            "Keel.Flight.Dsf.Core.module",
            "Keel.Flight.Biz.module",
            "Keel.Flight.Integration.module",
            "Keel.Flight.Dal.module"
        ]
    );
}

#[test]
fn missing_subsystem_is_reported_by_name() {
    let dir = flight_dir();
    fs::remove_file(dir.path().join("Keel.Flight.Integration.module")).expect("remove");

    let locator = ModuleLocator::new(dir.path(), "Keel.Flight", "module");
    let modules = locator.locate(&catalog()).expect("located");

    let error = select_all(&modules, &DiscoveryConfig::default().subsystems).expect_err("missing");
    let DiscoveryError::MissingSubsystem { subsystem, pattern, .. } = &error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(subsystem, "integration");
    assert_eq!(pattern, "integration.module");
}

#[test]
fn configured_base_dir_is_used() {
    let dir = flight_dir();
    let mut config = DiscoveryConfig::default();
    config.base_dir = Some(dir.path().to_path_buf());

    let locator = ModuleLocator::from_config(&config).expect("locator");
    assert_eq!(locator.base_dir(), dir.path());
    assert_eq!(locator.module_files().expect("files").len(), 4);
}
