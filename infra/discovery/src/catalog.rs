use fxhash::FxHashMap;
use keel_kernel::domain::registry::CandidateType;

/// Supplies the declared types of one module.
pub type ModuleTable = fn() -> Vec<CandidateType>;

/// Compiled table of known modules, keyed by the name module manifests refer to.
#[derive(Debug, Default, Clone)]
pub struct ModuleCatalog {
    modules: FxHashMap<String, ModuleTable>,
}

impl ModuleCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module. Registering the same name again replaces the table.
    #[must_use]
    pub fn module(mut self, name: impl Into<String>, table: ModuleTable) -> Self {
        self.modules.insert(name.into(), table);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<ModuleTable> {
        self.modules.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}
