use crate::catalog::ModuleCatalog;
use crate::error::{DiscoveryError, DiscoveryErrorExt};
use crate::manifest::ModuleManifest;
use keel_kernel::domain::config::DiscoveryConfig;
use keel_kernel::domain::registry::ModuleDescriptor;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Finds module files in a single directory and loads them against a [`ModuleCatalog`].
#[derive(Debug, Clone)]
pub struct ModuleLocator {
    base_dir: PathBuf,
    product: String,
    extension: String,
}

impl ModuleLocator {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        product: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        let extension = extension.into();
        Self {
            base_dir: base_dir.into(),
            product: product.into(),
            extension: extension.trim_start_matches('.').to_owned(),
        }
    }

    /// Builds a locator from configuration, defaulting the base directory to
    /// the directory of the running executable.
    ///
    /// # Errors
    /// Returns [`DiscoveryError::Io`] if no base directory is configured and the
    /// executable path cannot be determined.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self, DiscoveryError> {
        let base_dir = match &config.base_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };
        Ok(Self::new(base_dir, config.product.as_str(), config.extension.as_str()))
    }

    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Whether a file name passes the product and extension filters.
    #[must_use]
    pub fn is_module_file(&self, file_name: &str) -> bool {
        file_name.contains(&self.product)
            && file_name
                .strip_suffix(self.extension.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
    }

    /// Lists matching module files, sorted by file name. Subdirectories are not searched.
    ///
    /// # Errors
    /// Returns [`DiscoveryError::Walk`] if the base directory is missing or unreadable.
    pub fn module_files(&self) -> Result<Vec<PathBuf>, DiscoveryError> {
        let mut files = Vec::new();
        let walker = WalkDir::new(&self.base_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.context(self.base_dir.display().to_string())?;
            let matches = entry.file_type().is_file()
                && entry.file_name().to_str().is_some_and(|name| self.is_module_file(name));
            if matches {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    /// Locates and loads every module. Any file that fails to load aborts discovery.
    ///
    /// # Errors
    /// See [`ModuleLocator::module_files`] and [`load_module`].
    pub fn locate(&self, catalog: &ModuleCatalog) -> Result<Vec<ModuleDescriptor>, DiscoveryError> {
        let modules = self
            .module_files()?
            .iter()
            .map(|path| load_module(path, catalog))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            base_dir = %self.base_dir.display(),
            product = %self.product,
            modules = modules.len(),
            "Modules located"
        );
        Ok(modules)
    }
}

/// Reads a module manifest and resolves it against the catalog.
///
/// # Errors
/// * [`DiscoveryError::Io`] if the file cannot be read.
/// * [`DiscoveryError::Manifest`] if it is not a valid manifest.
/// * [`DiscoveryError::UnknownModule`] if the catalog has no such module.
pub fn load_module(path: &Path, catalog: &ModuleCatalog) -> Result<ModuleDescriptor, DiscoveryError> {
    let origin = path.display().to_string();
    let content = std::fs::read_to_string(path).context(origin.clone())?;
    let manifest = content.parse::<ModuleManifest>().context(origin.clone())?;

    let Some(table) = catalog.get(&manifest.module) else {
        return Err(DiscoveryError::UnknownModule {
            module: Cow::Owned(manifest.module),
            context: Some(Cow::Owned(origin)),
        });
    };

    let types = table();
    debug!(module = %manifest.module, origin = %origin, types = types.len(), "Module loaded");
    Ok(ModuleDescriptor::new(path, manifest.module, types))
}

fn executable_dir() -> Result<PathBuf, DiscoveryError> {
    let executable = std::env::current_exe().context("Resolving the executable path")?;
    executable.parent().map(Path::to_path_buf).ok_or_else(|| DiscoveryError::Internal {
        message: Cow::Owned(executable.display().to_string()),
        context: Some(Cow::Borrowed("Executable has no parent directory")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_filter() {
        let locator = ModuleLocator::new(".", "Keel.Flight", ".module");
        assert!(locator.is_module_file("Keel.Flight.Biz.module"));
        assert!(locator.is_module_file("Acme.Keel.Flight.module"));
        assert!(!locator.is_module_file("keel.flight.biz.module"));
        assert!(!locator.is_module_file("Keel.Flight.Biz.modules"));
        assert!(!locator.is_module_file("Keel.Flight.Bizmodule"));
        assert!(!locator.is_module_file("Other.Biz.module"));
    }

    #[test]
    fn test_default_base_dir_is_executable_dir() {
        let locator = ModuleLocator::from_config(&DiscoveryConfig::default()).expect("exe dir");
        let exe = std::env::current_exe().expect("exe");
        assert_eq!(Some(locator.base_dir()), exe.parent());
    }
}
