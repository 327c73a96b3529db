use serde::Deserialize;
use std::str::FromStr;

/// On-disk module file: names the catalog entry that supplies the module's types.
///
/// ```toml
/// module = "flight.biz"
/// description = "Fare quoting and booking rules"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleManifest {
    pub module: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl FromStr for ModuleManifest {
    type Err = toml::de::Error;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_name_and_description() {
        let manifest: ModuleManifest =
            "module = \"flight.biz\"\ndescription = \"rules\"\n".parse().expect("manifest");
        assert_eq!(manifest.module, "flight.biz");
        assert_eq!(manifest.description.as_deref(), Some("rules"));
    }

    #[test]
    fn test_rejects_unknown_keys_and_missing_name() {
        assert!("module = \"a\"\nversion = 2\n".parse::<ModuleManifest>().is_err());
        assert!("description = \"no name\"\n".parse::<ModuleManifest>().is_err());
        assert!("this is not toml".parse::<ModuleManifest>().is_err());
    }
}
