use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Loader name the resolver registers itself under by default.
pub const DEFAULT_LOADER_NAME: &str = "UniverseModulesLoader";

/// Which runtimes the current process counts as.
///
/// Supplied by the host; the resolver never probes the process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub is_server: bool,
    pub is_client: bool,
}

impl Default for Environment {
    fn default() -> Self {
        Self::server()
    }
}

impl Environment {
    #[must_use]
    pub fn server() -> Self {
        Self {
            is_server: true,
            is_client: false,
        }
    }

    #[must_use]
    pub fn client() -> Self {
        Self {
            is_server: false,
            is_client: true,
        }
    }

    #[must_use]
    pub fn new(is_server: bool, is_client: bool) -> Self {
        Self {
            is_server,
            is_client,
        }
    }
}

/// How a bare reference with a parent is resolved when normalization
/// leaves it outside the canonical namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImplicitRelative {
    /// Resolve next to the parent: `dirname(parent) + "/" + reference`.
    #[default]
    Sibling,
    /// Historical output: `dirname(parent)` followed by the whole parent name.
    Legacy,
}

impl ImplicitRelative {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sibling => "sibling",
            Self::Legacy => "legacy",
        }
    }
}

/// Module source format declared for routed ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    #[default]
    Register,
    Esm,
    Cjs,
    Amd,
    Global,
}

impl ModuleFormat {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Register => "register",
            Self::Esm => "esm",
            Self::Cjs => "cjs",
            Self::Amd => "amd",
            Self::Global => "global",
        }
    }
}

/// Resolver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Runtime flags used by the platform filter.
    pub environment: Environment,

    /// Policy for bare references that stay outside the namespace.
    pub implicit_relative: ImplicitRelative,

    /// Name the resolver is registered under as a loader.
    pub loader_name: String,

    /// Format declared for everything routed through the resolver.
    pub format: ModuleFormat,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            implicit_relative: ImplicitRelative::default(),
            loader_name: DEFAULT_LOADER_NAME.to_string(),
            format: ModuleFormat::default(),
        }
    }
}

impl ResolverConfig {
    /// Load a config from a JSON file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Set the environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the implicit-relative policy.
    #[must_use]
    pub fn with_implicit_relative(mut self, policy: ImplicitRelative) -> Self {
        self.implicit_relative = policy;
        self
    }

    /// Set the loader name.
    #[must_use]
    pub fn with_loader_name(mut self, name: impl Into<String>) -> Self {
        self.loader_name = name.into();
        self
    }

    /// Set the module format.
    #[must_use]
    pub fn with_format(mut self, format: ModuleFormat) -> Self {
        self.format = format;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ResolverConfig::default();
        assert_eq!(config.environment, Environment::server());
        assert_eq!(config.implicit_relative, ImplicitRelative::Sibling);
        assert_eq!(config.loader_name, "UniverseModulesLoader");
        assert_eq!(config.format, ModuleFormat::Register);
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unimod.json");
        fs::write(
            &path,
            r#"{"environment": {"is_server": false, "is_client": true}, "implicit_relative": "legacy"}"#,
        )
        .unwrap();

        let config = ResolverConfig::load(&path).unwrap();
        assert_eq!(config.environment, Environment::client());
        assert_eq!(config.implicit_relative, ImplicitRelative::Legacy);
        assert_eq!(config.loader_name, DEFAULT_LOADER_NAME);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = ResolverConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unimod.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ResolverConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_builder() {
        let config = ResolverConfig::default()
            .with_environment(Environment::new(true, true))
            .with_loader_name("custom")
            .with_format(ModuleFormat::Esm);
        assert!(config.environment.is_client);
        assert_eq!(config.loader_name, "custom");
        assert_eq!(config.format.as_str(), "esm");
    }
}
