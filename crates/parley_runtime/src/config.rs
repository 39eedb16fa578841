//! Runtime configuration for parley

use std::path::{Path, PathBuf};
use std::str::FromStr;

use parley_core::ModelSelection;
use serde::Deserialize;

use crate::error::{Result, RuntimeError};

/// Which hosted endpoint serves completions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    Azure,
    OpenAI,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Azure => "azure",
            ProviderKind::OpenAI => "openai",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "azure" | "azure-openai" | "azure_openai" => Ok(ProviderKind::Azure),
            "openai" => Ok(ProviderKind::OpenAI),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Selectable models, in display order.
///
/// Display names are unique ignoring case. The catalog is read-only once a
/// runtime is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    models: Vec<ModelSelection>,
    default_model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    default: Option<String>,
    #[serde(default)]
    models: Vec<ModelSelection>,
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ModelCatalog {
    /// File name looked up under `~/.parley/`
    pub const FILE_NAME: &'static str = "models.toml";

    /// The stock Azure deployments. Only GPT-4o takes image input.
    pub fn builtin() -> Self {
        Self {
            models: vec![
                ModelSelection::new("Deepseek-R1", "DeepSeek-R1"),
                ModelSelection::new("GPT-3.5 Turbo", "gpt-35-turbo"),
                ModelSelection::new("GPT-4o", "gpt-4o").with_image_input(true),
                ModelSelection::new("O3 Mini", "o3-mini"),
            ],
            default_model: None,
        }
    }

    pub fn new(models: Vec<ModelSelection>) -> Result<Self> {
        Self::validated(models, None)
    }

    fn validated(models: Vec<ModelSelection>, default_model: Option<String>) -> Result<Self> {
        if models.is_empty() {
            return Err(RuntimeError::ConfigError(
                "model catalog has no models".to_string(),
            ));
        }

        for (i, model) in models.iter().enumerate() {
            if model.display_name.trim().is_empty() || model.deployment_id.trim().is_empty() {
                return Err(RuntimeError::ConfigError(format!(
                    "model #{} needs a display_name and a deployment_id",
                    i + 1
                )));
            }
            if models[..i]
                .iter()
                .any(|m| m.display_name.eq_ignore_ascii_case(&model.display_name))
            {
                return Err(RuntimeError::ConfigError(format!(
                    "duplicate model name '{}'",
                    model.display_name
                )));
            }
        }

        let catalog = Self {
            models,
            default_model: None,
        };

        match default_model {
            Some(name) => {
                let resolved = catalog.find(&name)?.display_name.clone();
                Ok(Self {
                    default_model: Some(resolved),
                    ..catalog
                })
            }
            None => Ok(catalog),
        }
    }

    /// Parse a catalog from TOML:
    ///
    /// ```toml
    /// default = "GPT-4o"
    ///
    /// [[models]]
    /// display_name = "GPT-4o"
    /// deployment_id = "gpt-4o"
    /// supports_image_input = true
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(source)
            .map_err(|e| RuntimeError::ConfigError(format!("invalid model catalog: {}", e)))?;
        Self::validated(file.models, file.default)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source).map_err(|e| match e {
            RuntimeError::ConfigError(msg) => {
                RuntimeError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// `~/.parley/models.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".parley").join(Self::FILE_NAME))
    }

    /// Look up a model by display name (case-insensitive) or deployment ID.
    pub fn find(&self, name: &str) -> Result<&ModelSelection> {
        let name = name.trim();
        self.models
            .iter()
            .find(|m| m.display_name.eq_ignore_ascii_case(name))
            .or_else(|| self.models.iter().find(|m| m.deployment_id == name))
            .ok_or_else(|| RuntimeError::UnknownModel(name.to_string()))
    }

    /// The catalog's declared default, else its first entry.
    pub fn default_model(&self) -> &ModelSelection {
        self.default_model
            .as_deref()
            .and_then(|name| self.find(name).ok())
            .unwrap_or(&self.models[0])
    }

    pub fn models(&self) -> &[ModelSelection] {
        &self.models
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub provider: ProviderKind,
    pub catalog: ModelCatalog,
    /// Display name of the initially selected model; `None` uses the
    /// catalog default
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            provider: ProviderKind::default(),
            catalog: ModelCatalog::builtin(),
            model: None,
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_catalog(mut self, catalog: ModelCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Resolve the initially selected model against the catalog.
    pub fn initial_model(&self) -> Result<ModelSelection> {
        match &self.model {
            Some(name) => self.catalog.find(name).cloned(),
            None => Ok(self.catalog.default_model().clone()),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Reads `PARLEY_PROVIDER`, `PARLEY_MODEL`, `PARLEY_TEMPERATURE`,
    /// `PARLEY_MAX_TOKENS` and `PARLEY_MODELS_FILE`. Without
    /// `PARLEY_MODELS_FILE`, `~/.parley/models.toml` is used when present.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), ModelCatalog::default_path())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        default_catalog_path: Option<PathBuf>,
    ) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::new();

        if let Some(provider) = var("PARLEY_PROVIDER") {
            config.provider = provider.parse().map_err(|_| {
                RuntimeError::ConfigError(format!("unknown provider '{}'", provider))
            })?;
        } else if lookup("AZURE_OPENAI_API_KEY").is_none() && lookup("OPENAI_API_KEY").is_some() {
            // Infer from credentials when only an OpenAI key is around
            config.provider = ProviderKind::OpenAI;
        }

        if let Some(path) = var("PARLEY_MODELS_FILE") {
            config.catalog = ModelCatalog::load(Path::new(&path))?;
        } else if let Some(path) = default_catalog_path.filter(|p| p.is_file()) {
            config.catalog = ModelCatalog::load(&path)?;
        }

        if let Some(model) = var("PARLEY_MODEL") {
            config.model = Some(model);
        }

        if let Some(value) = var("PARLEY_TEMPERATURE") {
            let temperature = value.trim().parse::<f32>().map_err(|_| {
                RuntimeError::ConfigError(format!("PARLEY_TEMPERATURE is not a number: {}", value))
            })?;
            config.temperature = Some(temperature);
        }

        if let Some(value) = var("PARLEY_MAX_TOKENS") {
            let max_tokens = value.trim().parse::<u32>().map_err(|_| {
                RuntimeError::ConfigError(format!("PARLEY_MAX_TOKENS is not a count: {}", value))
            })?;
            config.max_tokens = Some(max_tokens);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_provider_kind_parse() {
        assert_eq!("azure".parse(), Ok(ProviderKind::Azure));
        assert_eq!("OpenAI".parse(), Ok(ProviderKind::OpenAI));
        assert!("anthropic".parse::<ProviderKind>().is_err());
        assert_eq!(ProviderKind::Azure.to_string(), "azure");
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = ModelCatalog::builtin();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.default_model().display_name, "Deepseek-R1");

        let image_models: Vec<_> = catalog
            .models()
            .iter()
            .filter(|m| m.supports_image_input)
            .map(|m| m.display_name.as_str())
            .collect();
        assert_eq!(image_models, vec!["GPT-4o"]);
    }

    #[test]
    fn test_find_by_name_or_deployment() {
        let catalog = ModelCatalog::builtin();
        assert_eq!(catalog.find("gpt-3.5 turbo").unwrap().deployment_id, "gpt-35-turbo");
        assert_eq!(catalog.find("o3-mini").unwrap().display_name, "O3 Mini");
        assert!(matches!(
            catalog.find("Claude"),
            Err(RuntimeError::UnknownModel(_))
        ));
    }

    #[test]
    fn test_catalog_from_toml() {
        let catalog = ModelCatalog::from_toml_str(
            r#"
default = "vision"

[[models]]
display_name = "Small"
deployment_id = "gpt-4o-mini"

[[models]]
display_name = "Vision"
deployment_id = "gpt-4o"
supports_image_input = true
"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.find("Small").unwrap().supports_image_input);
        assert_eq!(catalog.default_model().display_name, "Vision");
    }

    #[test]
    fn test_catalog_rejects_bad_files() {
        assert!(ModelCatalog::from_toml_str("models = []").is_err());
        assert!(ModelCatalog::from_toml_str(
            r#"
[[models]]
display_name = "A"
deployment_id = "a"

[[models]]
display_name = "a"
deployment_id = "b"
"#
        )
        .is_err());
        assert!(ModelCatalog::from_toml_str(
            r#"
default = "missing"
[[models]]
display_name = "A"
deployment_id = "a"
"#
        )
        .is_err());
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[]), None).unwrap();
        assert_eq!(config.provider, ProviderKind::Azure);
        assert_eq!(config.initial_model().unwrap().display_name, "Deepseek-R1");
        assert_eq!(config.temperature, None);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = RuntimeConfig::from_lookup(
            lookup(&[
                ("PARLEY_PROVIDER", "openai"),
                ("PARLEY_MODEL", "GPT-4o"),
                ("PARLEY_TEMPERATURE", "0.7"),
                ("PARLEY_MAX_TOKENS", "512"),
            ]),
            None,
        )
        .unwrap();

        assert_eq!(config.provider, ProviderKind::OpenAI);
        assert!(config.initial_model().unwrap().supports_image_input);
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.max_tokens, Some(512));
    }

    #[test]
    fn test_provider_inferred_from_openai_key() {
        let config =
            RuntimeConfig::from_lookup(lookup(&[("OPENAI_API_KEY", "sk-x")]), None).unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAI);
    }

    #[test]
    fn test_from_lookup_bad_values() {
        assert!(RuntimeConfig::from_lookup(lookup(&[("PARLEY_PROVIDER", "bard")]), None).is_err());
        assert!(
            RuntimeConfig::from_lookup(lookup(&[("PARLEY_MAX_TOKENS", "lots")]), None).is_err()
        );
    }

    #[test]
    fn test_models_file_from_default_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.toml");
        std::fs::write(
            &path,
            "[[models]]\ndisplay_name = \"Only\"\ndeployment_id = \"only-1\"\n",
        )
        .unwrap();

        let config = RuntimeConfig::from_lookup(lookup(&[]), Some(path)).unwrap();
        assert_eq!(config.catalog.len(), 1);
        assert_eq!(config.initial_model().unwrap().deployment_id, "only-1");
    }

    #[test]
    fn test_unknown_initial_model() {
        let config = RuntimeConfig::new().with_model("nope");
        assert!(matches!(
            config.initial_model(),
            Err(RuntimeError::UnknownModel(_))
        ));
    }
}
