//! Process configuration.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `LULLABY_*` environment variables. The provider
//! credential falls back to `OPENAI_API_KEY` when no layer sets `api_key`.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use lullaby_error::{ConfigError, LullabyResult};
use lullaby_models::{OPENAI_CHAT_COMPLETIONS_URL, OpenAICompatibleClient};
use lullaby_pipeline::Pipeline;
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Prefix of the environment variables read by [`LullabyConfig::load`].
pub const ENV_PREFIX: &str = "LULLABY";

/// Variable consulted when no layer provides `api_key`.
pub const FALLBACK_API_KEY_VAR: &str = "OPENAI_API_KEY";

const DEFAULT_BIND: &str = "0.0.0.0:8000";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_TIMEOUT_SECS: i64 = 60;

/// Raw settings as merged from every layer, before validation.
#[derive(Debug, Clone, Deserialize)]
pub struct LullabySettings {
    bind: String,
    base_url: String,
    model: String,
    #[serde(default)]
    api_key: Option<String>,
    request_timeout_secs: u64,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    max_tokens: Option<u32>,
    #[serde(default)]
    allowed_origins: Vec<String>,
}

/// Validated, read-only process configuration.
///
/// Built once at startup. A process without a credential or with an
/// unparseable bind address never gets this far.
#[derive(Clone, PartialEq, Getters, derive_builder::Builder)]
#[builder(setter(into))]
pub struct LullabyConfig {
    /// Socket address the HTTP server listens on
    bind: SocketAddr,
    /// Full URL of the chat completions endpoint
    base_url: String,
    /// Model identifier used for every stage
    model: String,
    /// Provider credential
    api_key: String,
    /// Upper bound for one provider round-trip
    request_timeout: Duration,
    /// Sampling temperature, provider default when unset
    #[builder(default)]
    temperature: Option<f32>,
    /// Completion length cap, provider default when unset
    #[builder(default)]
    max_tokens: Option<u32>,
    /// CORS origins; empty allows every origin
    #[builder(default)]
    allowed_origins: Vec<String>,
}

impl std::fmt::Debug for LullabyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LullabyConfig")
            .field("bind", &self.bind)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl LullabyConfig {
    /// Load configuration from the process environment and an optional file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, a value has the
    /// wrong type, or no credential is available.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::from_sources(
            path,
            Self::environment(),
            std::env::var(FALLBACK_API_KEY_VAR).ok(),
        )
    }

    /// The `LULLABY_*` environment layer.
    ///
    /// `LULLABY_ALLOWED_ORIGINS` is split on commas.
    pub fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("allowed_origins")
    }

    /// Merge defaults, the optional TOML file at `path`, and `environment`.
    ///
    /// # Errors
    ///
    /// See [`LullabyConfig::load`].
    pub fn from_sources(
        path: Option<&Path>,
        environment: Environment,
        fallback_api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("bind", DEFAULT_BIND)
            .and_then(|b| b.set_default("base_url", OPENAI_CHAT_COMPLETIONS_URL))
            .and_then(|b| b.set_default("model", DEFAULT_MODEL))
            .and_then(|b| b.set_default("request_timeout_secs", DEFAULT_TIMEOUT_SECS))
            .map_err(|e| ConfigError::new(format!("Invalid default setting: {}", e)))?;

        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let settings: LullabySettings = builder
            .add_source(environment)
            .build()
            .and_then(|merged| merged.try_deserialize())
            .map_err(|e| ConfigError::new(format!("Failed to load configuration: {}", e)))?;

        Self::from_settings(settings, fallback_api_key)
    }

    /// Validate merged settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a missing credential, an invalid bind
    /// address or a zero timeout.
    pub fn from_settings(
        settings: LullabySettings,
        fallback_api_key: Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_key = settings
            .api_key
            .filter(|key| !key.trim().is_empty())
            .or(fallback_api_key.filter(|key| !key.trim().is_empty()))
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "No provider API key: set {}_API_KEY or {}",
                    ENV_PREFIX, FALLBACK_API_KEY_VAR
                ))
            })?;

        let bind: SocketAddr = settings.bind.trim().parse().map_err(|e| {
            ConfigError::new(format!("Invalid bind address '{}': {}", settings.bind, e))
        })?;

        if settings.request_timeout_secs == 0 {
            return Err(ConfigError::new("request_timeout_secs must be positive"));
        }

        let allowed_origins: Vec<String> = settings
            .allowed_origins
            .into_iter()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        LullabyConfigBuilder::default()
            .bind(bind)
            .base_url(settings.base_url)
            .model(settings.model)
            .api_key(api_key)
            .request_timeout(Duration::from_secs(settings.request_timeout_secs))
            .temperature(settings.temperature)
            .max_tokens(settings.max_tokens)
            .allowed_origins(allowed_origins)
            .build()
            .map_err(|e| ConfigError::new(e.to_string()))
    }

    /// Returns a copy listening on `bind` instead.
    pub fn with_bind(self, bind: SocketAddr) -> Self {
        Self { bind, ..self }
    }

    /// Build the provider client described by this configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be constructed.
    pub fn build_client(&self) -> LullabyResult<OpenAICompatibleClient> {
        let client = OpenAICompatibleClient::new(
            self.api_key.as_str(),
            self.base_url.as_str(),
            "openai",
            self.request_timeout,
        )?
        .with_temperature(self.temperature)
        .with_max_tokens(self.max_tokens);
        Ok(client)
    }

    /// Build the shared pipeline for this configuration.
    ///
    /// # Errors
    ///
    /// See [`LullabyConfig::build_client`].
    pub fn build_pipeline(&self) -> LullabyResult<Pipeline> {
        let client = self.build_client()?;
        info!(
            model = %self.model,
            base_url = %self.base_url,
            timeout_secs = self.request_timeout.as_secs(),
            "Configured generation pipeline"
        );
        Ok(Pipeline::new(Arc::new(client), self.model.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        LullabyConfig::environment().source(Some(map))
    }

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn test_defaults_with_fallback_key() {
        let config = LullabyConfig::from_sources(None, env(&[]), Some("sk-fallback".into()))
            .expect("Config should load");

        assert_eq!(config.bind().to_string(), "0.0.0.0:8000");
        assert_eq!(config.base_url(), OPENAI_CHAT_COMPLETIONS_URL);
        assert_eq!(config.model(), "gpt-4o-mini");
        assert_eq!(config.api_key(), "sk-fallback");
        assert_eq!(*config.request_timeout(), Duration::from_secs(60));
        assert_eq!(*config.temperature(), None);
        assert_eq!(*config.max_tokens(), None);
        assert!(config.allowed_origins().is_empty());
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        let err = LullabyConfig::from_sources(None, env(&[]), None)
            .expect_err("Config without a key must fail");
        assert!(err.message.contains("API key"));

        let err = LullabyConfig::from_sources(None, env(&[("LULLABY_API_KEY", "  ")]), None)
            .expect_err("Blank key must fail");
        assert!(err.message.contains("API key"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let file = toml_file(
            r#"
            bind = "127.0.0.1:9000"
            model = "gpt-4o"
            api_key = "sk-file"
            temperature = 0.7
            max_tokens = 800
            allowed_origins = ["http://localhost:3000"]
            "#,
        );

        let config = LullabyConfig::from_sources(Some(file.path()), env(&[]), None)
            .expect("Config should load");

        assert_eq!(config.bind().to_string(), "127.0.0.1:9000");
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.api_key(), "sk-file");
        assert_eq!(*config.temperature(), Some(0.7));
        assert_eq!(*config.max_tokens(), Some(800));
        assert_eq!(config.allowed_origins(), &vec!["http://localhost:3000".to_string()]);
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file(
            r#"
            model = "gpt-4o"
            api_key = "sk-file"
            "#,
        );

        let config = LullabyConfig::from_sources(
            Some(file.path()),
            env(&[
                ("LULLABY_MODEL", "env-model"),
                ("LULLABY_API_KEY", "sk-env"),
                ("LULLABY_REQUEST_TIMEOUT_SECS", "5"),
                (
                    "LULLABY_ALLOWED_ORIGINS",
                    "http://a.example,http://b.example",
                ),
            ]),
            Some("sk-fallback".into()),
        )
        .expect("Config should load");

        assert_eq!(config.model(), "env-model");
        assert_eq!(config.api_key(), "sk-env");
        assert_eq!(*config.request_timeout(), Duration::from_secs(5));
        assert_eq!(
            config.allowed_origins(),
            &vec!["http://a.example".to_string(), "http://b.example".to_string()]
        );
    }

    #[test]
    fn test_invalid_bind_is_rejected() {
        let err = LullabyConfig::from_sources(
            None,
            env(&[("LULLABY_BIND", "not-an-address")]),
            Some("sk".into()),
        )
        .expect_err("Bad bind must fail");
        assert!(err.message.contains("bind"));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let file = toml_file("request_timeout_secs = 0\napi_key = \"sk\"\n");
        assert!(LullabyConfig::from_sources(Some(file.path()), env(&[]), None).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.toml");
        assert!(LullabyConfig::from_sources(Some(&path), env(&[]), Some("sk".into())).is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = LullabyConfig::from_sources(None, env(&[]), Some("sk-secret".into()))
            .expect("Config should load");
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_with_bind_replaces_address() {
        let config = LullabyConfig::from_sources(None, env(&[]), Some("sk".into()))
            .expect("Config should load")
            .with_bind("127.0.0.1:4000".parse().expect("valid address"));
        assert_eq!(config.bind().port(), 4000);
    }
}
