//! Configuration management.
//!
//! Settings come from an optional TOML file, then environment variables with
//! the `SCHOLAR_BADGES_` prefix (nested keys joined by `__`), then built-in
//! defaults for anything left unset.
//!
//! # Configuration File Format
//!
//! ```toml
//! [profiles]
//! scholar_url = "https://scholar.google.com/citations?user=Wr7nQZAAAAAJ&hl=en"
//! orcid_id = "0000-0001-9302-3364"
//! researchgate_url = "https://www.researchgate.net/profile/Jane-Doe"
//!
//! [endpoints]
//! orcid_api = "https://pub.orcid.org"
//! badge_service = "https://img.shields.io/static/v1"
//!
//! [http]
//! timeout_seconds = 30
//!
//! [output]
//! directory = "."
//! readme = "README.md"
//! journals_file = "journals.json"
//! title = "Research Metrics"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! Environment example: `SCHOLAR_BADGES_PROFILES__ORCID_ID=0000-0002-1825-0097`.

mod journals;

pub use journals::JournalTable;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::utils::{validate_orcid_id, validate_url, ValidationError};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "SCHOLAR_BADGES";

/// Config file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "scholar-badges.toml";

const DEFAULT_SCHOLAR_URL: &str =
    "https://scholar.google.com/citations?user=Wr7nQZAAAAAJ&hl=en&oi=ao";
const DEFAULT_ORCID_ID: &str = "0000-0001-9302-3364";
const DEFAULT_BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.3";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Profiles to collect metrics for
    #[serde(default)]
    pub profiles: ProfilesConfig,

    /// Remote service base URLs
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Output locations
    #[serde(default)]
    pub output: OutputConfig,

    /// ResearchGate markup selectors
    #[serde(default)]
    pub researchgate: ResearchGateConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Profile identifiers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Google Scholar profile page
    #[serde(default = "default_scholar_url")]
    pub scholar_url: String,

    /// ORCID iD, e.g. `0000-0002-1825-0097`
    #[serde(default = "default_orcid_id")]
    pub orcid_id: String,

    /// ResearchGate profile page; the ResearchGate fetch is skipped when unset
    #[serde(default)]
    pub researchgate_url: Option<String>,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            scholar_url: default_scholar_url(),
            orcid_id: default_orcid_id(),
            researchgate_url: None,
        }
    }
}

fn default_scholar_url() -> String {
    DEFAULT_SCHOLAR_URL.to_string()
}

fn default_orcid_id() -> String {
    DEFAULT_ORCID_ID.to_string()
}

/// Remote service endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointsConfig {
    /// ORCID public API base (without the `/v3.0` path)
    #[serde(default = "default_orcid_api")]
    pub orcid_api: String,

    /// Static badge endpoint
    #[serde(default = "default_badge_service")]
    pub badge_service: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            orcid_api: default_orcid_api(),
            badge_service: default_badge_service(),
        }
    }
}

fn default_orcid_api() -> String {
    "https://pub.orcid.org".to_string()
}

fn default_badge_service() -> String {
    crate::render::SHIELDS_STATIC_URL.to_string()
}

/// HTTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent sent to the HTML pages (Scholar, ResearchGate)
    #[serde(default = "default_browser_user_agent")]
    pub browser_user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            browser_user_agent: default_browser_user_agent(),
        }
    }
}

fn default_timeout() -> u64 {
    crate::utils::DEFAULT_TIMEOUT_SECS
}

fn default_browser_user_agent() -> String {
    DEFAULT_BROWSER_USER_AGENT.to_string()
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the README and JSON snapshots
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,

    /// README file name inside `directory`
    #[serde(default = "default_readme")]
    pub readme: String,

    /// Whether to write the README at all
    #[serde(default = "default_true")]
    pub write_readme: bool,

    /// ISSN lookup table; the built-in table is used when the file is absent
    #[serde(default = "default_journals_file")]
    pub journals_file: Option<PathBuf>,

    /// README heading
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            readme: default_readme(),
            write_readme: true,
            journals_file: default_journals_file(),
            title: default_title(),
        }
    }
}

impl OutputConfig {
    /// Full path of the README file
    pub fn readme_path(&self) -> PathBuf {
        self.directory.join(&self.readme)
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_readme() -> String {
    "README.md".to_string()
}

fn default_true() -> bool {
    true
}

fn default_journals_file() -> Option<PathBuf> {
    Some(PathBuf::from("journals.json"))
}

fn default_title() -> String {
    "Research Metrics".to_string()
}

/// CSS selectors for ResearchGate profile statistics.
///
/// Each stat is an `item` element holding a `label` and a `value` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchGateConfig {
    #[serde(default = "default_rg_item")]
    pub item_selector: String,

    #[serde(default = "default_rg_label")]
    pub label_selector: String,

    #[serde(default = "default_rg_value")]
    pub value_selector: String,
}

impl Default for ResearchGateConfig {
    fn default() -> Self {
        Self {
            item_selector: default_rg_item(),
            label_selector: default_rg_label(),
            value_selector: default_rg_value(),
        }
    }
}

fn default_rg_item() -> String {
    "div.nova-legacy-o-stack__item".to_string()
}

fn default_rg_label() -> String {
    "div.nova-legacy-e-text--size-m".to_string()
}

fn default_rg_value() -> String {
    "div.nova-legacy-e-text--size-xl".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `json` for structured output, anything else for plain text
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Check profile identifiers and endpoint URLs
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &'static str| move |source: ValidationError| ConfigError::Invalid { field, source };

        validate_url(&self.profiles.scholar_url).map_err(invalid("profiles.scholar_url"))?;
        validate_orcid_id(&self.profiles.orcid_id).map_err(invalid("profiles.orcid_id"))?;
        if let Some(url) = &self.profiles.researchgate_url {
            validate_url(url).map_err(invalid("profiles.researchgate_url"))?;
        }
        validate_url(&self.endpoints.orcid_api).map_err(invalid("endpoints.orcid_api"))?;
        validate_url(&self.endpoints.badge_service).map_err(invalid("endpoints.badge_service"))?;

        Ok(())
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

/// Load configuration from an optional file plus environment overrides.
///
/// The result is validated before it is returned.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    load_config_with_env(path, environment())
}

/// `SCHOLAR_BADGES_SECTION__KEY` environment source
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

fn load_config_with_env(
    path: Option<&Path>,
    env: config::Environment,
) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).format(config::FileFormat::Toml));
    }

    let settings = builder.add_source(env).build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Find a config file in the working directory or the user config directory
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("scholar-badges").join("config.toml"))
        .filter(|path| path.exists())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid {field}: {source}")]
    Invalid {
        field: &'static str,
        #[source]
        source: ValidationError,
    },

    #[error("Failed to read journal table {path}: {message}")]
    Journals { path: PathBuf, message: String },

    #[error("Serialize error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.profiles.orcid_id, "0000-0001-9302-3364");
        assert!(config.profiles.researchgate_url.is_none());
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.output.readme_path(), PathBuf::from("./README.md"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(
            &path,
            r#"
[profiles]
scholar_url = "https://scholar.google.com/citations?user=abc"
orcid_id = "0000-0002-1825-0097"
researchgate_url = "https://www.researchgate.net/profile/Jane-Doe"

[http]
timeout_seconds = 5

[output]
directory = "/tmp/metrics"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.profiles.orcid_id, "0000-0002-1825-0097");
        assert_eq!(
            config.profiles.researchgate_url.as_deref(),
            Some("https://www.researchgate.net/profile/Jane-Doe")
        );
        assert_eq!(config.http.timeout_seconds, 5);
        assert_eq!(config.output.directory, PathBuf::from("/tmp/metrics"));
        // Unset sections keep their defaults
        assert_eq!(config.endpoints.orcid_api, "https://pub.orcid.org");
        assert_eq!(config.output.readme, "README.md");
    }

    #[test]
    fn test_env_override() {
        let vars = [
            ("SCHOLAR_BADGES_OUTPUT__TITLE", "Metrics from env"),
            ("SCHOLAR_BADGES_PROFILES__ORCID_ID", "0000-0002-1825-0097"),
            ("UNRELATED_OUTPUT__TITLE", "ignored"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = load_config_with_env(None, environment().source(Some(vars))).unwrap();
        assert_eq!(config.output.title, "Metrics from env");
        assert_eq!(config.profiles.orcid_id, "0000-0002-1825-0097");
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[output]\ntitle = \"From file\"\nreadme = \"METRICS.md\"\n").unwrap();

        let vars = [("SCHOLAR_BADGES_OUTPUT__TITLE", "From env")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let config = load_config_with_env(Some(&path), environment().source(Some(vars))).unwrap();
        assert_eq!(config.output.title, "From env");
        assert_eq!(config.output.readme, "METRICS.md");
    }

    #[test]
    fn test_invalid_orcid_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[profiles]\norcid_id = \"1234\"\n").unwrap();

        let result = load_config(Some(&path));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "profiles.orcid_id",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file_is_error() {
        let path = PathBuf::from("/nonexistent/scholar-badges.toml");
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.profiles.researchgate_url = Some("https://www.researchgate.net/profile/X".into());

        let rendered = config.to_toml().unwrap();
        assert!(rendered.contains("[profiles]"));
        assert!(rendered.contains("researchgate_url"));

        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(
            parsed.profiles.researchgate_url,
            config.profiles.researchgate_url
        );
    }
}
