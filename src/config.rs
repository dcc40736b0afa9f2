use serde::{Deserialize, Serialize};

use std::{env, fmt, fs, path::Path, time::Duration};

const DEFAULT_PORT: u16 = 9090;
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub port: u16,
    pub gemini: GeminiConfig,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    /// Upper bound for a single `generateContent` call
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,
}

/// Flat shape read from the process environment.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_api_base")]
    gemini_api_base: String,
    #[serde(default = "default_model")]
    gemini_model: String,
    gemini_api_key: String,
    #[serde(default = "default_timeout", with = "humantime_serde")]
    gemini_timeout: Duration,
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

impl GeminiConfig {
    /// Full `generateContent` URL, without the key query parameter.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

// Keep the key out of logs
impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl From<EnvConfig> for Config {
    fn from(env: EnvConfig) -> Self {
        Self {
            port: env.port,
            gemini: GeminiConfig {
                api_base: env.gemini_api_base,
                model: env.gemini_model,
                api_key: env.gemini_api_key,
                timeout: env.gemini_timeout,
            },
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_api_key_override(mut self, api_key: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|key| !key.trim().is_empty()) {
            self.gemini.api_key = key;
        }
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.gemini.api_key.trim().is_empty() {
            return Err("Gemini API key must be set (gemini.api_key or GEMINI_API_KEY)".to_string());
        }
        if self.gemini.api_base.trim().is_empty() {
            return Err("Gemini API base URI must not be empty".to_string());
        }
        if self.gemini.timeout.is_zero() {
            return Err("Gemini request timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

pub fn parse_config(contents: &str) -> Result<Config, serde_yaml::Error> {
    serde_yaml::from_str(contents)
}

fn load_from_env<I>(vars: I) -> Result<Config, envy::Error>
where
    I: IntoIterator<Item = (String, String)>,
{
    envy::from_iter::<_, EnvConfig>(vars).map(Config::from)
}

fn load_from_file(config_path: &str) -> Result<Option<Config>, Box<dyn std::error::Error>> {
    // Try env path
    if Path::new(config_path).exists() {
        let contents = fs::read_to_string(config_path)?;
        return Ok(Some(parse_config(&contents)?));
    }

    // Fallback to config.yaml
    if Path::new("config.yaml").exists() {
        tracing::warn!(
            "Config file '{}' not found, falling back to 'config.yaml'",
            config_path
        );
        let contents = fs::read_to_string("config.yaml")?;
        return Ok(Some(parse_config(&contents)?));
    }

    // Fallback to config.example.yaml
    if Path::new("config.example.yaml").exists() {
        tracing::warn!(
            "Config file '{}' and 'config.yaml' not found, falling back to 'config.example.yaml'\
             \n This file should not be used and should be replaced with actual data",
            config_path
        );
        let contents = fs::read_to_string("config.example.yaml")?;
        return Ok(Some(parse_config(&contents)?));
    }

    Ok(None)
}

pub fn load_config() -> Result<Config, Box<dyn std::error::Error>> {
    // Retrieve env variable
    let config_path =
        env::var("EMAIL_REPLY_CONFIG").unwrap_or_else(|_| "config.yaml".to_string());

    let config = if let Some(config) = load_from_file(&config_path)? {
        config
    } else {
        tracing::info!(
            "No config file found, attempting to load configuration from environment variables"
        );
        let config = load_from_env(env::vars()).map_err(|e| {
            format!(
                "Config file not found and environment variables are incomplete. \
                 Tried: '{config_path}', 'config.yaml', 'config.example.yaml', and environment variables. \
                 Error: {e}"
            )
        })?;
        tracing::info!("Successfully loaded configuration from environment variables");
        config
    };

    let config = config.with_api_key_override(env::var("GEMINI_API_KEY").ok());
    config.validate()?;

    Ok(config)
}
