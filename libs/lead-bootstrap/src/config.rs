//! Layered application configuration.
//!
//! Sources are merged in this order, later ones winning:
//! 1. built-in defaults
//! 2. YAML file (when `--config` is given)
//! 3. environment variables prefixed with `APP__`, nested with `__`
//!    (e.g. `APP__SERVER__PORT=8080`)
//! 4. CLI overrides via [`AppConfig::apply_cli_overrides`]
//!
//! Module sections live under `modules.<name>.config` and are read with
//! [`AppConfig::module_config_or_default`].

use std::collections::HashMap;
use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const ENV_PREFIX: &str = "APP__";
const REDACTED: &str = "[REDACTED]";

/// Configuration error
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("module '{module}' config must be an object")]
    InvalidModuleStructure { module: String },
    #[error("invalid config for module '{module}': {source}")]
    InvalidModuleConfig {
        module: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_json::Error),
}

/// Deployment environment. Controls whether error detail may reach clients.
///
/// Defaults to `production`; development detail must be opted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "stage")]
    Staging,
    #[default]
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            environment: Environment::default(),
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `lead_capture=debug,info`.
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    /// Raw per-module sections: `modules.<name> = { config: { ... } }`.
    pub modules: HashMap<String, serde_json::Value>,
}

impl AppConfig {
    /// Load defaults, then the optional YAML file, then `APP__*` environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] when a source cannot be parsed or the merged
    /// result does not fit [`AppConfig`].
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }

    /// # Errors
    /// Returns [`ConfigError::Load`] when extraction fails.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        figment
            .extract()
            .map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Apply `--port` and `-v` style overrides from the command line.
    pub fn apply_cli_overrides(&mut self, port: Option<u16>, verbose: u8) {
        if let Some(port) = port {
            self.server.port = port;
        }
        match verbose {
            0 => {}
            1 => "info".clone_into(&mut self.logging.level),
            2 => "debug".clone_into(&mut self.logging.level),
            _ => "trace".clone_into(&mut self.logging.level),
        }
    }

    /// Typed config for a module, falling back to `T::default()` when the
    /// module or its `config` section is absent.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the section exists but is malformed.
    pub fn module_config_or_default<T: DeserializeOwned + Default>(
        &self,
        module_name: &str,
    ) -> Result<T, ConfigError> {
        let Some(module_raw) = self.modules.get(module_name) else {
            return Ok(T::default());
        };

        let obj = module_raw
            .as_object()
            .ok_or_else(|| ConfigError::InvalidModuleStructure {
                module: module_name.to_owned(),
            })?;

        let Some(config_section) = obj.get("config") else {
            return Ok(T::default());
        };

        serde_json::from_value(config_section.clone()).map_err(|e| {
            ConfigError::InvalidModuleConfig {
                module: module_name.to_owned(),
                source: e,
            }
        })
    }

    /// Pretty JSON of the effective configuration with secret-looking values masked.
    ///
    /// # Errors
    /// Returns [`ConfigError::Render`] if serialization fails.
    pub fn to_redacted_json(&self) -> Result<String, ConfigError> {
        let mut value = serde_json::to_value(self)?;
        redact(&mut value);
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

fn is_secret_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    ["key", "secret", "password", "token"]
        .iter()
        .any(|needle| key.contains(needle))
}

fn redact(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (k, v) in map.iter_mut() {
                if is_secret_key(k) && !v.is_null() {
                    *v = serde_json::Value::String(REDACTED.to_owned());
                } else {
                    redact(v);
                }
            }
        }
        serde_json::Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}
