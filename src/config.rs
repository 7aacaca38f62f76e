// Runtime configuration for the request form.
// Layers: built-in defaults, then an optional TOML file, then RPC_FORM_* env vars.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::{FormError, FormResult};
use crate::method::RpcMethod;

/// Where the bridge listens unless told otherwise.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9000/jsonrpc";
pub const DEFAULT_CONFIG_FILE: &str = "rpc_form.toml";
pub const ENV_PREFIX: &str = "RPC_FORM_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    pub endpoint: String,
    /// Unset means the request waits for as long as the network stack lets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub default_method: RpcMethod,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for FormConfig {
    fn default() -> Self {
        FormConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            default_method: RpcMethod::default(),
            log_level: default_log_level(),
        }
    }
}

impl FormConfig {
    /// Parsed endpoint; only http and https are accepted.
    pub fn endpoint_url(&self) -> FormResult<Url> {
        let url = Url::parse(self.endpoint.trim())
            .map_err(|e| FormError::config(format!("invalid endpoint '{}': {e}", self.endpoint)))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(FormError::config(format!(
                "endpoint scheme must be http or https, got '{other}'"
            ))),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn log_level(&self) -> FormResult<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| FormError::config(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn validate(&self) -> FormResult<()> {
        self.endpoint_url()?;
        self.log_level()?;
        if self.timeout_secs == Some(0) {
            return Err(FormError::config("timeout_secs must be greater than zero"));
        }
        Ok(())
    }
}

/// Build the layered figment without extracting it.
pub fn figment_for(path: Option<&Path>) -> Figment {
    let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));

    Figment::from(Serialized::defaults(FormConfig::default()))
        .merge(Toml::file(file))
        .merge(Env::prefixed(ENV_PREFIX))
}

pub fn load_config(path: Option<&Path>) -> FormResult<FormConfig> {
    if let Some(explicit) = path {
        if !explicit.exists() {
            return Err(FormError::config(format!(
                "config file not found: {}",
                explicit.display()
            )));
        }
    }

    let config: FormConfig = figment_for(path)
        .extract()
        .map_err(|e| FormError::config(e.to_string()))?;

    config.validate()?;
    Ok(config)
}
