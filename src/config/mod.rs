use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{DietError, Result};

pub const ENV_ENDPOINT: &str = "DIETLY_ENDPOINT";
pub const ENV_API_KEY: &str = "DIETLY_API_KEY";
pub const ENV_MODEL: &str = "DIETLY_MODEL";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Full generateContent URL. Opaque: may already carry the key.
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_base: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-2.0-flash".into(),
        }
    }
}

impl Config {
    /// Defaults overlaid by the optional TOML file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).map_err(|e| DietError::Config(e.to_string()))?;
        toml::from_str(&src)
            .map_err(|e| DietError::Config(format!("{}: {e}", path.display())))
    }

    /// Environment values win over file values; empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |k: &str| lookup(k).filter(|v| !v.trim().is_empty());
        if let Some(v) = get(ENV_ENDPOINT) {
            self.endpoint = Some(v);
        }
        if let Some(v) = get(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = get(ENV_MODEL) {
            self.model = v;
        }
    }

    /// The URL requests go to. A key is required unless the endpoint was
    /// given explicitly.
    pub fn resolved_endpoint(&self) -> Result<String> {
        if let Some(ep) = &self.endpoint {
            return Ok(ep.clone());
        }
        if self.api_key.is_none() {
            return Err(DietError::Config(format!(
                "no credential: set {ENV_API_KEY} or {ENV_ENDPOINT}"
            )));
        }
        Ok(format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        ))
    }
}
