//! Configuration from an optional YAML file and `DESCGEN_*` environment variables.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientCfg {
    /// Service root; the generate path is appended.
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for ClientCfg {
    fn default() -> Self {
        Self { endpoint: "http://localhost:5000".into(), timeout_secs: 30 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderCfg {
    pub kind: String, // "mock" | "openai" | "azure"
    pub model: Option<String>,
    pub api_key_env: Option<String>,
    /// Azure resource URL, e.g. `https://my-res.openai.azure.com`.
    pub endpoint: Option<String>,
    pub deployment: Option<String>,
    pub api_version: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for ProviderCfg {
    fn default() -> Self {
        Self {
            kind: "mock".into(),
            model: None,
            api_key_env: None,
            endpoint: None,
            deployment: None,
            api_version: None,
            max_tokens: None,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerCfg {
    pub bind: String,
    pub provider: ProviderCfg,
}

impl Default for ServerCfg {
    fn default() -> Self {
        Self { bind: "127.0.0.1:5000".into(), provider: ProviderCfg::default() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppCfg {
    pub client: ClientCfg,
    pub server: ServerCfg,
    pub out_dir: PathBuf,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self { client: ClientCfg::default(), server: ServerCfg::default(), out_dir: PathBuf::from(".") }
    }
}

impl AppCfg {
    pub fn from_yaml(txt: &str) -> Result<Self> {
        serde_yaml::from_str(txt).context("Failed to parse config YAML")
    }

    /// Reads the YAML file if given, then applies `DESCGEN_*` overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut cfg = match path {
            Some(p) => {
                let txt = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config file: {}", p.display()))?;
                Self::from_yaml(&txt)?
            }
            None => Self::default(),
        };
        cfg.apply_env(|k| std::env::var(k).ok())?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(v) = var("DESCGEN_ENDPOINT") { self.client.endpoint = v; }
        if let Some(v) = var("DESCGEN_TIMEOUT_SECS") {
            self.client.timeout_secs = v.parse().with_context(|| format!("DESCGEN_TIMEOUT_SECS is not a number: {v}"))?;
        }
        if let Some(v) = var("DESCGEN_BIND") { self.server.bind = v; }
        if let Some(v) = var("DESCGEN_PROVIDER") { self.server.provider.kind = v; }
        if let Some(v) = var("DESCGEN_MODEL") { self.server.provider.model = Some(v); }
        if let Some(v) = var("DESCGEN_OUT_DIR") { self.out_dir = PathBuf::from(v); }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = AppCfg::from_yaml("client:\n  timeout_secs: 5\nserver:\n  provider:\n    kind: azure\n    deployment: copy\n").unwrap();
        assert_eq!(cfg.client.timeout_secs, 5);
        assert_eq!(cfg.client.endpoint, "http://localhost:5000");
        assert_eq!(cfg.server.bind, "127.0.0.1:5000");
        assert_eq!(cfg.server.provider.kind, "azure");
        assert_eq!(cfg.server.provider.deployment.as_deref(), Some("copy"));
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = [
            ("DESCGEN_ENDPOINT", "http://svc:8080"),
            ("DESCGEN_PROVIDER", "openai"),
            ("DESCGEN_OUT_DIR", "/tmp/out"),
        ]
        .into_iter()
        .collect();
        let mut cfg = AppCfg::default();
        cfg.apply_env(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.client.endpoint, "http://svc:8080");
        assert_eq!(cfg.server.provider.kind, "openai");
        assert_eq!(cfg.out_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let mut cfg = AppCfg::default();
        assert!(cfg.apply_env(|k| (k == "DESCGEN_TIMEOUT_SECS").then(|| "soon".to_string())).is_err());
    }
}
