//! Backends the description service can generate text with.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{future::Future, pin::Pin, sync::Arc};
use thiserror::Error;

use crate::{config::ProviderCfg, dispatcher::DescriptionRequest, prompts::DescriptionPrompt, templates};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("upstream rate limited")]
    RateLimited,
    #[error("upstream http error: {0}")]
    Http(String),
    #[error("provider error: {0}")]
    Fatal(String),
}

pub type ProviderFuture<'a> = Pin<Box<dyn Future<Output = Result<String, ProviderError>> + Send + 'a>>;

/// Server-side source of description text.
pub trait DescriptionProvider: Send + Sync {
    fn generate<'a>(&'a self, req: &'a DescriptionRequest) -> ProviderFuture<'a>;
    fn name(&self) -> &'static str;
}

/// Deterministic offline provider backed by the template table.
pub struct MockProvider;

impl DescriptionProvider for MockProvider {
    fn generate<'a>(&'a self, req: &'a DescriptionRequest) -> ProviderFuture<'a> {
        Box::pin(async move {
            Ok(templates::render(&req.language, &req.tone, &req.product_name, &req.product_features))
        })
    }

    fn name(&self) -> &'static str { "mock" }
}

enum ChatAuth {
    Bearer(String),
    AzureKey(String),
}

/// OpenAI-compatible chat completions, either api.openai.com or an Azure deployment.
pub struct ChatProvider {
    client: reqwest::Client,
    url: String,
    auth: ChatAuth,
    model: Option<String>,
    max_tokens: u32,
    temperature: f32,
    name: &'static str,
}

pub const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const AZURE_API_VERSION: &str = "2024-06-01";

impl ChatProvider {
    pub fn openai(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: OPENAI_URL.into(),
            auth: ChatAuth::Bearer(api_key),
            model: Some(model),
            max_tokens: 300,
            temperature: 0.7,
            name: "openai",
        }
    }

    pub fn azure(api_key: String, endpoint: &str, deployment: &str, api_version: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: format!(
                "{}/openai/deployments/{deployment}/chat/completions?api-version={api_version}",
                endpoint.trim_end_matches('/')
            ),
            auth: ChatAuth::AzureKey(api_key),
            model: None,
            max_tokens: 300,
            temperature: 0.7,
            name: "azure",
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_limits(mut self, max_tokens: Option<u32>, temperature: Option<f32>) -> Self {
        if let Some(m) = max_tokens { self.max_tokens = m; }
        if let Some(t) = temperature { self.temperature = t; }
        self
    }
}

#[derive(Serialize)]
struct ChatReq<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: Vec<Msg<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MsgOwned,
}

#[derive(Deserialize)]
struct MsgOwned {
    content: Option<String>,
}

impl DescriptionProvider for ChatProvider {
    fn generate<'a>(&'a self, req: &'a DescriptionRequest) -> ProviderFuture<'a> {
        Box::pin(async move {
            let prompt = DescriptionPrompt::for_request(req);
            let body = ChatReq {
                model: self.model.as_deref(),
                max_tokens: self.max_tokens,
                temperature: self.temperature,
                messages: vec![
                    Msg { role: "system", content: prompt.system },
                    Msg { role: "user", content: &prompt.user },
                ],
            };
            let builder = self.client.post(&self.url).json(&body);
            let builder = match &self.auth {
                ChatAuth::Bearer(key) => builder.bearer_auth(key),
                ChatAuth::AzureKey(key) => builder.header("api-key", key),
            };
            let resp = builder.send().await.map_err(|e| ProviderError::Http(e.to_string()))?;

            let status = resp.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }
            if !status.is_success() {
                return Err(ProviderError::Http(format!("status {status}")));
            }

            let parsed: ChatResp = resp.json().await.map_err(|e| ProviderError::Fatal(format!("decode error: {e}")))?;
            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ProviderError::Fatal("empty completion".into()))
        })
    }

    fn name(&self) -> &'static str { self.name }
}

fn api_key(cfg: &ProviderCfg, default_env: &str) -> anyhow::Result<String> {
    let env = cfg.api_key_env.as_deref().unwrap_or(default_env);
    std::env::var(env).with_context(|| format!("{env} not set"))
}

pub fn build_provider(cfg: &ProviderCfg) -> anyhow::Result<Arc<dyn DescriptionProvider>> {
    let provider: Arc<dyn DescriptionProvider> = match cfg.kind.as_str() {
        "mock" => Arc::new(MockProvider),
        "openai" => {
            let key = api_key(cfg, "OPENAI_API_KEY")?;
            let model = cfg.model.clone().unwrap_or_else(|| "gpt-4o-mini".into());
            let mut p = ChatProvider::openai(key, model).with_limits(cfg.max_tokens, cfg.temperature);
            if let Some(url) = &cfg.endpoint {
                p = p.with_url(url.clone());
            }
            Arc::new(p)
        }
        "azure" => {
            let key = api_key(cfg, "AZURE_OPENAI_API_KEY")?;
            let endpoint = cfg.endpoint.clone()
                .or_else(|| std::env::var("AZURE_OPENAI_ENDPOINT").ok())
                .context("azure provider needs `endpoint` or AZURE_OPENAI_ENDPOINT")?;
            let deployment = cfg.deployment.clone()
                .or_else(|| cfg.model.clone())
                .context("azure provider needs `deployment`")?;
            let version = cfg.api_version.as_deref().unwrap_or(AZURE_API_VERSION);
            Arc::new(ChatProvider::azure(key, &endpoint, &deployment, version).with_limits(cfg.max_tokens, cfg.temperature))
        }
        other => anyhow::bail!("unknown provider kind '{other}' (expected mock, openai or azure)"),
    };
    Ok(provider)
}
