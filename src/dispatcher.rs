//! One-shot call to the description service.

use serde::{Deserialize, Serialize};
use std::{future::Future, pin::Pin, time::Duration};

use crate::{
    error::{DispatchError, RemoteFailure},
    form::FormState,
};

pub const GENERATE_PATH: &str = "/api/generate-description";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    pub product_name: String,
    #[serde(default)]
    pub product_features: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionResponse {
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub description: String,
    pub source: Source,
}

pub const OFFLINE_NOTICE: &str = "Using offline mode - AI service temporarily unavailable";

impl GenerationResult {
    pub fn remote(description: impl Into<String>) -> Self {
        Self { description: description.into(), source: Source::Remote }
    }

    pub fn fallback(description: impl Into<String>) -> Self {
        Self { description: description.into(), source: Source::Fallback }
    }

    /// Notice to show next to the text, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self.source {
            Source::Remote => None,
            Source::Fallback => Some(OFFLINE_NOTICE),
        }
    }
}

pub trait DescriptionClient: Send + Sync {
    fn request<'a>(
        &'a self,
        req: &'a DescriptionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, RemoteFailure>> + Send + 'a>>;
    fn name(&self) -> &'static str;
}

pub struct HttpDescriptionClient {
    client: reqwest::Client,
    url: String,
}

impl HttpDescriptionClient {
    /// `base_url` is the service root, e.g. `http://localhost:5000`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: format!("{}{}", base_url.trim_end_matches('/'), GENERATE_PATH) })
    }

    pub fn url(&self) -> &str { &self.url }
}

impl DescriptionClient for HttpDescriptionClient {
    fn request<'a>(
        &'a self,
        req: &'a DescriptionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, RemoteFailure>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self
                .client
                .post(&self.url)
                .json(req)
                .send()
                .await
                .map_err(|e| RemoteFailure::Unreachable(e.to_string()))?;

            let status = resp.status();
            if !status.is_success() {
                return Err(RemoteFailure::Status(status.as_u16()));
            }

            let body = resp
                .bytes()
                .await
                .map_err(|e| RemoteFailure::Unreachable(e.to_string()))?;
            let parsed: DescriptionResponse = serde_json::from_slice(&body)
                .map_err(|e| RemoteFailure::Malformed(e.to_string()))?;
            Ok(parsed.description)
        })
    }

    fn name(&self) -> &'static str { "http" }
}

/// Validate the form, then make exactly one request. No retries.
pub async fn dispatch(
    client: &dyn DescriptionClient,
    form: &FormState,
) -> Result<GenerationResult, DispatchError> {
    let req = form.validate()?;
    tracing::debug!(
        client = client.name(),
        tone = %req.tone,
        language = %req.language,
        "requesting description"
    );
    let description = client.request(&req).await?;
    Ok(GenerationResult::remote(description))
}
