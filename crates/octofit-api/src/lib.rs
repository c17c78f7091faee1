// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use octofit_app::{LoadId, Record, ResourceKind, normalize_body};
use reqwest::blocking::Client as HttpClient;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REMOTE_DOMAIN: &str = "app.github.dev";
const REMOTE_PORT: u16 = 8000;

/// Where the backend lives. Built by the caller from config and environment
/// so the loader never reads ambient process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointConfig {
    pub base_url: String,
    pub codespace_name: Option<String>,
    pub remote_domain: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            codespace_name: None,
            remote_domain: DEFAULT_REMOTE_DOMAIN.to_owned(),
        }
    }
}

impl EndpointConfig {
    fn codespace(&self) -> Option<&str> {
        self.codespace_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn is_remote(&self) -> bool {
        self.codespace().is_some()
    }

    /// `https://<codespace>-8000.<domain>/api/<resource>/` when a codespace is
    /// named, otherwise `<base_url>/api/<resource>/`.
    pub fn resolve(&self, kind: ResourceKind) -> Result<Url> {
        let segment = kind.path_segment();
        let raw = match self.codespace() {
            Some(name) => format!(
                "https://{name}-{REMOTE_PORT}.{}/api/{segment}/",
                self.remote_domain.trim_matches('.')
            ),
            None => format!("{}/api/{segment}/", self.base_url.trim_end_matches('/')),
        };
        Url::parse(&raw).with_context(|| format!("build endpoint URL {raw:?}"))
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("server returned {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("cannot reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    endpoints: EndpointConfig,
    http: HttpClient,
}

impl Client {
    pub fn new(endpoints: EndpointConfig, timeout: Duration) -> Result<Self> {
        if endpoints.codespace().is_none() {
            let base = endpoints.base_url.trim();
            if base.is_empty() {
                bail!("api.base_url must not be empty");
            }
            Url::parse(base).with_context(|| format!("api.base_url {base:?} is not a URL"))?;
        }
        if endpoints.codespace().is_some() && endpoints.remote_domain.trim().is_empty() {
            bail!("api.remote_domain must not be empty when a codespace is set");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self { endpoints, http })
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    /// Resolves the endpoint for one screen activation.
    pub fn endpoint(&self, kind: ResourceKind) -> Result<Url> {
        let url = self.endpoints.resolve(kind)?;
        if self.endpoints.is_remote() {
            tracing::info!(resource = kind.path_segment(), %url, "endpoint resolved");
        } else {
            tracing::warn!(
                resource = kind.path_segment(),
                %url,
                "no codespace configured; using local API base"
            );
        }
        Ok(url)
    }

    /// One GET against a resolved endpoint, normalized into records.
    pub fn fetch(&self, url: &Url) -> Result<Vec<Record>, LoadError> {
        tracing::debug!(%url, "fetching");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|source| LoadError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| LoadError::Transport {
            url: url.to_string(),
            source,
        })?;
        tracing::trace!(bytes = body.len(), "raw payload received");
        let records = normalize_body(&body).map_err(|source| LoadError::Decode {
            url: url.to_string(),
            source,
        })?;
        tracing::debug!(records = records.len(), "payload normalized");
        Ok(records)
    }

    /// Resolves and fetches inside a `load` span; failures are logged here
    /// and handed back for the screen to collapse into its static message.
    pub fn load(&self, load_id: LoadId, kind: ResourceKind) -> Result<Vec<Record>, LoadFailure> {
        let span = tracing::info_span!("load", resource = kind.path_segment(), load_id);
        let _entered = span.enter();

        let url = self.endpoint(kind).map_err(|error| {
            tracing::error!(error = %format!("{error:#}"), "endpoint resolution failed");
            LoadFailure::Endpoint(format!("{error:#}"))
        })?;

        match self.fetch(&url) {
            Ok(records) => {
                tracing::info!(records = records.len(), "load complete");
                Ok(records)
            }
            Err(error) => {
                match &error {
                    LoadError::Status { status, .. } => {
                        tracing::warn!(status, %error, "load failed");
                    }
                    LoadError::Transport { .. } | LoadError::Decode { .. } => {
                        tracing::error!(%error, "load failed");
                    }
                }
                Err(LoadFailure::Load(error))
            }
        }
    }
}

/// Everything that can stop a screen load, including a bad endpoint.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("{0}")]
    Endpoint(String),
    #[error(transparent)]
    Load(#[from] LoadError),
}
