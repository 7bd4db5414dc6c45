//! HTTP(S) transport

use crate::config::schema::FetchConfig;
use crate::error::{StageError, StageResult};
use crate::fetch::{BundleReader, Fetcher};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Downloads bundles over HTTP(S) with a blocking agent
pub struct HttpFetcher {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build()
            .into();

        Self {
            agent,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Send the request and hand back the response body unread.
    ///
    /// Status errors surface here; failures while reading the body surface
    /// later, during extraction.
    fn open(agent: &ureq::Agent, user_agent: &str, url: &str) -> StageResult<BundleReader> {
        let response = agent
            .get(url)
            .header("User-Agent", user_agent)
            .call()
            .map_err(|e| StageError::fetch(url, e))?;

        Ok(Box::new(response.into_body().into_reader()))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, reference: &str) -> StageResult<BundleReader> {
        debug!(url = %reference, "downloading buildpack");

        let agent = self.agent.clone();
        let user_agent = self.user_agent.clone();
        let url = reference.to_string();
        let body = tokio::task::spawn_blocking(move || Self::open(&agent, &user_agent, &url))
            .await
            .map_err(|e| StageError::Internal(format!("download task failed: {e}")))??;

        debug!(url = %reference, "response received, streaming body");
        Ok(body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
