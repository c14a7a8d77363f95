//! Course grading backend client.
//!
//! Fetches the flat, ordered assignment-result stream. The backend is the
//! source of truth for which assignments exist; retrieval order is the
//! processing order used by the merge engine downstream.

use reqwest::Client;
use std::time::Duration;
use tracing::{info, instrument};
use url::Url;

use courseboard_shared::{AssignmentResult, CourseConfig, CourseboardError, Result};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("Courseboard/", env!("CARGO_PKG_VERSION"));

/// Client over the course backend API.
pub struct CourseClient {
    client: Client,
    api_base: Url,
    api_key: String,
}

impl CourseClient {
    /// Create a client from config, reading the API key from the configured
    /// env var. The key is required.
    pub fn new(config: &CourseConfig) -> Result<Self> {
        let api_key = std::env::var(&config.token_env).map_err(|_| {
            CourseboardError::config(format!(
                "course API key not found in {} env var",
                config.token_env
            ))
        })?;
        Self::with_base(&config.api_base, api_key)
    }

    /// Create a client against an explicit API base URL.
    pub fn with_base(api_base: &str, api_key: String) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| CourseboardError::config(format!("invalid course API base: {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CourseboardError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base,
            api_key,
        })
    }

    /// Fetch all assignment results, in the backend's retrieval order.
    #[instrument(skip(self))]
    pub async fn assignment_results(&self) -> Result<Vec<AssignmentResult>> {
        let url = self
            .api_base
            .join("assignment-results")
            .map_err(|e| CourseboardError::config(format!("invalid endpoint: {e}")))?;

        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| CourseboardError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CourseboardError::Network(format!("{url}: HTTP {status}")));
        }

        let results: Vec<AssignmentResult> = response
            .json()
            .await
            .map_err(|e| CourseboardError::validation(format!("{url}: bad payload: {e}")))?;

        info!(count = results.len(), "fetched assignment results");
        Ok(results)
    }
}
