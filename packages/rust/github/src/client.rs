//! GitHub REST client for pull requests and public profiles.
//!
//! Thin fetch collaborator: it materializes upstream records into memory and
//! surfaces HTTP failures as errors. Rate-limit recovery and retries are out
//! of scope; a non-2xx response fails the call.

use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, instrument};
use url::Url;

use courseboard_shared::{
    CourseboardError, GithubConfig, ProfileRecord, PullRequestRecord, Result,
};

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("Courseboard/", env!("CARGO_PKG_VERSION"));

/// GitHub list endpoints page size.
const PER_PAGE: usize = 100;

/// Client over the GitHub REST API.
pub struct GithubClient {
    client: Client,
    api_base: Url,
    token: Option<String>,
}

impl GithubClient {
    /// Create a client from config, reading the token from the configured
    /// env var. A missing token is allowed (public data, lower rate limit).
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let token = std::env::var(&config.token_env).ok().filter(|t| !t.is_empty());
        Self::with_base(&config.api_base, token)
    }

    /// Create a client against an explicit API base URL.
    pub fn with_base(api_base: &str, token: Option<String>) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| CourseboardError::config(format!("invalid GitHub API base: {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| CourseboardError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base,
            token,
        })
    }

    /// Fetch all pull requests for `org/repo`, every state, in API order.
    ///
    /// Pages of [`PER_PAGE`] are concatenated until a short page is seen.
    #[instrument(skip(self))]
    pub async fn list_pulls(&self, org: &str, repo: &str) -> Result<Vec<PullRequestRecord>> {
        let mut pulls: Vec<PullRequestRecord> = Vec::new();
        let mut page = 1usize;

        loop {
            let mut url = self.endpoint(&format!("repos/{org}/{repo}/pulls"))?;
            url.query_pairs_mut()
                .append_pair("state", "all")
                .append_pair("per_page", &PER_PAGE.to_string())
                .append_pair("page", &page.to_string());

            let batch: Vec<PullRequestRecord> = self.get_json(url).await?;
            let batch_len = batch.len();
            debug!(page, count = batch_len, "fetched pulls page");
            pulls.extend(batch);

            if batch_len < PER_PAGE {
                break;
            }
            page += 1;
        }

        info!(org, repo, count = pulls.len(), "fetched pull requests");
        Ok(pulls)
    }

    /// Fetch the public profile for `login`.
    #[instrument(skip(self))]
    pub async fn get_profile(&self, login: &str) -> Result<ProfileRecord> {
        let url = self.endpoint(&format!("users/{login}"))?;
        self.get_json(url).await
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.api_base
            .join(path)
            .map_err(|e| CourseboardError::config(format!("invalid endpoint {path}: {e}")))
    }

    /// GET a JSON payload, attaching the bearer token when configured.
    ///
    /// Malformed payloads are a fatal contract violation (Validation), not
    /// something the pipeline papers over.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CourseboardError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CourseboardError::Network(format!("{url}: HTTP {status}")));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| CourseboardError::validation(format!("{url}: bad payload: {e}")))
    }
}
