use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::profile::Profile;
use crate::models::repository_entry::RepositoryEntry;

/// The public REST endpoint for GitHub.
pub const GITHUB_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = "github-profile-explorer";
const ACCEPT: &str = "application/vnd.github+json";

/// Why a single GET did not produce a record.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Where profiles and their repositories come from.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError>;

    async fn fetch_repositories(&self, username: &str)
        -> Result<Vec<RepositoryEntry>, FetchError>;
}

pub struct GitHubService {
    client: Client,
    api_base: String,
}

impl GitHubService {
    pub fn new(client: Client, api_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.api_base, urlencoding::encode(username))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        log::debug!("Making request to {}...", url);
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status { status, body });
        }

        let contents = response.text().await?;
        Ok(serde_json::from_str(&contents)?)
    }
}

#[async_trait::async_trait]
impl ProfileSource for GitHubService {
    async fn fetch_profile(&self, username: &str) -> Result<Profile, FetchError> {
        self.get_json(&self.user_url(username)).await
    }

    async fn fetch_repositories(
        &self,
        username: &str,
    ) -> Result<Vec<RepositoryEntry>, FetchError> {
        let url = format!("{}/repos", self.user_url(username));
        self.get_json(&url).await
    }
}
