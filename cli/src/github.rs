//! GitHub REST v3 client.

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;

use crate::client::{ensure_success, ApiError};

/// Default GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("prbridge/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct User {
    login: String,
}

#[derive(Deserialize)]
struct PullRequest {
    user: User,
}

#[derive(Deserialize)]
struct ReviewRequest {
    #[serde(default)]
    requested_reviewers: Vec<User>,
}

/// Client for one repository.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    repository: String,
    token: String,
}

impl GitHubClient {
    /// Create a client for `owner/repo`.
    pub fn new(
        api_url: impl Into<String>,
        repository: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            repository: repository.into(),
            token: token.into(),
        })
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(AUTHORIZATION, format!("token {}", self.token))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/repos/{}/{}", self.api_url, self.repository, path);
        self.authorized(self.client.request(method, url))
            .header(ACCEPT, "application/vnd.github+json")
    }

    /// Login of the pull request's author.
    pub async fn pull_request_author(&self, number: u64) -> Result<String, ApiError> {
        let response = self
            .request(Method::GET, &format!("pulls/{}", number))
            .send()
            .await?;

        let response = ensure_success(response, &format!("Fetching pull request #{}", number)).await?;
        let pull: PullRequest = response.json().await?;
        Ok(pull.user.login)
    }

    /// Request reviews and return the reviewers now requested.
    pub async fn request_reviewers(
        &self,
        number: u64,
        reviewers: &[String],
    ) -> Result<Vec<String>, ApiError> {
        let response = self
            .request(
                Method::POST,
                &format!("pulls/{}/requested_reviewers", number),
            )
            .json(&serde_json::json!({ "reviewers": reviewers }))
            .send()
            .await?;

        let response = ensure_success(
            response,
            &format!("Requesting reviewers for pull request #{}", number),
        )
        .await?;
        let request: ReviewRequest = response.json().await?;
        Ok(request
            .requested_reviewers
            .into_iter()
            .map(|u| u.login)
            .collect())
    }

    /// Download an image uploaded to a pull request description.
    ///
    /// Attachment URLs redirect to short-lived storage URLs. The redirect
    /// chain is resolved with an authenticated `HEAD`, then the final URL is
    /// fetched.
    pub async fn download_attachment(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let head = self
            .authorized(self.client.head(url))
            .send()
            .await?;
        let head = ensure_success(head, &format!("Resolving {}", url)).await?;
        let final_url = head.url().clone();
        log::debug!("{} resolved to {}", url, final_url);

        let response = self.client.get(final_url).send().await?;
        let response = ensure_success(response, &format!("Downloading {}", url)).await?;
        Ok(response.bytes().await?.to_vec())
    }
}
