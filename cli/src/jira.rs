//! Jira Cloud REST v3 client.

use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use prbridge::AdfDocument;

use crate::client::{ensure_status, ensure_success, ApiError};

/// A comment created on an issue.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostedComment {
    pub id: String,
}

#[derive(Serialize)]
struct CommentBody<'a> {
    body: &'a AdfDocument,
}

#[derive(Deserialize)]
struct UploadedAttachment {
    content: String,
}

#[derive(Deserialize)]
struct NamedVersion {
    name: String,
}

#[derive(Deserialize)]
struct IssueResponse {
    fields: IssueFields,
}

#[derive(Deserialize)]
struct IssueFields {
    #[serde(rename = "fixVersions", default)]
    fix_versions: Vec<NamedVersion>,
}

#[derive(Deserialize)]
struct VersionPage {
    values: Vec<NamedVersion>,
}

/// Client for the subset of the Jira API used by the workflows.
#[derive(Debug, Clone)]
pub struct JiraClient {
    client: Client,
    base_url: String,
    email: String,
    api_token: String,
}

impl JiraClient {
    /// Create a client authenticating with `email:api_token`.
    pub fn new(
        base_url: impl Into<String>,
        email: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            email: email.into(),
            api_token: api_token.into(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/api/3/{}", self.base_url, path))
            .basic_auth(&self.email, Some(&self.api_token))
            .header(ACCEPT, "application/json")
    }

    /// Post an ADF document as a comment on an issue.
    pub async fn post_comment(
        &self,
        issue_key: &str,
        body: &AdfDocument,
    ) -> Result<PostedComment, ApiError> {
        let response = self
            .request(Method::POST, &format!("issue/{}/comment", issue_key))
            .json(&CommentBody { body })
            .send()
            .await?;

        let response = ensure_success(response, &format!("Commenting on {}", issue_key)).await?;
        Ok(response.json().await?)
    }

    /// Upload a file to an issue and return its download link.
    pub async fn upload_attachment(
        &self,
        issue_key: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ApiError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("image/jpeg")?;

        let response = self
            .request(Method::POST, &format!("issue/{}/attachments", issue_key))
            .header("X-Atlassian-Token", "no-check")
            .multipart(Form::new().part("file", part))
            .send()
            .await?;

        let response = ensure_success(
            response,
            &format!("Uploading {} to {}", file_name, issue_key),
        )
        .await?;

        let uploaded: Vec<UploadedAttachment> = response.json().await?;
        uploaded
            .into_iter()
            .next()
            .map(|a| a.content)
            .ok_or_else(|| {
                ApiError::UnexpectedResponse(format!(
                    "attachment upload to {} returned no attachments",
                    issue_key
                ))
            })
    }

    /// Names of the fixVersions currently set on an issue.
    pub async fn fix_versions(&self, issue_key: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .request(Method::GET, &format!("issue/{}", issue_key))
            .send()
            .await?;

        let response = ensure_success(response, &format!("Fetching {}", issue_key)).await?;
        let issue: IssueResponse = response.json().await?;
        Ok(issue.fields.fix_versions.into_iter().map(|v| v.name).collect())
    }

    /// Names of a project's unreleased versions, ordered by name.
    pub async fn unreleased_versions(&self, project_key: &str) -> Result<Vec<String>, ApiError> {
        let response = self
            .request(Method::GET, &format!("project/{}/version", project_key))
            .query(&[("status", "unreleased"), ("orderBy", "name")])
            .send()
            .await?;

        let response = ensure_success(
            response,
            &format!("Fetching unreleased versions of {}", project_key),
        )
        .await?;
        let page: VersionPage = response.json().await?;
        Ok(page.values.into_iter().map(|v| v.name).collect())
    }

    /// Replace an issue's fixVersions with a single version.
    ///
    /// Jira answers a successful edit with 204; any other status fails.
    pub async fn set_fix_version(&self, issue_key: &str, version: &str) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "update": {
                "fixVersions": [{"set": [{"name": version}]}]
            }
        });

        let response = self
            .request(Method::PUT, &format!("issue/{}", issue_key))
            .json(&body)
            .send()
            .await?;

        ensure_status(
            response,
            StatusCode::NO_CONTENT,
            &format!("Updating fixVersion of {}", issue_key),
        )
        .await?;
        Ok(())
    }
}
