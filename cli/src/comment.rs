//! Posting a converted pull request body to Jira issues.

use thiserror::Error;

use prbridge::{AttachmentRef, Conversion, ResolvedAttachment};

use crate::client::ApiError;
use crate::github::GitHubClient;
use crate::jira::{JiraClient, PostedComment};

/// An attachment downloaded once and uploaded to every issue.
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    pub attachment: AttachmentRef,
    pub bytes: Vec<u8>,
}

/// Failure while commenting on one issue.
#[derive(Debug, Error)]
pub enum CommentError {
    /// An image could not be fetched from the pull request.
    #[error("attachment {name} could not be downloaded: {source}")]
    Download {
        name: String,
        #[source]
        source: ApiError,
    },

    /// An image could not be stored on an issue.
    #[error("attachment {name} could not be stored on {issue_key}: {source}")]
    Attachment {
        issue_key: String,
        name: String,
        #[source]
        source: ApiError,
    },

    /// Placeholders remained after resolution.
    #[error("unresolved attachment placeholders on {issue_key}: {}", names.join(", "))]
    Unresolved {
        issue_key: String,
        names: Vec<String>,
    },

    /// Jira rejected the comment.
    #[error("comment on {issue_key} failed: {source}")]
    Post {
        issue_key: String,
        #[source]
        source: ApiError,
    },
}

impl CommentError {
    /// Attachment problems abort the whole run.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CommentError::Post { .. })
    }
}

/// Download every attachment referenced by the conversion.
pub async fn download_images(
    github: &GitHubClient,
    attachments: &[AttachmentRef],
) -> Result<Vec<DownloadedImage>, CommentError> {
    let mut images = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        let bytes = github
            .download_attachment(&attachment.url)
            .await
            .map_err(|source| CommentError::Download {
                name: attachment.name.clone(),
                source,
            })?;
        log::info!("Downloaded {} ({} bytes)", attachment.name, bytes.len());
        images.push(DownloadedImage {
            attachment: attachment.clone(),
            bytes,
        });
    }
    Ok(images)
}

/// Upload the images to one issue, resolve the placeholders and post.
pub async fn post_to_issue(
    jira: &JiraClient,
    issue_key: &str,
    conversion: &Conversion,
    images: &[DownloadedImage],
) -> Result<PostedComment, CommentError> {
    let mut resolved = Vec::with_capacity(images.len());
    for image in images {
        let link = jira
            .upload_attachment(issue_key, &image.attachment.file_name(), image.bytes.clone())
            .await
            .map_err(|source| CommentError::Attachment {
                issue_key: issue_key.to_string(),
                name: image.attachment.name.clone(),
                source,
            })?;
        log::info!("Uploaded {} to {}: {}", image.attachment.name, issue_key, link);
        resolved.push(ResolvedAttachment::new(image.attachment.name.clone(), link));
    }

    let conversion = conversion.resolve(&resolved);
    let unresolved = conversion.unresolved();
    if !unresolved.is_empty() {
        return Err(CommentError::Unresolved {
            issue_key: issue_key.to_string(),
            names: unresolved.into_iter().map(str::to_string).collect(),
        });
    }

    jira.post_comment(issue_key, &conversion.to_adf())
        .await
        .map_err(|source| CommentError::Post {
            issue_key: issue_key.to_string(),
            source,
        })
}

/// Per-issue outcome of a comment run.
#[derive(Debug, Default)]
pub struct CommentReport {
    pub results: Vec<(String, Result<PostedComment, CommentError>)>,
}

impl CommentReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|(_, r)| r.is_err()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }
}

/// Comment on every issue in turn.
///
/// A rejected post is recorded and the remaining issues are still
/// processed. Attachment failures stop the run immediately.
pub async fn post_to_issues(
    jira: &JiraClient,
    issue_keys: &[String],
    conversion: &Conversion,
    images: &[DownloadedImage],
) -> Result<CommentReport, CommentError> {
    let mut report = CommentReport::default();

    for issue_key in issue_keys {
        match post_to_issue(jira, issue_key, conversion, images).await {
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                log::error!("{}", e);
                report.results.push((issue_key.clone(), Err(e)));
            }
            Ok(posted) => {
                log::info!("Commented on {} (comment {})", issue_key, posted.id);
                report.results.push((issue_key.clone(), Ok(posted)));
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prbridge::Converter;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn jira(server: &MockServer) -> JiraClient {
        JiraClient::new(server.uri(), "bot@example.com", "secret")
    }

    fn image(name: &str) -> DownloadedImage {
        DownloadedImage {
            attachment: AttachmentRef::new(
                format!("https://github.com/user-attachments/assets/{}", name),
                name,
            ),
            bytes: vec![0xff, 0xd8, 0xff],
        }
    }

    async fn mount_upload(server: &MockServer, issue_key: &str, link: &str) {
        Mock::given(method("POST"))
            .and(path(format!("/rest/api/3/issue/{}/attachments", issue_key)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"content": link}])))
            .mount(server)
            .await;
    }

    async fn mount_comment(server: &MockServer, issue_key: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(format!("/rest/api/3/issue/{}/comment", issue_key)))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({"id": "1"})))
            .mount(server)
            .await;
    }

    fn conversion() -> Conversion {
        Converter::new()
            .with_placeholders()
            .parse("Before\n![](https://github.com/user-attachments/assets/a)")
            .unwrap()
    }

    #[tokio::test]
    async fn test_each_issue_gets_its_own_links() {
        let server = MockServer::start().await;
        mount_upload(&server, "ABC-1", "https://jira.example.com/a1").await;
        mount_upload(&server, "ABC-2", "https://jira.example.com/a2").await;
        mount_comment(&server, "ABC-1", 201).await;
        mount_comment(&server, "ABC-2", 201).await;

        let keys = vec!["ABC-1".to_string(), "ABC-2".to_string()];
        let report = post_to_issues(&jira(&server), &keys, &conversion(), &[image("image_001")])
            .await
            .unwrap();
        assert!(report.is_success());

        let requests = server.received_requests().await.unwrap();
        let comment_bodies: Vec<String> = requests
            .iter()
            .filter(|r| r.url.path().ends_with("/comment"))
            .map(|r| String::from_utf8_lossy(&r.body).into_owned())
            .collect();
        assert_eq!(comment_bodies.len(), 2);
        assert!(comment_bodies[0].contains("https://jira.example.com/a1"));
        assert!(comment_bodies[1].contains("https://jira.example.com/a2"));
    }

    #[tokio::test]
    async fn test_failed_post_does_not_stop_other_issues() {
        let server = MockServer::start().await;
        mount_upload(&server, "ABC-1", "https://jira.example.com/a1").await;
        mount_upload(&server, "ABC-2", "https://jira.example.com/a2").await;
        mount_comment(&server, "ABC-1", 500).await;
        mount_comment(&server, "ABC-2", 201).await;

        let keys = vec!["ABC-1".to_string(), "ABC-2".to_string()];
        let report = post_to_issues(&jira(&server), &keys, &conversion(), &[image("image_001")])
            .await
            .unwrap();

        assert_eq!(report.failures(), 1);
        assert!(report.results[0].1.is_err());
        assert!(report.results[1].1.is_ok());
    }

    #[tokio::test]
    async fn test_upload_failure_is_fatal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/api/3/issue/ABC-1/attachments"))
            .respond_with(ResponseTemplate::new(413))
            .mount(&server)
            .await;
        mount_comment(&server, "ABC-1", 201).await;

        let keys = vec!["ABC-1".to_string()];
        let err = post_to_issues(&jira(&server), &keys, &conversion(), &[image("image_001")])
            .await
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, CommentError::Attachment { .. }));
    }

    #[tokio::test]
    async fn test_missing_image_leaves_placeholder_unresolved() {
        let server = MockServer::start().await;
        mount_comment(&server, "ABC-1", 201).await;

        let err = post_to_issue(&jira(&server), "ABC-1", &conversion(), &[])
            .await
            .unwrap_err();
        match err {
            CommentError::Unresolved { names, .. } => assert_eq!(names, vec!["image_001"]),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
