//! Remote document storage
//!
//! GitHub Contents API client for the mirrored Markdown document. Reads
//! return the current text plus its blob SHA; writes are conditioned on that
//! SHA so a stale run can never overwrite a newer document.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::config::GithubConfig;

use super::credentials::AccessToken;
use super::error::SyncError;
use super::{GITHUB_ACCEPT, GITHUB_API_VERSION, USER_AGENT};

/// The remote document as fetched.
#[derive(Debug, Clone)]
pub struct RemoteDocument {
    /// Decoded UTF-8 text.
    pub text: String,
    /// Blob SHA, the revision marker required on update.
    pub sha: String,
    /// Browser URL, when the API provides one.
    pub html_url: Option<String>,
}

/// Result of a successful write.
#[derive(Debug, Clone)]
pub struct WriteReceipt {
    /// New blob SHA.
    pub sha: String,
    /// Browser URL of the written file.
    pub html_url: Option<String>,
}

/// Remote store for the mirrored document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch the current document. `None` means it does not exist yet,
    /// which is the legitimate "create" state, not an error.
    async fn fetch(&self) -> Result<Option<RemoteDocument>, SyncError>;

    /// Write the document. `expected_sha = None` creates the file and fails
    /// if it already exists; `Some` updates and fails with a conflict when
    /// the remote moved past that revision.
    async fn write(
        &self,
        text: &str,
        expected_sha: Option<&str>,
        message: &str,
        token: &AccessToken,
    ) -> Result<WriteReceipt, SyncError>;

    /// Human-readable location for diagnostics.
    fn location(&self) -> String;
}

/// GitHub Contents API implementation.
pub struct GithubContentStore {
    owner: String,
    repo: String,
    path: String,
    api_base_url: String,
    client: reqwest::Client,
}

impl GithubContentStore {
    pub fn new(config: &GithubConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_default();

        Self {
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            path: config.path.clone(),
            api_base_url: config.api_base_url.clone(),
            client,
        }
    }

    fn contents_url(&self) -> String {
        // Escape each path segment but keep the separators.
        let encoded_path = self
            .path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base_url.trim_end_matches('/'),
            self.owner,
            self.repo,
            encoded_path
        )
    }
}

#[async_trait]
impl DocumentStore for GithubContentStore {
    async fn fetch(&self) -> Result<Option<RemoteDocument>, SyncError> {
        #[derive(Debug, Deserialize)]
        struct ContentResponse {
            sha: String,
            content: Option<String>,
            encoding: Option<String>,
            html_url: Option<String>,
        }

        let response = self
            .client
            .get(self.contents_url())
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(SyncError::from_transport)?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(None);
        }

        let body = response.text().await.map_err(SyncError::from_transport)?;
        if !status.is_success() {
            return Err(SyncError::from_status(status.as_u16(), body));
        }

        let payload: ContentResponse =
            serde_json::from_str(&body).map_err(|_| SyncError::Decode {
                context: "fetching document".to_string(),
                payload: body.clone(),
            })?;

        if payload.encoding.as_deref() != Some("base64") {
            return Err(SyncError::Decode {
                context: "fetching document (unexpected encoding)".to_string(),
                payload: body,
            });
        }

        let content = payload.content.ok_or_else(|| SyncError::Decode {
            context: "fetching document (no content)".to_string(),
            payload: body.clone(),
        })?;

        let text = decode_base64_content(&content).ok_or(SyncError::Decode {
            context: "decoding document content".to_string(),
            payload: content,
        })?;

        Ok(Some(RemoteDocument {
            text,
            sha: payload.sha,
            html_url: payload.html_url,
        }))
    }

    async fn write(
        &self,
        text: &str,
        expected_sha: Option<&str>,
        message: &str,
        token: &AccessToken,
    ) -> Result<WriteReceipt, SyncError> {
        #[derive(Debug, Serialize)]
        struct PutRequest<'a> {
            message: &'a str,
            content: String,
            #[serde(skip_serializing_if = "Option::is_none")]
            sha: Option<&'a str>,
        }

        #[derive(Debug, Deserialize)]
        struct PutResponse {
            content: PutContent,
        }

        #[derive(Debug, Deserialize)]
        struct PutContent {
            sha: String,
            html_url: Option<String>,
        }

        let request = PutRequest {
            message,
            content: base64::engine::general_purpose::STANDARD.encode(text.as_bytes()),
            sha: expected_sha,
        };

        let response = self
            .client
            .put(self.contents_url())
            .header("Accept", GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header("User-Agent", USER_AGENT)
            .bearer_auth(token.secret())
            .json(&request)
            .send()
            .await
            .map_err(SyncError::from_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(SyncError::from_transport)?;
        if !status.is_success() {
            return Err(self.classify_write_failure(status.as_u16(), body));
        }

        let payload: PutResponse = serde_json::from_str(&body).map_err(|_| SyncError::Decode {
            context: "writing document".to_string(),
            payload: body.clone(),
        })?;

        Ok(WriteReceipt {
            sha: payload.content.sha,
            html_url: payload.content.html_url,
        })
    }

    fn location(&self) -> String {
        format!("{}/{}:{}", self.owner, self.repo, self.path)
    }
}

impl GithubContentStore {
    /// The Contents API reports a stale SHA as 409, and a missing-but-required
    /// SHA as 422 mentioning the field. Both mean the precondition failed.
    fn classify_write_failure(&self, status: u16, body: String) -> SyncError {
        if status == 409 || (status == 422 && body.contains("sha")) {
            return SyncError::Conflict {
                path: self.location(),
            };
        }
        SyncError::from_status(status, body)
    }
}

/// Decode Contents API base64, which arrives chunked with embedded newlines.
fn decode_base64_content(content: &str) -> Option<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(compact)
        .ok()?;
    String::from_utf8(bytes).ok()
}
