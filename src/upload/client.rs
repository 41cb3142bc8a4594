//! Minimal Grafana HTTP API client
//!
//! Covers the folder and alert rule provisioning endpoints the uploader
//! needs. Every request carries either a bearer token or basic auth, plus
//! the org header when an org is configured.

use super::GrafanaConfig;
use crate::error::{AlertGenError, Result};
use crate::models::AlertRuleGroup;
use reqwest::{Method, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const FOLDER_PAGE_LIMIT: usize = 1000;

/// Folder as returned by `GET /api/folders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub uid: String,
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct GrafanaClient {
    http: reqwest::Client,
    base_url: Url,
    config: GrafanaConfig,
}

impl GrafanaClient {
    pub fn new(config: GrafanaConfig) -> Result<Self> {
        let base_url = Url::parse(&config.url).map_err(|e| {
            AlertGenError::InvalidConfig(format!("Invalid Grafana URL {}: {}", config.url, e))
        })?;

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url,
            config,
        })
    }

    /// Create a folder; an existing folder with the same UID counts as success.
    ///
    /// Returns `true` when the folder was newly created.
    pub async fn ensure_folder(&self, uid: &str, title: &str) -> Result<bool> {
        let response = self
            .request(Method::POST, &["api", "folders"])?
            .json(&Folder {
                uid: uid.to_string(),
                title: title.to_string(),
            })
            .send()
            .await?;

        match response.status() {
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => {
                tracing::debug!(folder = uid, "Folder already exists");
                Ok(false)
            }
            _ => {
                check_status(response).await?;
                tracing::debug!(folder = uid, "Created folder");
                Ok(true)
            }
        }
    }

    /// List every folder, following `page` until Grafana returns a short page.
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        let mut folders = Vec::new();

        for page in 1.. {
            let response = self
                .request(Method::GET, &["api", "folders"])?
                .query(&[("limit", FOLDER_PAGE_LIMIT), ("page", page)])
                .send()
                .await?;
            let batch: Vec<Folder> = check_status(response).await?.json().await?;

            let last = batch.len() < FOLDER_PAGE_LIMIT;
            folders.extend(batch);
            if last {
                break;
            }
        }

        Ok(folders)
    }

    /// Delete a folder together with its alert rules. Missing folders are ignored.
    pub async fn delete_folder(&self, uid: &str) -> Result<()> {
        let response = self
            .request(Method::DELETE, &["api", "folders", uid])?
            .query(&[("forceDeleteRules", "true")])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        check_status(response).await?;
        Ok(())
    }

    /// Create or replace a rule group through the provisioning API
    pub async fn put_rule_group(&self, group: &AlertRuleGroup) -> Result<()> {
        group.validate()?;

        let response = self
            .request(
                Method::PUT,
                &[
                    "api",
                    "v1",
                    "provisioning",
                    "folder",
                    group.folder_uid.as_str(),
                    "rule-groups",
                    group.title.as_str(),
                ],
            )?
            .header("X-Disable-Provenance", "true")
            .json(group)
            .send()
            .await?;

        check_status(response).await?;
        tracing::debug!(group = %group.title, folder = %group.folder_uid, "Uploaded rule group");
        Ok(())
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                AlertGenError::InvalidConfig(format!(
                    "Grafana URL cannot be a base: {}",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);

        let mut builder = self.http.request(method, url);
        builder = if self.config.uses_token() {
            builder.bearer_auth(&self.config.token)
        } else {
            builder.basic_auth(&self.config.username, Some(&self.config.password))
        };

        if let Some(org_id) = self.config.org_id {
            builder = builder.header("X-Grafana-Org-Id", org_id.to_string());
        }

        Ok(builder)
    }
}

/// Turn non-success responses into [`AlertGenError::GrafanaApi`]
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    Err(AlertGenError::GrafanaApi {
        status: status.as_u16(),
        message,
    })
}
