use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::blocks::OutputBlock;
use crate::sync::{ChildrenPage, DocumentApi, SyncError};

/// Children requested per page; the service maximum.
pub const PAGE_SIZE: u32 = 100;

/// Connection settings for [`NotionClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub api_key: String,
    pub notion_version: String,
    pub base_url: String,
    /// Bound on each request, connect to last byte.
    pub timeout: Duration,
}

/// Blocking client for the block-children endpoints.
pub struct NotionClient {
    http: Client,
    base_url: String,
}

#[derive(Serialize)]
struct AppendBody<'a> {
    children: &'a [OutputBlock],
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

impl NotionClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|e| SyncError::Transport(format!("invalid API key header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            "Notion-Version",
            HeaderValue::from_str(&settings.notion_version)
                .map_err(|e| SyncError::Transport(format!("invalid Notion-Version header: {e}")))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(transport)?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn children_url(&self, block_id: &str) -> String {
        children_url(&self.base_url, block_id)
    }
}

fn children_url(base_url: &str, block_id: &str) -> String {
    format!("{base_url}/blocks/{block_id}/children")
}

fn transport(e: reqwest::Error) -> SyncError {
    if e.is_timeout() {
        SyncError::Transport(format!("request timed out: {e}"))
    } else {
        SyncError::Transport(e.to_string())
    }
}

/// Maps a non-success response to [`SyncError::Api`].
fn check_status(response: Response) -> Result<Response, SyncError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(api_error(status.as_u16(), &body))
}

fn api_error(status: u16, body: &str) -> SyncError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => SyncError::Api {
            status,
            code: err.code,
            message: err.message,
        },
        Err(_) => SyncError::Api {
            status,
            code: String::new(),
            message: body.trim().to_string(),
        },
    }
}

impl DocumentApi for NotionClient {
    fn children_page(
        &self,
        parent_id: &str,
        cursor: Option<&str>,
    ) -> Result<ChildrenPage, SyncError> {
        let mut request = self
            .http
            .get(self.children_url(parent_id))
            .query(&[("page_size", PAGE_SIZE.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }

        let response = check_status(request.send().map_err(transport)?)?;
        let body = response.text().map_err(transport)?;
        serde_json::from_str(&body).map_err(|e| SyncError::MalformedResponse(e.to_string()))
    }

    fn append_children(&self, parent_id: &str, children: &[OutputBlock]) -> Result<(), SyncError> {
        let response = self
            .http
            .patch(self.children_url(parent_id))
            .json(&AppendBody { children })
            .send()
            .map_err(transport)?;
        check_status(response).map(|_| ())
    }
}
