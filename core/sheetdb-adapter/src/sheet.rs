//! Spreadsheet web-hook storage implementation.
//!
//! The remote script stores one JSON document per sheet. `GET` returns the
//! stored text (`{}` for an empty cell) and `POST` replaces it, answering with
//! `{"status": "success"}` on success.

use crate::adapter::DocumentAdapter;
use crate::error::{AdapterError, AdapterResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Query parameter selecting the remote sheet.
pub const SHEET_NAME_PARAM: &str = "sheetName";

/// Value of the `status` field the remote sends back after a good write.
pub const WRITE_SUCCESS: &str = "success";

/// What the adapter does when a remote call fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the failure; `read` falls back to the default document and `write`
    /// reports success.
    #[default]
    Lenient,
    /// Return every failure to the caller.
    Strict,
}

/// Spreadsheet endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetAdapterConfig {
    /// Deployed web-hook script URL.
    pub url: String,
    /// Document returned by a lenient `read` when the remote call fails.
    #[serde(default = "empty_document")]
    pub default_document: Value,
    /// Remote sheet (tab) to store the document in.
    #[serde(default)]
    pub sheet_name: Option<String>,
    /// Failure handling.
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

fn empty_document() -> Value {
    Value::Object(Default::default())
}

impl Default for SheetAdapterConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            default_document: empty_document(),
            sheet_name: None,
            error_policy: ErrorPolicy::Lenient,
        }
    }
}

impl SheetAdapterConfig {
    /// Creates a config for `url` with every other field defaulted.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_default_document(mut self, document: Value) -> Self {
        self.default_document = document;
        self
    }

    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }
}

/// Outcome of a write the remote answered.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteAck {
    /// The remote reported `"status": "success"`.
    Success,
    /// The remote answered with anything else; holds the full reply.
    Rejected(Value),
}

/// Document adapter backed by a spreadsheet web-hook.
#[derive(Debug, Clone)]
pub struct SheetAdapter {
    config: SheetAdapterConfig,
    endpoint: Url,
    client: Client,
}

impl SheetAdapter {
    /// Creates an adapter with a default HTTP client.
    ///
    /// No request timeout is configured; the transport defaults apply.
    pub fn new(config: SheetAdapterConfig) -> AdapterResult<Self> {
        let client = Client::builder().build()?;
        Self::with_client(config, client)
    }

    /// Creates an adapter that sends requests through `client`.
    pub fn with_client(config: SheetAdapterConfig, client: Client) -> AdapterResult<Self> {
        let endpoint = Url::parse(&config.url)
            .map_err(|e| AdapterError::Config(format!("invalid endpoint URL {:?}: {e}", config.url)))?;

        match endpoint.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AdapterError::Config(format!(
                    "unsupported endpoint scheme: {other}"
                )));
            }
        }

        if config.sheet_name.as_deref() == Some("") {
            return Err(AdapterError::Config("sheet name must not be empty".to_string()));
        }

        Ok(Self {
            config,
            endpoint,
            client,
        })
    }

    pub fn config(&self) -> &SheetAdapterConfig {
        &self.config
    }

    /// Builds the URL shared by reads and writes.
    ///
    /// When a sheet name is configured it replaces any `sheetName` already
    /// present in the endpoint URL. The rest of the query is left byte-for-byte
    /// unless such a replacement forces it to be re-encoded.
    pub fn request_url(&self) -> Url {
        let mut url = self.endpoint.clone();

        let Some(sheet_name) = &self.config.sheet_name else {
            return url;
        };

        if !url.query_pairs().any(|(key, _)| key == SHEET_NAME_PARAM) {
            url.query_pairs_mut().append_pair(SHEET_NAME_PARAM, sheet_name);
            return url;
        }

        let kept: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(key, _)| key != SHEET_NAME_PARAM)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();

        url.query_pairs_mut()
            .clear()
            .extend_pairs(kept)
            .append_pair(SHEET_NAME_PARAM, sheet_name);

        url
    }

    /// Fetches and decodes the stored document, returning every failure.
    pub async fn fetch(&self) -> AdapterResult<Value> {
        debug!("Reading document (sheet: {:?})", self.config.sheet_name);

        let response = self.client.get(self.request_url()).send().await?;
        let text = ensure_success(response).await?.text().await?;

        serde_json::from_str(&text).map_err(AdapterError::Decode)
    }

    /// Sends the whole document, returning every failure.
    ///
    /// The body is pretty-printed JSON sent as `text/plain`; the remote script
    /// parses it itself.
    pub async fn push(&self, document: &Value) -> AdapterResult<WriteAck> {
        let body = serde_json::to_string_pretty(document).map_err(AdapterError::Encode)?;

        debug!(
            "Writing document (sheet: {:?}, {} bytes)",
            self.config.sheet_name,
            body.len()
        );

        let response = self
            .client
            .post(self.request_url())
            .header(CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await?;
        let text = ensure_success(response).await?.text().await?;

        let reply: Value = serde_json::from_str(&text).map_err(AdapterError::Decode)?;
        if reply.get("status").and_then(Value::as_str) == Some(WRITE_SUCCESS) {
            Ok(WriteAck::Success)
        } else {
            Ok(WriteAck::Rejected(reply))
        }
    }

    fn is_lenient(&self) -> bool {
        self.config.error_policy == ErrorPolicy::Lenient
    }
}

async fn ensure_success(response: Response) -> AdapterResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let reason = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or_default().to_string()
    } else {
        body
    };
    Err(AdapterError::Status {
        status: status.as_u16(),
        reason,
    })
}

#[async_trait]
impl DocumentAdapter for SheetAdapter {
    fn name(&self) -> &'static str {
        "Google Sheet"
    }

    async fn read(&self) -> AdapterResult<Value> {
        match self.fetch().await {
            Ok(document) => Ok(document),
            Err(e) if self.is_lenient() => {
                error!("Error reading from sheet, using default document: {e}");
                Ok(self.config.default_document.clone())
            }
            Err(e) => Err(e),
        }
    }

    async fn write(&self, document: &Value) -> AdapterResult<()> {
        match self.push(document).await {
            Ok(WriteAck::Success) => Ok(()),
            Ok(WriteAck::Rejected(reply)) => {
                warn!("Write operation reported non-success: {reply}");
                if self.is_lenient() {
                    Ok(())
                } else {
                    Err(AdapterError::Rejected(reply.to_string()))
                }
            }
            Err(e) if self.is_lenient() => {
                error!("Error writing to sheet, document dropped: {e}");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
