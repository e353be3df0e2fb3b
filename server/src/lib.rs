//! Message board HTTP API over a spreadsheet-backed document store.

mod messages;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use sheetdb_adapter::{
    AdapterResult, DocumentAdapter, ErrorPolicy, MemoryAdapter, SheetAdapter, SheetAdapterConfig,
};
use sheetdb_store::{Database, StoreError};
use std::sync::Arc;
use tracing::{error, info};

pub use messages::{
    format_time, Message, MessageBoard, MessagesResponse, NewMessage, NewMessageResponse,
};

const INDEX_HTML: &str = include_str!("../public/index.html");
const APP_JS: &str = include_str!("../public/app.js");

/// Store type shared by all handlers.
pub type MessageDb = Database<MessageBoard, Box<dyn DocumentAdapter>>;

/// Where the board is persisted.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ServerConfig {
    /// Deployed web-hook script URL. `None` keeps the board in memory.
    pub sheet_url: Option<String>,
    /// Remote sheet (tab) name.
    pub sheet_name: Option<String>,
    #[serde(default)]
    pub error_policy: ErrorPolicy,
}

impl ServerConfig {
    /// Builds the adapter described by this config.
    pub fn build_adapter(&self) -> AdapterResult<Box<dyn DocumentAdapter>> {
        let default_document = serde_json::json!({ "messages": [] });

        let Some(url) = &self.sheet_url else {
            return Ok(Box::new(MemoryAdapter::new(default_document)));
        };

        let mut config = SheetAdapterConfig::new(url.as_str())
            .with_default_document(default_document)
            .with_error_policy(self.error_policy);
        if let Some(sheet_name) = &self.sheet_name {
            config = config.with_sheet_name(sheet_name.as_str());
        }

        Ok(Box::new(SheetAdapter::new(config)?))
    }

    /// Builds the store and loads the board once.
    ///
    /// A failed initial load is logged and the board starts empty. Writes stay
    /// disabled until a later read succeeds, so the stored document is never
    /// replaced by a board that was not loaded from it.
    pub async fn open(&self) -> AdapterResult<Arc<MessageDb>> {
        let adapter = self.build_adapter()?;
        info!("Using {} storage", adapter.name());

        let db = Database::new(adapter, MessageBoard::default());
        if let Err(e) = db.read().await {
            error!("Initial load failed, starting with an empty board: {e}");
        }

        Ok(Arc::new(db))
    }
}

/// Store failure rendered as `500 {"error": ...}`.
struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Storage request failed: {}", self.0);
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

async fn list_messages(State(db): State<Arc<MessageDb>>) -> Result<Json<MessagesResponse>, ApiError> {
    db.read().await?;
    let board = db.data().await;
    Ok(Json(MessagesResponse {
        data: board.messages,
    }))
}

async fn new_message(
    State(db): State<Arc<MessageDb>>,
    Json(input): Json<NewMessage>,
) -> Result<Json<NewMessageResponse>, ApiError> {
    let message = Message::stamped(input, chrono::Local::now());

    if db.is_stale() {
        db.read().await?;
    }
    db.update_and_write(|board| board.messages.push(message.clone()))
        .await?;

    Ok(Json(NewMessageResponse {
        task: "success".to_string(),
        message,
    }))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn app_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript; charset=utf-8")], APP_JS)
}

/// Build the HTTP router over the given store.
pub fn build_router(db: Arc<MessageDb>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/app.js", get(app_js))
        .route("/messages", get(list_messages))
        .route("/new-message", post(new_message))
        .with_state(db)
}
