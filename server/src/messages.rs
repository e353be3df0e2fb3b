//! Message board document model.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The whole persisted document.
///
/// Top-level keys other than `messages` are carried through untouched.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct MessageBoard {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of `POST /new-message`. Unknown fields are kept.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewMessage {
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A stored message.
///
/// Entries may be typed into the sheet by hand, so `message` and `time` take
/// any JSON value and may be absent.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub message: Value,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub time: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Stamps `input` with `at`, overriding any client-supplied `time`.
    pub fn stamped(input: NewMessage, at: DateTime<Local>) -> Self {
        let NewMessage { message, mut extra } = input;
        extra.remove("time");

        Self {
            message: Value::String(message),
            time: Value::String(format_time(at)),
            extra,
        }
    }
}

/// Formats like a browser's `Date()` string, e.g.
/// `Fri Oct 16 2026 09:30:00 GMT+0200`.
pub fn format_time(at: DateTime<Local>) -> String {
    at.format("%a %b %d %Y %H:%M:%S GMT%z").to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MessagesResponse {
    pub data: Vec<Message>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewMessageResponse {
    pub task: String,
    pub message: Message,
}
