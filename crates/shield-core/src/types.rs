use std::fmt;

use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Image formats accepted by the intake pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
}

impl MediaType {
    /// Parse a declared MIME type. Only the exact strings `image/jpeg` and
    /// `image/png` are recognised.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

// =============================================================================
// Newtype Wrappers
// =============================================================================

/// Unix timestamp in milliseconds since epoch.
///
/// Millisecond precision keeps turns created in quick succession ordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }
}

/// Data directory path with `~` expanded.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataDir(pub String);

impl DataDir {
    pub fn new(path: String) -> Self {
        let expanded = if path.starts_with('~') {
            let home = std::env::var("USERPROFILE")
                .or_else(|_| std::env::var("HOME"))
                .unwrap_or_else(|_| ".".to_string());
            path.replacen('~', &home, 1)
        } else {
            path
        };
        Self(expanded)
    }
}

// =============================================================================
// Entity Structs
// =============================================================================

/// A validated, encoded photo waiting to be attached to a chat turn or a
/// quote submission.
///
/// Not `Clone`: an image is owned by exactly one session's tray
/// and is moved, never copied, into the turn or submission that consumes it.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PendingImage {
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
    pub media_type: MediaType,
    pub name: String,
}

impl PendingImage {
    /// Encode raw image bytes into a data URI.
    pub fn encode(name: impl Into<String>, media_type: MediaType, bytes: &[u8]) -> Self {
        let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self {
            data_url: format!("data:{};base64,{}", media_type.as_mime(), payload),
            media_type,
            name: name.into(),
        }
    }

    /// The base64 payload after the data URI's comma.
    pub fn base64_payload(&self) -> &str {
        self.data_url
            .split_once(',')
            .map_or("", |(_, payload)| payload)
    }
}
