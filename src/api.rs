//! Wire types of the remote notes service.
//!
//! Every endpoint answers with the same JSON envelope: a `status` string, an optional
//! human-readable `message` and an optional `data` payload.

use serde::{Deserialize, Serialize};

/// The `status` value the service uses for a successful call.
pub const STATUS_SUCCESS: &str = "success";

/// The request body of `POST /notes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewNote {
    /// The title of the note.
    pub title: String,
    /// The content of the note.
    pub body: String,
}

impl NewNote {
    /// Creates a request body from anything convertible into strings.
    pub fn new<T: Into<String>, B: Into<String>>(title: T, body: B) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// The response envelope shared by all endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// `"success"` or any other value, which is treated as a failure.
    pub status: String,
    /// A message describing the outcome. Present on failures.
    pub message: Option<String>,
    /// The payload of a successful call.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Returns the payload of a successful response, or the reason the call failed.
    ///
    /// The HTTP status code plays no part here: only the envelope `status` decides.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.status == STATUS_SUCCESS {
            return Ok(self.data);
        }
        Err(self
            .message
            .unwrap_or_else(|| format!("unexpected response status \"{}\"", self.status)))
    }
}
