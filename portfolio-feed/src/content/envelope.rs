//! Contents API envelopes (`/contents/{path}`, `/readme`).

use crate::client::FetchError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

/// File object returned by the contents API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentEnvelope {
    #[serde(default)]
    content: Option<String>,
}

impl ContentEnvelope {
    /// Decodes the base64 `content` field as UTF-8 text.
    ///
    /// GitHub wraps the base64 payload in newlines; all whitespace is
    /// dropped before decoding. Invalid UTF-8 is replaced, not rejected.
    pub(crate) fn decode(&self) -> Result<String, FetchError> {
        let encoded: String = self
            .content
            .as_deref()
            .unwrap_or_default()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if encoded.is_empty() {
            return Err(FetchError::MissingField { field: "content" });
        }
        let bytes = STANDARD.decode(encoded)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
