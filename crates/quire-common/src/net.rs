//! Resource fetching for images referenced by `src` attributes.
//!
//! Three sources are understood: `data:` URLs, `http(s)://` URLs (blocking
//! reqwest client) and everything else as a local path (`file:` prefix
//! optional).

use base64::Engine;
use std::fs;
use std::time::Duration;
use thiserror::Error;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = concat!("quire/", env!("CARGO_PKG_VERSION"));

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Why a resource could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// A `data:` URL without the mandatory comma.
    #[error("invalid data URL: missing comma")]
    MissingComma,
    /// The base64 payload of a `data:` URL is malformed.
    #[error("base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    /// A percent escape in a `data:` URL is malformed.
    #[error("invalid percent escape in data URL")]
    PercentEscape,
    /// The HTTP request failed or returned a non-success status.
    #[error("request for '{url}' failed: {message}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// Client or status description.
        message: String,
    },
    /// A local file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        /// The path that was read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A parsed `data:` URL.
///
/// [RFC 2397](https://www.rfc-editor.org/rfc/rfc2397)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl<'a> {
    /// Media type and parameters, e.g. `image/png;base64`.
    pub metadata: &'a str,
    /// Everything after the first comma.
    pub payload: &'a str,
}

impl<'a> DataUrl<'a> {
    /// Split a raw `data:` URL into metadata and payload.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::MissingComma`] if there is no payload separator.
    pub fn parse(raw: &'a str) -> Result<Self, FetchError> {
        let body = raw.strip_prefix("data:").unwrap_or(raw);
        let (metadata, payload) = body.split_once(',').ok_or(FetchError::MissingComma)?;
        Ok(Self { metadata, payload })
    }

    /// The media type, defaulting to `text/plain` as RFC 2397 requires.
    #[must_use]
    pub fn media_type(&self) -> &'a str {
        match self.metadata.split(';').next() {
            Some(media) if !media.is_empty() => media,
            _ => "text/plain",
        }
    }

    /// Decode the payload into raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if a base64 payload or a percent escape is malformed.
    pub fn decode(&self) -> Result<Vec<u8>, FetchError> {
        if self.metadata.ends_with(";base64") {
            let compact: String = self
                .payload
                .chars()
                .filter(|c| !c.is_ascii_whitespace())
                .collect();
            return Ok(base64::engine::general_purpose::STANDARD.decode(compact)?);
        }
        percent_decode(self.payload)
    }
}

fn percent_decode(input: &str) -> Result<Vec<u8>, FetchError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = input.get(i + 1..i + 3).ok_or(FetchError::PercentEscape)?;
            let byte = u8::from_str_radix(hex, 16).map_err(|_| FetchError::PercentEscape)?;
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    Ok(out)
}

/// Fetch a URL over HTTP and return its body as raw bytes.
///
/// # Errors
///
/// Returns [`FetchError::Http`] if the client cannot be built, the request
/// fails, or the response status is not a success.
pub fn fetch_http_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    let http_error = |message: String| FetchError::Http {
        url: url.to_string(),
        message,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| http_error(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| http_error(e.to_string()))?;

    if !response.status().is_success() {
        return Err(http_error(format!("HTTP status {}", response.status())));
    }

    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(|e| http_error(e.to_string()))
}

/// Fetch the bytes behind a resolved reference.
///
/// # Errors
///
/// Propagates the [`FetchError`] of whichever source the reference names.
pub fn fetch_bytes(resolved: &str) -> Result<Vec<u8>, FetchError> {
    if resolved.starts_with("http://") || resolved.starts_with("https://") {
        fetch_http_bytes(resolved)
    } else if resolved.starts_with("data:") {
        DataUrl::parse(resolved)?.decode()
    } else {
        let path = resolved.strip_prefix("file://").unwrap_or(resolved);
        fs::read(path).map_err(|source| FetchError::Io {
            path: path.to_string(),
            source,
        })
    }
}
