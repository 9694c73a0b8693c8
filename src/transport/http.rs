//! transport::http
//!
//! HTTP transport implementation using reqwest.
//!
//! # Design
//!
//! Requests are plain GETs: no body, no extra headers, no timeout. Redirects
//! are followed the way reqwest does by default, so the status reported is
//! that of the final hop.
//!
//! The body is read chunk by chunk. If the stream breaks part-way the
//! completion is reported as [`ReadyState::Loading`] (or
//! [`ReadyState::HeadersReceived`] if no chunk arrived), carrying whatever
//! was received, so the loader can see that the request never finished.
//!
//! Body bytes are decoded with the charset named by the `Content-Type`
//! header, falling back to UTF-8, the same way reqwest's `text()` does.
//!
//! # Example
//!
//! ```ignore
//! use changeset_loader::transport::{HttpTransport, Transport};
//!
//! let transport = HttpTransport::new();
//! let completion = transport.get("https://revert.example.org/changesets/1 2").await?;
//! println!("{} {}", completion.status, completion.body.len());
//! ```

use async_trait::async_trait;
use encoding_rs::{Encoding, UTF_8};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};

use super::traits::{Completion, ReadyState, Transport, TransportError};

/// Transport backed by a shared reqwest [`Client`].
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    /// HTTP client for making requests
    client: Client,
}

impl HttpTransport {
    /// Create a transport with a default reqwest client.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Create a transport around an existing client.
    ///
    /// Useful when the embedding application already manages a client
    /// (connection pool, proxy settings).
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

/// Parse a request target, mapping failures to `TransportError::InvalidUrl`.
fn parse_target(url: &str) -> Result<Url, TransportError> {
    Url::parse(url).map_err(|e| TransportError::InvalidUrl {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Decode a response body using the charset from its `Content-Type`.
///
/// Unknown or missing charsets decode as UTF-8; malformed sequences become
/// U+FFFD.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(|value| value.parse::<mime::Mime>().ok())
        .and_then(|parsed| {
            parsed
                .get_param(mime::CHARSET)
                .and_then(|charset| Encoding::for_label(charset.as_str().as_bytes()))
        })
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

#[async_trait]
impl Transport for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn get(&self, url: &str) -> Result<Completion, TransportError> {
        let target = parse_target(url)?;

        let mut response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let mut body = Vec::new();
        let mut state = ReadyState::HeadersReceived;

        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    state = ReadyState::Loading;
                    body.extend_from_slice(&chunk);
                }
                Ok(None) => {
                    return Ok(Completion::done(
                        status,
                        decode_body(&body, content_type.as_deref()),
                    ));
                }
                Err(e) => {
                    tracing::debug!(url, status, error = %e, "response body interrupted");
                    return Ok(Completion::interrupted(
                        state,
                        status,
                        decode_body(&body, content_type.as_deref()),
                    ));
                }
            }
        }
    }
}
