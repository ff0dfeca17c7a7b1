//! HTTP capability consumed by [`RequestClient`](super::RequestClient).
//!
//! The client never talks to the network directly; it goes through
//! [`HttpTransport`], so tests can script responses and other targets can
//! plug in their own fetch primitive. [`UreqTransport`] is the blocking
//! native implementation (feature `http`).

use std::io::Read;
use std::time::Duration;

use super::error::RequestFailure;

/// One outgoing GET request.
#[derive(Debug, Clone, Copy)]
pub struct HttpRequest<'a> {
    /// Absolute URL without query string.
    pub url: &'a str,
    /// Query parameters, encoded by the transport.
    pub query: &'a [(&'a str, &'a str)],
    /// Value for the `Accept` header.
    pub accept: &'a str,
    /// Deadline for this single attempt.
    pub timeout: Duration,
}

/// A response whose body has not been read yet.
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body size advertised by the server, if any.
    pub content_length: Option<u64>,
    /// Streaming body reader.
    pub body: Box<dyn Read>,
}

impl HttpResponse {
    /// Build a response from an in-memory body.
    #[must_use]
    pub fn from_bytes(status: u16, body: impl Into<Vec<u8>>) -> Self {
        let body = body.into();
        Self {
            status,
            content_length: Some(body.len() as u64),
            body: Box::new(std::io::Cursor::new(body)),
        }
    }

    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Capability to perform HTTP GET requests.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status; `Err` is reserved for transport failures
/// (connection, DNS, TLS, deadline).
pub trait HttpTransport {
    /// Perform one request attempt.
    ///
    /// # Errors
    ///
    /// [`RequestFailure::Network`] or [`RequestFailure::Timeout`] when no
    /// response arrives.
    fn get(&self, request: &HttpRequest<'_>)
        -> Result<HttpResponse, RequestFailure>;
}

#[cfg(feature = "http")]
pub use self::ureq_transport::UreqTransport;

#[cfg(feature = "http")]
mod ureq_transport {
    use super::{HttpRequest, HttpResponse, HttpTransport, RequestFailure};

    /// Blocking [`HttpTransport`] backed by a shared `ureq` agent.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
        user_agent: String,
    }

    impl UreqTransport {
        /// Create a transport that sends `user_agent` with every request.
        #[must_use]
        pub fn new(user_agent: &str) -> Self {
            let agent: ureq::Agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .build()
                .into();
            Self {
                agent,
                user_agent: user_agent.to_owned(),
            }
        }
    }

    fn map_error(error: ureq::Error) -> RequestFailure {
        match error {
            ureq::Error::Timeout(t) => RequestFailure::Timeout(t.to_string()),
            ureq::Error::Io(e) => RequestFailure::from(e),
            other => RequestFailure::Network(other.to_string()),
        }
    }

    impl HttpTransport for UreqTransport {
        fn get(
            &self,
            request: &HttpRequest<'_>,
        ) -> Result<HttpResponse, RequestFailure> {
            log::debug!("GET {} {:?}", request.url, request.query);
            let mut builder = self
                .agent
                .get(request.url)
                .config()
                .timeout_global(Some(request.timeout))
                .build()
                .header("Accept", request.accept)
                .header("User-Agent", self.user_agent.as_str());
            for (key, value) in request.query {
                builder = builder.query(*key, *value);
            }

            let response = builder.call().map_err(map_error)?;
            let status = response.status().as_u16();
            let content_length = response
                .headers()
                .get("content-length")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok());
            let body = response.into_body().into_reader();

            Ok(HttpResponse {
                status,
                content_length,
                body: Box::new(body),
            })
        }
    }
}
