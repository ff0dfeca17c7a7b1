//! Request failure taxonomy and the classification rules that turn a raw
//! failure into a user-facing [`ErrorDescriptor`].
//!
//! Classification is ordered: an HTTP status decides first, then the failure
//! kind, then the generic fallback. The same rules decide whether the retry
//! loop tries again, so retry policy and user messaging cannot drift apart.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// Error type returned by a caller-supplied progress callback.
pub type ProgressError = Box<dyn std::error::Error + Send + Sync>;

/// A raw failure observed while performing one request attempt.
#[derive(Debug)]
pub enum RequestFailure {
    /// Connection could not be established or dropped mid-transfer.
    Network(String),
    /// The attempt exceeded its per-attempt deadline.
    Timeout(String),
    /// The server answered with a non-success status.
    Status {
        /// HTTP status code.
        status: u16,
        /// Reason phrase or response body excerpt.
        message: String,
    },
    /// Caller input was rejected before any I/O took place.
    Validation(String),
    /// The payload is not a structure file of the expected format.
    Format(String),
    /// The payload is not valid JSON or has an unexpected shape.
    Data(String),
    /// The caller's progress callback returned an error.
    Callback(ProgressError),
    /// The request was aborted by the caller.
    Cancelled,
}

impl RequestFailure {
    /// HTTP status carried by this failure, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The original, unclassified message.
    #[must_use]
    pub fn raw_message(&self) -> String {
        match self {
            Self::Network(msg)
            | Self::Timeout(msg)
            | Self::Validation(msg)
            | Self::Format(msg)
            | Self::Data(msg)
            | Self::Status { message: msg, .. } => msg.clone(),
            Self::Callback(e) => e.to_string(),
            Self::Cancelled => "request aborted".to_owned(),
        }
    }

    /// Whether the retry loop may try this request again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        rule_for(self).retryable
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Timeout(msg) => write!(f, "timed out: {msg}"),
            Self::Status { status, message } => {
                write!(f, "HTTP {status}: {message}")
            }
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Data(msg) => write!(f, "data error: {msg}"),
            Self::Callback(e) => write!(f, "progress callback failed: {e}"),
            Self::Cancelled => f.write_str("request aborted"),
        }
    }
}

impl From<std::io::Error> for RequestFailure {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                Self::Timeout(e.to_string())
            }
            _ => Self::Network(e.to_string()),
        }
    }
}

/// Where in the retry loop a failure surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryContext {
    /// Attempt number (1-based) during which the failure occurred.
    pub attempt: u32,
    /// Configured attempt ceiling.
    pub max_attempts: u32,
    /// `true` when the failure was retryable and the ceiling was reached.
    pub exhausted: bool,
}

/// A failed request, enriched with its retry context.
///
/// This is what every fetch operation on
/// [`RequestClient`](super::RequestClient) returns on failure. Use
/// [`classify_error`] (or [`RequestError::descriptor`]) to obtain the
/// user-facing description.
#[derive(Debug)]
pub struct RequestError {
    failure: RequestFailure,
    retry: Option<RetryContext>,
}

impl RequestError {
    /// Wrap a failure that never entered the retry loop (e.g. validation).
    #[must_use]
    pub fn new(failure: RequestFailure) -> Self {
        Self {
            failure,
            retry: None,
        }
    }

    /// Attach retry-loop context.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryContext) -> Self {
        self.retry = Some(retry);
        self
    }

    /// The underlying failure.
    #[must_use]
    pub fn failure(&self) -> &RequestFailure {
        &self.failure
    }

    /// Consume the error, returning the underlying failure.
    #[must_use]
    pub fn into_failure(self) -> RequestFailure {
        self.failure
    }

    /// Retry-loop context, if the failure happened inside it.
    #[must_use]
    pub fn retry(&self) -> Option<RetryContext> {
        self.retry
    }

    /// Number of attempts made before this error was raised.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.retry.map_or(0, |ctx| ctx.attempt)
    }

    /// Classify this error for display.
    #[must_use]
    pub fn descriptor(&self) -> ErrorDescriptor {
        classify_error(self)
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.retry {
            Some(ctx) if ctx.exhausted => write!(
                f,
                "{} (failed after {} attempts)",
                self.failure, ctx.attempt
            ),
            _ => write!(f, "{}", self.failure),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.failure {
            RequestFailure::Callback(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<RequestFailure> for RequestError {
    fn from(failure: RequestFailure) -> Self {
        Self::new(failure)
    }
}

/// Classified error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Transport-level connectivity failure.
    Network,
    /// Per-attempt deadline exceeded.
    Timeout,
    /// Transient upstream failure (502/503/504).
    Server,
    /// Upstream throttling (429).
    RateLimit,
    /// Request rejected by the server (4xx other than 404/429).
    Client,
    /// The requested entry does not exist (404).
    NotFound,
    /// Caller supplied bad input.
    Validation,
    /// Structure payload failed format validation.
    Format,
    /// JSON payload failed to parse or had the wrong shape.
    Data,
    /// The caller aborted the request.
    Cancelled,
    /// Anything not covered above.
    Unknown,
}

/// User-facing description of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDescriptor {
    /// Category of the failure.
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    /// Short message suitable for display.
    pub message: String,
    /// Raw status and original message, for bug reports.
    pub technical_details: String,
    /// Whether retrying can plausibly succeed.
    pub retryable: bool,
    /// Suggested remediation.
    pub user_action: String,
}

struct Rule {
    error_type: ErrorType,
    retryable: bool,
    message: Cow<'static, str>,
    user_action: &'static str,
}

impl Rule {
    fn new(
        error_type: ErrorType,
        retryable: bool,
        message: impl Into<Cow<'static, str>>,
        user_action: &'static str,
    ) -> Self {
        Self {
            error_type,
            retryable,
            message: message.into(),
            user_action,
        }
    }

    fn unknown() -> Self {
        Self::new(
            ErrorType::Unknown,
            false,
            "An unexpected error occurred",
            "Try again, and reload the page if the problem persists",
        )
    }
}

fn rule_for_status(status: u16) -> Rule {
    match status {
        404 => Rule::new(
            ErrorType::NotFound,
            false,
            "No predicted structure was found for this protein",
            "Verify the UniProt ID and try a different protein",
        ),
        429 => Rule::new(
            ErrorType::RateLimit,
            true,
            "Too many requests were sent to the server",
            "Wait 30-60 seconds before trying again",
        ),
        503 => Rule::new(
            ErrorType::Server,
            true,
            "The service is temporarily unavailable",
            "Try again in 5-10 minutes",
        ),
        502 | 504 => Rule::new(
            ErrorType::Server,
            true,
            "The server had a temporary problem",
            "Try again",
        ),
        400..=499 => Rule::new(
            ErrorType::Client,
            false,
            "The server rejected the request",
            "Check the request and try again",
        ),
        _ => Rule::unknown(),
    }
}

fn rule_for(failure: &RequestFailure) -> Rule {
    if let Some(status) = failure.status() {
        return rule_for_status(status);
    }
    match failure {
        RequestFailure::Network(_) => Rule::new(
            ErrorType::Network,
            true,
            "Unable to reach the server",
            "Check your internet connection",
        ),
        RequestFailure::Timeout(_) => Rule::new(
            ErrorType::Timeout,
            true,
            "The request took too long to complete",
            "The request timed out. Check your connection and try again",
        ),
        RequestFailure::Validation(msg) => Rule::new(
            ErrorType::Validation,
            false,
            msg.clone(),
            "Correct the input and try again",
        ),
        RequestFailure::Format(_) => Rule::new(
            ErrorType::Format,
            false,
            "The structure file could not be read",
            "The file may be corrupted. Try again later or pick another protein",
        ),
        RequestFailure::Data(_) => Rule::new(
            ErrorType::Data,
            false,
            "The server returned data in an unexpected format",
            "Try again later. The service may be changing its data format",
        ),
        RequestFailure::Cancelled => Rule::new(
            ErrorType::Cancelled,
            false,
            "The request was cancelled",
            "Start a new request",
        ),
        RequestFailure::Callback(_) | RequestFailure::Status { .. } => {
            Rule::unknown()
        }
    }
}

/// Classify a failed request. Pure: the same error always yields the same
/// descriptor.
#[must_use]
pub fn classify_error(error: &RequestError) -> ErrorDescriptor {
    let failure = error.failure();
    let rule = rule_for(failure);

    let message = match error.retry() {
        Some(ctx) if ctx.exhausted => {
            format!("{} (Failed after {} attempts)", rule.message, ctx.attempt)
        }
        _ => rule.message.into_owned(),
    };

    let technical_details = match failure.status() {
        Some(status) => format!("HTTP {status}: {}", failure.raw_message()),
        None => failure.raw_message(),
    };

    ErrorDescriptor {
        error_type: rule.error_type,
        message,
        technical_details,
        retryable: rule.retryable,
        user_action: rule.user_action.to_owned(),
    }
}
