//! Resilient access to the remote protein data services.
//!
//! [`RequestClient`] validates input, sends requests through an injected
//! [`HttpTransport`], retries transient failures with exponential backoff
//! (waiting through an injected [`Sleeper`]), and reports download progress.
//! Failures come back as [`RequestError`], which [`classify_error`] turns
//! into a user-facing [`ErrorDescriptor`].

mod client;
mod error;
mod models;
mod progress;
mod retry;
mod transport;
mod validate;

pub use client::RequestClient;
pub use error::{
    classify_error, ErrorDescriptor, ErrorType, ProgressError, RequestError,
    RequestFailure, RetryContext,
};
pub use models::{PredictionEntry, SearchMatch};
pub use progress::{Progress, ProgressFn, ProgressKind};
pub use retry::{
    AbortHandle, CancelToken, RetryPolicy, RetryState, Sleeper, ThreadSleeper,
};
#[cfg(feature = "http")]
pub use transport::UreqTransport;
pub use transport::{HttpRequest, HttpResponse, HttpTransport};
pub use validate::{validate_identifier, validate_query};
