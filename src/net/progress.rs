//! Download progress reporting.

use serde::Serialize;

use super::error::{ProgressError, RequestFailure};

/// Which operation a progress event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressKind {
    /// A search request is about to be sent.
    Search,
    /// A metadata request is about to be sent.
    Metadata,
    /// A chunk of the structure file arrived.
    StructureDownload,
}

/// One progress event, as passed to the caller's callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Operation kind.
    #[serde(rename = "type")]
    pub kind: ProgressKind,
    /// Total body size, when the server advertised it.
    pub total_size: Option<u64>,
    /// Bytes received so far.
    pub bytes_received: Option<u64>,
}

impl Progress {
    /// An event carrying no byte counts.
    #[must_use]
    pub fn started(kind: ProgressKind) -> Self {
        Self {
            kind,
            total_size: None,
            bytes_received: None,
        }
    }

    /// Fraction of the body received, in `[0, 1]`, when the total is known.
    #[must_use]
    pub fn fraction(&self) -> Option<f64> {
        match (self.total_size, self.bytes_received) {
            (Some(total), Some(received)) if total > 0 => {
                Some((received as f64 / total as f64).min(1.0))
            }
            _ => None,
        }
    }
}

/// Progress callback. Returning `Err` fails the request with
/// [`RequestFailure::Callback`].
pub type ProgressFn<'a> = dyn FnMut(&Progress) -> Result<(), ProgressError> + 'a;

/// Invoke the callback if one was supplied, converting its error.
pub(crate) fn report(
    on_progress: &mut Option<&mut ProgressFn<'_>>,
    progress: &Progress,
) -> Result<(), RequestFailure> {
    match on_progress {
        Some(callback) => callback(progress).map_err(RequestFailure::Callback),
        None => Ok(()),
    }
}
