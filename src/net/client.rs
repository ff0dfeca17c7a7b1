//! [`RequestClient`]: validated, retried, cancellable access to the UniProt
//! search, AlphaFold structure and AlphaFold metadata endpoints.

use std::io::{ErrorKind, Read};

use super::error::{RequestError, RequestFailure};
use super::models::{PredictionEntry, SearchMatch, SearchResponse};
use super::progress::{report, Progress, ProgressFn, ProgressKind};
use super::retry::{
    run_with_retry, AbortHandle, CancelToken, Sleeper, ThreadSleeper,
};
use super::transport::{HttpRequest, HttpResponse, HttpTransport};
use super::validate::{validate_identifier, validate_query};
use crate::options::ClientOptions;
use crate::structure::{parse_confidence, StructureFile};

/// Read buffer size for streamed bodies.
const CHUNK_SIZE: usize = 16 * 1024;

/// Upper bound on the up-front body allocation, whatever the server claims.
const MAX_PREALLOC: u64 = 8 * 1024 * 1024;

/// Longest response-body excerpt kept in a status failure message.
const STATUS_EXCERPT_LEN: u64 = 256;

/// UniProt fields requested for search hits.
const SEARCH_FIELDS: &str = "accession,protein_name,organism_name,gene_names,length";

/// Client for the remote protein data services.
///
/// All operations validate their input before touching the network,
/// classify failures, and retry transient ones with exponential backoff.
/// [`abort`](Self::abort) cancels everything currently in flight.
pub struct RequestClient<T, S = ThreadSleeper> {
    transport: T,
    sleeper: S,
    options: ClientOptions,
    generation: AbortHandle,
}

#[cfg(feature = "http")]
impl RequestClient<super::transport::UreqTransport> {
    /// Client backed by `ureq`, sleeping on the calling thread between
    /// attempts.
    #[must_use]
    pub fn with_options(options: ClientOptions) -> Self {
        let transport =
            super::transport::UreqTransport::new(&options.user_agent);
        Self::new(transport, ThreadSleeper, options)
    }
}

impl<T: HttpTransport, S: Sleeper> RequestClient<T, S> {
    /// Build a client from explicit transport and scheduler capabilities.
    #[must_use]
    pub fn new(transport: T, sleeper: S, options: ClientOptions) -> Self {
        Self {
            transport,
            sleeper,
            options,
            generation: AbortHandle::default(),
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Handle to the current cancel generation. Cancelling it aborts every
    /// request started before the next [`abort`](Self::abort).
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.generation.token()
    }

    /// Handle that aborts this client's in-flight requests from anywhere,
    /// including another thread or a progress callback.
    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.generation.clone()
    }

    /// Abort all in-flight requests. Requests started afterwards are
    /// unaffected.
    pub fn abort(&self) {
        self.generation.abort();
        log::debug!("aborted in-flight requests");
    }

    /// Search UniProtKB. An empty result is not an error.
    ///
    /// # Errors
    ///
    /// Validation failures for a missing or blank query, then any
    /// transport, status, cancellation or payload failure, after retries.
    pub fn search_by_query<'q>(
        &self,
        query: impl Into<Option<&'q str>>,
        mut on_progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<Vec<SearchMatch>, RequestError> {
        let query = validate_query(query.into())?;
        let url = self.options.search_url();
        let size = self.options.search_page_size.to_string();
        let params = [
            ("query", query),
            ("format", "json"),
            ("size", size.as_str()),
            ("fields", SEARCH_FIELDS),
        ];
        let cancel = self.cancel_token();

        let body = run_with_retry(
            self.options.retry_policy(),
            &self.sleeper,
            &cancel,
            "search",
            |_| {
                report(&mut on_progress, &Progress::started(ProgressKind::Search))?;
                let response = self.send(&url, &params, "application/json")?;
                read_body(response, &cancel, |_, _| Ok(()))
            },
        )?;

        let parsed: SearchResponse = parse_json(&body, "search results")?;
        let hits: Vec<SearchMatch> =
            parsed.results.into_iter().map(SearchMatch::from).collect();
        log::info!("search {query:?}: {} hits", hits.len());
        Ok(hits)
    }

    /// Download the predicted model for an accession.
    ///
    /// When the server reports a content length, `on_progress` receives a
    /// [`ProgressKind::StructureDownload`] event after every chunk.
    ///
    /// # Errors
    ///
    /// Validation failures for a malformed accession, any transport,
    /// status or cancellation failure after retries, and
    /// [`RequestFailure::Format`] when the body is not a PDB model.
    pub fn fetch_structure<'q>(
        &self,
        identifier: impl Into<Option<&'q str>>,
        on_progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<StructureFile, RequestError> {
        self.fetch_structure_in(identifier.into(), on_progress, &self.cancel_token())
    }

    /// [`fetch_structure`](Self::fetch_structure) under a caller-held
    /// cancel generation.
    pub(crate) fn fetch_structure_in(
        &self,
        identifier: Option<&str>,
        mut on_progress: Option<&mut ProgressFn<'_>>,
        cancel: &CancelToken,
    ) -> Result<StructureFile, RequestError> {
        let accession = validate_identifier(identifier)?;
        let url = self.options.structure_url(&accession);

        let body = run_with_retry(
            self.options.retry_policy(),
            &self.sleeper,
            cancel,
            "structure",
            |_| {
                let response = self.send(&url, &[], "chemical/x-pdb, text/plain")?;
                read_body(response, cancel, |received, total| match total {
                    Some(total) => report(
                        &mut on_progress,
                        &Progress {
                            kind: ProgressKind::StructureDownload,
                            total_size: Some(total),
                            bytes_received: Some(received),
                        },
                    ),
                    None => Ok(()),
                })
            },
        )?;

        let pdb = String::from_utf8(body).map_err(|e| {
            RequestFailure::Format(format!("Invalid PDB file format: {e}"))
        })?;
        let confidence = parse_confidence(&pdb).map_err(|e| {
            RequestFailure::Format(format!("Invalid PDB file format: {e}"))
        })?;
        log::info!(
            "{accession}: downloaded {} bytes, {} residues",
            pdb.len(),
            confidence.len()
        );

        Ok(StructureFile {
            accession,
            pdb,
            confidence,
        })
    }

    /// Fetch AlphaFold prediction metadata for an accession.
    ///
    /// # Errors
    ///
    /// Validation failures for a malformed accession, any transport,
    /// status or cancellation failure after retries, and
    /// [`RequestFailure::Data`] when the body is not the expected JSON.
    pub fn fetch_metadata<'q>(
        &self,
        identifier: impl Into<Option<&'q str>>,
        on_progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<Vec<PredictionEntry>, RequestError> {
        self.fetch_metadata_in(identifier.into(), on_progress, &self.cancel_token())
    }

    /// [`fetch_metadata`](Self::fetch_metadata) under a caller-held cancel
    /// generation.
    pub(crate) fn fetch_metadata_in(
        &self,
        identifier: Option<&str>,
        mut on_progress: Option<&mut ProgressFn<'_>>,
        cancel: &CancelToken,
    ) -> Result<Vec<PredictionEntry>, RequestError> {
        let accession = validate_identifier(identifier)?;
        let url = self.options.metadata_url(&accession);

        let body = run_with_retry(
            self.options.retry_policy(),
            &self.sleeper,
            cancel,
            "metadata",
            |_| {
                report(
                    &mut on_progress,
                    &Progress::started(ProgressKind::Metadata),
                )?;
                let response = self.send(&url, &[], "application/json")?;
                read_body(response, cancel, |_, _| Ok(()))
            },
        )?;

        let entries: Vec<PredictionEntry> = parse_json(&body, "metadata")?;
        log::debug!("{accession}: {} prediction entries", entries.len());
        Ok(entries)
    }

    /// One attempt: send the request and turn non-2xx statuses into
    /// [`RequestFailure::Status`].
    fn send(
        &self,
        url: &str,
        query: &[(&str, &str)],
        accept: &str,
    ) -> Result<HttpResponse, RequestFailure> {
        let response = self.transport.get(&HttpRequest {
            url,
            query,
            accept,
            timeout: self.options.timeout(),
        })?;
        if response.is_success() {
            return Ok(response);
        }

        let status = response.status;
        let mut raw = Vec::new();
        // The excerpt only decorates the message; a failed read leaves it
        // empty.
        let _ = response.body.take(STATUS_EXCERPT_LEN).read_to_end(&mut raw);
        let excerpt = String::from_utf8_lossy(&raw);
        let excerpt = excerpt.trim();
        let message = if excerpt.is_empty() {
            format!("request to {url} failed")
        } else {
            excerpt.to_owned()
        };
        Err(RequestFailure::Status { status, message })
    }
}

/// Read a body to the end in chunks, calling `on_chunk(received, total)`
/// after each one and stopping early on cancellation.
fn read_body(
    mut response: HttpResponse,
    cancel: &CancelToken,
    mut on_chunk: impl FnMut(u64, Option<u64>) -> Result<(), RequestFailure>,
) -> Result<Vec<u8>, RequestFailure> {
    let total = response.content_length;
    let capacity = total.map_or(0, |t| t.min(MAX_PREALLOC) as usize);
    let mut bytes = Vec::with_capacity(capacity);
    let mut chunk = vec![0u8; CHUNK_SIZE];

    loop {
        if cancel.is_cancelled() {
            return Err(RequestFailure::Cancelled);
        }
        let n = match response.body.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        bytes.extend_from_slice(&chunk[..n]);
        on_chunk(bytes.len() as u64, total)?;
    }
    Ok(bytes)
}

fn parse_json<D: serde::de::DeserializeOwned>(
    body: &[u8],
    what: &str,
) -> Result<D, RequestFailure> {
    let value: serde_json::Value = serde_json::from_slice(body).map_err(|e| {
        RequestFailure::Data(format!("Invalid JSON response: {e}"))
    })?;
    serde_json::from_value(value).map_err(|e| {
        RequestFailure::Data(format!("Unexpected {what} format: {e}"))
    })
}
