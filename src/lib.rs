// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Resilient AlphaFold/UniProt structure retrieval and interactive residue
//! selection for protein viewers.
//!
//! Foldscope looks up a UniProt accession, downloads the predicted model and
//! its per-residue confidence (pLDDT), and drives a 3D viewer's hover/click
//! interaction over the loaded residues.
//!
//! # Key entry points
//!
//! - [`net::RequestClient`] - validated, retried, cancellable access to the
//!   UniProt search and AlphaFold DB endpoints
//! - [`net::classify_error`] - turns a failure into a user-facing
//!   [`net::ErrorDescriptor`]
//! - [`selection::SelectionController`] - hover/click state machine driving
//!   a [`selection::Viewer`] and a [`selection::Overlay`]
//! - [`Session`] - one client, one controller and the structure on screen
//! - [`options::Options`] - endpoints, retry policy, highlight and palette
//!   settings, loadable from TOML
//!
//! # Architecture
//!
//! Everything runs on the caller's thread. The network and the rendering
//! engine are reached only through capability traits
//! ([`net::HttpTransport`], [`net::Sleeper`], [`selection::Viewer`],
//! [`selection::Overlay`]), so hosts plug in their own implementations and
//! tests script them. The `http` feature provides a `ureq` transport and the
//! `web` feature a DOM overlay.

pub mod confidence;
pub mod error;
pub mod net;
pub mod options;
pub mod selection;
pub mod session;
pub mod structure;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

#[cfg(test)]
mod test_support;

pub use confidence::{ConfidenceData, ConfidenceLevel, ResidueConfidence};
pub use error::FoldscopeError;
pub use session::{LoadedStructure, Session};
