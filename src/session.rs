//! One interactive lookup session: a request client, a selection controller
//! and the structure currently on screen.

use std::sync::Arc;

use crate::confidence::ConfidenceData;
use crate::net::{
    AbortHandle, HttpTransport, PredictionEntry, ProgressFn, RequestClient, RequestError,
    SearchMatch, Sleeper, ThreadSleeper,
};
use crate::selection::SelectionController;

/// The structure most recently loaded into a [`Session`].
#[derive(Debug, Clone)]
pub struct LoadedStructure {
    /// Normalized UniProt accession.
    pub accession: String,
    /// AlphaFold prediction records for the accession.
    pub metadata: Vec<PredictionEntry>,
    /// Per-residue confidence, shared with the selection controller.
    pub confidence: Arc<ConfidenceData>,
}

/// Ties remote lookups to the interactive viewer state.
///
/// A new [`load`](Self::load) supersedes any request still running on the
/// client, and [`abort_handle`](Self::abort_handle) stops a running load
/// from a progress callback or another thread. The confidence data seen by the controller is only replaced once
/// both the metadata and the structure have arrived, so a failed load leaves
/// the previous structure fully usable.
pub struct Session<T, S = ThreadSleeper> {
    client: RequestClient<T, S>,
    selection: SelectionController,
    background: [f32; 3],
    loaded: Option<LoadedStructure>,
}

#[cfg(feature = "http")]
impl Session<crate::net::UreqTransport> {
    /// Session over a `ureq` client configured from `options`.
    #[must_use]
    pub fn with_options(options: &crate::options::Options) -> Self {
        Self::new(
            RequestClient::with_options(options.client.clone()),
            SelectionController::new(&options.viewer, options.colors.clone()),
            options.viewer.background_color,
        )
    }
}

impl<T: HttpTransport, S: Sleeper> Session<T, S> {
    /// Assemble a session from its parts.
    #[must_use]
    pub fn new(
        client: RequestClient<T, S>,
        selection: SelectionController,
        background: [f32; 3],
    ) -> Self {
        Self {
            client,
            selection,
            background,
            loaded: None,
        }
    }

    /// The request client.
    #[must_use]
    pub fn client(&self) -> &RequestClient<T, S> {
        &self.client
    }

    /// Handle that aborts the load or search in flight. It stays valid
    /// across loads.
    #[must_use]
    pub fn abort_handle(&self) -> AbortHandle {
        self.client.abort_handle()
    }

    /// The selection controller.
    #[must_use]
    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    /// Mutable access to the selection controller, for routing pointer
    /// events and attaching the viewer or overlay.
    pub fn selection_mut(&mut self) -> &mut SelectionController {
        &mut self.selection
    }

    /// The structure on screen, if any.
    #[must_use]
    pub fn loaded(&self) -> Option<&LoadedStructure> {
        self.loaded.as_ref()
    }

    /// Search UniProtKB.
    ///
    /// # Errors
    ///
    /// See [`RequestClient::search_by_query`].
    pub fn search<'q>(
        &self,
        query: impl Into<Option<&'q str>>,
        on_progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<Vec<SearchMatch>, RequestError> {
        self.client.search_by_query(query, on_progress)
    }

    /// Fetch metadata and structure for `identifier`, then swap them in.
    ///
    /// Progress events from both downloads go to `on_progress`. On success
    /// the selection is reset and the model is pushed to the viewer. Both
    /// downloads run under one cancel generation, so an abort at any point
    /// ends the whole load.
    ///
    /// # Errors
    ///
    /// The first failure from [`RequestClient::fetch_metadata`] or
    /// [`RequestClient::fetch_structure`]. The previous structure stays
    /// loaded.
    pub fn load<'q>(
        &mut self,
        identifier: impl Into<Option<&'q str>>,
        mut on_progress: Option<&mut ProgressFn<'_>>,
    ) -> Result<&LoadedStructure, RequestError> {
        let identifier = identifier.into();
        self.client.abort();
        let cancel = self.client.cancel_token();

        let metadata = self.client.fetch_metadata_in(
            identifier,
            on_progress.as_deref_mut(),
            &cancel,
        )?;
        let structure =
            self.client.fetch_structure_in(identifier, on_progress, &cancel)?;

        let confidence = Arc::new(structure.confidence);
        log::info!(
            "Loaded {} ({} residues, {} predictions)",
            structure.accession,
            confidence.len(),
            metadata.len()
        );

        self.selection.load_confidence(Arc::clone(&confidence));
        self.selection
            .present_structure(&structure.pdb, self.background);

        Ok(self.loaded.insert(LoadedStructure {
            accession: structure.accession,
            metadata,
            confidence,
        }))
    }
}

impl<T, S> std::fmt::Debug for Session<T, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("selection", &self.selection)
            .field("loaded", &self.loaded.as_ref().map(|l| &l.accession))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::{
        ErrorType, Progress, ProgressError, ProgressKind, RequestFailure,
    };
    use crate::options::{ClientOptions, ColorOptions, ViewerOptions};
    use crate::selection::{ModelFormat, PickTarget, PointerPosition, Selector};
    use crate::test_support::{
        large_pdb, RecordingOverlay, RecordingSleeper, RecordingViewer,
        ScriptedTransport, ViewerCall, PDB_FIXTURE,
    };

    const METADATA: &str =
        r#"[{"uniprotAccession":"P69905","entryId":"AF-P69905-F1"}]"#;

    fn session(
        transport: &ScriptedTransport,
    ) -> (Session<ScriptedTransport, RecordingSleeper>, RecordingViewer) {
        let viewer = RecordingViewer::default();
        let mut selection = SelectionController::new(
            &ViewerOptions::default(),
            ColorOptions::default(),
        );
        selection.attach_viewer(Box::new(viewer.clone()));
        selection.attach_overlay(Box::new(RecordingOverlay::default()));
        let client = RequestClient::new(
            transport.clone(),
            RecordingSleeper::default(),
            ClientOptions::default(),
        );
        (Session::new(client, selection, [0.0, 0.0, 0.0]), viewer)
    }

    #[test]
    fn load_fetches_metadata_then_structure() {
        let transport = ScriptedTransport::default()
            .respond(200, METADATA)
            .respond(200, PDB_FIXTURE);
        let (mut s, viewer) = session(&transport);

        let loaded = s.load("p69905", None).unwrap();
        assert_eq!(loaded.accession, "P69905");
        assert_eq!(loaded.metadata.len(), 1);
        assert_eq!(loaded.confidence.len(), 3);

        let urls: Vec<String> =
            transport.requests().into_iter().map(|(url, _)| url).collect();
        assert!(urls[0].ends_with("/api/prediction/P69905"));
        assert!(urls[1].ends_with("/files/AF-P69905-F1-model_v4.pdb"));

        let calls = viewer.calls();
        assert_eq!(calls[0], ViewerCall::AddModel(ModelFormat::Pdb));
        assert!(calls.contains(&ViewerCall::ZoomTo(Selector::All)));
        assert!(calls.contains(&ViewerCall::Hoverable(Selector::All, true)));
        assert!(calls.contains(&ViewerCall::Clickable(Selector::All, true)));
    }

    #[test]
    fn loaded_residues_become_pickable() {
        let transport = ScriptedTransport::default()
            .respond(200, METADATA)
            .respond(200, PDB_FIXTURE);
        let (mut s, _) = session(&transport);
        let _ = s.load("P69905", None).unwrap();

        s.selection_mut()
            .on_pointer_click(PickTarget::residue(2, 'A'), PointerPosition::default());
        assert_eq!(s.selection().selected().unwrap().residue_name(), "VAL");
    }

    #[test]
    fn reload_clears_selection() {
        let transport = ScriptedTransport::default()
            .respond(200, METADATA)
            .respond(200, PDB_FIXTURE)
            .respond(200, METADATA)
            .respond(200, PDB_FIXTURE);
        let (mut s, viewer) = session(&transport);
        let _ = s.load("P69905", None).unwrap();
        s.selection_mut()
            .on_pointer_click(PickTarget::residue(1, 'A'), PointerPosition::default());
        assert_eq!(viewer.highlighted().len(), 1);

        let _ = s.load("P69905", None).unwrap();
        assert!(s.selection().selected().is_none());
        assert!(viewer.highlighted().is_empty());
    }

    #[test]
    fn failed_load_keeps_previous_structure() {
        let transport = ScriptedTransport::default()
            .respond(200, METADATA)
            .respond(200, PDB_FIXTURE)
            .respond(200, METADATA)
            .respond(404, "");
        let (mut s, _) = session(&transport);
        let _ = s.load("P69905", None).unwrap();
        s.selection_mut()
            .on_pointer_click(PickTarget::residue(3, 'A'), PointerPosition::default());

        let err = s.load("Q8W3K0", None).unwrap_err();
        assert_eq!(err.descriptor().error_type, ErrorType::NotFound);
        assert_eq!(s.loaded().unwrap().accession, "P69905");
        assert_eq!(s.selection().selected().unwrap().residue_number(), 3);
    }

    #[test]
    fn invalid_identifier_sends_nothing() {
        let transport = ScriptedTransport::default();
        let (mut s, viewer) = session(&transport);
        let err = s.load("not an id", None).unwrap_err();
        assert_eq!(err.descriptor().error_type, ErrorType::Validation);
        assert_eq!(transport.calls(), 0);
        assert!(viewer.calls().is_empty());
        assert!(s.loaded().is_none());
    }

    #[test]
    fn progress_covers_both_downloads() {
        let transport = ScriptedTransport::default()
            .respond(200, METADATA)
            .respond(200, PDB_FIXTURE);
        let (mut s, _) = session(&transport);
        let mut kinds = Vec::new();
        let mut cb = |p: &Progress| -> Result<(), ProgressError> {
            kinds.push(p.kind);
            Ok(())
        };
        let _ = s.load("P69905", Some(&mut cb)).unwrap();
        assert_eq!(kinds.first(), Some(&ProgressKind::Metadata));
        assert_eq!(kinds.last(), Some(&ProgressKind::StructureDownload));
    }

    #[test]
    fn handle_taken_before_load_aborts_it() {
        let transport = ScriptedTransport::default()
            .respond(200, METADATA)
            .respond(200, PDB_FIXTURE);
        let (mut s, viewer) = session(&transport);
        let handle = s.abort_handle();
        let mut cb = |p: &Progress| -> Result<(), ProgressError> {
            if p.kind == ProgressKind::Metadata {
                handle.abort();
            }
            Ok(())
        };

        let err = s.load("P69905", Some(&mut cb)).unwrap_err();
        assert!(matches!(err.failure(), RequestFailure::Cancelled));
        assert_eq!(err.descriptor().error_type, ErrorType::Cancelled);
        // the structure is never requested
        assert_eq!(transport.calls(), 1);
        assert!(s.loaded().is_none());
        assert!(viewer.calls().is_empty());
    }

    #[test]
    fn abort_from_another_thread_stops_the_download() {
        let transport = ScriptedTransport::default()
            .respond(200, METADATA)
            .respond(200, &large_pdb(500));
        let (mut s, _) = session(&transport);
        let handle = s.abort_handle();
        let mut chunks = 0;
        let mut cb = |p: &Progress| -> Result<(), ProgressError> {
            if p.kind == ProgressKind::StructureDownload {
                chunks += 1;
                let remote = handle.clone();
                std::thread::spawn(move || remote.abort()).join().unwrap();
            }
            Ok(())
        };

        let err = s.load("P69905", Some(&mut cb)).unwrap_err();
        assert!(matches!(err.failure(), RequestFailure::Cancelled));
        assert_eq!(chunks, 1);
        assert_eq!(transport.calls(), 2);
        assert!(s.loaded().is_none());

        // the next load starts a fresh generation
        let transport_ok = transport.respond(200, METADATA).respond(200, PDB_FIXTURE);
        assert!(s.load("P69905", None).is_ok());
        assert_eq!(transport_ok.calls(), 4);
    }
}
