//! Scripted and recording doubles for the crate's capability traits.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::confidence::{ResidueConfidence, ResidueKey};
use crate::net::{
    CancelToken, HttpRequest, HttpResponse, HttpTransport, RequestFailure,
    Sleeper,
};
use crate::selection::{
    ModelFormat, Overlay, PointerPosition, ResidueDetails, Selector, Style,
    StyleKind, Viewer, ViewerError,
};

/// Three residues of chain A: MET 1 (45.12), VAL 2 (71.30), LEU 3 (93.80).
pub const PDB_FIXTURE: &str = "\
HEADER    PREDICTED MODEL                                       01-JUL-21
ATOM      1  N   MET A   1     -12.280   5.390  -9.512  1.00 45.12           N
ATOM      2  CA  MET A   1     -11.214   4.391  -9.420  1.00 45.12           C
ATOM      3  N   VAL A   2     -10.120   4.950  -8.510  1.00 71.30           N
ATOM      4  N   LEU A   3      -8.950   4.210  -8.100  1.00 93.80           N
END
";

/// A single-chain model of `residues` alanines, one CA atom each at
/// pLDDT 80. Large enough inputs span several read chunks.
pub fn large_pdb(residues: u32) -> String {
    let mut pdb = String::new();
    for n in 1..=residues {
        let _ = writeln!(
            pdb,
            "ATOM  {n:>5}  CA  ALA A{n:>4}     -11.214   4.391  -9.420  1.00 80.00           C"
        );
    }
    pdb.push_str("END\n");
    pdb
}

enum Scripted {
    Respond {
        status: u16,
        body: Vec<u8>,
        with_length: bool,
    },
    Fail(RequestFailure),
}

#[derive(Default)]
struct ScriptState {
    queue: VecDeque<Scripted>,
    requests: Vec<(String, Vec<(String, String)>)>,
    timeouts: Vec<Duration>,
}

/// [`HttpTransport`] replaying a fixed script, one entry per request.
/// Clones share the script and the request log.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    fn push(self, entry: Scripted) -> Self {
        self.state.lock().unwrap().queue.push_back(entry);
        self
    }

    /// Queue a response that advertises its content length.
    pub fn respond(self, status: u16, body: &str) -> Self {
        self.push(Scripted::Respond {
            status,
            body: body.as_bytes().to_vec(),
            with_length: true,
        })
    }

    /// Queue a response without a content length.
    pub fn respond_without_length(self, status: u16, body: &str) -> Self {
        self.push(Scripted::Respond {
            status,
            body: body.as_bytes().to_vec(),
            with_length: false,
        })
    }

    /// Queue a transport failure.
    pub fn fail(self, failure: RequestFailure) -> Self {
        self.push(Scripted::Fail(failure))
    }

    /// Number of requests received.
    pub fn calls(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    /// URL and query of every request received, in order.
    pub fn requests(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Per-attempt timeout of every request received, in order.
    pub fn timeouts(&self) -> Vec<Duration> {
        self.state.lock().unwrap().timeouts.clone()
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(
        &self,
        request: &HttpRequest<'_>,
    ) -> Result<HttpResponse, RequestFailure> {
        let mut state = self.state.lock().unwrap();
        let query = request
            .query
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        state.requests.push((request.url.to_owned(), query));
        state.timeouts.push(request.timeout);
        match state.queue.pop_front() {
            Some(Scripted::Respond {
                status,
                body,
                with_length,
            }) => {
                let mut response = HttpResponse::from_bytes(status, body);
                if !with_length {
                    response.content_length = None;
                }
                Ok(response)
            }
            Some(Scripted::Fail(failure)) => Err(failure),
            None => Err(RequestFailure::Network(
                "no scripted response left".to_owned(),
            )),
        }
    }
}

/// [`Sleeper`] that returns immediately and records requested delays.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
    cancel_on_sleep: bool,
}

impl RecordingSleeper {
    /// A sleeper that cancels the token on its first wait, as if the
    /// caller aborted during backoff.
    pub fn cancelling() -> Self {
        Self {
            delays: Mutex::default(),
            cancel_on_sleep: true,
        }
    }

    /// Delays requested so far.
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, delay: Duration, cancel: &CancelToken) -> bool {
        self.delays.lock().unwrap().push(delay);
        if self.cancel_on_sleep {
            cancel.cancel();
        }
        !cancel.is_cancelled()
    }
}

/// One recorded [`Viewer`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCall {
    AddModel(ModelFormat),
    SetStyle(Selector, Style),
    AddStyle(Selector, Style),
    RemoveStyle(Selector, StyleKind),
    Background([f32; 3]),
    ZoomTo(Selector),
    Render,
    Hoverable(Selector, bool),
    Clickable(Selector, bool),
}

/// [`Viewer`] that logs every call. Clones share the log.
///
/// With [`set_failing`](Self::set_failing) every call is still recorded
/// but returns an error.
#[derive(Clone, Default)]
pub struct RecordingViewer {
    calls: Rc<RefCell<Vec<ViewerCall>>>,
    spheres: Rc<RefCell<Vec<Selector>>>,
    failing: Rc<Cell<bool>>,
}

impl RecordingViewer {
    pub fn calls(&self) -> Vec<ViewerCall> {
        self.calls.borrow().clone()
    }

    /// Forget recorded calls; tracked highlights are kept.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Selectors currently carrying a sphere marker.
    pub fn highlighted(&self) -> Vec<Selector> {
        self.spheres.borrow().clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn record(&self, call: ViewerCall) -> Result<(), ViewerError> {
        if self.failing.get() {
            self.calls.borrow_mut().push(call);
            return Err(ViewerError::new("scripted viewer failure"));
        }
        match &call {
            ViewerCall::AddStyle(selector, Style::Sphere { .. }) => {
                self.spheres.borrow_mut().push(*selector);
            }
            ViewerCall::RemoveStyle(selector, StyleKind::Sphere) => {
                self.spheres.borrow_mut().retain(|s| s != selector);
            }
            _ => {}
        }
        self.calls.borrow_mut().push(call);
        Ok(())
    }
}

impl Viewer for RecordingViewer {
    fn add_model(
        &mut self,
        _data: &str,
        format: ModelFormat,
    ) -> Result<(), ViewerError> {
        self.record(ViewerCall::AddModel(format))
    }

    fn set_style(
        &mut self,
        selector: &Selector,
        style: &Style,
    ) -> Result<(), ViewerError> {
        self.record(ViewerCall::SetStyle(*selector, style.clone()))
    }

    fn add_style(
        &mut self,
        selector: &Selector,
        style: &Style,
    ) -> Result<(), ViewerError> {
        self.record(ViewerCall::AddStyle(*selector, style.clone()))
    }

    fn remove_style(
        &mut self,
        selector: &Selector,
        kind: StyleKind,
    ) -> Result<(), ViewerError> {
        self.record(ViewerCall::RemoveStyle(*selector, kind))
    }

    fn set_background_color(
        &mut self,
        color: [f32; 3],
    ) -> Result<(), ViewerError> {
        self.record(ViewerCall::Background(color))
    }

    fn zoom_to(&mut self, selector: &Selector) -> Result<(), ViewerError> {
        self.record(ViewerCall::ZoomTo(*selector))
    }

    fn render(&mut self) -> Result<(), ViewerError> {
        self.record(ViewerCall::Render)
    }

    fn set_hoverable(
        &mut self,
        selector: &Selector,
        enabled: bool,
    ) -> Result<(), ViewerError> {
        self.record(ViewerCall::Hoverable(*selector, enabled))
    }

    fn set_clickable(
        &mut self,
        selector: &Selector,
        enabled: bool,
    ) -> Result<(), ViewerError> {
        self.record(ViewerCall::Clickable(*selector, enabled))
    }
}

/// One recorded [`Overlay`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCall {
    ShowTooltip {
        residue: ResidueKey,
        at: PointerPosition,
    },
    HideTooltip,
    ShowPopup(ResidueKey),
    HidePopup,
}

/// [`Overlay`] that logs every call. Clones share the log.
#[derive(Clone, Default)]
pub struct RecordingOverlay {
    calls: Rc<RefCell<Vec<OverlayCall>>>,
}

impl RecordingOverlay {
    pub fn calls(&self) -> Vec<OverlayCall> {
        self.calls.borrow().clone()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl Overlay for RecordingOverlay {
    fn show_tooltip(&mut self, residue: &ResidueConfidence, at: PointerPosition) {
        self.calls.borrow_mut().push(OverlayCall::ShowTooltip {
            residue: residue.key(),
            at,
        });
    }

    fn hide_tooltip(&mut self) {
        self.calls.borrow_mut().push(OverlayCall::HideTooltip);
    }

    fn show_detail_popup(&mut self, details: &ResidueDetails) {
        self.calls
            .borrow_mut()
            .push(OverlayCall::ShowPopup(details.residue.key()));
    }

    fn hide_detail_popup(&mut self) {
        self.calls.borrow_mut().push(OverlayCall::HidePopup);
    }
}
