//! Hover/click state machine driving viewer highlights and overlays.
//!
//! Hover and selection are independent slots: hovering only drives the
//! tooltip, while a click moves the highlight marker and opens the detail
//! popup. Viewer failures are logged and swallowed so a rendering glitch
//! never breaks the interaction flow.

use std::sync::Arc;

use super::overlay::{Overlay, ResidueDetails};
use super::pick::{PickTarget, PointerPosition, SelectionEvent};
use super::secondary_structure::StructuralElement;
use super::viewer::{
    ColorSpec, ModelFormat, Selector, Style, StyleKind, Viewer, ViewerError,
};
use crate::confidence::{ConfidenceData, ResidueConfidence};
use crate::options::{ColorOptions, HighlightOptions, ViewerOptions};
use crate::util::score_color::per_residue_confidence_colors;

/// Currently hovered and selected residues.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    hovered: Option<ResidueConfidence>,
    selected: Option<ResidueConfidence>,
}

impl SelectionState {
    /// Residue under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&ResidueConfidence> {
        self.hovered.as_ref()
    }

    /// Residue picked by the last click, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&ResidueConfidence> {
        self.selected.as_ref()
    }
}

/// Maps pointer events onto residues and keeps the viewer and overlays in
/// sync with the selection.
///
/// Both the viewer and the overlay are optional; every handler works (and
/// updates state) without them.
pub struct SelectionController {
    viewer: Option<Box<dyn Viewer>>,
    overlay: Option<Box<dyn Overlay>>,
    data: Option<Arc<ConfidenceData>>,
    state: SelectionState,
    highlight: HighlightOptions,
    colors: ColorOptions,
    confidence_coloring: bool,
}

impl SelectionController {
    /// Create a controller with no viewer, overlay or data attached.
    #[must_use]
    pub fn new(options: &ViewerOptions, colors: ColorOptions) -> Self {
        Self {
            viewer: None,
            overlay: None,
            data: None,
            state: SelectionState::default(),
            highlight: options.highlight.clone(),
            colors,
            confidence_coloring: options.confidence_coloring,
        }
    }

    /// Attach the rendering engine.
    pub fn attach_viewer(&mut self, viewer: Box<dyn Viewer>) {
        self.viewer = Some(viewer);
    }

    /// Attach the tooltip/popup surface.
    pub fn attach_overlay(&mut self, overlay: Box<dyn Overlay>) {
        self.overlay = Some(overlay);
    }

    /// The attached viewer, for callers that drive it directly.
    pub fn viewer_mut(&mut self) -> Option<&mut (dyn Viewer + 'static)> {
        self.viewer.as_deref_mut()
    }

    /// Current selection state.
    #[must_use]
    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    /// Residue under the pointer, if any.
    #[must_use]
    pub fn hovered(&self) -> Option<&ResidueConfidence> {
        self.state.hovered()
    }

    /// Currently selected residue, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&ResidueConfidence> {
        self.state.selected()
    }

    /// Confidence data the pick targets resolve against.
    #[must_use]
    pub fn confidence(&self) -> Option<&Arc<ConfidenceData>> {
        self.data.as_ref()
    }

    /// Whether cartoon styles are colored by confidence.
    #[must_use]
    pub fn confidence_coloring(&self) -> bool {
        self.confidence_coloring
    }

    /// Switch cartoon coloring between confidence bands and fixed element
    /// colors. Applies to the next [`toggle_structural_element`] call.
    ///
    /// [`toggle_structural_element`]: Self::toggle_structural_element
    pub fn set_confidence_coloring(&mut self, enabled: bool) {
        self.confidence_coloring = enabled;
    }

    /// Replace the confidence data wholesale.
    ///
    /// The previous selection belongs to the old structure: its highlight
    /// is removed and both overlays are hidden before the swap.
    pub fn load_confidence(&mut self, data: Arc<ConfidenceData>) {
        if let Some(previous) = self.state.selected.take() {
            self.clear_residue_highlight(&previous);
        }
        self.state.hovered = None;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.hide_tooltip();
            overlay.hide_detail_popup();
        }
        self.data = Some(data);
    }

    /// Pointer entered an atom.
    pub fn on_pointer_hover(&mut self, target: PickTarget, at: PointerPosition) {
        let Some(residue) = self.resolve(target) else {
            return;
        };
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.show_tooltip(&residue, at);
        }
        self.state.hovered = Some(residue);
    }

    /// Pointer left the hovered atom. Safe when nothing is hovered.
    pub fn on_pointer_hover_end(&mut self) {
        self.state.hovered = None;
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.hide_tooltip();
        }
    }

    /// An atom was clicked.
    ///
    /// At most one residue is highlighted: a previous, different selection
    /// loses its marker before the new one gets it. Clicking the selected
    /// residue again only re-opens the popup.
    pub fn on_pointer_click(&mut self, target: PickTarget, at: PointerPosition) {
        let Some(residue) = self.resolve(target) else {
            return;
        };
        log::debug!(
            "Selected {} {}{} at ({:.0}, {:.0})",
            residue.residue_name(),
            residue.chain_id(),
            residue.residue_number(),
            at.x,
            at.y
        );

        let reselected = self
            .state
            .selected
            .as_ref()
            .is_some_and(|s| s.key() == residue.key());
        if !reselected {
            if let Some(previous) = self.state.selected.take() {
                self.clear_residue_highlight(&previous);
            }
            self.highlight_residue(&residue);
        }

        if let Some(overlay) = self.overlay.as_mut() {
            overlay.show_detail_popup(&ResidueDetails::new(&residue));
        }
        self.state.selected = Some(residue);
    }

    /// Dispatch a viewer-agnostic event to the matching handler.
    pub fn handle_event(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Hover { target, position } => {
                self.on_pointer_hover(target, position);
            }
            SelectionEvent::HoverEnd => self.on_pointer_hover_end(),
            SelectionEvent::Click { target, position } => {
                self.on_pointer_click(target, position);
            }
            SelectionEvent::Cancel => self.clear_selection(),
        }
    }

    /// Draw the highlight marker on `residue` and re-render.
    pub fn highlight_residue(&mut self, residue: &ResidueConfidence) {
        let selector = Selector::residue(residue);
        let style = Style::Sphere {
            color: self.highlight.color,
            radius: self.highlight.radius,
            opacity: self.highlight.opacity,
        };
        self.with_viewer("highlight residue", |viewer| {
            viewer.add_style(&selector, &style)?;
            viewer.render()
        });
    }

    /// Remove the highlight marker from `residue` and re-render.
    pub fn clear_residue_highlight(&mut self, residue: &ResidueConfidence) {
        let selector = Selector::residue(residue);
        self.with_viewer("clear residue highlight", |viewer| {
            viewer.remove_style(&selector, StyleKind::Sphere)?;
            viewer.render()
        });
    }

    /// Drop the current selection with its highlight, popup and tooltip.
    /// No-op when nothing is selected.
    pub fn clear_selection(&mut self) {
        let Some(selected) = self.state.selected.take() else {
            return;
        };
        self.clear_residue_highlight(&selected);
        if let Some(overlay) = self.overlay.as_mut() {
            overlay.hide_detail_popup();
            overlay.hide_tooltip();
        }
    }

    /// Load `pdb` into the viewer as a cartoon, fit the camera and register
    /// every atom for hover and click events.
    ///
    /// Call after [`load_confidence`](Self::load_confidence) so the cartoon
    /// can be colored by the new data.
    pub fn present_structure(&mut self, pdb: &str, background: [f32; 3]) {
        let style = Style::Cartoon {
            color: self.cartoon_color(StructuralElement::Loop),
        };
        self.with_viewer("load model", |viewer| {
            viewer.add_model(pdb, ModelFormat::Pdb)?;
            viewer.set_style(&Selector::All, &style)?;
            viewer.set_background_color(background)?;
            viewer.zoom_to(&Selector::All)?;
            viewer.render()
        });
        self.with_viewer("register pick handlers", |viewer| {
            viewer.set_hoverable(&Selector::All, true)?;
            viewer.set_clickable(&Selector::All, true)
        });
    }

    /// Show or hide the cartoon for one secondary-structure kind
    /// (`"helix"`, `"sheet"` or `"loop"`).
    ///
    /// Unknown kinds are logged and ignored.
    pub fn toggle_structural_element(&mut self, kind: &str, visible: bool) {
        let element = match kind.parse::<StructuralElement>() {
            Ok(element) => element,
            Err(e) => {
                log::warn!("Ignoring toggle: {e}");
                return;
            }
        };
        let selector = Selector::SecondaryStructure(element.selector_code());

        if visible {
            let style = Style::Cartoon {
                color: self.cartoon_color(element),
            };
            self.with_viewer(&format!("show {element}"), |viewer| {
                viewer.add_style(&selector, &style)?;
                viewer.render()
            });
        } else {
            self.with_viewer(&format!("hide {element}"), |viewer| {
                viewer.remove_style(&selector, StyleKind::Cartoon)?;
                viewer.render()
            });
        }
    }

    fn cartoon_color(&self, element: StructuralElement) -> ColorSpec {
        match &self.data {
            Some(data) if self.confidence_coloring => ColorSpec::PerResidue(
                per_residue_confidence_colors(data.residues(), &self.colors),
            ),
            _ => ColorSpec::Uniform(self.colors.element_color(element)),
        }
    }

    fn resolve(&self, target: PickTarget) -> Option<ResidueConfidence> {
        let PickTarget::Residue {
            residue_number,
            chain_id,
        } = target
        else {
            return None;
        };
        self.data
            .as_ref()?
            .get(residue_number, chain_id)
            .cloned()
    }

    /// Run `f` against the viewer, logging instead of propagating failure.
    fn with_viewer(
        &mut self,
        action: &str,
        f: impl FnOnce(&mut (dyn Viewer + 'static)) -> Result<(), ViewerError>,
    ) {
        let Some(viewer) = self.viewer.as_deref_mut() else {
            return;
        };
        if let Err(e) = f(viewer) {
            log::error!("Failed to {action}: {e}");
        }
    }
}

impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("viewer", &self.viewer.is_some())
            .field("overlay", &self.overlay.is_some())
            .field("residues", &self.data.as_ref().map(|d| d.len()))
            .field("state", &self.state)
            .field("confidence_coloring", &self.confidence_coloring)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confidence::{ConfidenceLevel, ResidueKey};
    use crate::test_support::{
        OverlayCall, RecordingOverlay, RecordingViewer, ViewerCall,
    };

    fn data() -> Arc<ConfidenceData> {
        Arc::new(ConfidenceData::new(vec![
            ResidueConfidence::new(1, "MET", 'A', 45.0),
            ResidueConfidence::new(2, "ALA", 'A', 92.0),
            ResidueConfidence::new(1, "GLY", 'B', 75.0),
        ]))
    }

    fn controller() -> (SelectionController, RecordingViewer, RecordingOverlay)
    {
        let viewer = RecordingViewer::default();
        let overlay = RecordingOverlay::default();
        let mut c = SelectionController::new(
            &ViewerOptions::default(),
            ColorOptions::default(),
        );
        c.attach_viewer(Box::new(viewer.clone()));
        c.attach_overlay(Box::new(overlay.clone()));
        c.load_confidence(data());
        viewer.clear();
        overlay.clear();
        (c, viewer, overlay)
    }

    fn at() -> PointerPosition {
        PointerPosition::new(10.0, 20.0)
    }

    fn key(residue_number: i32, chain_id: char) -> ResidueKey {
        ResidueKey {
            residue_number,
            chain_id,
        }
    }

    fn sphere_selector(residue_number: i32, chain_id: char) -> Selector {
        Selector::Residue {
            residue_number,
            chain_id,
        }
    }

    #[test]
    fn hover_sets_exact_record_and_shows_tooltip() {
        let (mut c, _, overlay) = controller();
        c.on_pointer_hover(PickTarget::residue(1, 'B'), at());

        let hovered = c.hovered().unwrap();
        assert_eq!(hovered.residue_name(), "GLY");
        assert_eq!(hovered.chain_id(), 'B');
        assert_eq!(
            overlay.calls(),
            vec![OverlayCall::ShowTooltip {
                residue: key(1, 'B'),
                at: at(),
            }]
        );
    }

    #[test]
    fn hover_miss_is_noop() {
        let (mut c, _, overlay) = controller();
        c.on_pointer_hover(PickTarget::residue(99, 'A'), at());
        c.on_pointer_hover(PickTarget::None, at());
        assert!(c.hovered().is_none());
        assert!(overlay.calls().is_empty());
    }

    #[test]
    fn hover_without_data_is_noop() {
        let overlay = RecordingOverlay::default();
        let mut c = SelectionController::new(
            &ViewerOptions::default(),
            ColorOptions::default(),
        );
        c.attach_overlay(Box::new(overlay.clone()));
        c.on_pointer_hover(PickTarget::residue(1, 'A'), at());
        c.on_pointer_click(PickTarget::residue(1, 'A'), at());
        assert!(c.hovered().is_none());
        assert!(c.selected().is_none());
        assert!(overlay.calls().is_empty());
    }

    #[test]
    fn hover_end_always_hides_tooltip() {
        let (mut c, _, overlay) = controller();
        c.on_pointer_hover_end();
        assert_eq!(overlay.calls(), vec![OverlayCall::HideTooltip]);

        c.on_pointer_hover(PickTarget::residue(2, 'A'), at());
        c.on_pointer_hover_end();
        assert!(c.hovered().is_none());
    }

    #[test]
    fn click_highlights_and_opens_popup() {
        let (mut c, viewer, overlay) = controller();
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());

        assert_eq!(c.selected().unwrap().residue_name(), "ALA");
        let highlight = HighlightOptions::default();
        assert_eq!(
            viewer.calls(),
            vec![
                ViewerCall::AddStyle(
                    sphere_selector(2, 'A'),
                    Style::Sphere {
                        color: highlight.color,
                        radius: highlight.radius,
                        opacity: highlight.opacity,
                    }
                ),
                ViewerCall::Render,
            ]
        );
        assert_eq!(overlay.calls(), vec![OverlayCall::ShowPopup(key(2, 'A'))]);
    }

    #[test]
    fn new_click_moves_highlight() {
        let (mut c, viewer, _) = controller();
        c.on_pointer_click(PickTarget::residue(1, 'A'), at());
        viewer.clear();
        c.on_pointer_click(PickTarget::residue(1, 'B'), at());

        let calls = viewer.calls();
        assert_eq!(
            calls[0],
            ViewerCall::RemoveStyle(sphere_selector(1, 'A'), StyleKind::Sphere)
        );
        assert!(matches!(
            &calls[2],
            ViewerCall::AddStyle(sel, Style::Sphere { .. })
                if *sel == sphere_selector(1, 'B')
        ));
        assert_eq!(viewer.highlighted(), vec![sphere_selector(1, 'B')]);
        assert_eq!(c.selected().unwrap().key(), key(1, 'B'));
    }

    #[test]
    fn reclick_keeps_single_highlight() {
        let (mut c, viewer, overlay) = controller();
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        assert_eq!(viewer.highlighted(), vec![sphere_selector(2, 'A')]);
        assert_eq!(
            overlay.calls(),
            vec![
                OverlayCall::ShowPopup(key(2, 'A')),
                OverlayCall::ShowPopup(key(2, 'A')),
            ]
        );
    }

    #[test]
    fn click_miss_keeps_selection() {
        let (mut c, viewer, _) = controller();
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        viewer.clear();
        c.on_pointer_click(PickTarget::residue(7, 'Z'), at());
        assert_eq!(c.selected().unwrap().key(), key(2, 'A'));
        assert!(viewer.calls().is_empty());
    }

    #[test]
    fn hover_does_not_disturb_selection() {
        let (mut c, _, _) = controller();
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        c.on_pointer_hover(PickTarget::residue(1, 'A'), at());
        c.on_pointer_hover_end();
        assert_eq!(c.selected().unwrap().key(), key(2, 'A'));
    }

    #[test]
    fn clear_selection_removes_everything() {
        let (mut c, viewer, overlay) = controller();
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        viewer.clear();
        overlay.clear();

        c.clear_selection();
        assert!(c.selected().is_none());
        assert_eq!(
            viewer.calls(),
            vec![
                ViewerCall::RemoveStyle(
                    sphere_selector(2, 'A'),
                    StyleKind::Sphere
                ),
                ViewerCall::Render,
            ]
        );
        assert_eq!(
            overlay.calls(),
            vec![OverlayCall::HidePopup, OverlayCall::HideTooltip]
        );
    }

    #[test]
    fn clear_selection_without_selection_is_noop() {
        let (mut c, viewer, overlay) = controller();
        c.clear_selection();
        assert!(viewer.calls().is_empty());
        assert!(overlay.calls().is_empty());
    }

    #[test]
    fn cancel_event_clears_selection() {
        let (mut c, _, _) = controller();
        c.handle_event(SelectionEvent::Click {
            target: PickTarget::residue(1, 'A'),
            position: at(),
        });
        assert!(c.selected().is_some());
        c.handle_event(SelectionEvent::Cancel);
        assert!(c.selected().is_none());
    }

    #[test]
    fn viewer_failures_are_swallowed() {
        let (mut c, viewer, overlay) = controller();
        viewer.set_failing(true);
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        c.toggle_structural_element("helix", true);
        c.clear_selection();
        // State still advances and overlays still update.
        assert!(c.selected().is_none());
        assert_eq!(
            overlay.calls(),
            vec![
                OverlayCall::ShowPopup(key(2, 'A')),
                OverlayCall::HidePopup,
                OverlayCall::HideTooltip,
            ]
        );
    }

    #[test]
    fn handlers_tolerate_missing_viewer_and_overlay() {
        let mut c = SelectionController::new(
            &ViewerOptions::default(),
            ColorOptions::default(),
        );
        c.load_confidence(data());
        c.on_pointer_click(PickTarget::residue(1, 'A'), at());
        c.on_pointer_hover(PickTarget::residue(1, 'A'), at());
        c.toggle_structural_element("sheet", true);
        assert!(c.selected().is_some());
        c.clear_selection();
        c.on_pointer_hover_end();
        assert_eq!(c.state(), &SelectionState::default());
    }

    #[test]
    fn reload_resets_selection_and_hover() {
        let (mut c, viewer, overlay) = controller();
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        c.on_pointer_hover(PickTarget::residue(1, 'A'), at());
        viewer.clear();
        overlay.clear();

        c.load_confidence(Arc::new(ConfidenceData::new(vec![
            ResidueConfidence::new(5, "LYS", 'A', 60.0),
        ])));
        assert_eq!(c.state(), &SelectionState::default());
        assert!(viewer.highlighted().is_empty());
        assert_eq!(
            overlay.calls(),
            vec![OverlayCall::HideTooltip, OverlayCall::HidePopup]
        );
        // Old keys no longer resolve.
        c.on_pointer_click(PickTarget::residue(2, 'A'), at());
        assert!(c.selected().is_none());
    }

    #[test]
    fn toggle_maps_kinds_to_selectors() {
        let (mut c, viewer, _) = controller();
        c.set_confidence_coloring(false);
        let colors = ColorOptions::default();

        for (kind, code, element) in [
            ("helix", 'h', StructuralElement::Helix),
            ("sheet", 's', StructuralElement::Sheet),
            ("loop", 'c', StructuralElement::Loop),
        ] {
            viewer.clear();
            c.toggle_structural_element(kind, true);
            assert_eq!(
                viewer.calls()[0],
                ViewerCall::AddStyle(
                    Selector::SecondaryStructure(code),
                    Style::Cartoon {
                        color: ColorSpec::Uniform(
                            colors.element_color(element)
                        ),
                    }
                )
            );

            viewer.clear();
            c.toggle_structural_element(kind, false);
            assert_eq!(
                viewer.calls(),
                vec![
                    ViewerCall::RemoveStyle(
                        Selector::SecondaryStructure(code),
                        StyleKind::Cartoon
                    ),
                    ViewerCall::Render,
                ]
            );
        }
    }

    #[test]
    fn toggle_unknown_kind_changes_nothing() {
        let (mut c, viewer, _) = controller();
        c.toggle_structural_element("turn", true);
        assert!(viewer.calls().is_empty());
    }

    #[test]
    fn confidence_coloring_colors_per_residue() {
        let (mut c, viewer, _) = controller();
        assert!(c.confidence_coloring());
        c.toggle_structural_element("helix", true);

        let colors = ColorOptions::default();
        let ViewerCall::AddStyle(_, Style::Cartoon { color }) =
            &viewer.calls()[0]
        else {
            panic!("expected a cartoon style");
        };
        let ColorSpec::PerResidue(per_residue) = color else {
            panic!("expected per-residue coloring");
        };
        assert_eq!(per_residue.len(), 3);
        assert_eq!(
            per_residue[0],
            (
                key(1, 'A'),
                colors.confidence_color(ConfidenceLevel::VeryLow)
            )
        );
    }
}
