//! Pick targets and pointer events delivered by the viewer host.

/// What the pointer is over, as reported by the viewer's native event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PickTarget {
    /// No target (background, or the engine reported nothing).
    #[default]
    None,
    /// An atom belonging to a residue.
    Residue {
        /// Residue sequence number (`resi`).
        residue_number: i32,
        /// Chain tag.
        chain_id: char,
    },
}

impl PickTarget {
    /// Target for `(residue_number, chain_id)`.
    #[must_use]
    pub fn residue(residue_number: i32, chain_id: char) -> Self {
        Self::Residue {
            residue_number,
            chain_id,
        }
    }
}

/// Pointer position in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    /// Horizontal position.
    pub x: f32,
    /// Vertical position.
    pub y: f32,
}

impl PointerPosition {
    /// Position at `(x, y)`.
    #[must_use]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Viewer-agnostic interaction events.
///
/// Hosts translate their engine's hover/click callbacks into these and feed
/// them to [`SelectionController::handle_event`](super::SelectionController::handle_event).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionEvent {
    /// Pointer entered an atom.
    Hover {
        /// What is under the pointer.
        target: PickTarget,
        /// Where the pointer is.
        position: PointerPosition,
    },
    /// Pointer left the atom it was hovering.
    HoverEnd,
    /// An atom was clicked.
    Click {
        /// What was clicked.
        target: PickTarget,
        /// Where the pointer is.
        position: PointerPosition,
    },
    /// Explicit clear (Escape key, close button).
    Cancel,
}
