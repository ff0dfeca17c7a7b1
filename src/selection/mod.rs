//! Interactive residue selection.
//!
//! [`SelectionController`] turns hover/click pick targets into residue
//! records and drives two external surfaces through capability traits:
//! the 3D engine ([`Viewer`]) and the tooltip/popup layer ([`Overlay`]).

mod controller;
mod overlay;
mod pick;
mod secondary_structure;
mod viewer;

pub use controller::{SelectionController, SelectionState};
pub use overlay::{tooltip_text, Overlay, ResidueDetails};
pub use pick::{PickTarget, PointerPosition, SelectionEvent};
pub use secondary_structure::{StructuralElement, UnknownElement};
pub use viewer::{
    ColorSpec, ModelFormat, Selector, Style, StyleKind, Viewer, ViewerError,
};

pub use crate::confidence::{confidence_explanation, confidence_level_text};
pub use crate::structure::amino_acid_info;
