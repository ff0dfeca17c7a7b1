//! Rendering-layer capability consumed by the selection controller.
//!
//! The 3D engine itself lives outside this crate. Hosts implement [`Viewer`]
//! over whatever engine they embed and route its hover/click callbacks into
//! [`SelectionController`](super::SelectionController).

use std::fmt;

use crate::confidence::{ResidueConfidence, ResidueKey};

/// Failure reported by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerError(pub String);

impl ViewerError {
    /// Create an error from any message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "viewer error: {}", self.0)
    }
}

impl std::error::Error for ViewerError {}

/// Structural query targeting styling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// Every atom of the model.
    All,
    /// One residue.
    Residue {
        /// Residue sequence number.
        residue_number: i32,
        /// Chain identifier.
        chain_id: char,
    },
    /// All residues with the given secondary-structure code
    /// (`'h'`, `'s'` or `'c'`).
    SecondaryStructure(char),
}

impl Selector {
    /// Selector for a single residue record.
    #[must_use]
    pub fn residue(residue: &ResidueConfidence) -> Self {
        Self::Residue {
            residue_number: residue.residue_number(),
            chain_id: residue.chain_id(),
        }
    }
}

/// How a styled region is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSpec {
    /// One RGB color for the whole selection.
    Uniform([f32; 3]),
    /// Per-residue RGB colors; residues not listed keep the engine default.
    PerResidue(Vec<(ResidueKey, [f32; 3])>),
}

/// Representation kind, used to remove a style without restating it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    /// Sphere markers.
    Sphere,
    /// Cartoon backbone.
    Cartoon,
}

/// A representation applied to a selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    /// Sphere marker.
    Sphere {
        /// RGB color.
        color: [f32; 3],
        /// Radius in Ångström.
        radius: f32,
        /// Opacity in `[0, 1]`.
        opacity: f32,
    },
    /// Cartoon backbone.
    Cartoon {
        /// Coloring.
        color: ColorSpec,
    },
}

/// Model file formats the viewer is asked to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    /// PDB text.
    Pdb,
}

/// Capability interface of the 3D rendering engine.
///
/// Every call may fail; callers in this crate log failures and carry on.
pub trait Viewer {
    /// Load a model from text.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine cannot parse the model.
    fn add_model(
        &mut self,
        data: &str,
        format: ModelFormat,
    ) -> Result<(), ViewerError>;
    /// Replace all styles on `selector`.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine rejects the selector or style.
    fn set_style(
        &mut self,
        selector: &Selector,
        style: &Style,
    ) -> Result<(), ViewerError>;
    /// Layer an additional style on `selector`.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine rejects the selector or style.
    fn add_style(
        &mut self,
        selector: &Selector,
        style: &Style,
    ) -> Result<(), ViewerError>;
    /// Remove styles of `kind` from `selector`.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine rejects the selector.
    fn remove_style(
        &mut self,
        selector: &Selector,
        kind: StyleKind,
    ) -> Result<(), ViewerError>;
    /// Set the background color.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine rejects the call.
    fn set_background_color(&mut self, color: [f32; 3])
        -> Result<(), ViewerError>;
    /// Fit the camera to `selector`.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine rejects the selector.
    fn zoom_to(&mut self, selector: &Selector) -> Result<(), ViewerError>;
    /// Redraw.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the frame cannot be drawn.
    fn render(&mut self) -> Result<(), ViewerError>;
    /// Enable or disable hover events for `selector`. The host forwards the
    /// engine's hover callbacks to the controller.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine rejects the selector.
    fn set_hoverable(
        &mut self,
        selector: &Selector,
        enabled: bool,
    ) -> Result<(), ViewerError>;
    /// Enable or disable click events for `selector`.
    ///
    /// # Errors
    ///
    /// [`ViewerError`] if the engine rejects the selector.
    fn set_clickable(
        &mut self,
        selector: &Selector,
        enabled: bool,
    ) -> Result<(), ViewerError>;
}
