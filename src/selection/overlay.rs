//! Transient UI artifacts tied to the selection: the hover tooltip and the
//! residue detail popup.

use serde::Serialize;

use super::pick::PointerPosition;
use crate::confidence::ResidueConfidence;
use crate::structure::{amino_acid_info, AminoAcidInfo};

/// Everything the detail popup shows for one residue.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidueDetails {
    /// The residue record.
    pub residue: ResidueConfidence,
    /// Amino-acid reference data.
    pub amino_acid: AminoAcidInfo,
    /// Confidence label, e.g. "Confident (70 ≤ pLDDT < 90)".
    pub confidence_label: &'static str,
    /// What the confidence level means.
    pub confidence_explanation: &'static str,
}

impl ResidueDetails {
    /// Gather the popup content for `residue`.
    #[must_use]
    pub fn new(residue: &ResidueConfidence) -> Self {
        let level = residue.confidence_level();
        Self {
            residue: residue.clone(),
            amino_acid: amino_acid_info(residue.residue_name()),
            confidence_label: level.label(),
            confidence_explanation: level.explanation(),
        }
    }

    /// One-line summary, e.g. "MET 1 (chain A) · pLDDT 45.1".
    #[must_use]
    pub fn summary(&self) -> String {
        tooltip_text(&self.residue)
    }

    /// Multi-line plain-text body for the popup.
    #[must_use]
    pub fn popup_text(&self) -> String {
        let aa = &self.amino_acid;
        format!(
            "{}\n{} ({}, {}, {})\n{}\n{}\n{}",
            self.summary(),
            aa.full_name,
            aa.kind,
            aa.polarity,
            aa.charge,
            aa.description,
            self.confidence_label,
            self.confidence_explanation
        )
    }
}

/// Tooltip text for a residue.
#[must_use]
pub fn tooltip_text(residue: &ResidueConfidence) -> String {
    format!(
        "{} {} (chain {}) · pLDDT {:.1}",
        residue.residue_name(),
        residue.residue_number(),
        residue.chain_id(),
        residue.confidence_score()
    )
}

/// DOM-side capability for the tooltip and detail popup.
pub trait Overlay {
    /// Show (or move) the hover tooltip for `residue` at `at`.
    fn show_tooltip(&mut self, residue: &ResidueConfidence, at: PointerPosition);
    /// Hide the hover tooltip. Safe when already hidden.
    fn hide_tooltip(&mut self);
    /// Show the persistent detail popup.
    fn show_detail_popup(&mut self, details: &ResidueDetails);
    /// Hide the detail popup. Safe when already hidden.
    fn hide_detail_popup(&mut self);
}
