//! Per-residue pLDDT → RGB color mapping.
//!
//! Colors come from the four-band AlphaFold palette in [`ColorOptions`]; a
//! residue's band is its [`ConfidenceLevel`](crate::confidence::ConfidenceLevel),
//! so coloring and the textual confidence labels never disagree.

use crate::confidence::{ResidueConfidence, ResidueKey};
use crate::options::ColorOptions;

/// Palette color for every residue, keyed for per-residue cartoon coloring.
#[must_use]
pub fn per_residue_confidence_colors(
    residues: &[ResidueConfidence],
    palette: &ColorOptions,
) -> Vec<(ResidueKey, [f32; 3])> {
    residues
        .iter()
        .map(|r| (r.key(), palette.confidence_color(r.confidence_level())))
        .collect()
}

/// `#rrggbb` form of an RGB color with channels in `[0, 1]`.
#[must_use]
pub fn rgb_to_hex(rgb: [f32; 3]) -> String {
    let [r, g, b] = rgb.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}
