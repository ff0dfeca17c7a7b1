use serde::{Deserialize, Serialize};

use crate::confidence::ConfidenceLevel;
use crate::selection::StructuralElement;

/// Color palette options for confidence and secondary-structure coloring.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB color for very high confidence (pLDDT ≥ 90).
    pub very_high: [f32; 3],
    /// RGB color for confident residues (70 ≤ pLDDT < 90).
    pub confident: [f32; 3],
    /// RGB color for low confidence (50 ≤ pLDDT < 70).
    pub low: [f32; 3],
    /// RGB color for very low confidence (pLDDT < 50).
    pub very_low: [f32; 3],
    /// RGB color for helices.
    pub helix: [f32; 3],
    /// RGB color for strands.
    pub sheet: [f32; 3],
    /// RGB color for loops / coil.
    pub coil: [f32; 3],
}

impl Default for ColorOptions {
    fn default() -> Self {
        // AlphaFold DB palette
        Self {
            very_high: [0.0, 0.325, 0.839],
            confident: [0.396, 0.796, 0.953],
            low: [1.0, 0.859, 0.075],
            very_low: [1.0, 0.490, 0.271],
            helix: [0.9, 0.3, 0.5],
            sheet: [0.95, 0.85, 0.3],
            coil: [0.6, 0.85, 0.6],
        }
    }
}

impl ColorOptions {
    /// Palette color for a confidence level.
    #[must_use]
    pub fn confidence_color(&self, level: ConfidenceLevel) -> [f32; 3] {
        match level {
            ConfidenceLevel::VeryHigh => self.very_high,
            ConfidenceLevel::Confident => self.confident,
            ConfidenceLevel::Low => self.low,
            ConfidenceLevel::VeryLow => self.very_low,
        }
    }

    /// Fixed color for a secondary-structure element.
    #[must_use]
    pub fn element_color(&self, element: StructuralElement) -> [f32; 3] {
        match element {
            StructuralElement::Helix => self.helix,
            StructuralElement::Sheet => self.sheet,
            StructuralElement::Loop => self.coil,
        }
    }
}
