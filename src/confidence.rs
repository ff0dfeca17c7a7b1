//! Per-residue prediction confidence (pLDDT).
//!
//! [`ConfidenceLevel::from_score`] is the single place the four-bucket
//! thresholds live. Every record, color and explanatory text derives its
//! level through it.
//!
//! | level     | score range     |
//! |-----------|-----------------|
//! | VeryHigh  | `90 ≤ s`        |
//! | Confident | `70 ≤ s < 90`   |
//! | Low       | `50 ≤ s < 70`   |
//! | VeryLow   | `s < 50`, NaN   |

use rustc_hash::FxHashMap;
use serde::Serialize;

/// Lower bound (inclusive) of [`ConfidenceLevel::VeryHigh`].
pub const VERY_HIGH_THRESHOLD: f64 = 90.0;
/// Lower bound (inclusive) of [`ConfidenceLevel::Confident`].
pub const CONFIDENT_THRESHOLD: f64 = 70.0;
/// Lower bound (inclusive) of [`ConfidenceLevel::Low`].
pub const LOW_THRESHOLD: f64 = 50.0;

/// Qualitative confidence bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// pLDDT ≥ 90.
    VeryHigh,
    /// 70 ≤ pLDDT < 90.
    Confident,
    /// 50 ≤ pLDDT < 70.
    Low,
    /// pLDDT < 50.
    VeryLow,
}

impl ConfidenceLevel {
    /// All levels, best first.
    pub const ALL: [Self; 4] =
        [Self::VeryHigh, Self::Confident, Self::Low, Self::VeryLow];

    /// Bucket a score. Non-finite scores are treated as very low.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= VERY_HIGH_THRESHOLD {
            Self::VeryHigh
        } else if score >= CONFIDENT_THRESHOLD {
            Self::Confident
        } else if score >= LOW_THRESHOLD {
            Self::Low
        } else {
            Self::VeryLow
        }
    }

    /// Tag used in serialized form and by UI code (`"very_high"`, …).
    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Self::VeryHigh => "very_high",
            Self::Confident => "confident",
            Self::Low => "low",
            Self::VeryLow => "very_low",
        }
    }

    /// Parse a tag produced by [`tag`](Self::tag).
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.tag() == tag)
    }

    /// Short label with the score range, e.g. "Very high (pLDDT ≥ 90)".
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very high (pLDDT ≥ 90)",
            Self::Confident => "Confident (70 ≤ pLDDT < 90)",
            Self::Low => "Low (50 ≤ pLDDT < 70)",
            Self::VeryLow => "Very low (pLDDT < 50)",
        }
    }

    /// What a residue at this level means for interpretation.
    #[must_use]
    pub fn explanation(self) -> &'static str {
        match self {
            Self::VeryHigh => {
                "Very high confidence. Backbone and side chains are typically \
                 modelled with high accuracy."
            }
            Self::Confident => {
                "Confident. The backbone is usually modelled well; side-chain \
                 placement may be less reliable."
            }
            Self::Low => {
                "Low confidence. Treat the local structure with caution; it \
                 may be partially incorrect."
            }
            Self::VeryLow => {
                "Very low confidence. Often an intrinsically disordered \
                 region; the coordinates should not be interpreted."
            }
        }
    }
}

/// Explanatory text for a raw score.
#[must_use]
pub fn confidence_explanation(score: f64) -> &'static str {
    ConfidenceLevel::from_score(score).explanation()
}

/// Human-readable label for a level tag (`"very_high"`, `"confident"`,
/// `"low"`, `"very_low"`). Unrecognized tags yield `"Unknown"`.
#[must_use]
pub fn confidence_level_text(tag: &str) -> &'static str {
    ConfidenceLevel::from_tag(tag).map_or("Unknown", ConfidenceLevel::label)
}

/// Confidence of a single residue, as parsed from a structure file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidueConfidence {
    residue_number: i32,
    residue_name: String,
    chain_id: char,
    confidence_score: f64,
    confidence_level: ConfidenceLevel,
}

impl ResidueConfidence {
    /// Build a record; the level is derived from `score`, which is clamped
    /// into `[0, 100]`.
    #[must_use]
    pub fn new(
        residue_number: i32,
        residue_name: &str,
        chain_id: char,
        score: f64,
    ) -> Self {
        let confidence_score = if score.is_finite() {
            score.clamp(0.0, 100.0)
        } else {
            0.0
        };
        Self {
            residue_number,
            residue_name: residue_name.trim().to_ascii_uppercase(),
            chain_id,
            confidence_score,
            confidence_level: ConfidenceLevel::from_score(confidence_score),
        }
    }

    /// Residue sequence number (1-based).
    #[must_use]
    pub fn residue_number(&self) -> i32 {
        self.residue_number
    }

    /// Three-letter residue code.
    #[must_use]
    pub fn residue_name(&self) -> &str {
        &self.residue_name
    }

    /// Chain identifier.
    #[must_use]
    pub fn chain_id(&self) -> char {
        self.chain_id
    }

    /// pLDDT score in `[0, 100]`.
    #[must_use]
    pub fn confidence_score(&self) -> f64 {
        self.confidence_score
    }

    /// Bucketed confidence.
    #[must_use]
    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    /// Lookup key `(residue_number, chain_id)`.
    #[must_use]
    pub fn key(&self) -> ResidueKey {
        ResidueKey {
            residue_number: self.residue_number,
            chain_id: self.chain_id,
        }
    }
}

/// Identity of a residue within one structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    /// Residue sequence number.
    pub residue_number: i32,
    /// Chain identifier.
    pub chain_id: char,
}

/// Residue confidence records for the currently loaded structure.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceData {
    residues: Vec<ResidueConfidence>,
    index: FxHashMap<ResidueKey, usize>,
}

impl ConfidenceData {
    /// Build from records already ordered by chain and residue number.
    /// A later duplicate key is ignored.
    #[must_use]
    pub fn new(records: Vec<ResidueConfidence>) -> Self {
        let mut residues = Vec::with_capacity(records.len());
        let mut index = FxHashMap::default();
        for record in records {
            if let std::collections::hash_map::Entry::Vacant(slot) =
                index.entry(record.key())
            {
                let _ = slot.insert(residues.len());
                residues.push(record);
            }
        }
        Self { residues, index }
    }

    /// All records in structure order.
    #[must_use]
    pub fn residues(&self) -> &[ResidueConfidence] {
        &self.residues
    }

    /// Number of residues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    /// Whether no residues are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Find the record for `(residue_number, chain_id)`.
    #[must_use]
    pub fn get(
        &self,
        residue_number: i32,
        chain_id: char,
    ) -> Option<&ResidueConfidence> {
        self.index
            .get(&ResidueKey {
                residue_number,
                chain_id,
            })
            .map(|&i| &self.residues[i])
    }

    /// Mean pLDDT over all residues, or `None` when empty.
    #[must_use]
    pub fn mean_score(&self) -> Option<f64> {
        if self.residues.is_empty() {
            return None;
        }
        let sum: f64 = self.residues.iter().map(|r| r.confidence_score).sum();
        Some(sum / self.residues.len() as f64)
    }

    /// Residue count per level, in [`ConfidenceLevel::ALL`] order.
    #[must_use]
    pub fn level_counts(&self) -> [(ConfidenceLevel, usize); 4] {
        ConfidenceLevel::ALL.map(|level| {
            let n = self
                .residues
                .iter()
                .filter(|r| r.confidence_level == level)
                .count();
            (level, n)
        })
    }
}
