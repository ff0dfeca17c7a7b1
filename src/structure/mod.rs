//! Structure payloads: PDB confidence parsing and residue reference data.

pub mod amino_acid;
pub mod pdb;

pub use amino_acid::{amino_acid_info, AminoAcidInfo, UNKNOWN_AMINO_ACID};
pub use pdb::{parse_confidence, PdbError};

use crate::confidence::ConfidenceData;

/// A downloaded, format-validated model file.
#[derive(Debug, Clone)]
pub struct StructureFile {
    /// Accession the model belongs to.
    pub accession: String,
    /// Raw PDB text, as handed to the viewer.
    pub pdb: String,
    /// Per-residue confidence parsed from `pdb`.
    pub confidence: ConfidenceData,
}
