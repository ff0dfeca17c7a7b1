//! Reference data for the 20 standard amino acids, shown in the residue
//! detail popup.

use serde::Serialize;

/// Descriptive properties of one amino acid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AminoAcidInfo {
    /// Full name, e.g. "Alanine".
    pub full_name: &'static str,
    /// Side-chain class, e.g. "Aliphatic".
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// "Polar", "Nonpolar".
    pub polarity: &'static str,
    /// Charge at physiological pH.
    pub charge: &'static str,
    /// One-line description.
    pub description: &'static str,
}

/// Returned for any code outside the standard 20.
pub const UNKNOWN_AMINO_ACID: AminoAcidInfo = AminoAcidInfo {
    full_name: "Unknown",
    kind: "Unknown",
    polarity: "Unknown",
    charge: "Unknown",
    description: "Unknown",
};

const fn aa(
    full_name: &'static str,
    kind: &'static str,
    polarity: &'static str,
    charge: &'static str,
    description: &'static str,
) -> AminoAcidInfo {
    AminoAcidInfo {
        full_name,
        kind,
        polarity,
        charge,
        description,
    }
}

/// Look up an amino acid by its three-letter code (case insensitive).
/// Unknown codes yield [`UNKNOWN_AMINO_ACID`].
#[must_use]
pub fn amino_acid_info(code: &str) -> AminoAcidInfo {
    match code.trim().to_uppercase().as_str() {
        "ALA" => aa(
            "Alanine",
            "Aliphatic",
            "Nonpolar",
            "Neutral",
            "Small and hydrophobic; common in helices",
        ),
        "ARG" => aa(
            "Arginine",
            "Basic",
            "Polar",
            "Positive",
            "Long side chain ending in a guanidinium group; binds phosphates",
        ),
        "ASN" => aa(
            "Asparagine",
            "Amide",
            "Polar",
            "Neutral",
            "Amide side chain; frequent in turns and glycosylation sites",
        ),
        "ASP" => aa(
            "Aspartic acid",
            "Acidic",
            "Polar",
            "Negative",
            "Short carboxylate side chain; common in active sites",
        ),
        "CYS" => aa(
            "Cysteine",
            "Sulfur-containing",
            "Polar",
            "Neutral",
            "Thiol side chain; forms disulfide bonds",
        ),
        "GLN" => aa(
            "Glutamine",
            "Amide",
            "Polar",
            "Neutral",
            "Amide side chain; hydrogen-bond donor and acceptor",
        ),
        "GLU" => aa(
            "Glutamic acid",
            "Acidic",
            "Polar",
            "Negative",
            "Carboxylate side chain; favours helices",
        ),
        "GLY" => aa(
            "Glycine",
            "Aliphatic",
            "Nonpolar",
            "Neutral",
            "No side chain; gives the backbone maximal flexibility",
        ),
        "HIS" => aa(
            "Histidine",
            "Basic",
            "Polar",
            "Positive",
            "Imidazole ring that titrates near neutral pH; common in catalysis",
        ),
        "ILE" => aa(
            "Isoleucine",
            "Aliphatic",
            "Nonpolar",
            "Neutral",
            "Branched hydrophobic side chain; favours strands",
        ),
        "LEU" => aa(
            "Leucine",
            "Aliphatic",
            "Nonpolar",
            "Neutral",
            "Branched hydrophobic side chain; abundant in helices",
        ),
        "LYS" => aa(
            "Lysine",
            "Basic",
            "Polar",
            "Positive",
            "Long side chain ending in an amino group; frequent on surfaces",
        ),
        "MET" => aa(
            "Methionine",
            "Sulfur-containing",
            "Nonpolar",
            "Neutral",
            "Thioether side chain; usually the start residue",
        ),
        "PHE" => aa(
            "Phenylalanine",
            "Aromatic",
            "Nonpolar",
            "Neutral",
            "Benzyl side chain; buried in the hydrophobic core",
        ),
        "PRO" => aa(
            "Proline",
            "Cyclic",
            "Nonpolar",
            "Neutral",
            "Side chain bonded to the backbone nitrogen; breaks helices",
        ),
        "SER" => aa(
            "Serine",
            "Hydroxyl",
            "Polar",
            "Neutral",
            "Small hydroxyl side chain; common phosphorylation site",
        ),
        "THR" => aa(
            "Threonine",
            "Hydroxyl",
            "Polar",
            "Neutral",
            "Branched hydroxyl side chain; phosphorylation site",
        ),
        "TRP" => aa(
            "Tryptophan",
            "Aromatic",
            "Nonpolar",
            "Neutral",
            "Largest side chain (indole); often at membrane interfaces",
        ),
        "TYR" => aa(
            "Tyrosine",
            "Aromatic",
            "Polar",
            "Neutral",
            "Phenol side chain; phosphorylation site",
        ),
        "VAL" => aa(
            "Valine",
            "Aliphatic",
            "Nonpolar",
            "Neutral",
            "Branched hydrophobic side chain; favours strands",
        ),
        _ => UNKNOWN_AMINO_ACID,
    }
}
