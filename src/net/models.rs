//! Payload types returned by the UniProt and AlphaFold DB endpoints.

use serde::{Deserialize, Serialize};

/// One search hit, flattened from a UniProtKB search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMatch {
    /// Primary UniProt accession.
    pub accession: String,
    /// Recommended (or submitted) protein name.
    pub protein_name: Option<String>,
    /// Source organism, scientific name.
    pub organism: Option<String>,
    /// Primary gene name.
    pub gene: Option<String>,
    /// Sequence length in residues.
    pub length: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub(crate) results: Vec<UniProtEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UniProtEntry {
    primary_accession: String,
    #[serde(default)]
    protein_description: Option<ProteinDescription>,
    #[serde(default)]
    organism: Option<Organism>,
    #[serde(default)]
    genes: Vec<Gene>,
    #[serde(default)]
    sequence: Option<Sequence>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProteinDescription {
    #[serde(default)]
    recommended_name: Option<Name>,
    #[serde(default)]
    submission_names: Vec<Name>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Name {
    full_name: Value,
}

#[derive(Debug, Deserialize)]
struct Value {
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Organism {
    scientific_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Gene {
    #[serde(default)]
    gene_name: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Sequence {
    length: u32,
}

impl From<UniProtEntry> for SearchMatch {
    fn from(entry: UniProtEntry) -> Self {
        let protein_name = entry.protein_description.and_then(|d| {
            d.recommended_name
                .or_else(|| d.submission_names.into_iter().next())
                .map(|n| n.full_name.value)
        });
        Self {
            accession: entry.primary_accession,
            protein_name,
            organism: entry.organism.map(|o| o.scientific_name),
            gene: entry
                .genes
                .into_iter()
                .find_map(|g| g.gene_name.map(|n| n.value)),
            length: entry.sequence.map(|s| s.length),
        }
    }
}

/// One AlphaFold DB prediction record for an accession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionEntry {
    /// AlphaFold entry id, e.g. `AF-P69905-F1`.
    #[serde(default)]
    pub entry_id: Option<String>,
    /// Gene name.
    #[serde(default)]
    pub gene: Option<String>,
    /// UniProt accession the model was predicted for.
    pub uniprot_accession: String,
    /// UniProt entry name, e.g. `HBA_HUMAN`.
    #[serde(default)]
    pub uniprot_id: Option<String>,
    /// Protein description.
    #[serde(default)]
    pub uniprot_description: Option<String>,
    /// NCBI taxonomy id.
    #[serde(default)]
    pub tax_id: Option<u64>,
    /// Source organism.
    #[serde(default)]
    pub organism_scientific_name: Option<String>,
    /// First modelled residue.
    #[serde(default)]
    pub uniprot_start: Option<u32>,
    /// Last modelled residue.
    #[serde(default)]
    pub uniprot_end: Option<u32>,
    /// Mean pLDDT over the whole model.
    #[serde(default)]
    pub global_metric_value: Option<f64>,
    /// Model version number.
    #[serde(default)]
    pub latest_version: Option<u32>,
    /// Date the model was created.
    #[serde(default)]
    pub model_created_date: Option<String>,
    /// PDB-format model URL.
    #[serde(default)]
    pub pdb_url: Option<String>,
    /// mmCIF-format model URL.
    #[serde(default)]
    pub cif_url: Option<String>,
    /// Predicted aligned error image URL.
    #[serde(default)]
    pub pae_image_url: Option<String>,
}
