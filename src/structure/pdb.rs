//! Per-residue confidence extraction from PDB-format model files.
//!
//! AlphaFold writes the pLDDT of each residue into the B-factor column of
//! every atom of that residue. Only the first model is read and only `ATOM`
//! records count; ligands and waters are not part of the prediction.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::confidence::{ConfidenceData, ResidueConfidence};

/// Why a payload could not be read as a PDB model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdbError {
    /// No `ATOM` record found.
    NoAtomRecords,
    /// An `ATOM` record is truncated, has a non-numeric field, or numbers a
    /// residue below 1.
    MalformedRecord {
        /// 1-based line number.
        line: usize,
        /// Offending field.
        field: &'static str,
    },
}

impl fmt::Display for PdbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAtomRecords => f.write_str("no ATOM records found"),
            Self::MalformedRecord { line, field } => {
                write!(f, "malformed {field} in ATOM record on line {line}")
            }
        }
    }
}

impl std::error::Error for PdbError {}

struct AtomRecord<'a> {
    residue_name: &'a str,
    chain_id: char,
    residue_number: i32,
    b_factor: f64,
}

fn column<'a>(
    line: &'a str,
    range: std::ops::Range<usize>,
    field: &'static str,
    line_no: usize,
) -> Result<&'a str, PdbError> {
    line.get(range)
        .ok_or(PdbError::MalformedRecord { line: line_no, field })
}

fn parse_atom(line: &str, line_no: usize) -> Result<AtomRecord<'_>, PdbError> {
    let malformed = |field| PdbError::MalformedRecord {
        line: line_no,
        field,
    };

    let residue_name = column(line, 17..20, "residue name", line_no)?.trim();
    let chain_id = column(line, 21..22, "chain id", line_no)?
        .chars()
        .next()
        .ok_or_else(|| malformed("chain id"))?;
    let residue_number = column(line, 22..26, "residue number", line_no)?
        .trim()
        .parse::<i32>()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| malformed("residue number"))?;
    let b_factor = column(line, 60..66, "B-factor", line_no)?
        .trim()
        .parse::<f64>()
        .map_err(|_| malformed("B-factor"))?;

    if residue_name.is_empty() {
        return Err(malformed("residue name"));
    }

    Ok(AtomRecord {
        residue_name,
        chain_id,
        residue_number,
        b_factor,
    })
}

/// Parse per-residue confidence from PDB text.
///
/// Produces one record per unique `(residue_number, chain_id)`, ordered by
/// chain (in order of first appearance) then residue number. The score of a
/// residue is the B-factor of its first atom.
///
/// # Errors
///
/// [`PdbError::NoAtomRecords`] when the first model has no `ATOM` record,
/// and [`PdbError::MalformedRecord`] for the first unreadable one.
pub fn parse_confidence(text: &str) -> Result<ConfidenceData, PdbError> {
    let mut records = Vec::new();
    let mut chain_rank: FxHashMap<char, usize> = FxHashMap::default();

    for (i, line) in text.lines().enumerate() {
        if line.starts_with("ENDMDL") {
            break;
        }
        if !line.starts_with("ATOM  ") {
            continue;
        }
        let atom = parse_atom(line, i + 1)?;
        let next_rank = chain_rank.len();
        let _ = chain_rank.entry(atom.chain_id).or_insert(next_rank);
        records.push(ResidueConfidence::new(
            atom.residue_number,
            atom.residue_name,
            atom.chain_id,
            atom.b_factor,
        ));
    }

    if records.is_empty() {
        return Err(PdbError::NoAtomRecords);
    }

    // Stable sort keeps the first atom of each residue ahead of the rest.
    records.sort_by_key(|r| {
        (
            chain_rank.get(&r.chain_id()).copied().unwrap_or(usize::MAX),
            r.residue_number(),
        )
    });
    Ok(ConfidenceData::new(records))
}
