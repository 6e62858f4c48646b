//! Variant classification types
//!
//! The [`VariantType`] enum is deliberately flat: the legacy subtype
//! hierarchy (SNV ⊇ SNP, SV ⊇ INSERTION, ...) is expressed by the static
//! [`sub_types`](crate::variant::sub_types) function rather than by any
//! type-level nesting.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a genomic variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantType {
    /// Single nucleotide variant
    Snv,
    /// Single nucleotide polymorphism (legacy subtype of SNV)
    Snp,
    /// Multi nucleotide variant
    Mnv,
    /// Multi nucleotide polymorphism (legacy subtype of MNV)
    Mnp,
    /// Insertion or deletion up to the SV length threshold
    Indel,
    /// Structural variant
    Sv,
    /// Insertion (subtype of SV)
    Insertion,
    /// Deletion (subtype of SV)
    Deletion,
    /// Translocation (subtype of SV)
    Translocation,
    /// Inversion (subtype of SV)
    Inversion,
    /// Copy number variation (subtype of SV)
    Cnv,
    /// Reference block with no variation (e.g. gVCF reference confidence)
    NoVariation,
    /// Symbolic allele, e.g. `<DEL>` or a breakend
    Symbolic,
    /// Mixed variant type
    Mixed,
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VariantType::Snv => "SNV",
            VariantType::Snp => "SNP",
            VariantType::Mnv => "MNV",
            VariantType::Mnp => "MNP",
            VariantType::Indel => "INDEL",
            VariantType::Sv => "SV",
            VariantType::Insertion => "INSERTION",
            VariantType::Deletion => "DELETION",
            VariantType::Translocation => "TRANSLOCATION",
            VariantType::Inversion => "INVERSION",
            VariantType::Cnv => "CNV",
            VariantType::NoVariation => "NO_VARIATION",
            VariantType::Symbolic => "SYMBOLIC",
            VariantType::Mixed => "MIXED",
        };
        write!(f, "{}", name)
    }
}

/// Breakpoint confidence intervals and copy number for structural variants
///
/// The four interval fields give the left and right bounds of the confidence
/// interval around each breakpoint. For variants derived from point
/// coordinates (e.g. a parsed `<CN3>` allele) both intervals collapse to the
/// point coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralVariation {
    /// Left bound of the start breakpoint confidence interval
    pub ci_start_left: i64,
    /// Right bound of the start breakpoint confidence interval
    pub ci_start_right: i64,
    /// Left bound of the end breakpoint confidence interval
    pub ci_end_left: i64,
    /// Right bound of the end breakpoint confidence interval
    pub ci_end_right: i64,
    /// Copy number, when known (e.g. parsed from a `<CN3>` allele)
    pub copy_number: Option<i32>,
}

impl StructuralVariation {
    pub fn new(
        ci_start_left: i64,
        ci_start_right: i64,
        ci_end_left: i64,
        ci_end_right: i64,
        copy_number: Option<i32>,
    ) -> Self {
        Self {
            ci_start_left,
            ci_start_right,
            ci_end_left,
            ci_end_right,
            copy_number,
        }
    }
}

/// Coordinates of a secondary alternate allele
///
/// When a multi-allelic record is decomposed into one variant per alternate,
/// the remaining alternates are recorded on the study entry as
/// `AlternateCoordinate`s so the original record can be reassembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternateCoordinate {
    pub chromosome: Option<String>,
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub reference: Option<String>,
    pub alternate: String,
    pub variant_type: VariantType,
}

impl AlternateCoordinate {
    pub fn new(
        chromosome: Option<String>,
        start: Option<i64>,
        end: Option<i64>,
        reference: Option<String>,
        alternate: impl Into<String>,
        variant_type: VariantType,
    ) -> Self {
        Self {
            chromosome,
            start,
            end,
            reference,
            alternate: alternate.into(),
            variant_type,
        }
    }
}
