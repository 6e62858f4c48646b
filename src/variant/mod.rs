//! Genomic variant model
//!
//! [`Variant`] is the canonical in-memory representation of one genomic
//! change: coordinates, alleles, derived length and type, an optional
//! structural-variant sub-record, and zero or more per-study entries.
//!
//! Constructors and [`Variant::parse`] always re-derive length and type from
//! the alleles. The low-level setters ([`Variant::set_reference`],
//! [`Variant::set_alternate`], [`Variant::set_length`],
//! [`Variant::set_type`]) do not: callers mutating alleles directly are
//! responsible for calling [`Variant::reset_length`] and
//! [`Variant::reset_type`] afterwards.

pub mod infer;
pub mod types;

pub use infer::{
    infer_length, infer_type, is_symbolic_allele, sub_types, CNV_PREFIX, NO_CALL, SV_SUBTYPES,
    SV_THRESHOLD,
};
pub use types::{AlternateCoordinate, StructuralVariation, VariantType};

use crate::error::VariantError;
use crate::study::StudyEntry;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// A single genomic variant
///
/// Owns its list of [`StudyEntry`] objects; a derived study-id → index map
/// is cached lazily and kept consistent by the mutation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    id: Option<String>,
    names: Vec<String>,
    chromosome: String,
    start: i64,
    end: i64,
    reference: String,
    alternate: String,
    strand: String,
    sv: Option<StructuralVariation>,
    length: i64,
    #[serde(rename = "type")]
    variant_type: VariantType,
    studies: Vec<StudyEntry>,
    #[serde(skip)]
    study_index: OnceLock<HashMap<String, usize>>,
}

impl Variant {
    /// Create a variant at a point position
    ///
    /// The end coordinate is derived from the reference length (symbolic and
    /// no-variation types use the stored length instead).
    pub fn new(
        chromosome: &str,
        position: i64,
        reference: &str,
        alternate: &str,
    ) -> Result<Variant> {
        let mut variant =
            Variant::with_coordinates(chromosome, position, position, reference, alternate)?;
        variant.set_end(variant.start + variant.length_reference() - 1)?;
        Ok(variant)
    }

    /// Create a variant with explicit start and end coordinates
    ///
    /// Fails with `InvalidArgument` when start > end, unless the reference
    /// is empty (the pure-insertion representation).
    pub fn with_coordinates(
        chromosome: &str,
        start: i64,
        end: i64,
        reference: &str,
        alternate: &str,
    ) -> Result<Variant> {
        if start > end && !(reference.is_empty() || reference == "-") {
            return Err(VariantError::invalid(format!(
                "End position must be greater than the start position for variant: \
                 {}:{}-{}:{}:{}",
                chromosome, start, end, reference, alternate
            )));
        }
        if start < 0 {
            return Err(VariantError::invalid("Start must be positive"));
        }
        if end < 0 {
            return Err(VariantError::invalid("End must be positive"));
        }

        let mut variant = Variant {
            id: None,
            names: Vec::new(),
            chromosome: normalize_chromosome(chromosome)?,
            start,
            end,
            reference: check_empty_sequence(reference),
            alternate: check_empty_sequence(alternate),
            strand: "+".to_string(),
            sv: None,
            length: 0,
            variant_type: VariantType::Snv,
            studies: Vec::new(),
            study_index: OnceLock::new(),
        };
        variant.reset_length();
        variant.reset_type();
        variant.reset_structural_variation();
        Ok(variant)
    }

    /// Parse a variant from its textual identifier
    ///
    /// Format: `(chr):(start)[-(end)][:(ref)]:(alt)` with 3 or 4
    /// colon-separated fields. A 3-field form with a `start-end` range is a
    /// structural variant (reference defaults to `N`); without a range it is
    /// a short variant with empty reference. A trailing `-` allele is
    /// normalized to the empty string.
    pub fn parse(text: &str) -> Result<Variant> {
        let fields: Vec<&str> = text.split(':').collect();
        let (chromosome, coordinates, reference, alternate) = match fields.as_slice() {
            [chromosome, coordinates, alternate] => (*chromosome, *coordinates, None, *alternate),
            [chromosome, coordinates, reference, alternate] => {
                (*chromosome, *coordinates, Some(*reference), *alternate)
            }
            _ => {
                return Err(VariantError::invalid(format!(
                    "Variant '{}' needs 3 or 4 fields separated by ':'. \
                     Format: \"(chr):(start)[-(end)][:(ref)]:(alt)\"",
                    text
                )))
            }
        };

        let alternate = check_empty_sequence(alternate);

        let (start, end, reference, length) = if let Some((raw_start, raw_end)) =
            coordinates.split_once('-')
        {
            // Structural variant with explicit start-end coordinates
            let start = parse_position(raw_start, text)?;
            let end = parse_position(raw_end, text)?;
            let reference = match reference {
                Some(reference) => check_empty_sequence(reference),
                None => "N".to_string(),
            };
            let length = infer::infer_length_symbolic(Some(alternate.as_str()), start, end);
            (start, end, reference, length)
        } else {
            let start = parse_position(coordinates, text)?;
            let reference = match reference {
                Some(reference) => check_empty_sequence(reference),
                None => String::new(),
            };
            let length = infer::infer_length_simple(&reference, Some(alternate.as_str()));
            let end = start + reference.len() as i64 - 1;
            (start, end, reference, length)
        };

        if start < 0 {
            return Err(VariantError::invalid("Start must be positive"));
        }
        if end < 0 {
            return Err(VariantError::invalid("End must be positive"));
        }

        let mut variant = Variant {
            id: None,
            names: Vec::new(),
            chromosome: normalize_chromosome(chromosome)?,
            start,
            end,
            reference,
            alternate,
            strand: "+".to_string(),
            sv: None,
            length,
            variant_type: VariantType::Snv,
            studies: Vec::new(),
            study_index: OnceLock::new(),
        };
        variant.reset_type();
        variant.reset_structural_variation();
        Ok(variant)
    }

    /// Parse a comma-separated list of variant identifiers
    pub fn parse_many(text: &str) -> Result<Vec<Variant>> {
        text.split(',').map(Variant::parse).collect()
    }

    // ------------------------------------------------------------------
    // Coordinate and allele accessors
    // ------------------------------------------------------------------

    pub fn chromosome(&self) -> &str {
        &self.chromosome
    }

    /// Set the chromosome, stripping exactly one leading `chrom`, `chrm`,
    /// `chr` or `ch` prefix (checked in that order, case-sensitive)
    pub fn set_chromosome(&mut self, chromosome: &str) -> Result<()> {
        self.chromosome = normalize_chromosome(chromosome)?;
        Ok(())
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn set_start(&mut self, start: i64) -> Result<()> {
        if start < 0 {
            return Err(VariantError::invalid("Start must be positive"));
        }
        self.start = start;
        Ok(())
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn set_end(&mut self, end: i64) -> Result<()> {
        if end < 0 {
            return Err(VariantError::invalid("End must be positive"));
        }
        self.end = end;
        Ok(())
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Set the reference allele without re-deriving length or type
    pub fn set_reference(&mut self, reference: impl Into<String>) {
        self.reference = reference.into();
    }

    pub fn alternate(&self) -> &str {
        &self.alternate
    }

    /// Set the alternate allele without re-deriving length or type
    pub fn set_alternate(&mut self, alternate: impl Into<String>) {
        self.alternate = alternate.into();
    }

    pub fn strand(&self) -> &str {
        &self.strand
    }

    pub fn set_strand(&mut self, strand: impl Into<String>) {
        self.strand = strand.into();
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: Option<String>) {
        self.id = id;
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn set_names(&mut self, names: Vec<String>) {
        self.names = names;
    }

    pub fn sv(&self) -> Option<&StructuralVariation> {
        self.sv.as_ref()
    }

    pub fn set_sv(&mut self, sv: Option<StructuralVariation>) {
        self.sv = sv;
    }

    // ------------------------------------------------------------------
    // Derived length and type
    // ------------------------------------------------------------------

    pub fn length(&self) -> i64 {
        self.length
    }

    pub fn set_length(&mut self, length: i64) {
        self.length = length;
    }

    /// Number of reference bases covered by this variant
    ///
    /// Symbolic, CNV, SV and no-variation records report the stored length;
    /// everything else reports the reference allele length.
    pub fn length_reference(&self) -> i64 {
        match self.variant_type {
            VariantType::NoVariation
            | VariantType::Cnv
            | VariantType::Sv
            | VariantType::Symbolic => self.length,
            _ => self.reference.len() as i64,
        }
    }

    pub fn length_alternate(&self) -> i64 {
        self.alternate.len() as i64
    }

    pub fn variant_type(&self) -> VariantType {
        self.variant_type
    }

    pub fn set_type(&mut self, variant_type: VariantType) {
        self.variant_type = variant_type;
    }

    /// Re-derive the stored length from the current alleles
    pub fn reset_length(&mut self) {
        self.length = infer::infer_length_simple(&self.reference, Some(self.alternate.as_str()));
    }

    /// Re-derive the stored type from the current alleles and length
    pub fn reset_type(&mut self) {
        self.variant_type = infer_type(&self.reference, &self.alternate, self.length);
    }

    /// Synthesize the structural-variant sub-record for CNV alleles
    ///
    /// Both breakpoint confidence intervals collapse to the point
    /// coordinates; a non-numeric copy number yields `None` rather than an
    /// error.
    fn reset_structural_variation(&mut self) {
        if self.variant_type == VariantType::Cnv {
            self.sv = Some(StructuralVariation::new(
                self.start,
                self.start,
                self.end,
                self.end,
                copy_number_from_allele(&self.alternate),
            ));
        }
    }

    // ------------------------------------------------------------------
    // Study entries
    // ------------------------------------------------------------------

    pub fn studies(&self) -> &[StudyEntry] {
        &self.studies
    }

    pub fn studies_mut(&mut self) -> &mut [StudyEntry] {
        &mut self.studies
    }

    /// Replace the whole study list, rebuilding the lookup index lazily
    pub fn set_studies(&mut self, studies: Vec<StudyEntry>) {
        self.studies = studies;
        self.study_index = OnceLock::new();
    }

    /// Append one study entry, updating the lookup index incrementally
    pub fn add_study_entry(&mut self, entry: StudyEntry) {
        let index = self.studies.len();
        if let Some(map) = self.study_index.get_mut() {
            map.insert(entry.study_id().to_string(), index);
        }
        self.studies.push(entry);
    }

    /// Look up a study entry by study id
    pub fn study(&self, study_id: &str) -> Option<&StudyEntry> {
        let index = *self.study_index().get(study_id)?;
        self.studies.get(index)
    }

    /// Look up a study entry by study id, mutably
    pub fn study_mut(&mut self, study_id: &str) -> Option<&mut StudyEntry> {
        let index = *self.study_index().get(study_id)?;
        self.studies.get_mut(index)
    }

    fn study_index(&self) -> &HashMap<String, usize> {
        self.study_index.get_or_init(|| {
            self.studies
                .iter()
                .enumerate()
                .map(|(index, entry)| (entry.study_id().to_string(), index))
                .collect()
        })
    }

    // ------------------------------------------------------------------
    // Comparisons and transforms
    // ------------------------------------------------------------------

    /// Inclusive or exclusive genomic overlap with another variant
    ///
    /// Insertions represented with start > end are collapsed to their end
    /// coordinate on both sides before comparing.
    pub fn overlaps_with(&self, other: &Variant, inclusive: bool) -> bool {
        self.overlaps_region(&other.chromosome, other.start, other.end, inclusive)
    }

    /// Inclusive or exclusive overlap with an explicit region
    pub fn overlaps_region(
        &self,
        chromosome: &str,
        start: i64,
        end: i64,
        inclusive: bool,
    ) -> bool {
        if self.chromosome != chromosome {
            return false;
        }
        let a_start = self.start.min(self.end);
        let a_end = self.end;
        let b_start = start.min(end);
        let b_end = end;
        if inclusive {
            a_start <= b_end && a_end >= b_start
        } else {
            a_start < b_end && a_end > b_start
        }
    }

    /// Structural equality over coordinates, alleles and type only
    ///
    /// Weaker than full equality: study entries and identifiers are
    /// ignored.
    pub fn same_genomic_variant(&self, other: &Variant) -> bool {
        self.start == other.start
            && self.end == other.end
            && self.chromosome == other.chromosome
            && self.reference == other.reference
            && self.alternate == other.alternate
            && self.variant_type == other.variant_type
    }

    /// Whether both variants start at the same chromosome and position
    pub fn on_same_start_position(&self, other: &Variant) -> bool {
        self.chromosome == other.chromosome && self.start == other.start
    }

    /// Whether both variants cover the same region (chromosome, start, end)
    pub fn on_same_region(&self, other: &Variant) -> bool {
        self.on_same_start_position(other) && self.end == other.end
    }

    /// Rewrite the alleles into the Ensembl convention
    ///
    /// For INDEL/SV variants (or any variant longer than one base) sharing a
    /// leading base between reference and alternate: strip exactly one
    /// leading shared base from both, shift the start forward by one, and
    /// when the trimmed reference is shorter than the alternate shift the
    /// end backward by one. Empty resulting alleles become `-`. Applying
    /// the transform a second time is a no-op once no further leading base
    /// is shared.
    pub fn transform_to_ensembl_format(&mut self) {
        if self.variant_type == VariantType::Indel
            || self.variant_type == VariantType::Sv
            || self.length > 1
        {
            let (Some(first_ref), Some(first_alt)) = (
                self.reference.chars().next(),
                self.alternate.chars().next(),
            ) else {
                return;
            };
            if first_ref == first_alt {
                self.reference.remove(0);
                self.alternate.remove(0);
                self.start += 1;
                if self.reference.len() < self.alternate.len() {
                    self.end -= 1;
                }
                if self.reference.is_empty() {
                    self.reference = "-".to_string();
                }
                if self.alternate.is_empty() {
                    self.alternate = "-".to_string();
                }
                self.reset_length();
            }
        }
    }

    /// Serialize this variant to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Variant {
    /// Textual identifier, restoring the `-` sentinel for empty alleles
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.chromosome,
            self.start,
            if self.reference.is_empty() {
                "-"
            } else {
                self.reference.as_str()
            },
            if self.alternate.is_empty() {
                "-"
            } else {
                self.alternate.as_str()
            }
        )
    }
}

impl FromStr for Variant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Variant> {
        Variant::parse(s)
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.names == other.names
            && self.chromosome == other.chromosome
            && self.start == other.start
            && self.end == other.end
            && self.reference == other.reference
            && self.alternate == other.alternate
            && self.strand == other.strand
            && self.sv == other.sv
            && self.length == other.length
            && self.variant_type == other.variant_type
            && self.studies == other.studies
    }
}

// Stats values are finite by construction, so the reflexivity Eq requires
// holds even though study entries carry floats.
impl Eq for Variant {}

impl Ord for Variant {
    /// Total order over the coordinate/allele tuple
    ///
    /// Fully equal variants compare as `Equal`; otherwise the order is
    /// determined by chromosome, coordinates, alleles, type, length, strand
    /// and identifiers, in that priority. Variants differing only in study
    /// content tie on this order.
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        self.chromosome
            .cmp(&other.chromosome)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.reference.cmp(&other.reference))
            .then_with(|| self.alternate.cmp(&other.alternate))
            .then_with(|| self.variant_type.cmp(&other.variant_type))
            .then_with(|| self.length.cmp(&other.length))
            .then_with(|| self.strand.cmp(&other.strand))
            .then_with(|| self.id.cmp(&other.id))
            .then_with(|| self.names.cmp(&other.names))
    }
}

impl PartialOrd for Variant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Strip exactly one leading chromosome prefix and reject empty names
///
/// Prefixes are only stripped at the beginning of the name so contigs such
/// as tomato's `SL2.40ch00` are kept as-is.
fn normalize_chromosome(chromosome: &str) -> Result<String> {
    if chromosome.is_empty() {
        return Err(VariantError::invalid("Chromosome must not be empty"));
    }
    let stripped = if let Some(rest) = chromosome.strip_prefix("chrom") {
        rest
    } else if let Some(rest) = chromosome.strip_prefix("chrm") {
        rest
    } else if let Some(rest) = chromosome.strip_prefix("chr") {
        rest
    } else if let Some(rest) = chromosome.strip_prefix("ch") {
        rest
    } else {
        chromosome
    };
    Ok(stripped.to_string())
}

/// Normalize the textual `-` sentinel to the empty allele
fn check_empty_sequence(sequence: &str) -> String {
    if sequence == "-" {
        String::new()
    } else {
        sequence.to_string()
    }
}

fn parse_position(raw: &str, text: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|_| {
        VariantError::invalid(format!("Invalid position '{}' in variant '{}'", raw, text))
    })
}

/// Parse the copy number out of a `<CN..>` allele, `None` when non-numeric
fn copy_number_from_allele(alternate: &str) -> Option<i32> {
    let rest = alternate.split(CNV_PREFIX).nth(1)?;
    let digits = rest.split('>').next()?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snv() {
        let variant = Variant::parse("1:1000:A:C").unwrap();
        assert_eq!(variant.chromosome(), "1");
        assert_eq!(variant.start(), 1000);
        assert_eq!(variant.end(), 1000);
        assert_eq!(variant.reference(), "A");
        assert_eq!(variant.alternate(), "C");
        assert_eq!(variant.length(), 1);
        assert_eq!(variant.variant_type(), VariantType::Snv);
    }

    #[test]
    fn test_parse_three_field_short_variant() {
        // No reference: pure insertion with start > end
        let variant = Variant::parse("1:11211:A").unwrap();
        assert_eq!(variant.reference(), "");
        assert_eq!(variant.start(), 11211);
        assert_eq!(variant.end(), 11210);
        assert_eq!(variant.length(), 1);
        assert_eq!(variant.variant_type(), VariantType::Indel);
    }

    #[test]
    fn test_parse_three_field_structural() {
        let variant = Variant::parse("1:1000-2000:<DEL>").unwrap();
        assert_eq!(variant.reference(), "N");
        assert_eq!(variant.start(), 1000);
        assert_eq!(variant.end(), 2000);
        assert_eq!(variant.length(), 5);
        assert_eq!(variant.variant_type(), VariantType::Symbolic);
    }

    #[test]
    fn test_parse_cnv_synthesizes_sv() {
        let variant = Variant::parse("1:1000-2000:<CN5>").unwrap();
        assert_eq!(variant.variant_type(), VariantType::Cnv);
        assert_eq!(variant.length(), 1001);
        let sv = variant.sv().expect("CNV should carry an SV record");
        assert_eq!(sv.ci_start_left, 1000);
        assert_eq!(sv.ci_start_right, 1000);
        assert_eq!(sv.ci_end_left, 2000);
        assert_eq!(sv.ci_end_right, 2000);
        assert_eq!(sv.copy_number, Some(5));
    }

    #[test]
    fn test_parse_cnv_non_numeric_copy_number() {
        let variant = Variant::parse("1:1000-2000:<CNV>").unwrap();
        assert_eq!(variant.variant_type(), VariantType::Cnv);
        assert_eq!(variant.sv().unwrap().copy_number, None);
    }

    #[test]
    fn test_parse_dash_allele_normalized() {
        let variant = Variant::parse("1:1000:-:T").unwrap();
        assert_eq!(variant.reference(), "");
        assert_eq!(variant.alternate(), "T");
        // Display restores the sentinel
        assert_eq!(variant.to_string(), "1:1000:-:T");
    }

    #[test]
    fn test_parse_invalid_field_count() {
        assert!(Variant::parse("1:1000").is_err());
        assert!(Variant::parse("1:1000:A:C:extra").is_err());
        assert!(Variant::parse("").is_err());
    }

    #[test]
    fn test_parse_invalid_position() {
        assert!(Variant::parse("1:abc:A:C").is_err());
        assert!(Variant::parse("1:-5:A:C").is_err());
    }

    #[test]
    fn test_parse_many() {
        let variants = Variant::parse_many("1:1000:A:C,2:2000:G:T").unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[1].chromosome(), "2");
    }

    #[test]
    fn test_chromosome_prefix_precedence() {
        let variant = Variant::parse("chr1:1000:A:C").unwrap();
        assert_eq!(variant.chromosome(), "1");

        // "chrM" does not start with "chrom" or "chrm" (case-sensitive), so
        // the "chr" rule applies
        let variant = Variant::parse("chrM:1000:A:C").unwrap();
        assert_eq!(variant.chromosome(), "M");

        let variant = Variant::parse("chrmX:1000:A:C").unwrap();
        assert_eq!(variant.chromosome(), "X");

        let variant = Variant::parse("chromY:1000:A:C").unwrap();
        assert_eq!(variant.chromosome(), "Y");

        let variant = Variant::parse("ch00:1000:A:C").unwrap();
        assert_eq!(variant.chromosome(), "00");

        // Prefix elsewhere in the name is kept
        let mut variant = Variant::parse("1:1000:A:C").unwrap();
        variant.set_chromosome("SL2.40ch00").unwrap();
        assert_eq!(variant.chromosome(), "SL2.40ch00");
    }

    #[test]
    fn test_empty_chromosome_rejected() {
        let mut variant = Variant::parse("1:1000:A:C").unwrap();
        assert!(variant.set_chromosome("").is_err());
    }

    #[test]
    fn test_negative_coordinates_rejected() {
        let mut variant = Variant::parse("1:1000:A:C").unwrap();
        assert!(variant.set_start(-1).is_err());
        assert!(variant.set_end(-1).is_err());
        assert!(variant.set_start(0).is_ok());
    }

    #[test]
    fn test_new_derives_end_from_reference() {
        let variant = Variant::new("1", 100, "ATG", "A").unwrap();
        assert_eq!(variant.end(), 102);
        assert_eq!(variant.variant_type(), VariantType::Indel);
    }

    #[test]
    fn test_with_coordinates_rejects_inverted_range() {
        assert!(Variant::with_coordinates("1", 200, 100, "A", "C").is_err());
        // Pure insertions are allowed to have start > end
        assert!(Variant::with_coordinates("1", 200, 199, "", "C").is_ok());
    }

    #[test]
    fn test_overlap_inclusive_exclusive() {
        let a = Variant::with_coordinates("1", 100, 200, "N", "<DEL>").unwrap();
        let b = Variant::with_coordinates("1", 200, 300, "N", "<DEL>").unwrap();
        assert!(a.overlaps_with(&b, true));
        assert!(!a.overlaps_with(&b, false));

        let c = Variant::with_coordinates("2", 100, 200, "N", "<DEL>").unwrap();
        assert!(!a.overlaps_with(&c, true));
    }

    #[test]
    fn test_overlap_insertion_collapses_start() {
        // Insertion at 1000 (start 1000, end 999)
        let insertion = Variant::parse("1:1000:A").unwrap();
        let region = Variant::with_coordinates("1", 999, 999, "A", "C").unwrap();
        assert!(insertion.overlaps_with(&region, true));
    }

    #[test]
    fn test_same_genomic_variant_ignores_studies() {
        let a = Variant::parse("1:1000:A:C").unwrap();
        let mut b = Variant::parse("1:1000:A:C").unwrap();
        b.add_study_entry(StudyEntry::new("study"));
        assert!(a.same_genomic_variant(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_transform_to_ensembl_format() {
        let mut variant = Variant::parse("1:1000:TA:T").unwrap();
        variant.transform_to_ensembl_format();
        assert_eq!(variant.reference(), "A");
        assert_eq!(variant.alternate(), "-");
        assert_eq!(variant.start(), 1001);
        assert_eq!(variant.end(), 1001);
    }

    #[test]
    fn test_transform_to_ensembl_format_insertion_shifts_end() {
        let mut variant = Variant::parse("1:1000:T:TAG").unwrap();
        let end_before = variant.end();
        variant.transform_to_ensembl_format();
        assert_eq!(variant.reference(), "-");
        assert_eq!(variant.alternate(), "AG");
        assert_eq!(variant.start(), 1001);
        assert_eq!(variant.end(), end_before - 1);
    }

    #[test]
    fn test_transform_to_ensembl_format_idempotent() {
        let mut variant = Variant::parse("1:1000:TA:T").unwrap();
        variant.transform_to_ensembl_format();
        let once = variant.clone();
        variant.transform_to_ensembl_format();
        assert_eq!(variant, once);
    }

    #[test]
    fn test_study_lookup_and_incremental_index() {
        let mut variant = Variant::parse("1:1000:A:C").unwrap();
        variant.add_study_entry(StudyEntry::new("s1"));
        assert!(variant.study("s1").is_some());
        assert!(variant.study("s2").is_none());

        // Index already built: the new entry must still be found
        variant.add_study_entry(StudyEntry::new("s2"));
        assert!(variant.study("s2").is_some());

        variant.set_studies(vec![StudyEntry::new("s3")]);
        assert!(variant.study("s1").is_none());
        assert!(variant.study("s3").is_some());
    }

    #[test]
    fn test_ordering() {
        let a = Variant::parse("1:1000:A:C").unwrap();
        let b = Variant::parse("1:1001:A:C").unwrap();
        let c = Variant::parse("2:10:A:C").unwrap();
        assert!(a < b);
        assert!(b < c);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);

        let mut variants = vec![c.clone(), a.clone(), b.clone()];
        variants.sort();
        assert_eq!(variants, vec![a, b, c]);
    }

    #[test]
    fn test_display_roundtrip() {
        let variant = Variant::parse("1:1000:A:C").unwrap();
        assert_eq!(variant.to_string(), "1:1000:A:C");
        let reparsed: Variant = variant.to_string().parse().unwrap();
        assert!(variant.same_genomic_variant(&reparsed));
    }

    #[test]
    fn test_to_json() {
        let variant = Variant::parse("1:1000:A:C").unwrap();
        let json = variant.to_json().unwrap();
        assert!(json.contains("\"chromosome\":\"1\""));
        assert!(json.contains("\"SNV\""));
    }
}
