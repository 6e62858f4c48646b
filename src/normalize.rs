//! Variant normalization
//!
//! Rewrites variant records into a canonical decomposed form ahead of
//! encoding: shared leading/trailing allele bases are trimmed with the
//! coordinates adjusted, and multi-allelic records are decomposed into one
//! variant per alternate with the remaining alternates recorded as
//! secondary [`AlternateCoordinate`]s on each study entry. Study and sample
//! association is preserved; genotype strings are carried verbatim (allele
//! re-indexing is left to the caller).

use crate::variant::types::AlternateCoordinate;
use crate::variant::{infer_type, Variant, VariantType};
use crate::Result;

/// Normalizer behavior switches
#[derive(Debug, Clone)]
pub struct NormalizeConfig {
    /// Decompose multi-allelic records into one variant per alternate
    pub decompose_multiallelic: bool,
    /// Trim shared leading/trailing bases from the alleles
    pub trim_alleles: bool,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            decompose_multiallelic: true,
            trim_alleles: true,
        }
    }
}

/// Rewrites variants into trimmed, decomposed canonical form
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    config: NormalizeConfig,
}

/// One allele of a record after trimming
#[derive(Debug, Clone, PartialEq, Eq)]
struct TrimmedAllele {
    start: i64,
    end: i64,
    reference: String,
    alternate: String,
}

impl Normalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: NormalizeConfig) -> Self {
        Self { config }
    }

    /// Normalize a list of variants, preserving order
    ///
    /// Decomposed alternates are emitted adjacent to each other, in the
    /// order primary-then-secondaries of the source record.
    pub fn apply(&self, variants: &[Variant]) -> Result<Vec<Variant>> {
        let mut normalized = Vec::with_capacity(variants.len());
        for variant in variants {
            normalized.extend(self.normalize_variant(variant)?);
        }
        Ok(normalized)
    }

    fn normalize_variant(&self, variant: &Variant) -> Result<Vec<Variant>> {
        // Symbolic alleles and reference blocks are kept untouched
        if matches!(
            variant.variant_type(),
            VariantType::Symbolic | VariantType::Cnv | VariantType::NoVariation
        ) {
            return Ok(vec![variant.clone()]);
        }

        let secondary: Vec<String> = variant
            .studies()
            .first()
            .map(|study| {
                study
                    .secondary_alternates()
                    .iter()
                    .map(|alternate| alternate.alternate.clone())
                    .collect()
            })
            .unwrap_or_default();

        if secondary.is_empty() || !self.config.decompose_multiallelic {
            return Ok(vec![self.trimmed_copy(variant)?]);
        }

        let mut alternates = Vec::with_capacity(1 + secondary.len());
        alternates.push(variant.alternate().to_string());
        alternates.extend(secondary);

        let trimmed: Vec<TrimmedAllele> = alternates
            .iter()
            .map(|alternate| self.trim(variant.start(), variant.reference(), alternate))
            .collect();

        let mut decomposed = Vec::with_capacity(trimmed.len());
        for (index, allele) in trimmed.iter().enumerate() {
            let mut rewritten = Variant::with_coordinates(
                variant.chromosome(),
                allele.start,
                allele.end,
                &allele.reference,
                &allele.alternate,
            )?;
            rewritten.set_id(variant.id().map(str::to_string));
            rewritten.set_names(variant.names().to_vec());
            rewritten.set_strand(variant.strand());

            let others: Vec<AlternateCoordinate> = trimmed
                .iter()
                .enumerate()
                .filter(|&(other_index, _)| other_index != index)
                .map(|(_, other)| alternate_coordinate(variant.chromosome(), other))
                .collect();

            let call = format!(
                "{}:{}:{}:{}",
                variant.start(),
                variant.reference(),
                alternates.join(","),
                index
            );
            let mut studies = variant.studies().to_vec();
            for study in &mut studies {
                study.set_secondary_alternates(others.clone());
                for file in study.files_mut() {
                    file.call = Some(call.clone());
                }
            }
            rewritten.set_studies(studies);
            decomposed.push(rewritten);
        }
        Ok(decomposed)
    }

    /// Trim a mono-allelic variant in place of decomposition
    fn trimmed_copy(&self, variant: &Variant) -> Result<Variant> {
        let allele = self.trim(variant.start(), variant.reference(), variant.alternate());
        if allele.start == variant.start()
            && allele.reference == variant.reference()
            && allele.alternate == variant.alternate()
        {
            return Ok(variant.clone());
        }
        let mut rewritten = Variant::with_coordinates(
            variant.chromosome(),
            allele.start,
            allele.end,
            &allele.reference,
            &allele.alternate,
        )?;
        rewritten.set_id(variant.id().map(str::to_string));
        rewritten.set_names(variant.names().to_vec());
        rewritten.set_strand(variant.strand());
        rewritten.set_studies(variant.studies().to_vec());
        Ok(rewritten)
    }

    /// Strip shared trailing then leading bases, adjusting coordinates
    ///
    /// Identical single-base alleles are left alone so a degenerate A>A
    /// record cannot trim itself to empty-on-empty.
    fn trim(&self, start: i64, reference: &str, alternate: &str) -> TrimmedAllele {
        let mut reference = reference.to_string();
        let mut alternate = alternate.to_string();
        let mut start = start;

        if self.config.trim_alleles {
            while reference.len() > 1 || alternate.len() > 1 {
                let (Some(last_ref), Some(last_alt)) =
                    (reference.chars().last(), alternate.chars().last())
                else {
                    break;
                };
                if last_ref != last_alt {
                    break;
                }
                reference.pop();
                alternate.pop();
            }
            while (reference.len() > 1 || alternate.len() > 1)
                && !reference.is_empty()
                && !alternate.is_empty()
            {
                let first_ref = reference.chars().next();
                let first_alt = alternate.chars().next();
                if first_ref != first_alt {
                    break;
                }
                reference.remove(0);
                alternate.remove(0);
                start += 1;
            }
        }

        let end = start + reference.len() as i64 - 1;
        TrimmedAllele {
            start,
            end,
            reference,
            alternate,
        }
    }
}

fn alternate_coordinate(chromosome: &str, allele: &TrimmedAllele) -> AlternateCoordinate {
    let length = allele.reference.len().max(allele.alternate.len()) as i64;
    AlternateCoordinate::new(
        Some(chromosome.to_string()),
        Some(allele.start),
        Some(allele.end),
        Some(allele.reference.clone()),
        allele.alternate.clone(),
        infer_type(&allele.reference, &allele.alternate, length),
    )
}
