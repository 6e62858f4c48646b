//! Per-cohort variant summary statistics

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Summary statistics for one cohort of samples at one variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VariantStats {
    /// Reference allele of the variant these stats summarize
    pub ref_allele: Option<String>,
    /// Alternate allele of the variant these stats summarize
    pub alt_allele: Option<String>,
    /// Observed reference allele count
    pub ref_allele_count: u32,
    /// Observed alternate allele count
    pub alt_allele_count: u32,
    /// Alleles reported as missing (`.`)
    pub missing_allele_count: u32,
    /// Genotypes where every allele is missing
    pub missing_genotype_count: u32,
    /// Count per observed genotype string, in first-occurrence order
    pub genotype_count: IndexMap<String, u32>,
    /// Minor allele frequency
    pub maf: f32,
    /// Minor genotype frequency
    pub mgf: f32,
    /// The allele realizing the MAF
    pub maf_allele: Option<String>,
    /// The genotype realizing the MGF
    pub mgf_genotype: Option<String>,
}

impl VariantStats {
    pub fn new(ref_allele: impl Into<String>, alt_allele: impl Into<String>) -> Self {
        VariantStats {
            ref_allele: Some(ref_allele.into()),
            alt_allele: Some(alt_allele.into()),
            ..Default::default()
        }
    }

    /// Compute statistics from genotype strings (`0/1`, `1|1`, `./.` ...)
    ///
    /// Allele `0` counts as reference, `.` as missing, anything else as
    /// alternate.
    pub fn from_genotypes<'a>(
        reference: &str,
        alternate: &str,
        genotypes: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut stats = VariantStats::new(reference, alternate);
        for genotype in genotypes {
            *stats.genotype_count.entry(genotype.to_string()).or_insert(0) += 1;
            let mut all_missing = true;
            for allele in genotype.split(['/', '|']) {
                match allele {
                    "0" => {
                        stats.ref_allele_count += 1;
                        all_missing = false;
                    }
                    "." => stats.missing_allele_count += 1,
                    _ => {
                        stats.alt_allele_count += 1;
                        all_missing = false;
                    }
                }
            }
            if all_missing {
                stats.missing_genotype_count += 1;
            }
        }
        stats.update_frequencies();
        stats
    }

    /// Recompute MAF/MGF from the stored counts
    pub fn update_frequencies(&mut self) {
        let total_alleles = self.ref_allele_count + self.alt_allele_count;
        if total_alleles > 0 {
            let ref_freq = self.ref_allele_count as f32 / total_alleles as f32;
            let alt_freq = self.alt_allele_count as f32 / total_alleles as f32;
            if ref_freq <= alt_freq {
                self.maf = ref_freq;
                self.maf_allele = self.ref_allele.clone();
            } else {
                self.maf = alt_freq;
                self.maf_allele = self.alt_allele.clone();
            }
        }
        let total_genotypes: u32 = self.genotype_count.values().sum();
        if total_genotypes > 0 {
            if let Some((genotype, count)) =
                self.genotype_count.iter().min_by_key(|(_, count)| **count)
            {
                self.mgf = *count as f32 / total_genotypes as f32;
                self.mgf_genotype = Some(genotype.clone());
            }
        }
    }
}
