//! Batch encoder: variants → slice
//!
//! Scans a batch of variants once to build the shared field dictionary
//! (first-occurrence order), then emits one compact record per variant
//! referencing the dictionary by index. Encoding is a pure function of the
//! batch, the anchor position and the encoder configuration; no state
//! survives between calls.

use crate::error::VariantError;
use crate::slice::fields::{FieldDictionary, SliceRecord, SliceSample, VcfSlice};
use crate::slice::{END_KEY, FILTER_KEY, QUAL_KEY};
use crate::study::StudyEntry;
use crate::variant::Variant;
use crate::Result;
use indexmap::{IndexMap, IndexSet};
use log::debug;
use std::collections::HashMap;

/// Encoder heuristics
#[derive(Debug, Clone)]
pub struct SliceEncoderConfig {
    /// An INFO key is marked "default" when it occurs in at least this
    /// fraction of the batch's records
    pub default_info_ratio: f64,
}

impl Default for SliceEncoderConfig {
    fn default() -> Self {
        Self {
            default_info_ratio: 0.5,
        }
    }
}

/// Converts batches of [`Variant`]s into dictionary-compressed slices
///
/// The batch is expected to share a single study and one contiguous
/// sample-position mapping across all variants; this is not re-validated
/// per record. Only the first study and its first file are encoded.
#[derive(Debug, Clone, Default)]
pub struct SliceEncoder {
    config: SliceEncoderConfig,
}

impl SliceEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SliceEncoderConfig) -> Self {
        Self { config }
    }

    /// Encode a batch of variants anchored at `position`
    ///
    /// Fails with `InvalidArgument` when a variant carries no study entry.
    pub fn convert(&self, variants: &[Variant], position: i64) -> Result<VcfSlice> {
        let fields = self.build_fields(variants)?;
        let index = FieldIndex::new(&fields);
        let mut records = Vec::with_capacity(variants.len());
        for variant in variants {
            records.push(encode_record(variant, &fields, &index, position)?);
        }
        debug!(
            "encoded {} records at {}:{} ({} filters, {} formats, {} genotypes, {} info keys)",
            records.len(),
            variants.first().map(Variant::chromosome).unwrap_or(""),
            position,
            fields.filters.len(),
            fields.formats.len(),
            fields.genotypes.len(),
            fields.info_keys.len(),
        );
        Ok(VcfSlice {
            chromosome: variants
                .first()
                .map(|variant| variant.chromosome().to_string())
                .unwrap_or_default(),
            position,
            fields,
            records,
        })
    }

    /// Encode a batch directly to bincode bytes
    pub fn convert_to_bytes(&self, variants: &[Variant], position: i64) -> Result<Vec<u8>> {
        self.convert(variants, position)?.to_bytes()
    }

    /// Build the shared field dictionary for a batch
    ///
    /// Dictionary entries are assigned indices in first-occurrence order.
    /// INFO keys occurring in at least `default_info_ratio` of the records
    /// are marked default.
    pub fn build_fields(&self, variants: &[Variant]) -> Result<FieldDictionary> {
        let mut filters: IndexSet<String> = IndexSet::new();
        let mut formats: IndexSet<String> = IndexSet::new();
        let mut genotypes: IndexSet<String> = IndexSet::new();
        let mut info_key_counts: IndexMap<String, usize> = IndexMap::new();

        for variant in variants {
            let study = first_study(variant)?;
            if let Some(file) = study.files().first() {
                if let Some(filter) = file.attributes.get(FILTER_KEY) {
                    filters.insert(filter.clone());
                }
                for key in file.attributes.keys() {
                    if !is_reserved_attribute(key) {
                        *info_key_counts.entry(key.clone()).or_insert(0) += 1;
                    }
                }
            }
            if let Some(format) = study.format_string() {
                formats.insert(format);
            }
            if leads_with_genotype(study) {
                for row in study.samples_data() {
                    if let Some(genotype) = row.first() {
                        genotypes.insert(genotype.clone());
                    }
                }
            }
        }

        let threshold = self.config.default_info_ratio * variants.len() as f64;
        let default_info_keys = info_key_counts
            .values()
            .enumerate()
            .filter(|&(_, &count)| count as f64 >= threshold)
            .map(|(index, _)| index as u32)
            .collect();

        Ok(FieldDictionary {
            filters: filters.into_iter().collect(),
            formats: formats.into_iter().collect(),
            genotypes: genotypes.into_iter().collect(),
            info_keys: info_key_counts.into_keys().collect(),
            default_info_keys,
        })
    }
}

/// Memoized string → dictionary-index lookups for one encoding pass
struct FieldIndex<'a> {
    filters: HashMap<&'a str, u32>,
    formats: HashMap<&'a str, u32>,
    genotypes: HashMap<&'a str, u32>,
    info_keys: HashMap<&'a str, u32>,
}

impl<'a> FieldIndex<'a> {
    fn new(fields: &'a FieldDictionary) -> Self {
        Self {
            filters: index_of(&fields.filters),
            formats: index_of(&fields.formats),
            genotypes: index_of(&fields.genotypes),
            info_keys: index_of(&fields.info_keys),
        }
    }
}

fn index_of(values: &[String]) -> HashMap<&str, u32> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| (value.as_str(), index as u32))
        .collect()
}

fn encode_record(
    variant: &Variant,
    fields: &FieldDictionary,
    index: &FieldIndex<'_>,
    position: i64,
) -> Result<SliceRecord> {
    let study = first_study(variant)?;
    let file = study.files().first();

    let quality = file
        .and_then(|file| file.attributes.get(QUAL_KEY))
        .filter(|quality| quality.as_str() != ".")
        .and_then(|quality| quality.parse::<f32>().ok());

    let filter_index = file
        .and_then(|file| file.attributes.get(FILTER_KEY))
        .and_then(|filter| index.filters.get(filter.as_str()).copied());

    let format_index = study
        .format_string()
        .and_then(|format| index.formats.get(format.as_str()).copied());

    // INFO entries sorted by dictionary index so the encoded index list is
    // directly comparable with the default key list
    let mut info: Vec<(u32, String)> = file
        .map(|file| {
            file.attributes
                .iter()
                .filter(|(key, _)| !is_reserved_attribute(key))
                .filter_map(|(key, value)| {
                    index
                        .info_keys
                        .get(key.as_str())
                        .map(|&key_index| (key_index, value.clone()))
                })
                .collect()
        })
        .unwrap_or_default();
    info.sort_by_key(|&(key_index, _)| key_index);

    let indexes: Vec<u32> = info.iter().map(|&(key_index, _)| key_index).collect();
    let info_values: Vec<String> = info.into_iter().map(|(_, value)| value).collect();
    let info_key_indexes = if !info_values.is_empty() && indexes == fields.default_info_keys {
        Vec::new()
    } else {
        indexes
    };

    let dictionary_genotypes = leads_with_genotype(study);
    let samples = study
        .samples_data()
        .iter()
        .map(|row| encode_sample(row, index, dictionary_genotypes))
        .collect::<Result<Vec<SliceSample>>>()?;

    Ok(SliceRecord {
        relative_start: variant.start() - position,
        relative_end: variant.end() - position,
        reference: variant.reference().to_string(),
        alternate: variant.alternate().to_string(),
        length: variant.length(),
        id: variant.id().map(str::to_string),
        names: variant.names().to_vec(),
        quality,
        filter_index,
        format_index,
        info_key_indexes,
        info_values,
        samples,
        secondary_alternates: study.secondary_alternates().to_vec(),
        call: file.and_then(|file| file.call.clone()),
        variant_type: variant.variant_type(),
    })
}

fn encode_sample(
    row: &[String],
    index: &FieldIndex<'_>,
    dictionary_genotypes: bool,
) -> Result<SliceSample> {
    if dictionary_genotypes {
        match row.split_first() {
            Some((genotype, rest)) => {
                let genotype_index = index
                    .genotypes
                    .get(genotype.as_str())
                    .copied()
                    .ok_or_else(|| {
                        VariantError::codec(format!(
                            "Genotype '{}' missing from dictionary",
                            genotype
                        ))
                    })?;
                Ok(SliceSample {
                    genotype_index: Some(genotype_index),
                    values: rest.to_vec(),
                })
            }
            None => Ok(SliceSample::default()),
        }
    } else {
        Ok(SliceSample {
            genotype_index: None,
            values: row.to_vec(),
        })
    }
}

fn first_study(variant: &Variant) -> Result<&StudyEntry> {
    variant.studies().first().ok_or_else(|| {
        VariantError::invalid(format!("Variant {} carries no study entry", variant))
    })
}

/// Whether the study's FORMAT leads with the GT field, enabling genotype
/// dictionary encoding
fn leads_with_genotype(study: &StudyEntry) -> bool {
    study
        .format()
        .and_then(|format| format.first())
        .map(|field| field == "GT")
        .unwrap_or(false)
}

/// Attributes carried outside the INFO dictionary: quality and filter are
/// record scalars, END is folded into the relative end coordinate
fn is_reserved_attribute(key: &str) -> bool {
    key == QUAL_KEY || key == FILTER_KEY || key == END_KEY
}
