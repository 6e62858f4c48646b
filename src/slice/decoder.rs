//! Batch decoder: slice → variants
//!
//! Reconstructs full [`Variant`]/[`StudyEntry`] objects from the shared
//! field dictionary and the compact records. A decoder instance is cheap to
//! construct and safe to use from many threads concurrently: the supplied
//! sample-position map is defensively copied into a read-only `Arc` at
//! construction time, and all per-call mutable state lives in a record
//! decoder built freshly inside every [`SliceDecoder::convert`] invocation.
//!
//! The sample-position map is trusted, not validated against the mapping
//! the encoder used implicitly: samples are positional inside the compact
//! records, so a mismatched map silently re-associates genotypes with the
//! wrong sample names.

use crate::error::VariantError;
use crate::slice::fields::{FieldDictionary, SliceRecord, VcfSlice};
use crate::slice::{END_KEY, FILTER_KEY, QUAL_KEY};
use crate::study::{self, FileEntry, StudyEntry};
use crate::variant::{Variant, VariantType};
use crate::Result;
use indexmap::IndexMap;
use log::trace;
use std::sync::Arc;

/// Converts dictionary-compressed slices back into [`Variant`]s
#[derive(Debug, Clone)]
pub struct SliceDecoder {
    samples_position: Arc<IndexMap<String, usize>>,
    file_id: String,
    study_id: String,
}

impl SliceDecoder {
    /// Create a decoder for one study/file context
    ///
    /// The sample-position map is copied (and compacted into contiguous
    /// `0..n-1` form when needed) so later caller-side mutation of the
    /// original map can never race with concurrent decodes.
    pub fn new(
        samples_position: &IndexMap<String, usize>,
        file_id: impl Into<String>,
        study_id: impl Into<String>,
    ) -> Self {
        let positions = if study::is_samples_position_sorted(samples_position) {
            samples_position.clone()
        } else {
            study::sort_samples_position(samples_position)
        };
        Self {
            samples_position: Arc::new(positions),
            file_id: file_id.into(),
            study_id: study_id.into(),
        }
    }

    /// Decode every record of a slice
    ///
    /// Safe to call concurrently on the same decoder, with the same or
    /// different slices.
    pub fn convert(&self, slice: &VcfSlice) -> Result<Vec<Variant>> {
        let record_decoder = RecordDecoder {
            fields: &slice.fields,
            samples_position: &self.samples_position,
            file_id: &self.file_id,
            study_id: &self.study_id,
        };
        trace!(
            "decoding {} records at {}:{}",
            slice.records.len(),
            slice.chromosome,
            slice.position
        );
        slice
            .records
            .iter()
            .map(|record| record_decoder.convert(record, &slice.chromosome, slice.position))
            .collect()
    }

    /// Decode a slice straight from its bincode bytes
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<Vec<Variant>> {
        self.convert(&VcfSlice::from_bytes(bytes)?)
    }
}

/// Per-call record converter; freshly constructed inside every
/// [`SliceDecoder::convert`] so decoder instances stay shareable
struct RecordDecoder<'a> {
    fields: &'a FieldDictionary,
    samples_position: &'a Arc<IndexMap<String, usize>>,
    file_id: &'a str,
    study_id: &'a str,
}

impl RecordDecoder<'_> {
    fn convert(&self, record: &SliceRecord, chromosome: &str, position: i64) -> Result<Variant> {
        let start = position + record.relative_start;
        let end = position + record.relative_end;

        let mut variant = Variant::with_coordinates(
            chromosome,
            start,
            end,
            &record.reference,
            &record.alternate,
        )?;
        // The stored type and length win over inference: reference blocks
        // are typed NO_VARIATION regardless of their alleles, and symbolic
        // lengths are not derivable from the alleles
        variant.set_type(record.variant_type);
        variant.set_length(record.length);
        variant.set_id(record.id.clone());
        variant.set_names(record.names.clone());

        let mut entry = StudyEntry::new(self.study_id);
        if let Some(format_index) = record.format_index {
            let format = self.lookup(&self.fields.formats, format_index, "format")?;
            entry.set_format_string(format);
        }
        entry.set_secondary_alternates(record.secondary_alternates.clone());

        let mut samples_data = Vec::with_capacity(record.samples.len());
        for sample in &record.samples {
            let mut row = Vec::with_capacity(sample.values.len() + 1);
            if let Some(genotype_index) = sample.genotype_index {
                let genotype =
                    self.lookup(&self.fields.genotypes, genotype_index, "genotype")?;
                row.push(genotype.to_string());
            }
            row.extend(sample.values.iter().cloned());
            samples_data.push(row);
        }
        entry.set_samples_data(samples_data);
        entry.set_sorted_samples_position(Arc::clone(self.samples_position));

        let mut attributes = IndexMap::new();
        if let Some(quality) = record.quality {
            attributes.insert(QUAL_KEY.to_string(), format_quality(quality));
        }
        if let Some(filter_index) = record.filter_index {
            let filter = self.lookup(&self.fields.filters, filter_index, "filter")?;
            attributes.insert(FILTER_KEY.to_string(), filter.to_string());
        }
        for (key_index, value) in self.info_entries(record)? {
            attributes.insert(
                self.lookup(&self.fields.info_keys, key_index, "INFO key")?
                    .to_string(),
                value.clone(),
            );
        }
        // The END attribute was folded into the end coordinate on encode;
        // reference blocks carry it explicitly, so restore it
        if record.variant_type == VariantType::NoVariation {
            attributes.insert(END_KEY.to_string(), end.to_string());
        }

        let mut file = FileEntry::with_attributes(self.file_id, attributes);
        file.call = record.call.clone();
        entry.add_file(file);

        variant.add_study_entry(entry);
        Ok(variant)
    }

    /// The (key index, value) pairs of a record, expanding default INFO
    /// keys when no explicit indices were encoded
    fn info_entries<'r>(
        &self,
        record: &'r SliceRecord,
    ) -> Result<Vec<(u32, &'r String)>> {
        let indexes: &[u32] = if record.info_key_indexes.is_empty() && !record.info_values.is_empty()
        {
            &self.fields.default_info_keys
        } else {
            &record.info_key_indexes
        };
        if indexes.len() != record.info_values.len() {
            return Err(VariantError::codec(format!(
                "Record has {} INFO keys but {} values",
                indexes.len(),
                record.info_values.len()
            )));
        }
        Ok(indexes
            .iter()
            .copied()
            .zip(record.info_values.iter())
            .collect())
    }

    fn lookup<'f>(
        &self,
        dictionary: &'f [String],
        index: u32,
        kind: &str,
    ) -> Result<&'f str> {
        dictionary
            .get(index as usize)
            .map(String::as_str)
            .ok_or_else(|| {
                VariantError::codec(format!(
                    "{} index {} out of range ({} entries)",
                    kind,
                    index,
                    dictionary.len()
                ))
            })
    }
}

/// Render a quality scalar the way it is parsed: shortest decimal form
fn format_quality(quality: f32) -> String {
    format!("{}", quality)
}
