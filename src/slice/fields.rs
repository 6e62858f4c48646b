//! Wire model of an encoded variant slice
//!
//! A slice is a batch of variant records from one genomic region sharing a
//! [`FieldDictionary`]: the distinct FILTER strings, FORMAT strings,
//! genotype strings and INFO keys observed across the batch, each referenced
//! from the compact records by integer index. The binary representation is
//! bincode with the standard configuration.

use crate::variant::types::{AlternateCoordinate, VariantType};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

/// Deduplicated field dictionary shared by all records of a slice
///
/// Every list is ordered by first occurrence in the encoded batch.
/// `default_info_keys` holds indices into `info_keys` naming the INFO keys
/// a record carries implicitly when it stores no explicit key indices.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDictionary {
    /// Distinct FILTER attribute strings
    pub filters: Vec<String>,
    /// Distinct `:`-joined FORMAT strings
    pub formats: Vec<String>,
    /// Distinct genotype values observed across all sample rows
    pub genotypes: Vec<String>,
    /// Distinct INFO attribute keys
    pub info_keys: Vec<String>,
    /// Indices of the INFO keys applied to records without explicit keys
    pub default_info_keys: Vec<u32>,
}

/// Per-sample data of one compact record
///
/// The genotype is dictionary-encoded when the record's FORMAT leads with
/// `GT`; all remaining fields are stored literally, in FORMAT column order.
/// Samples are keyed by row position, not by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SliceSample {
    /// Index into [`FieldDictionary::genotypes`], when the row has a
    /// dictionary-encoded genotype
    pub genotype_index: Option<u32>,
    /// Literal values of the remaining FORMAT fields
    pub values: Vec<String>,
}

/// One compact variant record referencing the slice dictionary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceRecord {
    /// Start offset from the slice anchor position
    pub relative_start: i64,
    /// End offset from the slice anchor position
    pub relative_end: i64,
    pub reference: String,
    pub alternate: String,
    /// Stored variant length; CNV and symbolic records derive it from a
    /// rule the decoder cannot reconstruct from the alleles alone
    pub length: i64,
    pub id: Option<String>,
    pub names: Vec<String>,
    /// Phred-scaled quality, absent when the source had none (or `.`)
    pub quality: Option<f32>,
    /// Index into [`FieldDictionary::filters`]
    pub filter_index: Option<u32>,
    /// Index into [`FieldDictionary::formats`]
    pub format_index: Option<u32>,
    /// Explicit indices into [`FieldDictionary::info_keys`]; empty when the
    /// record carries exactly the default INFO keys
    pub info_key_indexes: Vec<u32>,
    /// INFO values aligned with the explicit or default key indices
    pub info_values: Vec<String>,
    /// Per-sample data in row-position order
    pub samples: Vec<SliceSample>,
    /// Secondary alternates of a decomposed multi-allelic record
    pub secondary_alternates: Vec<AlternateCoordinate>,
    /// Original call string recorded by the normalizer, when any
    pub call: Option<String>,
    /// Variant type, stored because it may be overridden after inference
    /// (e.g. reference blocks typed `NO_VARIATION`)
    pub variant_type: VariantType,
}

/// An encoded batch of variant records from one genomic region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VcfSlice {
    /// Chromosome shared by all records
    pub chromosome: String,
    /// Anchor position; record coordinates are offsets from it
    pub position: i64,
    /// Shared field dictionary
    pub fields: FieldDictionary,
    /// Compact records in batch order
    pub records: Vec<SliceRecord>,
}

impl VcfSlice {
    /// Serialize this slice to bincode bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let config = bincode::config::standard();
        Ok(bincode::serde::encode_to_vec(self, config)?)
    }

    /// Deserialize a slice from bincode bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<VcfSlice> {
        let config = bincode::config::standard();
        let (slice, _) = bincode::serde::decode_from_slice(bytes, config)?;
        Ok(slice)
    }

    /// Serialize this slice into a writer
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let config = bincode::config::standard();
        bincode::serde::encode_into_std_write(self, writer, config)?;
        Ok(())
    }

    /// Deserialize a slice from a reader
    pub fn read_from<R: Read>(reader: &mut R) -> Result<VcfSlice> {
        let config = bincode::config::standard();
        Ok(bincode::serde::decode_from_std_read(reader, config)?)
    }
}
