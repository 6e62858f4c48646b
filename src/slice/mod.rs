//! Dictionary-compressed slice codec
//!
//! A slice packs the variants of one genomic region into a shared
//! [`FieldDictionary`] plus one compact record per variant, deduplicating
//! the FILTER strings, FORMAT strings, genotype strings and INFO keys that
//! repeat across a batch. [`SliceEncoder`] builds slices, [`SliceDecoder`]
//! reconstructs full [`Variant`](crate::Variant)s and is safe to share
//! across threads.

pub mod decoder;
pub mod encoder;
pub mod fields;

pub use decoder::SliceDecoder;
pub use encoder::{SliceEncoder, SliceEncoderConfig};
pub use fields::{FieldDictionary, SliceRecord, SliceSample, VcfSlice};

/// File attribute key carrying the record quality
pub const QUAL_KEY: &str = "QUAL";

/// File attribute key carrying the record filter status
pub const FILTER_KEY: &str = "FILTER";

/// File attribute key carrying the explicit end coordinate of reference
/// blocks
pub const END_KEY: &str = "END";
