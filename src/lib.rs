// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-variant: genomic variant data model and slice codec
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! # Example
//!
//! ```
//! use ferro_variant::{SliceDecoder, SliceEncoder, StudyEntry, Variant, VariantType};
//!
//! // Parse a variant and attach per-sample genotype data
//! let mut variant = Variant::parse("chr1:1000:A:C").unwrap();
//! assert_eq!(variant.chromosome(), "1");
//! assert_eq!(variant.variant_type(), VariantType::Snv);
//!
//! let mut study = StudyEntry::new("1000g").with_file_id("file.vcf");
//! study.set_format_string("GT");
//! study.add_sample_data("HG001", vec!["0|1".to_string()]);
//! variant.add_study_entry(study);
//!
//! // Encode a batch into a dictionary-compressed slice and decode it back
//! let encoder = SliceEncoder::new();
//! let slice = encoder.convert(std::slice::from_ref(&variant), 1000).unwrap();
//!
//! let positions = variant.studies()[0].samples_position().unwrap().clone();
//! let decoder = SliceDecoder::new(&positions, "file.vcf", "1000g");
//! let decoded = decoder.convert(&slice).unwrap();
//! assert_eq!(decoded[0], variant);
//! ```

pub mod error;
pub mod normalize;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod slice;
pub mod study;
pub mod variant;

// Re-export commonly used types
pub use error::VariantError;
pub use normalize::{NormalizeConfig, Normalizer};
pub use slice::{
    FieldDictionary, SliceDecoder, SliceEncoder, SliceEncoderConfig, SliceRecord, SliceSample,
    VcfSlice,
};
pub use study::{FileEntry, StudyEntry, VariantStats};
pub use variant::{
    infer_length, infer_type, sub_types, AlternateCoordinate, StructuralVariation, Variant,
    VariantType,
};

/// Result type alias for ferro-variant operations
pub type Result<T> = std::result::Result<T, VariantError>;
