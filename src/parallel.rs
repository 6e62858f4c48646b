//! Parallel processing support for ferro-variant
//!
//! This module provides parallel variants of the slice encode and decode
//! operations using rayon. Enable with the `parallel` feature.
//!
//! The decoder carries the thread-safety guarantee these helpers rely on:
//! one [`SliceDecoder`] instance may serve every worker, with all per-call
//! state constructed freshly inside each `convert`.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(feature = "parallel")]
//! # fn main() {
//! use ferro_variant::parallel::decode_parallel;
//! use ferro_variant::{SliceDecoder, VcfSlice};
//! use indexmap::IndexMap;
//!
//! let slices: Vec<VcfSlice> = Vec::new();
//! let positions: IndexMap<String, usize> = IndexMap::new();
//! let decoder = SliceDecoder::new(&positions, "file.vcf", "study");
//! let decoded = decode_parallel(&decoder, &slices);
//! # }
//! # #[cfg(not(feature = "parallel"))]
//! # fn main() {}
//! ```

use rayon::prelude::*;

use crate::error::VariantError;
use crate::slice::{SliceDecoder, SliceEncoder, VcfSlice};
use crate::variant::Variant;

/// Decode multiple slices in parallel
///
/// Returns a vector of results, one for each input slice. Order is
/// preserved.
pub fn decode_parallel(
    decoder: &SliceDecoder,
    slices: &[VcfSlice],
) -> Vec<Result<Vec<Variant>, VariantError>> {
    slices
        .par_iter()
        .map(|slice| decoder.convert(slice))
        .collect()
}

/// Decode multiple encoded byte buffers in parallel
///
/// The buffers may alias the same underlying bytes; decoding never mutates
/// them.
pub fn decode_bytes_parallel(
    decoder: &SliceDecoder,
    buffers: &[&[u8]],
) -> Vec<Result<Vec<Variant>, VariantError>> {
    buffers
        .par_iter()
        .map(|bytes| decoder.convert_bytes(bytes))
        .collect()
}

/// Encode multiple batches in parallel
///
/// Each batch is a list of variants plus its anchor position. Order is
/// preserved.
pub fn encode_parallel(
    encoder: &SliceEncoder,
    batches: &[(&[Variant], i64)],
) -> Vec<Result<VcfSlice, VariantError>> {
    batches
        .par_iter()
        .map(|&(variants, position)| encoder.convert(variants, position))
        .collect()
}
