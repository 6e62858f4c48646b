//! Fuzz target for the slice byte decoder
//!
//! Arbitrary bytes must never panic the decoder: corrupt dictionaries and
//! out-of-range indices have to surface as codec errors.

#![no_main]

use ferro_variant::{SliceDecoder, VcfSlice};
use indexmap::IndexMap;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(slice) = VcfSlice::from_bytes(data) {
        let mut positions = IndexMap::new();
        positions.insert("S1".to_string(), 0);
        let decoder = SliceDecoder::new(&positions, "file", "study");
        let _ = decoder.convert(&slice);
    }
});
