//! Property-based tests for the variant model and the slice codec
//!
//! Random batches of multi-sample variant records must survive the
//! dictionary encode/decode round trip under full structural equality, and
//! the model transforms must hold their contracts for arbitrary alleles.

use ferro_variant::{SliceDecoder, SliceEncoder, StudyEntry, Variant, VcfSlice};
use indexmap::IndexMap;
use proptest::prelude::*;

const STUDY_ID: &str = "study";
const FILE_ID: &str = "file";
const SAMPLES: [&str; 3] = ["S1", "S2", "S3"];
const FILTERS: [&str; 3] = ["PASS", "LowQual", "PASS;LowDP"];
const GENOTYPES: [&str; 4] = ["0/0", "0/1", "1/1", "./."];
const INFO_KEYS: [&str; 4] = ["K1", "K2", "K3", "K4"];

#[derive(Debug, Clone)]
struct RecordSpec {
    reference: String,
    alternate: String,
    filter: Option<usize>,
    quality: Option<u32>,
    info_mask: u8,
    genotypes: [usize; 3],
    depths: [u32; 3],
}

prop_compose! {
    fn record_spec()(
        reference in "[ACGT]{1,3}",
        alternate in "[ACGT]{1,3}",
        filter in proptest::option::of(0usize..FILTERS.len()),
        quality in proptest::option::of(0u32..1000),
        info_mask in 0u8..16,
        genotypes in prop::array::uniform3(0usize..GENOTYPES.len()),
        depths in prop::array::uniform3(1u32..100),
    ) -> RecordSpec {
        RecordSpec { reference, alternate, filter, quality, info_mask, genotypes, depths }
    }
}

fn build_variant(spec: &RecordSpec, start: i64) -> Variant {
    let mut variant = Variant::new("1", start, &spec.reference, &spec.alternate).unwrap();
    let mut study = StudyEntry::new(STUDY_ID).with_file_id(FILE_ID);
    if let Some(filter) = spec.filter {
        study.set_attribute("FILTER", FILTERS[filter]);
    }
    if let Some(quality) = spec.quality {
        study.set_attribute("QUAL", quality.to_string());
    }
    for (bit, key) in INFO_KEYS.iter().enumerate() {
        if spec.info_mask & (1 << bit) != 0 {
            study.set_attribute(*key, format!("V{}", bit));
        }
    }
    study.set_format_string("GT:DP");
    for (sample_index, sample) in SAMPLES.iter().enumerate() {
        study.add_sample_data(
            *sample,
            vec![
                GENOTYPES[spec.genotypes[sample_index]].to_string(),
                spec.depths[sample_index].to_string(),
            ],
        );
    }
    variant.add_study_entry(study);
    variant
}

fn samples_position() -> IndexMap<String, usize> {
    SAMPLES
        .iter()
        .enumerate()
        .map(|(index, sample)| (sample.to_string(), index))
        .collect()
}

proptest! {
    /// decode(encode(B, M), M) == B for arbitrary batches
    #[test]
    fn prop_round_trip(specs in prop::collection::vec(record_spec(), 1..20)) {
        let variants: Vec<Variant> = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| build_variant(spec, 1000 + index as i64 * 7))
            .collect();

        let bytes = SliceEncoder::new().convert_to_bytes(&variants, 1000).unwrap();
        let slice = VcfSlice::from_bytes(&bytes).unwrap();
        let decoder = SliceDecoder::new(&samples_position(), FILE_ID, STUDY_ID);
        let decoded = decoder.convert(&slice).unwrap();

        prop_assert_eq!(decoded, variants);
    }

    /// A decoder is deterministic: repeated decodes of the same bytes agree
    #[test]
    fn prop_repeated_decode_stable(specs in prop::collection::vec(record_spec(), 1..8)) {
        let variants: Vec<Variant> = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| build_variant(spec, 2000 + index as i64 * 3))
            .collect();

        let bytes = SliceEncoder::new().convert_to_bytes(&variants, 2000).unwrap();
        let decoder = SliceDecoder::new(&samples_position(), FILE_ID, STUDY_ID);

        let first = decoder.convert_bytes(&bytes).unwrap();
        let second = decoder.convert_bytes(&bytes).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Textual identifiers survive a display/parse cycle
    #[test]
    fn prop_display_parse_cycle(
        chromosome in "[0-9XY]{1,2}",
        start in 1i64..10_000_000,
        reference in "[ACGT]{0,3}",
        alternate in "[ACGT]{1,3}",
    ) {
        let variant = Variant::new(&chromosome, start, &reference, &alternate).unwrap();
        let reparsed = Variant::parse(&variant.to_string()).unwrap();
        prop_assert!(variant.same_genomic_variant(&reparsed));
    }

    /// Once no leading base is shared, the Ensembl transform is a no-op
    #[test]
    fn prop_ensembl_transform_idempotent(
        start in 1i64..1_000_000,
        reference in "[ACGT]{1,5}",
        alternate in "[ACGT]{1,5}",
    ) {
        let mut variant = Variant::new("1", start, &reference, &alternate).unwrap();
        variant.transform_to_ensembl_format();
        let once = variant.clone();

        let no_shared_leading_base = match (
            once.reference().chars().next(),
            once.alternate().chars().next(),
        ) {
            (Some(first_ref), Some(first_alt)) => first_ref != first_alt,
            _ => true,
        };

        variant.transform_to_ensembl_format();
        if no_shared_leading_base {
            prop_assert_eq!(variant, once);
        }
    }

    /// Type inference is total and consistent with allele lengths
    #[test]
    fn prop_infer_type_total(
        reference in "[ACGT]{0,60}",
        alternate in "[ACGT]{0,60}",
    ) {
        use ferro_variant::{infer_length, infer_type, VariantType};

        let length = infer_length(Some(&reference), Some(&alternate), 0, 0);
        let variant_type = infer_type(&reference, &alternate, length);

        if reference.is_empty() && alternate.is_empty() {
            prop_assert_eq!(variant_type, VariantType::Snv);
        } else if reference.len() == alternate.len() {
            prop_assert!(matches!(variant_type, VariantType::Snv | VariantType::Mnv));
        } else {
            prop_assert!(matches!(variant_type, VariantType::Indel | VariantType::Sv));
        }
    }
}
