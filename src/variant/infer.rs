//! Variant length and type inference
//!
//! Pure standalone functions shared by the model constructors, the
//! normalizer and textual-parser collaborators. The classification rules
//! are ordered: symbolic alleles first, then the no-call sentinel, then the
//! length-based SNV/MNV and INDEL/SV split.

use super::types::VariantType;

/// Length threshold (in bases) separating INDEL from SV classification
pub const SV_THRESHOLD: i64 = 50;

/// Literal prefix marking a copy-number symbolic allele, e.g. `<CN3>`
pub const CNV_PREFIX: &str = "<CN";

/// The VCF no-call sentinel allele
pub const NO_CALL: &str = ".";

/// Check whether an allele is symbolic rather than a literal base sequence
///
/// An allele is symbolic when it is longer than one byte and is
/// angle-bracketed (`<DEL>`), a breakpoint (`G]17:198982]`), or a single
/// breakend (`.A`, `A.`). The one-byte no-call `.` is not symbolic.
pub fn is_symbolic_allele(allele: &str) -> bool {
    let bytes = allele.as_bytes();
    if bytes.len() <= 1 {
        return false;
    }
    bytes[0] == b'<'
        || bytes[bytes.len() - 1] == b'>'
        || bytes.contains(&b'[')
        || bytes.contains(&b']')
        || bytes[0] == b'.'
        || bytes[bytes.len() - 1] == b'.'
}

/// Infer the variant type from the alleles and the stored length
///
/// Rules, in order:
/// 1. Either allele symbolic: `<CN`-prefixed alternate is `CNV`, anything
///    else `SYMBOLIC`.
/// 2. Alternate equal to `.`: `NO_VARIATION`.
/// 3. Equal allele lengths: `MNV` when length > 1, else `SNV`.
/// 4. Length mismatch: `INDEL` up to [`SV_THRESHOLD`], else `SV`.
pub fn infer_type(reference: &str, alternate: &str, length: i64) -> VariantType {
    if is_symbolic_allele(alternate) || is_symbolic_allele(reference) {
        if alternate.starts_with(CNV_PREFIX) {
            VariantType::Cnv
        } else {
            VariantType::Symbolic
        }
    } else if alternate == NO_CALL {
        VariantType::NoVariation
    } else if reference.len() == alternate.len() {
        if length > 1 {
            VariantType::Mnv
        } else {
            VariantType::Snv
        }
    } else if length <= SV_THRESHOLD {
        VariantType::Indel
    } else {
        VariantType::Sv
    }
}

/// Infer the variant length from alleles and coordinates
///
/// An absent reference delegates to the symbolic rule: a `<CN`-prefixed
/// alternate spans `end - start + 1`, any other alternate contributes its
/// own length (0 when absent). With a reference present the length is the
/// longer of the two alleles, or the reference length when the alternate is
/// absent.
pub fn infer_length(
    reference: Option<&str>,
    alternate: Option<&str>,
    start: i64,
    end: i64,
) -> i64 {
    match reference {
        None => infer_length_symbolic(alternate, start, end),
        Some(reference) => infer_length_simple(reference, alternate),
    }
}

pub(crate) fn infer_length_symbolic(alternate: Option<&str>, start: i64, end: i64) -> i64 {
    match alternate {
        Some(alt) if alt.starts_with(CNV_PREFIX) => end - start + 1,
        Some(alt) => alt.len() as i64,
        None => 0,
    }
}

pub(crate) fn infer_length_simple(reference: &str, alternate: Option<&str>) -> i64 {
    match alternate {
        Some(alt) => reference.len().max(alt.len()) as i64,
        None => reference.len() as i64,
    }
}

/// Subtypes of the SV classification
pub const SV_SUBTYPES: [VariantType; 5] = [
    VariantType::Insertion,
    VariantType::Deletion,
    VariantType::Translocation,
    VariantType::Inversion,
    VariantType::Cnv,
];

/// Return the legacy subtypes of a variant type
///
/// `SNV ⊇ {SNP}`, `MNV ⊇ {MNP}`, `SV ⊇ {INSERTION, DELETION, TRANSLOCATION,
/// INVERSION, CNV}`; every other type has no subtypes.
pub fn sub_types(variant_type: VariantType) -> &'static [VariantType] {
    match variant_type {
        VariantType::Snv => &[VariantType::Snp],
        VariantType::Mnv => &[VariantType::Mnp],
        VariantType::Sv => &SV_SUBTYPES,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbolic_allele_detection() {
        assert!(is_symbolic_allele("<DEL>"));
        assert!(is_symbolic_allele("<CN3>"));
        assert!(is_symbolic_allele("G]17:198982]"));
        assert!(is_symbolic_allele("]13:123456]T"));
        assert!(is_symbolic_allele(".A"));
        assert!(is_symbolic_allele("A."));
        assert!(!is_symbolic_allele("."));
        assert!(!is_symbolic_allele("A"));
        assert!(!is_symbolic_allele("ACGT"));
        assert!(!is_symbolic_allele(""));
    }

    #[test]
    fn test_infer_type_snv_mnv() {
        assert_eq!(infer_type("A", "C", 1), VariantType::Snv);
        assert_eq!(infer_type("A", "A", 1), VariantType::Snv);
        assert_eq!(infer_type("AT", "AC", 2), VariantType::Mnv);
    }

    #[test]
    fn test_infer_type_indel_sv() {
        assert_eq!(infer_type("A", "", 1), VariantType::Indel);
        assert_eq!(infer_type("", "ACGT", 4), VariantType::Indel);
        assert_eq!(infer_type("A", "AT", 50), VariantType::Indel);
        assert_eq!(infer_type("A", "AT", 51), VariantType::Sv);
    }

    #[test]
    fn test_infer_type_symbolic_and_cnv() {
        assert_eq!(infer_type("", "<DEL>", 5), VariantType::Symbolic);
        assert_eq!(infer_type("A", "<CN3>", 100), VariantType::Cnv);
        assert_eq!(infer_type("<DUP>", "A", 5), VariantType::Symbolic);
    }

    #[test]
    fn test_infer_type_no_variation() {
        assert_eq!(infer_type("A", ".", 1), VariantType::NoVariation);
    }

    #[test]
    fn test_infer_length_simple() {
        assert_eq!(infer_length(Some("A"), Some("C"), 0, 0), 1);
        assert_eq!(infer_length(Some("A"), Some("ACGT"), 0, 0), 4);
        assert_eq!(infer_length(Some("ACGT"), Some(""), 0, 0), 4);
        assert_eq!(infer_length(Some("ACGT"), None, 0, 0), 4);
    }

    #[test]
    fn test_infer_length_symbolic() {
        assert_eq!(infer_length(None, Some("<CN3>"), 100, 200), 101);
        assert_eq!(infer_length(None, Some("<DEL>"), 100, 200), 5);
        assert_eq!(infer_length(None, None, 100, 200), 0);
    }

    #[test]
    fn test_sub_types() {
        assert_eq!(sub_types(VariantType::Snv), &[VariantType::Snp]);
        assert_eq!(sub_types(VariantType::Mnv), &[VariantType::Mnp]);
        assert_eq!(sub_types(VariantType::Sv), &SV_SUBTYPES);
        assert!(sub_types(VariantType::Indel).is_empty());
        assert!(sub_types(VariantType::Snp).is_empty());
        assert!(sub_types(VariantType::NoVariation).is_empty());
    }
}
