//! Lattice data attached to a cone.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::linalg::{lattice_kernel, unimodular_echelon};
use crate::zmatrix::ZVector;

/// Basis of `(Z^n ∩ span C) / (Z^n ∩ lin C)`, one row per quotient generator.
///
/// `equations` cut out the span, `facets` vanish exactly on the lineality inside
/// the span. Rows are lifts in `Z^n ∩ span C`.
pub(crate) fn quotient_lattice_basis(
    width: usize,
    equations: &[ZVector],
    facets: &[ZVector],
) -> Vec<ZVector> {
    let span = lattice_kernel(width, equations);
    let k = facets.len();
    let mut rows: Vec<ZVector> = span
        .iter()
        .map(|b| {
            let mut entries: Vec<BigInt> = facets.iter().map(|f| f.dot(b)).collect();
            entries.extend(b.iter().cloned());
            ZVector::from(entries)
        })
        .collect();
    let rank = unimodular_echelon(&mut rows, k);
    rows[..rank].iter().map(|r| r.tail(k)).collect()
}

/// Orient `v` so that no facet is negative on it.
pub(crate) fn orient_into(facets: &[ZVector], v: ZVector) -> ZVector {
    match facets.iter().map(|f| f.dot(&v)).find(|s| !s.is_zero()) {
        Some(s) if s.is_negative() => -v,
        _ => v,
    }
}
