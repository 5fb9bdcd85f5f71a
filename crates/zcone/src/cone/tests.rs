use super::*;
use crate::error::{ConeError, ConeWarning};
use crate::zmatrix::{ZMatrix, ZVector};
use num_bigint::BigInt;
use proptest::prelude::*;

fn m(width: usize, rows: &[&[i64]]) -> ZMatrix {
    let rows: Vec<ZVector> = rows.iter().map(|r| ZVector::from_i64(r)).collect();
    ZMatrix::from_rows(width, &rows).unwrap()
}

fn v(x: &[i64]) -> ZVector {
    ZVector::from_i64(x)
}

fn rays(width: usize, r: &[&[i64]]) -> Cone {
    Cone::from_rays(&m(width, r), &ZMatrix::empty(width)).unwrap()
}

fn quadrant() -> Cone {
    rays(2, &[&[1, 0], &[0, 1]])
}

#[test]
fn quadrant_from_rays() {
    let c = quadrant();
    let expected = Cone::from_inequalities(&ZMatrix::identity(2), &ZMatrix::empty(2)).unwrap();
    assert_eq!(c.inequalities().height(), 2);
    assert_eq!(c, expected);
    assert_eq!(c.dimension(), 2);
    assert_eq!(c.codimension(), 0);
    assert!(c.is_simplicial());
    assert!(c.contains_positive_vector());
}

#[test]
fn ray_from_inequality_and_equation() {
    let c = Cone::from_inequalities(&m(2, &[&[1, 0]]), &m(2, &[&[0, 1]])).unwrap();
    assert_eq!(c.dimension(), 1);
    assert_eq!(c.lineality_dimension(), 0);
    assert_eq!(c.rays(), m(2, &[&[1, 0]]));
    assert_eq!(c.generators_of_span(), m(2, &[&[1, 0]]));
    assert!(c.contains_relatively(&v(&[3, 0])).unwrap());
    assert!(!c.contains_relatively(&v(&[0, 0])).unwrap());
    assert!(!c.contains_positive_vector());
}

#[test]
fn construction_checks_widths() {
    let err = Cone::from_rays(&m(2, &[&[1, 0]]), &ZMatrix::empty(3)).unwrap_err();
    assert_eq!(
        err,
        ConeError::DimensionMismatch {
            context: "lineality",
            expected: 2,
            found: 3
        }
    );
    assert!(Cone::from_inequalities(&ZMatrix::empty(1), &m(2, &[&[0, 1]])).is_err());
}

#[test]
fn build_dispatches_and_validates() {
    let full = Cone::build(ConeSpec::FullSpace { ambient_dim: 3 }).unwrap();
    assert!(full.is_full_space());
    assert_eq!(full.dimension(), 3);
    assert_eq!(full.lineality_dimension(), 3);
    assert!(full.facets().is_empty());
    assert_eq!(full.inequalities().width(), 3);

    assert!(matches!(
        Cone::build(ConeSpec::FullSpace { ambient_dim: -1 }),
        Err(ConeError::InvalidArgument(_))
    ));
    let bad_hint = Cone::build(ConeSpec::Inequalities {
        inequalities: ZMatrix::identity(2),
        equations: None,
        known: Some(4),
    });
    assert!(matches!(bad_hint, Err(ConeError::InvalidArgument(_))));

    let from_rays_only = Cone::build(ConeSpec::Rays {
        rays: m(2, &[&[1, 0], &[0, 1]]),
        lineality: None,
        known: None,
    })
    .unwrap();
    assert_eq!(from_rays_only, quadrant());
}

#[test]
fn zero_dimensional_ambient_space() {
    let c = Cone::full_space(0);
    assert!(c.is_origin());
    assert!(c.is_full_space());
    assert!(c.contains_positive_vector());
    assert_eq!(c.to_string(), "AMBIENT_DIM\n0\nINEQUALITIES\nEQUATIONS\n");
}

#[test]
fn known_flags_parse() {
    assert_eq!(KnownFlags::from_bits(3).unwrap(), KnownFlags::MINIMAL);
    assert_eq!(
        KnownFlags::LINEAR_PART | KnownFlags::IRREDUNDANT,
        KnownFlags::MINIMAL
    );
    assert!(KnownFlags::MINIMAL.contains(KnownFlags::LINEAR_PART));
    assert!(!KnownFlags::IRREDUNDANT.contains(KnownFlags::LINEAR_PART));
    assert!(KnownFlags::from_bits(-1).is_err());
    assert!(KnownFlags::from_bits(4).is_err());
}

#[test]
fn implied_equations_detect_hidden_degeneracy() {
    let ineqs = m(2, &[&[1, 0], &[-1, 0], &[0, 1]]);
    let c = Cone::from_inequalities(&ineqs, &ZMatrix::empty(2)).unwrap();
    assert_eq!(c.implied_equations(), m(2, &[&[1, 0]]));
    assert_eq!(c.dimension(), 1);

    let declared = Cone::from_inequalities(&ineqs, &m(2, &[&[2, 0]])).unwrap();
    assert!(declared.implied_equations().is_empty());
    let declared_hinted =
        Cone::from_inequalities_with(&ineqs, &m(2, &[&[2, 0]]), KnownFlags::LINEAR_PART).unwrap();
    assert!(declared_hinted.implied_equations().is_empty());

    // The rows hide x = 0, so the claim of complete equations is false.
    let hinted =
        Cone::from_inequalities_with(&ineqs, &ZMatrix::empty(2), KnownFlags::LINEAR_PART).unwrap();
    assert_eq!(hinted.implied_equations(), m(2, &[&[1, 0]]));
    assert_eq!(hinted, c);
}

#[test]
fn minimal_hint_keeps_given_facets() {
    let c = Cone::from_inequalities_with(
        &m(2, &[&[1, 0], &[0, 1]]),
        &ZMatrix::empty(2),
        KnownFlags::MINIMAL,
    )
    .unwrap();
    assert_eq!(c.facets(), m(2, &[&[0, 1], &[1, 0]]));
    assert_eq!(c.rays(), m(2, &[&[0, 1], &[1, 0]]));
    assert_eq!(c, quadrant());
}

#[test]
fn false_minimal_hint_on_inequalities_is_ignored() {
    let hidden = m(2, &[&[1, 0], &[-1, 0]]);
    let plain = Cone::from_inequalities(&hidden, &ZMatrix::empty(2)).unwrap();
    let hinted =
        Cone::from_inequalities_with(&hidden, &ZMatrix::empty(2), KnownFlags::MINIMAL).unwrap();
    assert_eq!(hinted.dimension(), 1);
    assert_eq!(hinted.facets(), plain.facets());
    assert_eq!(hinted, plain);

    let redundant = m(2, &[&[1, 0], &[0, 1], &[1, 1]]);
    let hinted =
        Cone::from_inequalities_with(&redundant, &ZMatrix::empty(2), KnownFlags::MINIMAL).unwrap();
    assert_eq!(hinted.facets(), m(2, &[&[0, 1], &[1, 0]]));
    assert_eq!(hinted, quadrant());
}

#[test]
fn false_minimal_hint_on_rays_is_ignored() {
    let line_and_ray = m(2, &[&[1, 0], &[-1, 0], &[0, 1]]);
    let plain = Cone::from_rays(&line_and_ray, &ZMatrix::empty(2)).unwrap();
    let hinted =
        Cone::from_rays_with(&line_and_ray, &ZMatrix::empty(2), KnownFlags::MINIMAL).unwrap();
    assert_eq!(hinted.lineality_dimension(), 1);
    assert_eq!(hinted.rays(), m(2, &[&[0, 1]]));
    assert_eq!(hinted.lineality_space(), plain.lineality_space());
    assert_eq!(hinted, plain);
    assert_eq!(hinted.dual(), plain.dual());
}

#[test]
fn unique_point_depends_only_on_the_point_set() {
    let from_rays = rays(2, &[&[1, 0], &[1, 2]]);
    let redundant = rays(2, &[&[2, 0], &[1, 2], &[1, 1], &[3, 6]]);
    let from_h = Cone::from_inequalities(&m(2, &[&[0, 1], &[2, -1]]), &ZMatrix::empty(2)).unwrap();
    assert_eq!(from_rays.unique_point(), v(&[2, 2]));
    assert_eq!(redundant.unique_point(), v(&[2, 2]));
    assert_eq!(from_h.unique_point(), v(&[2, 2]));
    // A different witness from the interior point, which is made primitive.
    assert_eq!(from_rays.relative_interior_point(), v(&[1, 1]));
    assert!(from_rays.contains_relatively(&from_rays.unique_point()).unwrap());
}

#[test]
fn display_dump_format() {
    let c = Cone::from_inequalities(&m(2, &[&[1, 0], &[0, 1]]), &m(2, &[&[1, -1]])).unwrap();
    assert_eq!(
        c.to_string(),
        "AMBIENT_DIM\n2\nINEQUALITIES\n1,0,\n0,1\nEQUATIONS\n1,-1\n"
    );
}

#[test]
fn annotations_default_and_copy() {
    let mut c = quadrant();
    assert_eq!(c.multiplicity(), &BigInt::from(1));
    assert!(c.linear_forms().is_empty());
    assert_eq!(c.linear_forms().width(), 2);

    assert!(matches!(
        c.set_multiplicity(-1),
        Err(ConeError::InvalidArgument(_))
    ));
    c.set_multiplicity(5).unwrap();
    c.set_linear_forms(m(2, &[&[1, 1]]));

    let copy = c.clone();
    assert_eq!(copy.multiplicity(), &BigInt::from(5));
    assert_eq!(copy.linear_forms(), &m(2, &[&[1, 1]]));

    // Derived cones start with default annotations.
    let d = c.dual();
    assert_eq!(d.multiplicity(), &BigInt::from(1));
    assert!(d.linear_forms().is_empty());

    c.set_multiplicity(7).unwrap();
    assert_eq!(copy.multiplicity(), &BigInt::from(5));
}

#[test]
fn multiplicity_narrowing() {
    let mut c = quadrant();
    c.set_multiplicity(BigInt::from(1i64 << 40)).unwrap();
    let narrow = c.multiplicity_narrow::<i32>();
    assert_eq!(narrow.value, 0);
    assert!(narrow.overflowed());
    let wide = c.multiplicity_narrow::<i64>();
    assert!(wide.is_clean());
    assert_eq!(wide.value, 1i64 << 40);
}

#[test]
fn ray_overflow_is_flagged_not_fatal() {
    let c = rays(2, &[&[3_000_000_000, 1]]);
    let narrow = c.rays().narrow::<i32>();
    assert_eq!(narrow.value, vec![vec![0, 1]]);
    assert_eq!(
        narrow.warnings,
        vec![ConeWarning::RangeOverflow {
            width: "i32",
            entries: 1
        }]
    );
    assert_eq!(c.rays().narrow::<i64>().value, vec![vec![3_000_000_000, 1]]);
}

#[test]
fn link_keeps_tight_inequalities() {
    let c = quadrant();
    let half_plane = Cone::from_inequalities(&m(2, &[&[0, 1]]), &ZMatrix::empty(2)).unwrap();

    let inside = c.link(&v(&[1, 0])).unwrap();
    assert!(inside.is_clean());
    assert_eq!(inside.value, half_plane);
    assert_eq!(inside.value.lineality_dimension(), 1);

    let outside = c.link(&v(&[-1, 0])).unwrap();
    assert_eq!(
        outside.warnings,
        vec![ConeWarning::ApexOutsideCone { apex: v(&[-1, 0]) }]
    );
    assert_eq!(outside.value, half_plane);

    assert!(matches!(
        c.link(&v(&[1, 0, 0])),
        Err(ConeError::DimensionMismatch { .. })
    ));
}

#[test]
fn faces_of_the_quadrant() {
    let c = quadrant();
    let ray = rays(2, &[&[1, 0]]);
    assert_eq!(c.face_containing(&v(&[5, 0])).unwrap(), ray);
    assert_eq!(c.face_containing(&v(&[1, 2])).unwrap(), c);
    assert!(c.face_containing(&v(&[-1, 0])).is_err());

    assert!(c.has_face(&ray).unwrap());
    assert!(c.has_face(&c).unwrap());
    assert!(c.has_face(&c.lineality_space()).unwrap());
    assert!(!c.has_face(&rays(2, &[&[1, 1]])).unwrap());
    assert!(!c.has_face(&rays(2, &[&[-1, 0]])).unwrap());
    assert!(c.has_face(&full_of(3)).is_err());
}

fn full_of(d: usize) -> Cone {
    Cone::full_space(d)
}

#[test]
fn semigroup_generator() {
    let ray = rays(2, &[&[2, 4]]);
    assert_eq!(ray.semigroup_generator_of_ray().unwrap(), v(&[1, 2]));

    let with_line = Cone::from_rays(&m(3, &[&[1, 0, 0]]), &m(3, &[&[0, 1, 0]])).unwrap();
    assert_eq!(with_line.dimension(), 2);
    assert_eq!(with_line.lineality_dimension(), 1);
    let g = with_line.semigroup_generator_of_ray().unwrap();
    assert!(with_line.contains_point(&g).unwrap());
    assert_eq!(g[0], BigInt::from(1));
    assert_eq!(g[2], BigInt::from(0));

    assert!(matches!(
        quadrant().semigroup_generator_of_ray(),
        Err(ConeError::InvalidState(_))
    ));
}

#[test]
fn quotient_lattice_rank() {
    let c = quadrant();
    assert_eq!(c.quotient_lattice_basis().height(), 2);
    let half_plane = Cone::from_inequalities(&m(2, &[&[1, 0]]), &ZMatrix::empty(2)).unwrap();
    assert_eq!(half_plane.quotient_lattice_basis().height(), 1);
    assert_eq!(half_plane.generators_of_lineality_space(), m(2, &[&[0, 1]]));
    assert!(Cone::full_space(2).quotient_lattice_basis().is_empty());
}

#[test]
fn intersection_is_canonical() {
    let c = quadrant();
    let below_diagonal = Cone::from_inequalities(&m(2, &[&[-1, 1]]), &ZMatrix::empty(2)).unwrap();
    let i = c.intersection(&below_diagonal).unwrap();
    assert_eq!(i.inequalities(), m(2, &[&[-1, 1], &[1, 0]]));
    assert_eq!(i.rays(), m(2, &[&[0, 1], &[1, 1]]));
    assert!(c.intersection(&Cone::full_space(3)).is_err());
}

#[test]
fn canonicalize_drops_redundancy() {
    let mut c = Cone::from_inequalities(
        &m(2, &[&[1, 0], &[2, 0], &[0, 1], &[1, 1]]),
        &ZMatrix::empty(2),
    )
    .unwrap();
    assert_eq!(c.inequalities().height(), 4);
    c.canonicalize();
    assert_eq!(c.inequalities(), m(2, &[&[0, 1], &[1, 0]]));
    assert!(c.equations().is_empty());
}

#[test]
fn dual_and_negation() {
    let c = quadrant();
    assert_eq!(c.dual(), c);
    let half_plane = Cone::from_inequalities(&m(2, &[&[1, 0]]), &ZMatrix::empty(2)).unwrap();
    assert_eq!(half_plane.dual(), rays(2, &[&[1, 0]]));
    assert!(Cone::full_space(2).dual().is_origin());

    let n = c.negated();
    assert!(n.contains_point(&v(&[-1, -2])).unwrap());
    assert!(!n.contains_point(&v(&[1, 0])).unwrap());
    // Negation before and after materialization agree.
    let _ = c.rays();
    assert_eq!(c.negated(), n);
}

#[test]
fn simplicial_and_containment() {
    let square = rays(3, &[&[1, 0, 1], &[0, 1, 1], &[-1, 0, 1], &[0, -1, 1]]);
    assert_eq!(square.dimension(), 3);
    assert_eq!(square.rays().height(), 4);
    assert!(!square.is_simplicial());
    assert!(square.contains(&rays(3, &[&[0, 0, 1]])).unwrap());
    assert!(!square.contains(&rays(3, &[&[1, 1, 1]])).unwrap());
    assert!(square.contains(&rays(2, &[&[1, 0]])).is_err());
    assert!(square.contains_point(&v(&[1, 0])).is_err());
}

#[test]
fn equality_is_point_set_equality() {
    let redundant = rays(2, &[&[1, 0], &[0, 1], &[1, 1], &[3, 0]]);
    assert_eq!(redundant, quadrant());
    assert_ne!(quadrant(), Cone::full_space(2));
    assert_ne!(Cone::full_space(2), Cone::full_space(3));
    let line = Cone::from_rays(&ZMatrix::empty(2), &m(2, &[&[2, 2]])).unwrap();
    let line_again = rays(2, &[&[1, 1], &[-3, -3]]);
    assert_eq!(line, line_again);
}

fn small_rows(width: usize, max_rows: usize) -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(-2i64..=2, width), 0..=max_rows)
}

fn matrix(width: usize, rows: &[Vec<i64>]) -> ZMatrix {
    let rows: Vec<ZVector> = rows.iter().map(|r| ZVector::from_i64(r)).collect();
    ZMatrix::from_rows(width, &rows).unwrap()
}

fn v_cone() -> impl Strategy<Value = (Vec<Vec<i64>>, Vec<Vec<i64>>)> {
    (small_rows(3, 5), small_rows(3, 1))
}

fn h_cone() -> impl Strategy<Value = Cone> {
    (small_rows(3, 5), small_rows(3, 1)).prop_map(|(a, e)| {
        Cone::from_inequalities(&matrix(3, &a), &matrix(3, &e)).unwrap()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn dual_is_an_involution((r, l) in v_cone()) {
        let c = Cone::from_rays(&matrix(3, &r), &matrix(3, &l)).unwrap();
        prop_assert_eq!(c.dual().dual(), c);
    }

    #[test]
    fn generators_are_contained((r, l) in v_cone()) {
        let c = Cone::from_rays(&matrix(3, &r), &matrix(3, &l)).unwrap();
        prop_assert!(c.contains(&c).unwrap());
        for row in &r {
            prop_assert!(c.contains_point(&ZVector::from_i64(row)).unwrap());
        }
        for row in &l {
            let p = ZVector::from_i64(row);
            prop_assert!(c.contains_point(&p).unwrap());
            prop_assert!(c.contains_point(&-p).unwrap());
        }
    }

    #[test]
    fn both_representations_agree(c in h_cone()) {
        let again = Cone::from_rays(&c.rays(), &c.generators_of_lineality_space()).unwrap();
        prop_assert_eq!(&again, &c);
        let from_h = Cone::from_inequalities(&again.inequalities(), &again.equations()).unwrap();
        prop_assert_eq!(from_h, c);
    }

    #[test]
    fn intersection_laws(a in h_cone(), b in h_cone()) {
        let ab = a.intersection(&b).unwrap();
        prop_assert!(a.contains(&ab).unwrap());
        prop_assert!(b.contains(&ab).unwrap());
        prop_assert_eq!(&ab, &b.intersection(&a).unwrap());
        prop_assert_eq!(a.intersection(&Cone::full_space(3)).unwrap(), a);
    }

    #[test]
    fn dimensions_are_consistent(c in h_cone()) {
        prop_assert_eq!(c.is_origin(), c.dimension() == 0);
        prop_assert_eq!(c.dimension() + c.codimension(), 3);
        prop_assert!(c.lineality_dimension() <= c.dimension());
        prop_assert_eq!(
            c.quotient_lattice_basis().height(),
            c.dimension() - c.lineality_dimension()
        );
        prop_assert_eq!(c.generators_of_span().height(), c.dimension());
    }

    #[test]
    fn faces_of_itself(c in h_cone()) {
        prop_assert!(c.has_face(&c).unwrap());
        prop_assert!(c.has_face(&c.lineality_space()).unwrap());
        prop_assert!(c.contains_relatively(&c.relative_interior_point()).unwrap());
    }
}
