use std::cell::OnceCell;
use std::ops::BitOr;

use num_bigint::BigInt;
use num_traits::{One, Signed};

use crate::error::{ConeError, Flagged, Result};
use crate::hull::{generators_from_constraints, Minimal};
use crate::zmatrix::{narrow_scalar, MachineInt, ZMatrix, ZVector};

/// Hint bits handed to a constructor about the given representation.
///
/// For inequalities: `LINEAR_PART` means the equations are complete (no implied
/// equations hide in the inequalities), `IRREDUNDANT` means every inequality is a
/// distinct facet. For rays: `LINEAR_PART` means the lineality rows span the whole
/// lineality space, `IRREDUNDANT` means every ray is a distinct extreme ray.
///
/// The hint never changes the point set; it only lets queries skip hull work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KnownFlags(u8);

impl KnownFlags {
    pub const NONE: Self = Self(0);
    pub const LINEAR_PART: Self = Self(1);
    pub const IRREDUNDANT: Self = Self(2);
    /// Both bits: the representation is already minimal.
    pub const MINIMAL: Self = Self(3);

    /// Parse the integer form; valid values are `0..=3`.
    pub fn from_bits(bits: i64) -> Result<Self> {
        match u8::try_from(bits) {
            Ok(b) if b <= 3 => Ok(Self(b)),
            _ => Err(ConeError::invalid(format!(
                "known flags must lie in 0..=3, got {bits}"
            ))),
        }
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for KnownFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// `cone(rays) + span(lineality)`.
#[derive(Clone, Debug)]
pub(crate) struct VRep {
    pub rays: Vec<ZVector>,
    pub lineality: Vec<ZVector>,
    pub known: KnownFlags,
}

/// `{x : a·x >= 0 (a in inequalities), e·x = 0 (e in equations)}`.
#[derive(Clone, Debug)]
pub(crate) struct HRep {
    pub inequalities: Vec<ZVector>,
    pub equations: Vec<ZVector>,
    pub known: KnownFlags,
}

/// How to build a cone. Optional parts default to empty matrices of the leading
/// matrix's width and to no hint.
#[derive(Clone, Debug)]
pub enum ConeSpec {
    Rays {
        rays: ZMatrix,
        lineality: Option<ZMatrix>,
        known: Option<i64>,
    },
    Inequalities {
        inequalities: ZMatrix,
        equations: Option<ZMatrix>,
        known: Option<i64>,
    },
    /// All of `R^ambient_dim`.
    FullSpace { ambient_dim: i64 },
}

/// Rational polyhedral cone in `R^d`.
///
/// Invariants:
/// - At least one of the `v`, `h` slots is filled from construction on.
/// - Once both slots are filled they describe the same point set.
/// - `minimal`, once filled, is the normal form of that point set.
/// - `multiplicity >= 0`; annotations are never checked against the geometry.
#[derive(Clone, Debug)]
pub struct Cone {
    pub(crate) ambient_dim: usize,
    pub(crate) v: OnceCell<VRep>,
    pub(crate) h: OnceCell<HRep>,
    pub(crate) minimal: OnceCell<Minimal>,
    pub(crate) multiplicity: BigInt,
    pub(crate) linear_forms: ZMatrix,
}

/// A cell that starts present when `value` is `Some`.
pub(crate) fn slot<T>(value: Option<T>) -> OnceCell<T> {
    match value {
        Some(v) => OnceCell::from(v),
        None => OnceCell::new(),
    }
}

impl Cone {
    /// Dispatch on the construction mode.
    pub fn build(spec: ConeSpec) -> Result<Self> {
        match spec {
            ConeSpec::Rays {
                rays,
                lineality,
                known,
            } => {
                let lineality = lineality.unwrap_or_else(|| ZMatrix::empty(rays.width()));
                let known = known.map(KnownFlags::from_bits).transpose()?;
                Self::from_rays_with(&rays, &lineality, known.unwrap_or_default())
            }
            ConeSpec::Inequalities {
                inequalities,
                equations,
                known,
            } => {
                let equations = equations.unwrap_or_else(|| ZMatrix::empty(inequalities.width()));
                let known = known.map(KnownFlags::from_bits).transpose()?;
                Self::from_inequalities_with(&inequalities, &equations, known.unwrap_or_default())
            }
            ConeSpec::FullSpace { ambient_dim } => {
                let d = usize::try_from(ambient_dim).map_err(|_| {
                    ConeError::invalid(format!(
                        "expected an ambient dimension >= 0, got {ambient_dim}"
                    ))
                })?;
                Ok(Self::full_space(d))
            }
        }
    }

    /// `cone(rays) + span(lineality)`.
    pub fn from_rays(rays: &ZMatrix, lineality: &ZMatrix) -> Result<Self> {
        Self::from_rays_with(rays, lineality, KnownFlags::NONE)
    }

    pub fn from_rays_with(rays: &ZMatrix, lineality: &ZMatrix, known: KnownFlags) -> Result<Self> {
        if rays.width() != lineality.width() {
            return Err(ConeError::mismatch("lineality", rays.width(), lineality.width()));
        }
        Ok(Self::with_v(
            rays.width(),
            VRep {
                rays: rays.rows(),
                lineality: lineality.rows(),
                known,
            },
        ))
    }

    /// `{x : inequalities·x >= 0, equations·x = 0}`.
    pub fn from_inequalities(inequalities: &ZMatrix, equations: &ZMatrix) -> Result<Self> {
        Self::from_inequalities_with(inequalities, equations, KnownFlags::NONE)
    }

    pub fn from_inequalities_with(
        inequalities: &ZMatrix,
        equations: &ZMatrix,
        known: KnownFlags,
    ) -> Result<Self> {
        if inequalities.width() != equations.width() {
            return Err(ConeError::mismatch(
                "equations",
                inequalities.width(),
                equations.width(),
            ));
        }
        Ok(Self::with_h(
            inequalities.width(),
            HRep {
                inequalities: inequalities.rows(),
                equations: equations.rows(),
                known,
            },
        ))
    }

    /// All of `R^ambient_dim`.
    pub fn full_space(ambient_dim: usize) -> Self {
        Self::with_h(
            ambient_dim,
            HRep {
                inequalities: Vec::new(),
                equations: Vec::new(),
                known: KnownFlags::MINIMAL,
            },
        )
    }

    pub(crate) fn with_v(ambient_dim: usize, v: VRep) -> Self {
        Self::with_slots(ambient_dim, Some(v), None)
    }

    pub(crate) fn with_h(ambient_dim: usize, h: HRep) -> Self {
        Self::with_slots(ambient_dim, None, Some(h))
    }

    /// Fresh cone with default annotations. At least one slot must be `Some`.
    pub(crate) fn with_slots(ambient_dim: usize, v: Option<VRep>, h: Option<HRep>) -> Self {
        debug_assert!(v.is_some() || h.is_some());
        Self {
            ambient_dim,
            v: slot(v),
            h: slot(h),
            minimal: OnceCell::new(),
            multiplicity: BigInt::one(),
            linear_forms: ZMatrix::empty(ambient_dim),
        }
    }

    /// V-representation; computed from H on first use.
    pub(crate) fn v_rep(&self) -> &VRep {
        match (self.v.get(), self.h.get()) {
            (Some(v), _) => v,
            (None, Some(h)) => self.v.get_or_init(|| {
                let g =
                    generators_from_constraints(self.ambient_dim, &h.inequalities, &h.equations);
                tracing::debug!(
                    rays = g.rays.len(),
                    lineality = g.lineality.len(),
                    "materialized V-representation"
                );
                VRep {
                    rays: g.rays,
                    lineality: g.lineality,
                    known: KnownFlags::MINIMAL,
                }
            }),
            (None, None) => unreachable!("cone without a representation"),
        }
    }

    /// H-representation; computed from V on first use.
    pub(crate) fn h_rep(&self) -> &HRep {
        match (self.v.get(), self.h.get()) {
            (_, Some(h)) => h,
            (Some(v), None) => self.h.get_or_init(|| {
                // Facets of cone(R) + span(L) are extreme rays of {a : a·R >= 0, a·L = 0}.
                let g = generators_from_constraints(self.ambient_dim, &v.rays, &v.lineality);
                tracing::debug!(
                    facets = g.rays.len(),
                    equations = g.lineality.len(),
                    "materialized H-representation"
                );
                HRep {
                    inequalities: g.rays,
                    equations: g.lineality,
                    known: KnownFlags::MINIMAL,
                }
            }),
            (None, None) => unreachable!("cone without a representation"),
        }
    }

    /// Normal form of the point set.
    pub(crate) fn minimal(&self) -> &Minimal {
        self.minimal.get_or_init(|| {
            let d = self.ambient_dim;
            let m = match (self.v.get(), self.h.get()) {
                (_, Some(h)) if h.known == KnownFlags::MINIMAL => {
                    Minimal::from_facets(d, &h.inequalities, &h.equations)
                }
                (Some(v), _) if v.known == KnownFlags::MINIMAL => {
                    Minimal::from_extreme_rays(d, &v.rays, &v.lineality)
                }
                (Some(v), _) => Minimal::from_generators(d, &v.rays, &v.lineality),
                (None, Some(h)) => Minimal::from_constraints(d, &h.inequalities, &h.equations),
                (None, None) => unreachable!("cone without a representation"),
            };
            tracing::debug!(
                facets = m.facets.len(),
                rays = m.rays.len(),
                dimension = m.dimension(d),
                "computed normal form"
            );
            m
        })
    }

    /// Replace the H-representation by the minimal one (facets, canonical equations).
    ///
    /// The point set is unchanged, so cached V data stays valid.
    pub fn canonicalize(&mut self) {
        let m = self.minimal();
        let h = HRep {
            inequalities: m.facets.clone(),
            equations: m.equations.clone(),
            known: KnownFlags::MINIMAL,
        };
        self.h = OnceCell::from(h);
    }

    /// Opaque weight annotation (default 1).
    #[inline]
    pub fn multiplicity(&self) -> &BigInt {
        &self.multiplicity
    }

    /// Multiplicity as a machine integer; 0 plus a `RangeOverflow` warning if it does not fit.
    pub fn multiplicity_narrow<T: MachineInt>(&self) -> Flagged<T> {
        narrow_scalar(&self.multiplicity)
    }

    pub fn set_multiplicity(&mut self, value: impl Into<BigInt>) -> Result<()> {
        let value = value.into();
        if value.is_negative() {
            return Err(ConeError::invalid(format!(
                "multiplicity must be nonnegative, got {value}"
            )));
        }
        self.multiplicity = value;
        Ok(())
    }

    /// Opaque linear forms annotation (default: no rows), stored verbatim.
    #[inline]
    pub fn linear_forms(&self) -> &ZMatrix {
        &self.linear_forms
    }

    pub fn set_linear_forms(&mut self, forms: ZMatrix) {
        self.linear_forms = forms;
    }
}
