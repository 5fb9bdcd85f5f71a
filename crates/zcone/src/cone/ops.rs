//! Derived cones and points. Every result is a fresh cone with default annotations.

use num_traits::Zero;

use crate::error::{ConeError, ConeWarning, Flagged, Result};
use crate::hull::{orient_into, quotient_lattice_basis};
use crate::zmatrix::ZVector;

use super::types::{slot, Cone, HRep, KnownFlags, VRep};

fn negate_all(rows: &[ZVector]) -> Vec<ZVector> {
    rows.iter().map(|r| -r).collect()
}

fn sum(width: usize, rows: &[ZVector]) -> ZVector {
    rows.iter().fold(ZVector::zeros(width), |acc, r| acc.add(r))
}

impl Cone {
    fn derived(&self, v: Option<VRep>, h: Option<HRep>) -> Cone {
        Cone::with_slots(self.ambient_dim, v, h)
    }

    /// `{y : y·x >= 0 for all x in self}`.
    pub fn dual(&self) -> Cone {
        let v = self.h.get().map(|h| VRep {
            rays: h.inequalities.clone(),
            lineality: h.equations.clone(),
            known: h.known,
        });
        let h = self.v.get().map(|v| HRep {
            inequalities: v.rays.clone(),
            equations: v.lineality.clone(),
            known: v.known,
        });
        let mut out = self.derived(v, h);
        out.minimal = slot(self.minimal.get().map(|m| m.dual()));
        out
    }

    /// `{-x : x in self}`.
    pub fn negated(&self) -> Cone {
        let v = self.v.get().map(|v| VRep {
            rays: negate_all(&v.rays),
            lineality: v.lineality.clone(),
            known: v.known,
        });
        let h = self.h.get().map(|h| HRep {
            inequalities: negate_all(&h.inequalities),
            equations: h.equations.clone(),
            known: h.known,
        });
        let mut out = self.derived(v, h);
        out.minimal = slot(self.minimal.get().map(|m| m.negated(self.ambient_dim)));
        out
    }

    /// Largest linear subspace contained in the cone, with no inequalities.
    pub fn lineality_space(&self) -> Cone {
        match self.h.get() {
            // x and -x satisfy a·x >= 0 only if a·x = 0.
            Some(h) => {
                let mut equations = h.inequalities.clone();
                equations.extend(h.equations.iter().cloned());
                self.derived(
                    None,
                    Some(HRep {
                        inequalities: Vec::new(),
                        equations,
                        known: KnownFlags::MINIMAL,
                    }),
                )
            }
            None => self.derived(
                Some(VRep {
                    rays: Vec::new(),
                    lineality: self.minimal().lineality.clone(),
                    known: KnownFlags::MINIMAL,
                }),
                None,
            ),
        }
    }

    /// Pooled constraints of both cones, canonicalized.
    pub fn intersection(&self, other: &Cone) -> Result<Cone> {
        self.check_cone("intersected cone", other)?;
        Ok(self.intersect_unchecked(other))
    }

    pub(crate) fn intersect_unchecked(&self, other: &Cone) -> Cone {
        let (a, b) = (self.h_rep(), other.h_rep());
        let mut inequalities = a.inequalities.clone();
        inequalities.extend(b.inequalities.iter().cloned());
        let mut equations = a.equations.clone();
        equations.extend(b.equations.iter().cloned());
        let mut out = self.derived(
            None,
            Some(HRep {
                inequalities,
                equations,
                known: KnownFlags::NONE,
            }),
        );
        out.canonicalize();
        out
    }

    /// Cone of feasible directions at `apex`: the inequalities tight at `apex`.
    ///
    /// An apex outside the cone is reported as `ApexOutsideCone` and the
    /// construction proceeds on the same rule.
    pub fn link(&self, apex: &ZVector) -> Result<Flagged<Cone>> {
        let inside = self.contains_point(apex)?;
        let h = self.h_rep();
        let inequalities: Vec<ZVector> = h
            .inequalities
            .iter()
            .filter(|a| a.dot(apex).is_zero())
            .cloned()
            .collect();
        let known = if inside { h.known } else { KnownFlags::NONE };
        let cone = self.derived(
            None,
            Some(HRep {
                inequalities,
                equations: h.equations.clone(),
                known,
            }),
        );
        if inside {
            return Ok(Flagged::clean(cone));
        }
        tracing::warn!(%apex, "link apex does not lie in the cone");
        Ok(Flagged {
            value: cone,
            warnings: vec![ConeWarning::ApexOutsideCone { apex: apex.clone() }],
        })
    }

    /// Smallest face containing `p`: the facets tight at `p` become equations.
    pub fn face_containing(&self, p: &ZVector) -> Result<Cone> {
        if !self.contains_point(p)? {
            return Err(ConeError::invalid(format!("the point {p} does not lie in the cone")));
        }
        let m = self.minimal();
        let (tight, loose): (Vec<ZVector>, Vec<ZVector>) =
            m.facets.iter().cloned().partition(|f| f.dot(p).is_zero());
        let mut equations = m.equations.clone();
        equations.extend(tight);
        Ok(self.derived(
            None,
            Some(HRep {
                inequalities: loose,
                equations,
                known: KnownFlags::NONE,
            }),
        ))
    }

    /// `candidate` is a face: it lies in `self` and equals the smallest face
    /// containing its relative interior point.
    pub fn has_face(&self, candidate: &Cone) -> Result<bool> {
        if !self.contains(candidate)? {
            return Ok(false);
        }
        let face = self.face_containing(&candidate.relative_interior_point())?;
        Ok(face == *candidate)
    }

    /// A point in the relative interior (primitive sum of the extreme rays).
    pub fn relative_interior_point(&self) -> ZVector {
        sum(self.ambient_dim, &self.minimal().rays).primitive()
    }

    /// Deterministic witness point depending only on the point set.
    pub fn unique_point(&self) -> ZVector {
        sum(self.ambient_dim, &self.minimal().rays)
    }

    /// Primitive generator of the single ray of a cone with `dim = lineality_dim + 1`.
    pub fn semigroup_generator_of_ray(&self) -> Result<ZVector> {
        let (dim, lin) = (self.dimension(), self.lineality_dimension());
        if dim != lin + 1 {
            return Err(ConeError::state(format!(
                "expected the dimension to exceed the lineality dimension by one, \
                 got {dim} and {lin}"
            )));
        }
        let m = self.minimal();
        let basis = quotient_lattice_basis(self.ambient_dim, &m.equations, &m.facets);
        let generator = basis
            .into_iter()
            .next()
            .ok_or_else(|| ConeError::state("empty quotient lattice"))?;
        Ok(orient_into(&m.facets, generator))
    }
}

/// Same ambient dimension and same point set. Annotations are ignored.
impl PartialEq for Cone {
    fn eq(&self, other: &Self) -> bool {
        self.ambient_dim == other.ambient_dim && self.minimal() == other.minimal()
    }
}

impl Eq for Cone {}
