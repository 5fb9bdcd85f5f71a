use num_traits::{Signed, Zero};

use crate::error::{ConeError, Result};
use crate::hull::{linear_part_holds, quotient_lattice_basis};
use crate::linalg::Echelon;
use crate::zmatrix::{ZMatrix, ZVector};

use super::types::{Cone, HRep, KnownFlags};

fn satisfies(h: &HRep, p: &ZVector) -> bool {
    h.inequalities.iter().all(|a| !a.dot(p).is_negative())
        && h.equations.iter().all(|e| e.dot(p).is_zero())
}

impl Cone {
    #[inline]
    pub fn ambient_dimension(&self) -> usize {
        self.ambient_dim
    }

    /// Dimension of the linear span.
    pub fn dimension(&self) -> usize {
        self.minimal().dimension(self.ambient_dim)
    }

    pub fn codimension(&self) -> usize {
        self.ambient_dim - self.dimension()
    }

    pub fn lineality_dimension(&self) -> usize {
        self.minimal().lineality.len()
    }

    fn matrix(&self, rows: &[ZVector]) -> ZMatrix {
        ZMatrix::from_rows_unchecked(self.ambient_dim, rows)
    }

    pub(crate) fn check_point(&self, context: &'static str, p: &ZVector) -> Result<()> {
        if p.len() != self.ambient_dim {
            return Err(ConeError::mismatch(context, self.ambient_dim, p.len()));
        }
        Ok(())
    }

    pub(crate) fn check_cone(&self, context: &'static str, other: &Cone) -> Result<()> {
        if other.ambient_dim != self.ambient_dim {
            return Err(ConeError::mismatch(context, self.ambient_dim, other.ambient_dim));
        }
        Ok(())
    }

    /// Inequalities of the H-representation, as given or as computed.
    pub fn inequalities(&self) -> ZMatrix {
        self.matrix(&self.h_rep().inequalities)
    }

    /// Equations of the H-representation, as given or as computed.
    pub fn equations(&self) -> ZMatrix {
        self.matrix(&self.h_rep().equations)
    }

    /// Irredundant inequalities, one per facet, in normal form.
    pub fn facets(&self) -> ZMatrix {
        self.matrix(&self.minimal().facets)
    }

    /// Extreme rays modulo the lineality space, in normal form.
    pub fn rays(&self) -> ZMatrix {
        self.matrix(&self.minimal().rays)
    }

    /// Equations valid on the cone that do not follow from `equations()`.
    pub fn implied_equations(&self) -> ZMatrix {
        let h = self.h_rep();
        if h.known.contains(KnownFlags::LINEAR_PART) {
            // The claim must agree with the generators.
            let v = self.v_rep();
            if linear_part_holds(self.ambient_dim, &h.equations, &v.rays, &v.lineality) {
                return ZMatrix::empty(self.ambient_dim);
            }
        }
        let declared = Echelon::new(self.ambient_dim, &h.equations);
        let extra: Vec<ZVector> = self
            .minimal()
            .equations
            .iter()
            .map(|e| declared.reduce(e))
            .collect();
        self.matrix(Echelon::new(self.ambient_dim, &extra).rows())
    }

    /// Basis of the linear span.
    pub fn generators_of_span(&self) -> ZMatrix {
        let m = self.minimal();
        let mut gens = m.rays.clone();
        gens.extend(m.lineality.iter().cloned());
        self.matrix(Echelon::new(self.ambient_dim, &gens).rows())
    }

    /// Basis of the lineality space.
    pub fn generators_of_lineality_space(&self) -> ZMatrix {
        self.matrix(&self.minimal().lineality)
    }

    /// Lattice basis of `(Z^d ∩ span) / (Z^d ∩ lineality)`.
    ///
    /// Has `dimension - lineality_dimension` rows.
    pub fn quotient_lattice_basis(&self) -> ZMatrix {
        let m = self.minimal();
        self.matrix(&quotient_lattice_basis(self.ambient_dim, &m.equations, &m.facets))
    }

    /// The cone is `{0}`.
    pub fn is_origin(&self) -> bool {
        self.dimension() == 0
    }

    pub fn is_full_space(&self) -> bool {
        self.lineality_dimension() == self.ambient_dim
    }

    /// As many extreme rays as the dimension of the pointed part.
    pub fn is_simplicial(&self) -> bool {
        self.minimal().rays.len() == self.dimension() - self.lineality_dimension()
    }

    pub fn contains_point(&self, p: &ZVector) -> Result<bool> {
        self.check_point("point", p)?;
        Ok(satisfies(self.h_rep(), p))
    }

    /// `p` lies in the relative interior.
    pub fn contains_relatively(&self, p: &ZVector) -> Result<bool> {
        self.check_point("point", p)?;
        let m = self.minimal();
        Ok(m.equations.iter().all(|e| e.dot(p).is_zero())
            && m.facets.iter().all(|f| f.dot(p).is_positive()))
    }

    /// Every point of `other` lies in `self`.
    pub fn contains(&self, other: &Cone) -> Result<bool> {
        self.check_cone("contained cone", other)?;
        let h = self.h_rep();
        let v = other.v_rep();
        Ok(v.rays.iter().all(|r| satisfies(h, r))
            && v.lineality
                .iter()
                .all(|l| satisfies(h, l) && satisfies(h, &-l)))
    }

    /// Some point of the relative interior has all coordinates positive.
    pub fn contains_positive_vector(&self) -> bool {
        let d = self.ambient_dim;
        let orthant = Cone::with_h(
            d,
            HRep {
                inequalities: ZMatrix::identity(d).rows(),
                equations: Vec::new(),
                known: KnownFlags::MINIMAL,
            },
        );
        // Positive points are open in C ∩ R^d_{>=0}, so they exist iff its relative
        // interior point is positive.
        self.intersect_unchecked(&orthant)
            .relative_interior_point()
            .is_positive()
    }
}
