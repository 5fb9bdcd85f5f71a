//! Exact rational polyhedral cones.
//!
//! A `Cone` is given by rays (V-representation) or by inequalities and equations
//! (H-representation). The other representation, the facets, the extreme rays and
//! the lattice data are computed on demand by the hull engine and cached.
//!
//! API Policy
//! - `api` and `prelude` are the curated surfaces; module paths may move.
//! - Fatal outcomes are `ConeError`; non-fatal ones ride along in `Flagged<T>`.

pub mod api;
pub mod cone;
pub mod error;
mod hull;
mod linalg;
pub mod sample;
pub mod zmatrix;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cone::{Cone, ConeSpec, KnownFlags};
pub use error::{ConeError, ConeWarning, Flagged, Result};
pub use zmatrix::{MachineInt, ZMatrix, ZVector};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cone::{Cone, ConeSpec, KnownFlags};
    pub use crate::error::{ConeError, ConeWarning, Flagged};
    pub use crate::sample::{ConeGenerator, SeedReplay};
    pub use crate::zmatrix::{MachineInt, ZMatrix, ZVector};
    pub use num_bigint::BigInt;
}
