//! Error and warning types shared by the cone core.
//!
//! Policy
//! - `ConeError` aborts the current call only. Every participating `Cone`
//!   stays valid and reusable afterwards.
//! - `ConeWarning` never aborts. It travels next to a (possibly degraded)
//!   result inside `Flagged<T>` and is logged where it is detected.

use crate::zmatrix::ZVector;

/// Result type for cone operations.
pub type Result<T> = std::result::Result<T, ConeError>;

/// Fatal outcomes of a cone operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConeError {
    /// Operand dimensions or lengths disagree.
    #[error("{context}: expected dimension {expected} but got {found}")]
    DimensionMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// A scalar parameter lies outside its valid domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A precondition for a derived quantity is not met by the cone.
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl ConeError {
    pub(crate) fn mismatch(context: &'static str, expected: usize, found: usize) -> Self {
        Self::DimensionMismatch {
            context,
            expected,
            found,
        }
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument(reason.into())
    }

    pub(crate) fn state(reason: impl Into<String>) -> Self {
        Self::InvalidState(reason.into())
    }
}

/// Non-fatal conditions reported alongside a result.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConeWarning {
    /// Some entries did not fit the requested machine width; each was replaced by 0.
    #[error("overflow while narrowing to {width}: {entries} entries replaced by 0")]
    RangeOverflow { width: &'static str, entries: usize },

    /// The apex handed to `link` does not lie in the cone.
    #[error("the apex {apex} does not lie in the cone")]
    ApexOutsideCone { apex: ZVector },
}

/// A value together with the non-fatal warnings raised while producing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Flagged<T> {
    pub value: T,
    pub warnings: Vec<ConeWarning>,
}

impl<T> Flagged<T> {
    /// Wrap a value that raised no warnings.
    #[inline]
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// True if any entry was replaced by the narrowing sentinel.
    pub fn overflowed(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, ConeWarning::RangeOverflow { .. }))
    }

    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }

    /// Transform the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Flagged<U> {
        Flagged {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}
