//! Optional identities for partially known resolution contexts.

/// An identity that is either known or not yet available.
///
/// Validation can run before an index exists (and sometimes before the table
/// metadata is at hand). Checks that depend on an `Unknown` identity are
/// skipped rather than failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity<T> {
    /// The identity is available.
    Known(T),
    /// The identity is not available at this stage.
    Unknown,
}

impl<T> Identity<T> {
    /// Borrow the identity.
    pub const fn as_ref(&self) -> Identity<&T> {
        match self {
            Self::Known(value) => Identity::Known(value),
            Self::Unknown => Identity::Unknown,
        }
    }

    /// Return the known value, if any.
    pub fn known(self) -> Option<T> {
        match self {
            Self::Known(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// Returns true when the identity is available.
    pub const fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl<T> From<Option<T>> for Identity<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unknown, Self::Known)
    }
}
