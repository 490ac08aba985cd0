//! Two-state cell holding one capability value.

/// A capability slot: either never advertised, or holding a validated value.
///
/// `Unset` is distinct from a validated empty value such as an empty
/// `CHANTYPES` or an unlimited `KICKLEN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Field<T> {
    /// Not advertised (or withdrawn).
    Unset,
    /// Advertised and accepted.
    Validated(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Unset
    }
}

impl<T> Field<T> {
    /// Returns true if a validated value is present.
    #[inline]
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Validated(_))
    }

    /// The validated value, if any.
    #[inline]
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Validated(v) => Some(v),
            Self::Unset => None,
        }
    }

    /// Borrow the contents.
    pub fn as_ref(&self) -> Field<&T> {
        match self {
            Self::Validated(v) => Field::Validated(v),
            Self::Unset => Field::Unset,
        }
    }

    /// Map the validated value, keeping `Unset` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Self::Validated(v) => Field::Validated(f(v)),
            Self::Unset => Field::Unset,
        }
    }

    /// Convert into an `Option`, dropping the distinction's name.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Validated(v) => Some(v),
            Self::Unset => None,
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Self::Validated(v),
            None => Self::Unset,
        }
    }
}
