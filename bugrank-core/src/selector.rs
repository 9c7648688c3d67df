//! Optional value sets used to filter datasets.

use std::collections::BTreeSet;

/// Filter applied to one column of a dataset.
///
/// `All` means no filtering. `Only` admits values contained in the set; an
/// empty set admits nothing, which keeps "no selector" and "select nothing"
/// distinct.
///
/// # Examples
///
/// ```
/// use bugrank_core::Selector;
///
/// let devices = Selector::case_folded(["iPhone 5"]);
/// assert!(devices.admits_folded("IPHONE 5"));
/// assert!(!devices.admits_folded("Galaxy S3"));
///
/// assert!(Selector::All.admits("anything"));
/// assert!(!Selector::none().admits("anything"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selector {
    /// Admit every value.
    #[default]
    All,
    /// Admit only the listed values.
    Only(BTreeSet<String>),
}

impl Selector {
    /// Admit exactly the given values, compared verbatim.
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Only(values.into_iter().map(Into::into).collect())
    }

    /// Admit the given values after lower-casing them.
    ///
    /// Pair with [`Selector::admits_folded`] for case-insensitive matching.
    pub fn case_folded<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Only(
            values
                .into_iter()
                .map(|value| value.as_ref().to_lowercase())
                .collect(),
        )
    }

    /// A selector that admits nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self::Only(BTreeSet::new())
    }

    /// Whether this selector filters nothing out.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether `value` passes the filter, compared verbatim.
    #[must_use]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(values) => values.contains(value),
        }
    }

    /// Whether `value`, lower-cased, passes the filter.
    #[must_use]
    pub fn admits_folded(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(values) => values.contains(&value.to_lowercase()),
        }
    }

    /// Number of admitted values, or `None` for [`Selector::All`].
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::All => None,
            Self::Only(values) => Some(values.len()),
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Selector {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::only(iter)
    }
}
