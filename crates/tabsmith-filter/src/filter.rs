//! Named content filters.
//!
//! A [`Filter`] rewrites a whole content buffer. Build pipelines refer to
//! filters by identifier through a [`FilterRegistry`](crate::FilterRegistry).

use std::collections::BTreeMap;

use crate::FilterError;
use crate::transformer::{MismatchPolicy, TabTransformer};

/// Identifier of the Bootstrap tab filter.
pub const BOOTSTRAP_TAB: &str = "bootstrap_tab";

/// A named content filter.
///
/// Filters are shared across documents, so they take `&self` and must be
/// `Send + Sync`.
///
/// # Example
///
/// ```
/// use tabsmith_filter::{Filter, FilterError, FilterParams};
///
/// struct Upcase;
///
/// impl Filter for Upcase {
///     fn identifier(&self) -> &str { "upcase" }
///
///     fn run(&self, content: &str, _params: &FilterParams) -> Result<String, FilterError> {
///         Ok(content.to_uppercase())
///     }
/// }
///
/// let out = Upcase.run("abc", &FilterParams::new()).unwrap();
/// assert_eq!(out, "ABC");
/// ```
pub trait Filter: Send + Sync {
    /// Identifier used to select the filter (e.g., `bootstrap_tab`).
    fn identifier(&self) -> &str;

    /// Filter a content buffer.
    ///
    /// # Errors
    ///
    /// Returns a [`FilterError`] if the content cannot be filtered.
    fn run(&self, content: &str, params: &FilterParams) -> Result<String, FilterError>;
}

/// Options passed to a single filter invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterParams {
    values: BTreeMap<String, String>,
}

impl FilterParams {
    /// Create empty parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parameter keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Filter that rewrites tab-block markup into Bootstrap tabs.
///
/// Registered as [`BOOTSTRAP_TAB`]. It recognizes no parameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct BootstrapTabFilter {
    transformer: TabTransformer,
}

impl BootstrapTabFilter {
    /// Create a filter with the strict mismatch policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mismatch policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MismatchPolicy) -> Self {
        self.transformer = self.transformer.with_policy(policy);
        self
    }

    /// Current mismatch policy.
    #[must_use]
    pub fn policy(&self) -> MismatchPolicy {
        self.transformer.policy()
    }
}

impl Filter for BootstrapTabFilter {
    fn identifier(&self) -> &str {
        BOOTSTRAP_TAB
    }

    fn run(&self, content: &str, params: &FilterParams) -> Result<String, FilterError> {
        if !params.is_empty() {
            tracing::debug!(
                keys = ?params.keys().collect::<Vec<_>>(),
                "{BOOTSTRAP_TAB} ignores filter parameters"
            );
        }
        self.transformer.transform(content)
    }
}
