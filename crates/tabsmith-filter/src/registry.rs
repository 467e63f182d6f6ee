//! Filter lookup by identifier.

use std::collections::HashMap;

use crate::filter::{BootstrapTabFilter, Filter};

/// Registry of named filters.
///
/// # Example
///
/// ```
/// use tabsmith_filter::FilterRegistry;
///
/// let registry = FilterRegistry::with_defaults();
/// assert!(registry.get("bootstrap_tab").is_some());
/// assert_eq!(registry.identifiers(), vec!["bootstrap_tab"]);
/// ```
#[derive(Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Box<dyn Filter>>,
}

impl FilterRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in filters.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new().with_filter(BootstrapTabFilter::new())
    }

    /// Register a filter (builder form).
    #[must_use]
    pub fn with_filter<F: Filter + 'static>(mut self, filter: F) -> Self {
        self.register(filter);
        self
    }

    /// Register a filter under its identifier.
    ///
    /// Returns the filter previously registered under the same identifier.
    pub fn register<F: Filter + 'static>(&mut self, filter: F) -> Option<Box<dyn Filter>> {
        let identifier = filter.identifier().to_owned();
        tracing::debug!(filter = %identifier, "Registered filter");
        self.filters.insert(identifier, Box::new(filter))
    }

    /// Look up a filter by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&dyn Filter> {
        self.filters.get(identifier).map(Box::as_ref)
    }

    /// Whether a filter is registered under `identifier`.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.filters.contains_key(identifier)
    }

    /// Registered identifiers in sorted order.
    #[must_use]
    pub fn identifiers(&self) -> Vec<&str> {
        let mut identifiers: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        identifiers.sort_unstable();
        identifiers
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.identifiers())
            .finish()
    }
}
