//! Ordered filter chains.

use crate::FilterError;
use crate::filter::FilterParams;
use crate::registry::FilterRegistry;

/// One filter invocation in a pipeline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineStep {
    /// Filter identifier.
    pub filter: String,
    /// Parameters passed to the filter.
    pub params: FilterParams,
}

/// Runs named filters in sequence, feeding each output into the next.
///
/// # Example
///
/// ```
/// use tabsmith_filter::{FilterParams, FilterRegistry, Pipeline};
///
/// let pipeline = Pipeline::new(FilterRegistry::with_defaults())
///     .with_step("bootstrap_tab", FilterParams::new());
///
/// let html = pipeline.run("|A|\n----js\nx\n--end--\n").unwrap();
/// assert!(html.contains(r#"class="tabbable""#));
/// ```
#[derive(Debug)]
pub struct Pipeline {
    registry: FilterRegistry,
    steps: Vec<PipelineStep>,
}

impl Pipeline {
    /// Create an empty pipeline over a registry.
    #[must_use]
    pub fn new(registry: FilterRegistry) -> Self {
        Self {
            registry,
            steps: Vec::new(),
        }
    }

    /// Append a step.
    #[must_use]
    pub fn with_step(mut self, filter: impl Into<String>, params: FilterParams) -> Self {
        self.push(filter, params);
        self
    }

    /// Append a step.
    pub fn push(&mut self, filter: impl Into<String>, params: FilterParams) {
        self.steps.push(PipelineStep {
            filter: filter.into(),
            params,
        });
    }

    /// Steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[PipelineStep] {
        &self.steps
    }

    /// Registry the pipeline resolves identifiers against.
    #[must_use]
    pub fn registry(&self) -> &FilterRegistry {
        &self.registry
    }

    /// Check that every step names a registered filter.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownFilter`] for the first unknown step.
    pub fn validate(&self) -> Result<(), FilterError> {
        match self
            .steps
            .iter()
            .find(|step| !self.registry.contains(&step.filter))
        {
            Some(step) => Err(FilterError::UnknownFilter(step.filter.clone())),
            None => Ok(()),
        }
    }

    /// Run all steps over `content`.
    ///
    /// Identifiers are checked before any filter runs. An empty pipeline
    /// returns the content unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::UnknownFilter`] for an unregistered step, or
    /// [`FilterError::Step`] wrapping the first filter failure.
    pub fn run(&self, content: &str) -> Result<String, FilterError> {
        self.validate()?;

        let mut current = content.to_owned();
        for step in &self.steps {
            let filter = self
                .registry
                .get(&step.filter)
                .ok_or_else(|| FilterError::UnknownFilter(step.filter.clone()))?;

            current = filter
                .run(&current, &step.params)
                .map_err(|source| FilterError::Step {
                    filter: step.filter.clone(),
                    source: Box::new(source),
                })?;

            tracing::debug!(filter = %step.filter, bytes = current.len(), "Applied filter");
        }

        Ok(current)
    }
}
