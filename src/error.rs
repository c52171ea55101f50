//! Run lifecycle errors.

use std::fmt;

/// A component failed while being torn down at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleError {
    component: String,
    message: String,
    source: Option<Box<LifecycleError>>,
}

impl LifecycleError {
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Wraps `cause` as reported by `component`.
    pub fn wrap(component: impl Into<String>, cause: LifecycleError) -> Self {
        Self {
            component: component.into(),
            message: format!("failed to end run of {}", cause.component),
            source: Some(Box::new(cause)),
        }
    }

    #[inline]
    pub fn component(&self) -> &str {
        &self.component
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The innermost error in the chain.
    pub fn root_cause(&self) -> &LifecycleError {
        let mut current = self;
        while let Some(ref inner) = current.source {
            current = inner;
        }
        current
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.component, self.message)
    }
}

impl std::error::Error for LifecycleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
