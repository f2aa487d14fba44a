use vidly_core::ConfigError;

/// Failures reported by a [`DataSource`](crate::traits::DataSource).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested entity does not exist. Hosts route this to their
    /// not-found view.
    #[error("{kind} `{id}` not found")]
    NotFound { kind: &'static str, id: String },
    /// The entity could not be built from the submitted data.
    #[error("invalid {kind}: {reason}")]
    Invalid { kind: &'static str, reason: String },
    /// The backing store failed.
    #[error("data source unavailable: {0}")]
    Unavailable(#[from] anyhow::Error),
}

impl SourceError {
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Top-level error for screen adapters.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl AppError {
    /// `true` when the error means "navigate to not found".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Source(e) if e.is_not_found())
    }
}
