//! Error and skip types shared across the crate.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Hard failures.
///
/// Per-asset problems are not errors; they surface as [`SkipReason`] so a
/// single bad catalog entry never aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A finished asset file has no measurable width/height.
    #[error("cannot determine dimensions of `{file}`: {reason}")]
    UnmeasurableDimensions { file: String, reason: String },

    #[error("i/o error at `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn unmeasurable(file: impl Into<String>, reason: impl ToString) -> Self {
        Self::UnmeasurableDimensions {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

/// Why an asset was left out of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// No bytes could be retrieved for the asset.
    #[error("missing payload")]
    MissingPayload,

    /// The asset claims to be SVG but contains no `<svg` element.
    #[error("malformed vector markup (no <svg> element)")]
    MalformedVectorMarkup,
}
