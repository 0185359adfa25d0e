//! Error type for the generator.

use hookgen_common::ConfigError;

/// Configuration and input errors. Rendering itself never fails; every
/// error is raised before the first hook is produced.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A mapper string could not be parsed into an importable binding.
    #[error("Invalid mapper '{mapper}': {reason}")]
    InvalidMapper {
        /// The mapper as written in the config.
        mapper: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A fetcher option needed by another option is missing.
    #[error("Fetcher option '{option}' is required when {context}")]
    MissingFunction {
        /// Config key that must be set.
        option: &'static str,
        /// Setting that requires it.
        context: &'static str,
    },

    /// Reading or parsing an input file failed.
    #[error(transparent)]
    Input(#[from] ConfigError),

    /// The output file could not be written.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Output path.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid_mapper(mapper: &str, reason: impl Into<String>) -> Self {
        Self::InvalidMapper {
            mapper: mapper.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias defaulting to [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
