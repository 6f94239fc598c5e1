//! Configuration error types.

/// Errors that can occur when reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to open the settings file.
    #[error("failed to read settings: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the settings file.
    #[error("failed to write settings: {0}")]
    WriteError(#[source] std::io::Error),

    /// The file was opened but reading stopped partway through.
    #[error("reading settings aborted after line {line}: {source}")]
    ReadAborted {
        /// Last line that was read successfully (0 if none).
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// A non-fatal problem found while loading or saving settings.
///
/// Every diagnostic leaves the affected setting at its previous value.
#[derive(Debug, thiserror::Error)]
pub enum Diagnostic {
    /// A line with no `=` separator.
    #[error("line {line}: unknown settings line `{text}`, maybe it is missing the '='?")]
    MalformedLine { line: usize, text: String },

    /// A recognized key with a value of the wrong type or format.
    #[error("line {line}: invalid {key} value: {value}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },

    /// Storage could not be read or written.
    #[error(transparent)]
    Storage(#[from] ConfigError),
}
