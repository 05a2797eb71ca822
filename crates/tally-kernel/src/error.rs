//! Error types for Tally kernel operations.
//!
//! Failed assertions are not errors: they are recorded in an
//! [`AssertionList`](crate::AssertionList) and counted by the runner.
//! Everything here is either a programming error (fatal at the call sites
//! that cannot recover) or a failure of the environment around a run.

/// Errors arising from container misuse, broken invariants, or I/O.
#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    /// A container index outside `[-size, size)`.
    #[error("index {index} out of bounds for container of size {size}")]
    OutOfBounds { index: isize, size: usize },

    /// A container invariant does not hold.
    #[error("invalid container: {0}")]
    InvalidContainer(String),

    /// A witness was constructed with an empty name.
    #[error("witness name must not be empty")]
    EmptyName,

    /// A witness value does not fit in `i64`.
    #[error("witness {name} = {value} does not fit in i64")]
    WitnessOutOfRange { name: String, value: String },

    /// An assertion was constructed with an empty expression.
    #[error("assertion expression must not be empty")]
    EmptyExpression,

    /// A test was constructed with an empty name.
    #[error("test name must not be empty")]
    EmptyTestName,

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    /// A configuration file could not be read.
    #[error("failed to read config: {path}: {source}")]
    ReadConfig {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for [`RunnerConfig`](crate::RunnerConfig).
    #[error("invalid config at {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
