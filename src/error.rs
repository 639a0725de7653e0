use thiserror::Error;

/// Conditions that abort the whole run before (or instead of) processing
/// repositories. `main` prints these and exits with code 1.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("invalid user-info format: {0}")]
    InvalidIdentityMap(String),

    #[error("format '{token}' contains characters that cannot be used in a file name: {illegal}")]
    IllegalFormatToken { token: String, illegal: String },

    #[error("invalid formats: {}", .0.join(" "))]
    InvalidFormats(Vec<String>),
}

/// Conditions isolated to a single repository. The batch runner logs these,
/// abandons the repository and moves on; accumulated results stay intact.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("activity collection failed: {0}")]
    Ingest(String),

    #[error("raw activity dump failed: {0}")]
    Dump(std::io::Error),

    #[error("report generation failed: {0}")]
    Report(std::io::Error),
}
