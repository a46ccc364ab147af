//! Error types for the review client and the preference store.

use thiserror::Error;

/// Why an assessment request failed.
///
/// The session only cares that a request failed; the variant is kept for the
/// user-visible notice and for the log.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// The request never reached the service or the response never came back.
    #[error("could not reach the review service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("review service returned {status}: {body}")]
    Service { status: u16, body: String },

    /// The response body was not an assessment (for example, no `score`).
    #[error("malformed review response: {0}")]
    Parse(String),
}

/// Preference store failures.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The database file could not be opened or created.
    #[error("could not open preference database: {0}")]
    Open(#[from] rusqlite::Error),

    #[error("preference database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),
}
