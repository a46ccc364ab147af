//! Core review-session logic for critique.
//!
//! Everything here is free of terminal concerns: the session state machine,
//! the assessment-service client, the pure presentation mapping, and the
//! SQLite-backed preference store. The `critique` binary owns rendering.

pub mod client;
pub mod error;
pub mod presentation;
pub mod prefs;
pub mod schema;
pub mod session;
pub mod types;

pub use client::{Assessor, HttpReviewClient, DEFAULT_ENDPOINT};
pub use error::{PrefsError, ReviewError};
pub use session::{FailureNotice, ReviewCompletion, ReviewTicket, SessionStore};
pub use types::{Metrics, RequestState, ReviewResult, ThemePreference};
