//! Error types for portal access and page extraction
//!
//! Three conditions dominate the design: `Auth` (login rejected, or a cookie
//! validation response matching no known marker), `PageStructure` (an expected
//! element or text pattern is missing from a fetched page) and `Http`
//! (transport-level failures, propagated unchanged). There is no partial-result
//! mode anywhere in the crate; every operation either returns a fully populated
//! value or fails with one of these.

use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request errors (connection refused, timeout, DNS failure)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// I/O errors (cookie store file, output directories)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML configuration parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Authentication failures
    ///
    /// Raised for rejected credentials and for cookie-validation responses
    /// that match neither the "redirected away" nor the authenticated-page
    /// marker. Never retried automatically beyond the single
    /// cookie-to-credential fallback in the session manager.
    #[error("Authentication failed: {reason}")]
    Auth {
        /// Why the login or cookie validation was rejected
        reason: String,
    },

    /// Page layout not recognized
    ///
    /// An expected element, text pattern or line count was absent from a
    /// fetched page. Distinct from `Auth` so the caller can tell a stale
    /// site template from a failed login.
    #[error("Unrecognized structure on {page}: {detail}")]
    PageStructure {
        /// Which page failed to parse (routine, class, note, exam, paper)
        page: String,
        /// What was expected but not found
        detail: String,
    },

    /// Malformed persisted cookie store file
    #[error("Cookie store parse error at line {line}: {message}")]
    CookieJar {
        /// 1-based line number in the cookie store file
        line: usize,
        /// What made the line unparseable
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error in {field}: {message}")]
    Config {
        /// The configuration field that has an error
        field: String,
        /// Error message describing the issue
        message: String,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an authentication error
    pub fn auth<S: Into<String>>(reason: S) -> Self {
        Self::Auth {
            reason: reason.into(),
        }
    }

    /// Create a page structure error
    pub fn page_structure<S: Into<String>>(page: S, detail: S) -> Self {
        Self::PageStructure {
            page: page.into(),
            detail: detail.into(),
        }
    }

    /// Create a cookie store parse error
    pub fn cookie_jar<S: Into<String>>(line: usize, message: S) -> Self {
        Self::CookieJar {
            line,
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(field: S, message: S) -> Self {
        Self::Config {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Error::Http(..) => "http",
            Error::Io(..) => "io",
            Error::Toml(..) => "toml",
            Error::Url(..) => "url",
            Error::Auth { .. } => "auth",
            Error::PageStructure { .. } => "page_structure",
            Error::CookieJar { .. } => "cookie_jar",
            Error::Config { .. } => "config",
        }
    }
}
