//! udvash-dl - Udvash-Unmesh content extractor
//!
//! Authenticates against the Udvash-Unmesh online portal, scrapes the
//! session-authenticated HTML pages that hold lecture videos, class notes
//! and exam question papers, and hands the resolved URLs to external
//! download tools.
//!
//! # Architecture
//!
//! Two components compose sequentially:
//! - **Session Manager** ([`session`]): establishes and persists an
//!   authenticated session via credentials or a saved Netscape-format
//!   cookie jar, validates that a loaded jar is still usable, and exposes
//!   the blocking transport for everything else.
//! - **Content Extractor** ([`extract`]): given the session and a target
//!   URL, fetches pages and parses them into one of three typed results:
//!   routine listing, class content (video + notes) or exam content
//!   (question/solution paper links).
//!
//! Everything is single-threaded, sequential, blocking I/O; the portal
//! flow has no use for concurrency.
//!
//! # Usage
//!
//! ```bash
//! udvash-dl --login
//! udvash-dl -R 22016000 -P secret "https://online.udvash-unmesh.com/Routine/RoutineDetails?classId=42"
//! udvash-dl --cookie ./cookie.txt -N "https://online.udvash-unmesh.com/Routine/RoutineDetails?classId=42"
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use udvash_dl::{ContentExtractor, Settings, SessionManager, SessionOptions};
//! use udvash_dl::session::{ConsolePrompt, Credentials};
//!
//! # fn example() -> udvash_dl::Result<()> {
//! let settings = Settings::default();
//! let options = SessionOptions::new()
//!     .with_credentials(Credentials::new("22016000", "secret"));
//! let session = SessionManager::connect(&settings, options, &ConsolePrompt::new())?;
//!
//! let extractor = ContentExtractor::new(&session);
//! let routine = extractor.fetch_routine()?;
//! println!("{} upcoming lectures", routine.lectures.len());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod session;
pub mod types;

pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use extract::ContentExtractor;
pub use session::{SessionManager, SessionOptions};
pub use types::{ClassContent, Exam, ExamContent, Lecture, PaperLink, Routine, VideoSource};
