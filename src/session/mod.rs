//! Session management for the portal
//!
//! This module handles the authenticated-session bootstrap: credential
//! login, Netscape-format cookie persistence, cookie validation against an
//! authenticated-only page, and the blocking HTTP transport every
//! subsequent fetch runs through.

pub mod cookies;
pub mod credentials;
pub mod manager;
pub mod transport;

pub use cookies::{CookieRecord, CookieStore};
pub use credentials::{ConsolePrompt, CredentialProvider, Credentials, StaticCredentials};
pub use manager::{SessionManager, SessionOptions};
pub use transport::Transport;
