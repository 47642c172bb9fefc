//! Error handling for udvash-dl
//!
//! This module defines the error taxonomy used throughout the crate.
//! Authentication failures, unrecognized page layouts and transport errors
//! are kept distinct so callers can tell "we could not log in" apart from
//! "we logged in fine, but this page is not what we expect".

pub mod types;

pub use types::{Error, Result};
