//! Command-line interface logic
//!
//! The CLI owns everything the library treats as external: argument
//! handling, filesystem layout under the output root, and invocation of
//! the downloader binaries. The library hands it resolved URL/filename
//! pairs and nothing else.

pub mod downloader;
pub mod fetch;
pub mod login;

pub use fetch::{FetchArgs, run_fetch_mode};
pub use login::{LoginArgs, run_login_mode};
