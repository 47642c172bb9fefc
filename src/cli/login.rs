//! Interactive login mode
//!
//! Prompts for credentials, performs a credential login and saves the
//! cookie store for later fast logins, then exits.

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::config::ConfigLoader;
use crate::session::{ConsolePrompt, CredentialProvider, SessionManager};

/// Arguments for login mode
#[derive(Debug)]
pub struct LoginArgs {
    /// Where to save the cookie store; `None` for the configured default
    pub cookie: Option<PathBuf>,
    /// Enable verbose logging
    pub verbose: bool,
}

/// Run interactive login and persist the session cookies
pub fn run_login_mode(args: LoginArgs) -> Result<()> {
    super::fetch::init_logging(args.verbose);

    let loader = ConfigLoader::new();
    let settings = loader.load(ConfigLoader::get_config_path().as_deref())?;

    let credentials = ConsolePrompt::new().obtain()?;
    let session = SessionManager::with_credentials(&settings, &credentials, args.cookie)?;

    info!("Cookie store saved to {}", session.cookie_path().display());
    println!("Login successful! Cookies saved to {}", session.cookie_path().display());
    Ok(())
}
