//! Session bootstrap and cookie lifecycle
//!
//! Construction yields a session usable for all subsequent authenticated
//! requests, via one of three paths, attempted in order:
//!
//! 1. no persisted cookie store: require credentials (prompting through the
//!    [`CredentialProvider`] when absent) and perform a credential login;
//! 2. a persisted cookie store exists: load it and validate it against an
//!    authenticated-only page; if valid, use it as-is;
//! 3. the loaded cookie store fails validation: fall back to a credential
//!    login. This fallback is one-shot, not a retry loop.
//!
//! The cookie store file is rewritten after every successful credential
//! login and never on a validation-only path.

use crate::session::cookies::CookieStore;
use crate::session::credentials::{CredentialProvider, Credentials};
use crate::session::transport::Transport;
use crate::{Error, Result, config::Settings};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Rejection marker for a wrong password in the login response body
const INVALID_PASSWORD_MARKER: &str = "Invalid Password";
/// Rejection marker for an unknown registration number
const INVALID_REGNUM_MARKER: &str = "Invalid registration number";
/// Body marker of the redirect page served to expired sessions
const REDIRECTED_AWAY_MARKER: &str = "Object moved to";
/// Title marker of the authenticated routine page
const ROUTINE_PAGE_TITLE: &str = "My Routine - Udvash Unmesh Online";

/// How the validation probe classified a loaded cookie store
#[derive(Debug, PartialEq, Eq)]
enum CookieProbe {
    /// Session cookies still accepted by the portal
    Valid,
    /// Portal redirected away; session expired
    Expired,
}

/// Caller-supplied overrides for the session bootstrap
#[derive(Debug, Default)]
pub struct SessionOptions {
    /// Credentials supplied up front (skips the interactive prompt)
    pub credentials: Option<Credentials>,
    /// Explicit cookie store path; `None` means the configured default
    pub cookie_path: Option<PathBuf>,
}

impl SessionOptions {
    /// Create empty options (default cookie path, prompt for credentials
    /// when needed)
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply credentials up front
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Use an explicit cookie store path
    ///
    /// Unlike the default path, an explicit path that does not exist is a
    /// configuration error rather than a silent fall-through to credential
    /// login.
    pub fn with_cookie_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cookie_path = Some(path.into());
        self
    }
}

/// Authenticated portal session
#[derive(Debug)]
pub struct SessionManager {
    transport: Transport,
    settings: Settings,
    cookie_path: PathBuf,
}

impl SessionManager {
    /// Establish a session via the cookie-or-credentials bootstrap
    pub fn connect(
        settings: &Settings,
        options: SessionOptions,
        provider: &dyn CredentialProvider,
    ) -> Result<Self> {
        let explicit_cookie_path = options.cookie_path.is_some();
        let cookie_path = options
            .cookie_path
            .unwrap_or_else(|| settings.portal.cookie_path.clone());

        let manager = Self {
            transport: Transport::new(settings)?,
            settings: settings.clone(),
            cookie_path,
        };

        if !manager.cookie_path.exists() {
            if explicit_cookie_path {
                return Err(Error::config(
                    "cookie_path",
                    &format!(
                        "cookie store {} does not exist",
                        manager.cookie_path.display()
                    ),
                ));
            }
            info!("No cookie store found, logging in with credentials");
            let credentials = Self::resolve_credentials(options.credentials, provider)?;
            manager.login_with_credentials(&credentials)?;
        } else {
            info!(
                "Cookie store {} found, using it to log in",
                manager.cookie_path.display()
            );
            let store = CookieStore::load(&manager.cookie_path)?;
            debug!("Loaded {} cookies", store.len());
            manager.transport.replace_cookie_store(store);

            match manager.validate_cookie_store()? {
                CookieProbe::Valid => info!("Session cookies still valid"),
                CookieProbe::Expired => {
                    warn!("Cookie store expired, falling back to credential login");
                    let credentials = Self::resolve_credentials(options.credentials, provider)?;
                    manager.login_with_credentials(&credentials)?;
                }
            }
        }

        Ok(manager)
    }

    /// Establish a session by unconditional credential login, ignoring any
    /// persisted cookie store (used by the interactive `--login` mode)
    pub fn with_credentials(
        settings: &Settings,
        credentials: &Credentials,
        cookie_path: Option<PathBuf>,
    ) -> Result<Self> {
        let manager = Self {
            transport: Transport::new(settings)?,
            settings: settings.clone(),
            cookie_path: cookie_path.unwrap_or_else(|| settings.portal.cookie_path.clone()),
        };
        manager.login_with_credentials(credentials)?;
        Ok(manager)
    }

    /// The authenticated transport for subsequent fetches
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Settings this session was built from
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Where the session cookies are persisted
    pub fn cookie_path(&self) -> &PathBuf {
        &self.cookie_path
    }

    fn resolve_credentials(
        supplied: Option<Credentials>,
        provider: &dyn CredentialProvider,
    ) -> Result<Credentials> {
        match supplied {
            Some(credentials) => Ok(credentials),
            None => {
                info!("Credentials were not provided, prompting");
                provider.obtain()
            }
        }
    }

    /// Submit credentials to the authentication endpoint and persist every
    /// cookie set during the exchange
    fn login_with_credentials(&self, credentials: &Credentials) -> Result<()> {
        let body = self.transport.post_form(
            &self.settings.login_url(),
            &[
                ("RememberMe", "True"),
                ("RegistrationNumber", credentials.registration_number.as_str()),
                ("Password", credentials.password.as_str()),
            ],
        )?;

        if body.contains(INVALID_PASSWORD_MARKER) || body.contains(INVALID_REGNUM_MARKER) {
            return Err(Error::auth(
                "Wrong registration number or password provided",
            ));
        }

        let store = self.transport.cookie_store();
        store.save(&self.cookie_path)?;
        info!(
            "Login successful, saved {} cookies to {}",
            store.len(),
            self.cookie_path.display()
        );
        Ok(())
    }

    /// Probe an authenticated-only page, without following redirects, to
    /// classify the loaded cookie store
    fn validate_cookie_store(&self) -> Result<CookieProbe> {
        let body = self.transport.get_no_redirect(&self.settings.routine_url())?;

        if body.contains(REDIRECTED_AWAY_MARKER) {
            return Ok(CookieProbe::Expired);
        }
        if body.contains(ROUTINE_PAGE_TITLE) {
            return Ok(CookieProbe::Valid);
        }
        Err(Error::auth(
            "Unrecognized response while validating cookie session",
        ))
    }
}
