//! Credential acquisition
//!
//! The session manager does not read the console itself; it depends on a
//! [`CredentialProvider`]. The interactive [`ConsolePrompt`] is the supported
//! fallback when no credentials were supplied, and [`StaticCredentials`]
//! covers headless use and tests.

use crate::Result;
use std::io::{BufRead, Write};

/// Registration identifier and password for the portal
///
/// Ephemeral: supplied by the caller or prompted for, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Udvash registration number
    pub registration_number: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Create credentials from a registration number and password
    pub fn new<S: Into<String>>(registration_number: S, password: S) -> Self {
        Self {
            registration_number: registration_number.into(),
            password: password.into(),
        }
    }
}

/// Source of credentials for credential login
pub trait CredentialProvider {
    /// Produce a credential pair, prompting or failing as appropriate
    fn obtain(&self) -> Result<Credentials>;
}

/// Interactive console prompt (blocking stdin read)
///
/// Prompting synchronously when credentials are required but absent is an
/// intentional fallback, not an error path.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl ConsolePrompt {
    /// Create a console prompt provider
    pub fn new() -> Self {
        Self
    }

    fn read_line(prompt: &str) -> Result<String> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl CredentialProvider for ConsolePrompt {
    fn obtain(&self) -> Result<Credentials> {
        let registration_number = Self::read_line("Registration Number: ")?;
        let password = Self::read_line("Password: ")?;
        Ok(Credentials {
            registration_number,
            password,
        })
    }
}

/// Non-interactive provider with pre-set values
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a provider that always yields the given credentials
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }
}

impl CredentialProvider for StaticCredentials {
    fn obtain(&self) -> Result<Credentials> {
        Ok(self.credentials.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_yields_preset_values() {
        let provider = StaticCredentials::new(Credentials::new("22016000", "hunter2"));
        let credentials = provider.obtain().unwrap();
        assert_eq!(credentials.registration_number, "22016000");
        assert_eq!(credentials.password, "hunter2");
    }

    #[test]
    fn test_credentials_new() {
        let credentials = Credentials::new("1234", "pw");
        assert_eq!(
            credentials,
            Credentials {
                registration_number: "1234".to_string(),
                password: "pw".to_string(),
            }
        );
    }
}
