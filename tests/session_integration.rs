//! Session bootstrap integration tests against a mock portal
//!
//! Covers the cookie-or-credentials bootstrap end to end: credential login
//! persisting the cookie store, rejected credentials, the one-shot fallback
//! from an expired store, and the no-login fast path over a valid store.

use mockito::Matcher;
use std::path::PathBuf;
use tempfile::TempDir;

use udvash_dl::session::{CredentialProvider, Credentials, SessionManager, SessionOptions};
use udvash_dl::{Error, Settings};

/// Provider that must never be consulted; failing loudly if it is
struct UnreachableProvider;

impl CredentialProvider for UnreachableProvider {
    fn obtain(&self) -> udvash_dl::Result<Credentials> {
        Err(Error::auth("credential provider consulted unexpectedly"))
    }
}

fn settings_for(server: &mockito::ServerGuard, cookie_path: PathBuf) -> Settings {
    let mut settings = Settings::default();
    settings.portal.base_url = server.url();
    settings.portal.cookie_path = cookie_path;
    settings
}

fn login_body_matcher() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("RememberMe".into(), "True".into()),
        Matcher::UrlEncoded("RegistrationNumber".into(), "22016000".into()),
        Matcher::UrlEncoded("Password".into(), "secret".into()),
    ])
}

/// Write a persisted cookie store holding one session cookie for the mock
/// server's host
fn write_jar(path: &PathBuf, name: &str, value: &str) {
    let jar = format!(
        "# Netscape HTTP Cookie File\n127.0.0.1\tFALSE\t/\tFALSE\t0\t{}\t{}\n",
        name, value
    );
    std::fs::write(path, jar).unwrap();
}

#[test]
fn test_credential_login_persists_set_cookies() {
    let mut server = mockito::Server::new();
    let dir = TempDir::new().unwrap();
    let jar_path = dir.path().join("cookie.txt");

    let login = server
        .mock("POST", "/Account/Login")
        .match_body(login_body_matcher())
        .with_status(200)
        .with_header("set-cookie", ".AspNetCore.Session=CfDJ8abc; path=/; httponly")
        .with_header("set-cookie", ".AspNetCore.Identity=CfDJ8xyz; path=/")
        .with_body("<title>My Routine - Udvash Unmesh Online</title>")
        .create();

    let settings = settings_for(&server, jar_path.clone());
    let options =
        SessionOptions::new().with_credentials(Credentials::new("22016000", "secret"));
    let session =
        SessionManager::connect(&settings, options, &UnreachableProvider).unwrap();

    login.assert();
    assert_eq!(session.cookie_path(), &jar_path);

    // Every cookie set during the exchange landed in the persisted store
    let jar = std::fs::read_to_string(&jar_path).unwrap();
    assert!(jar.starts_with("# Netscape HTTP Cookie File"));
    assert!(jar.contains(".AspNetCore.Session\tCfDJ8abc"));
    assert!(jar.contains(".AspNetCore.Identity\tCfDJ8xyz"));
}

#[test]
fn test_rejected_credentials_report_auth_error() {
    let mut server = mockito::Server::new();
    let dir = TempDir::new().unwrap();
    let jar_path = dir.path().join("cookie.txt");

    let _login = server
        .mock("POST", "/Account/Login")
        .with_status(200)
        .with_body("<div class=\"validation-summary-errors\">Invalid Password</div>")
        .create();

    let settings = settings_for(&server, jar_path.clone());
    let options =
        SessionOptions::new().with_credentials(Credentials::new("22016000", "wrong"));
    let err =
        SessionManager::connect(&settings, options, &UnreachableProvider).unwrap_err();

    assert!(matches!(err, Error::Auth { .. }));
    // A rejected login never writes a cookie store
    assert!(!jar_path.exists());
}

#[test]
fn test_expired_store_falls_back_to_exactly_one_login() {
    let mut server = mockito::Server::new();
    let dir = TempDir::new().unwrap();
    let jar_path = dir.path().join("cookie.txt");
    write_jar(&jar_path, "sid", "stale");

    let probe = server
        .mock("GET", "/Routine")
        .with_status(200)
        .with_body("<html><body>Object moved to <a href=\"/Account/Login\">here</a></body></html>")
        .create();
    let login = server
        .mock("POST", "/Account/Login")
        .match_body(login_body_matcher())
        .with_status(200)
        .with_header("set-cookie", "sid=fresh; path=/")
        .with_body("<title>My Routine - Udvash Unmesh Online</title>")
        .expect(1)
        .create();

    let settings = settings_for(&server, jar_path.clone());
    let options =
        SessionOptions::new().with_credentials(Credentials::new("22016000", "secret"));
    SessionManager::connect(&settings, options, &UnreachableProvider).unwrap();

    probe.assert();
    login.assert();

    // The fallback login rewrote the store with the fresh session cookie
    let jar = std::fs::read_to_string(&jar_path).unwrap();
    assert!(jar.contains("sid\tfresh"));
    assert!(!jar.contains("stale"));
}

#[test]
fn test_valid_store_skips_credential_login() {
    let mut server = mockito::Server::new();
    let dir = TempDir::new().unwrap();
    let jar_path = dir.path().join("cookie.txt");
    write_jar(&jar_path, "sid", "abc");

    let probe = server
        .mock("GET", "/Routine")
        .match_header("cookie", Matcher::Regex("sid=abc".into()))
        .with_status(200)
        .with_body("<title>My Routine - Udvash Unmesh Online</title>")
        .create();
    let login = server.mock("POST", "/Account/Login").expect(0).create();

    let settings = settings_for(&server, jar_path);
    // No credentials supplied anywhere; the provider would fail if asked
    SessionManager::connect(&settings, SessionOptions::new(), &UnreachableProvider)
        .unwrap();

    probe.assert();
    login.assert();
}

#[test]
fn test_login_round_trip_reuses_written_store() {
    let mut server = mockito::Server::new();
    let dir = TempDir::new().unwrap();
    let jar_path = dir.path().join("cookie.txt");

    let login = server
        .mock("POST", "/Account/Login")
        .with_status(200)
        .with_header("set-cookie", "sid=roundtrip; path=/")
        .with_body("<title>My Routine - Udvash Unmesh Online</title>")
        .expect(1)
        .create();

    let settings = settings_for(&server, jar_path.clone());
    let options =
        SessionOptions::new().with_credentials(Credentials::new("22016000", "secret"));
    SessionManager::connect(&settings, options, &UnreachableProvider).unwrap();
    assert!(jar_path.exists());

    // Second run: the written store alone must carry the session, with no
    // credentials available from anywhere
    let probe = server
        .mock("GET", "/Routine")
        .match_header("cookie", Matcher::Regex("sid=roundtrip".into()))
        .with_status(200)
        .with_body("<title>My Routine - Udvash Unmesh Online</title>")
        .create();
    SessionManager::connect(&settings, SessionOptions::new(), &UnreachableProvider)
        .unwrap();

    login.assert();
    probe.assert();
}

#[test]
fn test_unrecognized_probe_response_is_auth_error() {
    let mut server = mockito::Server::new();
    let dir = TempDir::new().unwrap();
    let jar_path = dir.path().join("cookie.txt");
    write_jar(&jar_path, "sid", "abc");

    let _probe = server
        .mock("GET", "/Routine")
        .with_status(200)
        .with_body("<html><body>Scheduled maintenance</body></html>")
        .create();

    let settings = settings_for(&server, jar_path);
    let err = SessionManager::connect(&settings, SessionOptions::new(), &UnreachableProvider)
        .unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

#[test]
fn test_explicit_missing_cookie_path_is_config_error() {
    let server = mockito::Server::new();
    let dir = TempDir::new().unwrap();

    let settings = settings_for(&server, dir.path().join("default.txt"));
    let options = SessionOptions::new().with_cookie_path(dir.path().join("nope.txt"));
    let err =
        SessionManager::connect(&settings, options, &UnreachableProvider).unwrap_err();

    assert!(matches!(err, Error::Config { .. }));
}

#[test]
fn test_login_mode_ignores_existing_store() {
    let mut server = mockito::Server::new();
    let dir = TempDir::new().unwrap();
    let jar_path = dir.path().join("cookie.txt");
    write_jar(&jar_path, "sid", "old");

    let login = server
        .mock("POST", "/Account/Login")
        .with_status(200)
        .with_header("set-cookie", "sid=renewed; path=/")
        .with_body("<title>My Routine - Udvash Unmesh Online</title>")
        .expect(1)
        .create();

    let settings = settings_for(&server, dir.path().join("unused-default.txt"));
    let credentials = Credentials::new("22016000", "secret");
    SessionManager::with_credentials(&settings, &credentials, Some(jar_path.clone()))
        .unwrap();

    login.assert();
    let jar = std::fs::read_to_string(&jar_path).unwrap();
    assert!(jar.contains("sid\trenewed"));
}
