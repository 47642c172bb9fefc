//! Unified CLI for udvash-dl
//!
//! Extracts class videos, notes and exam question papers from the
//! Udvash-Unmesh online portal.
//!
//! # Usage
//!
//! ## Interactive login (saves the cookie store and exits)
//! ```bash
//! udvash-dl --login
//! ```
//!
//! ## Extract content
//! ```bash
//! udvash-dl -R <registration number> -P <password> CONTENT_URL
//! udvash-dl --cookie ./cookie.txt CONTENT_URL
//! udvash-dl --only-note CONTENT_URL
//! ```

use clap::Parser;
use std::path::PathBuf;

use udvash_dl::cli::{FetchArgs, LoginArgs, run_fetch_mode, run_login_mode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "udvash-dl")]
// The auto-generated version flag would claim `-V`, which `--only-video`
// uses; re-declare `--version` as long-only instead.
#[command(disable_version_flag = true)]
struct Cli {
    /// Print version
    #[arg(long, action = clap::ArgAction::Version)]
    version: Option<bool>,

    /// Log in interactively, save the cookie store and exit
    #[arg(long)]
    login: bool,

    /// Udvash registration number
    #[arg(short = 'R', long = "reg-num", value_name = "REG_NUM")]
    reg_num: Option<String>,

    /// Password for the portal account
    #[arg(short = 'P', long, value_name = "PASSWORD")]
    password: Option<String>,

    /// Path of the cookie store to load, or where to save it on login
    #[arg(long, value_name = "COOKIE_FILE")]
    cookie: Option<PathBuf>,

    /// Skip the lecture video and only download the note
    #[arg(short = 'N', long)]
    only_note: bool,

    /// Skip the note and only download the lecture video
    #[arg(short = 'V', long)]
    only_video: bool,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,

    /// URL of the content to extract
    #[arg(value_name = "CONTENT_URL", required_unless_present = "login")]
    content_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.login {
        return run_login_mode(LoginArgs {
            cookie: cli.cookie,
            verbose: cli.verbose,
        });
    }

    let args = FetchArgs {
        reg_num: cli.reg_num,
        password: cli.password,
        cookie: cli.cookie,
        only_note: cli.only_note,
        only_video: cli.only_video,
        // required_unless_present guarantees this is set when --login is absent
        content_url: cli.content_url.unwrap_or_default(),
        verbose: cli.verbose,
    };
    run_fetch_mode(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_login_mode() {
        let cli = Cli::parse_from(["udvash-dl", "--login"]);
        assert!(cli.login);
        assert!(cli.content_url.is_none());
    }

    #[test]
    fn test_credential_fetch() {
        let cli = Cli::parse_from([
            "udvash-dl",
            "-R",
            "22016000",
            "-P",
            "secret",
            "https://online.udvash-unmesh.com/Routine/RoutineDetails?classId=42",
        ]);
        assert_eq!(cli.reg_num, Some("22016000".to_string()));
        assert_eq!(cli.password, Some("secret".to_string()));
        assert!(cli.content_url.is_some());
    }

    #[test]
    fn test_content_url_required_without_login() {
        let result = Cli::try_parse_from(["udvash-dl", "-R", "22016000"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cookie_path_and_filters() {
        let cli = Cli::parse_from([
            "udvash-dl",
            "--cookie",
            "/tmp/jar.txt",
            "-N",
            "https://online.udvash-unmesh.com/Exam/Question?id=1",
        ]);
        assert_eq!(cli.cookie, Some(PathBuf::from("/tmp/jar.txt")));
        assert!(cli.only_note);
        assert!(!cli.only_video);
    }
}
