//! External downloader invocation
//!
//! Downloaders are opaque sinks: they get a URL and a destination path and
//! either succeed or fail outside this program's control. A non-zero exit
//! status is logged and reported, never interpreted further.

use std::path::Path;
use std::process::Command;
use tracing::{info, warn};

/// Download a document with the generic file downloader (wget-compatible
/// flags)
pub fn download_file(program: &str, url: &str, dest: &Path) -> anyhow::Result<bool> {
    info!("Downloading {} -> {}", url, dest.display());
    let status = Command::new(program)
        .args(["-x", "-nv", "-q", "--no-check-certificate", "-c", "-O"])
        .arg(dest)
        .arg(url)
        .status()?;

    if !status.success() {
        warn!("{} exited with {} for {}", program, status, url);
    }
    Ok(status.success())
}

/// Download a lecture video with the video-platform-aware downloader
///
/// YouTube URLs get `-f 22` (720p MP4), matching the format the portal's
/// embedded player serves.
pub fn download_video(program: &str, url: &str, dest: &Path) -> anyhow::Result<bool> {
    info!("Downloading video {} -> {}", url, dest.display());
    let mut command = Command::new(program);
    if url.contains("youtube.com") {
        command.args(["-f", "22"]);
    }
    let status = command.arg(url).arg("-o").arg(dest).status()?;

    if !status.success() {
        warn!("{} exited with {} for {}", program, status, url);
    }
    Ok(status.success())
}
