//! Fetch mode: extract a content page and dispatch downloads
//!
//! Dispatches on the content URL: class pages get their video and note
//! downloaded under `Lectures/<title>/`, exam pages get every paper
//! downloaded under `Questions/<course>/<exam>/`. Anything else is not a
//! page this tool has an extractor for.

use anyhow::{Result, bail};
use std::path::PathBuf;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::downloader;
use crate::config::{ConfigLoader, Settings};
use crate::extract::ContentExtractor;
use crate::session::{ConsolePrompt, Credentials, SessionManager, SessionOptions};

/// URL fragment identifying a class content page
const CLASS_URL_FRAGMENT: &str = "/Routine/RoutineDetails";
/// URL fragment identifying an exam question page
const EXAM_URL_FRAGMENT: &str = "/Exam/Question";

/// Arguments for fetch mode
#[derive(Debug)]
pub struct FetchArgs {
    pub reg_num: Option<String>,
    pub password: Option<String>,
    pub cookie: Option<PathBuf>,
    pub only_note: bool,
    pub only_video: bool,
    pub content_url: String,
    pub verbose: bool,
}

/// Initialize logging on stderr, keeping stdout for user-facing output
pub(crate) fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run fetch mode with the given arguments
pub fn run_fetch_mode(args: FetchArgs) -> Result<()> {
    init_logging(args.verbose);

    let loader = ConfigLoader::new();
    let settings = loader.load(ConfigLoader::get_config_path().as_deref())?;

    let mut options = SessionOptions::new();
    if let (Some(reg_num), Some(password)) = (&args.reg_num, &args.password) {
        options = options.with_credentials(Credentials::new(reg_num, password));
    }
    if let Some(cookie) = &args.cookie {
        options = options.with_cookie_path(cookie);
    }

    let session = SessionManager::connect(&settings, options, &ConsolePrompt::new())?;
    let extractor = ContentExtractor::new(&session);

    if args.content_url.contains(CLASS_URL_FRAGMENT) {
        fetch_class(&settings, &extractor, &args)
    } else if args.content_url.contains(EXAM_URL_FRAGMENT) {
        fetch_exam(&settings, &extractor, &args)
    } else {
        bail!("Extractor for this page is not available yet");
    }
}

fn fetch_class(settings: &Settings, extractor: &ContentExtractor, args: &FetchArgs) -> Result<()> {
    let content = extractor.fetch_class_content(&args.content_url)?;
    println!("Lecture Title: {}", content.title);

    let lecture_dir = settings
        .download
        .output_dir
        .join(&settings.download.lectures_subdir)
        .join(&content.title);
    std::fs::create_dir_all(&lecture_dir)?;

    // Both flags set (or neither) means download everything
    let want_note = args.only_note || !args.only_video;
    let want_video = args.only_video || !args.only_note;

    if want_note {
        let dest = lecture_dir.join(format!("{}.pdf", content.title));
        if !downloader::download_file(&settings.download.file_downloader, &content.notes, &dest)? {
            warn!("Note download failed for {}", content.title);
        }
    }
    if want_video {
        let dest = lecture_dir.join(format!("{}.mp4", content.title));
        if !downloader::download_video(&settings.download.video_downloader, &content.video, &dest)?
        {
            warn!("Video download failed for {}", content.title);
        }
    }
    Ok(())
}

fn fetch_exam(settings: &Settings, extractor: &ContentExtractor, args: &FetchArgs) -> Result<()> {
    let content = extractor.fetch_exam_content(&args.content_url)?;
    println!("Exam Name: {}", content.exam_name);
    println!("Course Name: {}", content.course_name);

    let exam_dir = settings
        .download
        .output_dir
        .join(&settings.download.questions_subdir)
        .join(&content.course_name)
        .join(&content.exam_name);
    std::fs::create_dir_all(&exam_dir)?;

    for paper in &content.links {
        let dest = exam_dir.join(&paper.title);
        println!("Downloading {}", dest.display());
        if !downloader::download_file(&settings.download.file_downloader, &paper.link, &dest)? {
            warn!("Paper download failed: {}", paper.title);
        }
    }
    Ok(())
}
