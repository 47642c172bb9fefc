//! Configuration management for udvash-dl
//!
//! This module handles loading and managing configuration settings
//! for the portal client and the download dispatch layer.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::Settings;
