//! Configuration module for translate-studio.
//!
//! Provides `AppConfig` (top-level settings), `BackendConfig` and
//! `LanguageDefaults` sub-configs, `AppPaths` for cross-platform data
//! directories, TOML persistence via `AppConfig::load` / `AppConfig::save`,
//! and the two fixed language lists offered by the front-end.

pub mod languages;
pub mod paths;
pub mod settings;

pub use languages::{Language, STT_LOCALES, TRANSLATE_TARGETS};
pub use paths::AppPaths;
pub use settings::{AppConfig, BackendConfig, LanguageDefaults};
