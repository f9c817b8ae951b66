//! # Docstory Core
//!
//! Turns extracted document text into tracker-ready stories.
//!
//! This crate holds the pure parsing pipeline and shared configuration:
//! - line patterns for titles, fields, user-story lines, hashtags and inline mentions
//! - acceptance-criteria grouping and Given/When/Then normalisation
//! - priority-token mapping
//! - the single-pass story builder ([`parse_story`])
//! - startup [`Settings`]
//!
//! **No I/O**: document decoding lives in `docstory-extract`, tracker calls in
//! `docstory-tracker`, and HTTP concerns in `api-rest`.

pub mod acceptance;
pub mod classify;
pub mod config;
pub mod constants;
pub mod error;
pub mod options;
pub mod parser;
pub mod patterns;
pub mod priority;
pub mod story;
pub mod summary;
pub mod text;

pub use acceptance::normalize_acceptance_criteria;
pub use classify::{classify_field, FieldLine};
pub use config::Settings;
pub use error::{ConfigError, ConfigResult, SummaryError};
pub use options::ParseOptions;
pub use parser::parse_story;
pub use priority::map_priority;
pub use story::{Diagnostics, ParsedStory, StoryRecord};
pub use summary::Summary;
