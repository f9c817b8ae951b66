//! # Docstory Tracker
//!
//! Sends parsed stories to Jira Cloud.
//!
//! [`issue_payload`] is a pure function from a [`docstory_core::StoryRecord`] to the JSON body
//! Jira expects (description rendered as ADF). [`JiraClient`] performs the HTTP calls.

pub mod adf;
pub mod client;
pub mod config;
pub mod error;
pub mod payload;

pub use client::{CreatedIssue, JiraClient, JiraField};
pub use config::{CustomFieldIds, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use payload::issue_payload;
