//! # API Shared
//!
//! Request/response models and helpers shared by the REST service and the CLI.
//!
//! Contains:
//! - Wire models (`models`) with OpenAPI schemas
//! - `HealthService`
//! - Form-value cleaning (`forms`)

pub mod forms;
pub mod health;
pub mod models;

pub use forms::{clean_csv, clean_field_id};
pub use health::HealthService;
pub use models::*;
