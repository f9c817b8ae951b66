//! Runtime configuration.
//!
//! [`Settings`] is resolved once at process startup (binaries load `.env` first) and then passed
//! into the extractor, the tracker client and the HTTP layer. Nothing reads environment variables
//! while handling a request.

use crate::constants::{
    DEFAULT_ISSUE_TYPE, DEFAULT_MAX_TEXT_CHARS, DEFAULT_PLACEHOLDER_LITERAL,
};
use crate::error::{ConfigError, ConfigResult};

/// Default listen address for the REST service.
pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:8000";

/// Service-wide settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Shown on the OpenAPI document.
    pub api_title: String,
    pub api_version: String,

    pub jira_base: Option<String>,
    pub jira_email: Option<String>,
    pub jira_api_token: Option<String>,
    pub default_issuetype: String,

    pub enable_html: bool,
    pub enable_ocr: bool,
    pub ocr_lang: String,
    pub max_pages: usize,
    pub max_text_chars: usize,

    /// Team-managed projects reject these fields, so they are opt-in.
    pub send_priority: bool,
    pub send_components: bool,

    /// Form value treated as "not provided" (API explorers prefill `string`).
    pub ignore_placeholder_literal: String,

    pub rest_addr: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_title: "Doc → Jira Story Converter".into(),
            api_version: env!("CARGO_PKG_VERSION").into(),
            jira_base: None,
            jira_email: None,
            jira_api_token: None,
            default_issuetype: DEFAULT_ISSUE_TYPE.into(),
            enable_html: false,
            enable_ocr: true,
            ocr_lang: "eng".into(),
            max_pages: 50,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            send_priority: false,
            send_components: false,
            ignore_placeholder_literal: DEFAULT_PLACEHOLDER_LITERAL.into(),
            rest_addr: DEFAULT_REST_ADDR.into(),
        }
    }
}

fn parse_bool(key: &'static str, value: &str) -> ConfigResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
        }),
    }
}

fn parse_usize(key: &'static str, value: &str) -> ConfigResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
        })
}

impl Settings {
    /// Resolves settings from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings from an arbitrary key lookup, falling back to defaults for absent keys.
    ///
    /// Blank values count as absent for optional credentials.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let string = |key: &str, default: String| optional(key).unwrap_or(default);
        let flag = |key: &'static str, default: bool| {
            optional(key).map_or(Ok(default), |v| parse_bool(key, &v))
        };
        let number = |key: &'static str, default: usize| {
            optional(key).map_or(Ok(default), |v| parse_usize(key, &v))
        };

        Ok(Self {
            api_title: string("API_TITLE", defaults.api_title),
            api_version: string("API_VERSION", defaults.api_version),
            jira_base: optional("JIRA_BASE").map(|base| base.trim_end_matches('/').to_owned()),
            jira_email: optional("JIRA_EMAIL"),
            jira_api_token: optional("JIRA_API_TOKEN"),
            default_issuetype: string("DEFAULT_ISSUETYPE", defaults.default_issuetype),
            enable_html: flag("ENABLE_HTML", defaults.enable_html)?,
            enable_ocr: flag("ENABLE_OCR", defaults.enable_ocr)?,
            ocr_lang: string("OCR_LANG", defaults.ocr_lang),
            max_pages: number("MAX_PAGES", defaults.max_pages)?,
            max_text_chars: number("MAX_TEXT_CHARS", defaults.max_text_chars)?,
            send_priority: flag("SEND_PRIORITY", defaults.send_priority)?,
            send_components: flag("SEND_COMPONENTS", defaults.send_components)?,
            ignore_placeholder_literal: string(
                "IGNORE_PLACEHOLDER_LITERAL",
                defaults.ignore_placeholder_literal,
            ),
            rest_addr: string("DOCSTORY_REST_ADDR", defaults.rest_addr),
        })
    }
}
