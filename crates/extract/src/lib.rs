//! # Docstory Extract
//!
//! Turns uploaded document bytes into plain text for the story parser.
//!
//! Extraction never fails from the caller's point of view: a reader error is reported inline as a
//! bracketed diagnostic (for example `[PDF extraction failed: ...]`) so the user can see why the
//! resulting story is thin.

pub mod docx;
pub mod encoding;
pub mod error;
pub mod format;
pub mod html;
pub mod ocr;
pub mod pdf;

pub use encoding::decode_base64;
pub use error::{ExtractError, ExtractResult};
pub use format::DocumentFormat;
pub use ocr::TesseractOcr;

use docstory_core::Settings;

/// PDFs yielding less text than this are treated as scanned.
pub const MIN_PDF_TEXT_CHARS: usize = 20;

/// Upper bound on pages sent through OCR for a scanned PDF.
pub const MAX_OCR_PDF_PAGES: usize = 10;

/// Knobs controlling extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub enable_html: bool,
    pub enable_ocr: bool,
    pub ocr_lang: String,
    pub max_pages: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for ExtractOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            enable_html: settings.enable_html,
            enable_ocr: settings.enable_ocr,
            ocr_lang: settings.ocr_lang.clone(),
            max_pages: settings.max_pages,
        }
    }
}

/// Format-dispatching extractor.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    options: ExtractOptions,
    ocr: TesseractOcr,
}

impl TextExtractor {
    pub fn new(options: ExtractOptions) -> Self {
        let ocr = TesseractOcr::new(options.ocr_lang.clone());
        Self { options, ocr }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(ExtractOptions::from(settings))
    }

    /// Replaces the OCR backend, e.g. to point at non-default binaries.
    pub fn with_ocr(mut self, ocr: TesseractOcr) -> Self {
        self.ocr = ocr;
        self
    }

    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extracts plain text from `bytes`, using `filename` to pick the reader.
    pub fn extract(&self, filename: &str, bytes: &[u8]) -> String {
        let format = DocumentFormat::detect(filename, bytes);
        tracing::debug!(filename, ?format, size = bytes.len(), "extracting text");

        match format {
            DocumentFormat::Pdf => self.extract_pdf(bytes),
            DocumentFormat::Docx => docx::read_docx_bytes(bytes)
                .unwrap_or_else(|e| failure_note("DOCX extraction failed", &e)),
            DocumentFormat::Markdown | DocumentFormat::Text => {
                encoding::decode_utf8_ignoring_invalid(bytes)
            }
            DocumentFormat::Html if self.options.enable_html => html::read_html_bytes(bytes),
            DocumentFormat::Image if self.options.enable_ocr => self
                .ocr
                .image_to_text(bytes)
                .unwrap_or_else(|e| failure_note("OCR failed", &e)),
            DocumentFormat::Html | DocumentFormat::Image | DocumentFormat::Unknown => {
                encoding::decode_utf8_ignoring_invalid(bytes)
            }
        }
    }

    fn extract_pdf(&self, bytes: &[u8]) -> String {
        let text = match pdf::read_pdf_bytes(bytes, self.options.max_pages) {
            Ok(text) => text,
            Err(e) if self.options.enable_ocr => {
                tracing::warn!(error = %e, "PDF text layer unreadable, trying OCR");
                String::new()
            }
            Err(e) => return failure_note("PDF extraction failed", &e),
        };

        if !self.options.enable_ocr || text.trim().chars().count() >= MIN_PDF_TEXT_CHARS {
            return text;
        }

        let pages = self.options.max_pages.min(MAX_OCR_PDF_PAGES);
        match self.ocr.pdf_to_text(bytes, pages) {
            Ok(ocr_text) => ocr_text,
            Err(e) => failure_note("PDF OCR failed", &e),
        }
    }
}

fn failure_note(what: &str, error: &ExtractError) -> String {
    tracing::warn!(%error, "{what}");
    format!("[{what}: {error}]")
}

/// One-shot convenience around [`TextExtractor::extract`].
pub fn extract_text(filename: &str, bytes: &[u8], options: &ExtractOptions) -> String {
    TextExtractor::new(options.clone()).extract(filename, bytes)
}
