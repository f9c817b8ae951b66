//! OCR through the `tesseract` and `pdftoppm` command-line tools.

use crate::error::{ExtractError, ExtractResult};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// Resolution used when rasterising PDF pages for OCR.
pub const PDF_OCR_DPI: u32 = 200;

/// Invokes the Tesseract binary for images and Poppler's `pdftoppm` to rasterise PDFs.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    pub tesseract_bin: String,
    pub pdftoppm_bin: String,
    pub lang: String,
}

impl TesseractOcr {
    pub fn new(lang: impl Into<String>) -> Self {
        Self {
            tesseract_bin: "tesseract".into(),
            pdftoppm_bin: "pdftoppm".into(),
            lang: lang.into(),
        }
    }

    /// Recognises the text of a single image.
    pub fn image_to_text(&self, bytes: &[u8]) -> ExtractResult<String> {
        let mut image = tempfile::Builder::new().suffix(".img").tempfile()?;
        image.write_all(bytes)?;
        image.flush()?;
        self.image_file_to_text(image.path())
    }

    fn image_file_to_text(&self, path: &Path) -> ExtractResult<String> {
        let output = Command::new(&self.tesseract_bin)
            .arg(path)
            .arg("stdout")
            .args(["-l", &self.lang])
            .output()?;
        if !output.status.success() {
            return Err(ExtractError::Command {
                program: self.tesseract_bin.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Rasterises the first `max_pages` pages and OCRs each one.
    ///
    /// Pages are prefixed with `[Page N OCR]` and separated by blank lines.
    pub fn pdf_to_text(&self, bytes: &[u8], max_pages: usize) -> ExtractResult<String> {
        let workdir = tempfile::tempdir()?;
        let pdf_path = workdir.path().join("input.pdf");
        std::fs::write(&pdf_path, bytes)?;

        let prefix = workdir.path().join("page");
        let output = Command::new(&self.pdftoppm_bin)
            .args(["-r", &PDF_OCR_DPI.to_string()])
            .args(["-f", "1", "-l", &max_pages.to_string()])
            .arg("-png")
            .arg(&pdf_path)
            .arg(&prefix)
            .output()?;
        if !output.status.success() {
            return Err(ExtractError::Command {
                program: self.pdftoppm_bin.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let mut pages: Vec<_> = std::fs::read_dir(workdir.path())?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
            .collect();
        // pdftoppm zero-pads page numbers, so lexical order is page order.
        pages.sort();

        let mut chunks = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            let text = self.image_file_to_text(page)?;
            chunks.push(format!("[Page {} OCR]\n{}", index + 1, text.trim()));
        }
        tracing::debug!(pages = chunks.len(), "OCR'd PDF pages");
        Ok(chunks.join("\n\n"))
    }
}
