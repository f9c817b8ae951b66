use crate::error::{ExtractError, ExtractResult};
use pdf_oxide::PdfDocument;
use std::io::Write;

/// Reads the text of the first `max_pages` pages, one page after another.
///
/// `PdfDocument` opens from a path, so the bytes are spooled to a temporary file first.
pub fn read_pdf_bytes(bytes: &[u8], max_pages: usize) -> ExtractResult<String> {
    let mut spool = tempfile::Builder::new().suffix(".pdf").tempfile()?;
    spool.write_all(bytes)?;
    spool.flush()?;

    let mut doc = PdfDocument::open(spool.path()).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    let page_count = doc
        .page_count()
        .map_err(|e| ExtractError::Pdf(e.to_string()))?;

    let mut parts = Vec::new();
    for page in 0..page_count.min(max_pages) {
        match doc.extract_text(page) {
            Ok(text) => parts.push(text),
            Err(e) => {
                tracing::warn!(page, error = %e, "skipping unreadable PDF page");
                parts.push(String::new());
            }
        }
    }

    Ok(parts.join("\n").trim().to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_an_error() {
        let err = read_pdf_bytes(b"not a pdf at all", 5).unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
