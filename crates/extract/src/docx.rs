//! DOCX paragraph text.
//!
//! A DOCX file is a ZIP archive whose body lives in `word/document.xml`. Each `<w:p>` becomes one
//! line; `<w:t>` runs are concatenated, `<w:tab/>` becomes a tab and `<w:br/>` a line break.

use crate::error::{ExtractError, ExtractResult};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use zip::ZipArchive;

const DOCUMENT_XML: &str = "word/document.xml";

/// Reads the paragraph text of a DOCX document, one paragraph per line.
pub fn read_docx_bytes(bytes: &[u8]) -> ExtractResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(format!("failed to open DOCX archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name(DOCUMENT_XML)
        .map_err(|e| ExtractError::Docx(format!("missing {DOCUMENT_XML}: {e}")))?
        .read_to_string(&mut xml)?;

    let paragraphs = paragraphs_from_xml(&xml)?;
    Ok(paragraphs.join("\n").trim().to_owned())
}

fn paragraphs_from_xml(xml: &str) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                b"t" => in_text = false,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text {
                    current.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::Docx(format!("XML parse error: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
