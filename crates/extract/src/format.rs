/// Document formats the extractor knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Markdown,
    Text,
    Html,
    Image,
    Unknown,
}

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const IMAGE_EXTENSIONS: [&str; 5] = [".png", ".jpg", ".jpeg", ".tiff", ".bmp"];

impl DocumentFormat {
    /// Picks a format from the file name, sniffing the content when the extension is unknown.
    pub fn detect(filename: &str, bytes: &[u8]) -> Self {
        match Self::from_filename(filename) {
            Self::Unknown => Self::sniff(bytes),
            known => known,
        }
    }

    /// Format implied by the (case-insensitive) file extension.
    pub fn from_filename(filename: &str) -> Self {
        let name = filename.trim().to_lowercase();
        if name.ends_with(".pdf") {
            Self::Pdf
        } else if name.ends_with(".docx") {
            Self::Docx
        } else if name.ends_with(".md") {
            Self::Markdown
        } else if name.ends_with(".txt") {
            Self::Text
        } else if name.ends_with(".html") || name.ends_with(".htm") {
            Self::Html
        } else if IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)) {
            Self::Image
        } else {
            Self::Unknown
        }
    }

    /// Best-effort detection from magic bytes.
    pub fn sniff(bytes: &[u8]) -> Self {
        let Some(kind) = infer::get(bytes) else {
            return Self::Unknown;
        };
        match kind.mime_type() {
            "application/pdf" => Self::Pdf,
            DOCX_MIME => Self::Docx,
            "text/html" => Self::Html,
            _ if kind.matcher_type() == infer::MatcherType::Image => Self::Image,
            _ => Self::Unknown,
        }
    }
}
