//! Text extraction for file-modality features (speech transcripts).
//!
//! PDFs are detected by content type or `.pdf` extension and run through
//! `pdf-extract`; anything else must be UTF-8 text.

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No file was uploaded")]
    MissingFile,

    #[error("Uploaded file exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("Could not read PDF: {0}")]
    Pdf(String),

    #[error("Uploaded file is not valid UTF-8 text")]
    NotText,
}

/// A file part received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn is_pdf(&self) -> bool {
        let by_type = self
            .content_type
            .as_deref()
            .is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"));
        let by_name = self
            .file_name
            .as_deref()
            .is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"));
        by_type || by_name
    }
}

/// Extracts the text of an uploaded file, enforcing `max_bytes`.
pub fn extract_text(file: &UploadedFile, max_bytes: usize) -> Result<String, UploadError> {
    if file.data.len() > max_bytes {
        return Err(UploadError::TooLarge { limit: max_bytes });
    }

    if file.is_pdf() {
        return pdf_extract::extract_text_from_mem(&file.data)
            .map_err(|e| UploadError::Pdf(e.to_string()));
    }

    // A UTF-8 BOM is common in exported transcripts.
    let data = file.data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&file.data);
    String::from_utf8(data.to_vec()).map_err(|_| UploadError::NotText)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, content_type: Option<&str>, data: &'static [u8]) -> UploadedFile {
        UploadedFile {
            file_name: Some(name.to_string()),
            content_type: content_type.map(String::from),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_plain_text_upload() {
        let f = file("speech.txt", Some("text/plain"), b"Ladies and gentlemen of the jury");
        assert_eq!(extract_text(&f, 1024).unwrap(), "Ladies and gentlemen of the jury");
    }

    #[test]
    fn test_bom_is_stripped() {
        let f = file("speech.txt", None, b"\xEF\xBB\xBFHello");
        assert_eq!(extract_text(&f, 1024).unwrap(), "Hello");
    }

    #[test]
    fn test_binary_upload_rejected() {
        let f = file("speech.docx", None, &[0xff, 0xfe, 0x00, 0x81]);
        assert_eq!(extract_text(&f, 1024).unwrap_err(), UploadError::NotText);
    }

    #[test]
    fn test_size_limit_enforced() {
        let f = file("speech.txt", None, b"0123456789");
        assert_eq!(
            extract_text(&f, 4).unwrap_err(),
            UploadError::TooLarge { limit: 4 }
        );
    }

    #[test]
    fn test_pdf_detection() {
        assert!(file("a.PDF", None, b"").is_pdf());
        assert!(file("blob", Some("application/pdf"), b"").is_pdf());
        assert!(!file("a.txt", Some("text/plain"), b"").is_pdf());
    }

    #[test]
    fn test_corrupt_pdf_reports_pdf_error() {
        let f = file("speech.pdf", Some("application/pdf"), b"not really a pdf");
        assert!(matches!(extract_text(&f, 1024), Err(UploadError::Pdf(_))));
    }
}
