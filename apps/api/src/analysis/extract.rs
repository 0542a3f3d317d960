//! Best-effort plain-text extraction from uploaded resume documents.

use anyhow::anyhow;

use crate::errors::AppError;

/// Extracts text from an in-memory PDF via `pdf-extract`. Pages with no
/// extractable text contribute nothing rather than failing the document.
/// A document that cannot be parsed at all is an internal (500) error.
pub fn resume_text_from_pdf(bytes: &[u8]) -> Result<String, AppError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Internal(anyhow!("PDF text extraction failed: {e}")))
}

/// Returns true when the upload looks like a PDF (magic bytes check).
pub fn looks_like_pdf(bytes: &[u8]) -> bool {
    bytes.starts_with(b"%PDF-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looks_like_pdf_magic_bytes() {
        assert!(looks_like_pdf(b"%PDF-1.7 rest of file"));
        assert!(!looks_like_pdf(b"plain text resume"));
        assert!(!looks_like_pdf(b""));
    }

    #[test]
    fn test_garbage_bytes_fail_extraction() {
        let result = resume_text_from_pdf(b"not a pdf at all");
        assert!(result.is_err());
    }
}
