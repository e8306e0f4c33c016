//! Plain-text extraction from uploaded documents.

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Turns raw upload bytes into plain text. Carried in `AppState` as
/// `Arc<dyn TextExtractor>`. Empty text is a valid result (scanned PDFs).
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: Bytes) -> Result<String, AppError>;
}

/// `pdf-extract` backed extractor. Parsing runs on the blocking pool.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: Bytes) -> Result<String, AppError> {
        if !is_pdf(&data) {
            return Err(AppError::Validation(
                "Uploaded file is not a PDF document.".to_string(),
            ));
        }

        let size = data.len();
        // pdf-extract may panic on malformed input; a panicked task surfaces as a JoinError
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| AppError::Extraction(format!("PDF parser aborted: {e}")))?
            .map_err(|e| AppError::Extraction(e.to_string()))?;

        debug!("Extracted {} chars from {size} byte PDF", text.len());
        Ok(text)
    }
}

/// Checks the `%PDF-` magic at the start of the buffer.
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One-page PDF with a Helvetica font and `content` as its page stream.
    /// Cross-reference offsets are computed so the file parses cleanly.
    fn single_page_pdf(content: &str) -> Bytes {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{content}\nendstream",
                content.len()
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }

        let xref_start = pdf.len();
        let size = objects.len() + 1;
        let mut xref = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in offsets {
            xref.push_str(&format!("{offset:010} 00000 n \n"));
        }
        xref.push_str(&format!(
            "trailer\n<< /Size {size} /Root 1 0 R >>\nstartxref\n{xref_start}\n%%EOF\n"
        ));
        pdf.extend_from_slice(xref.as_bytes());

        Bytes::from(pdf)
    }

    #[test]
    fn test_is_pdf_magic() {
        assert!(is_pdf(b"%PDF-1.7\n..."));
        assert!(!is_pdf(b"PK\x03\x04 docx"));
        assert!(!is_pdf(b""));
    }

    #[tokio::test]
    async fn test_non_pdf_is_rejected_as_validation_error() {
        let err = PdfTextExtractor
            .extract(Bytes::from_static(b"just some text"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_extraction_error() {
        let err = PdfTextExtractor
            .extract(Bytes::from_static(b"%PDF-1.4\n%garbage"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }

    #[tokio::test]
    async fn test_text_pdf_returns_its_words() {
        let pdf = single_page_pdf("BT /F1 12 Tf 72 712 Td (java react python) Tj ET");
        let text = PdfTextExtractor.extract(pdf).await.unwrap();

        assert!(text.contains("java react python"), "got {text:?}");
        assert_eq!(crate::screening::engine::count_words(&text), 3);
    }

    #[tokio::test]
    async fn test_pdf_without_text_is_ok_and_blank() {
        // a filled rectangle and no text operators, like a scanned page
        let pdf = single_page_pdf("0 0 100 100 re f");
        let text = PdfTextExtractor.extract(pdf).await.unwrap();

        assert!(text.trim().is_empty(), "got {text:?}");
    }
}
