//! PDF adapter - Implements PdfTextPort with lopdf

use application::error::ApplicationError;
use application::ports::PdfTextPort;
use async_trait::async_trait;
use domain::DomainError;
use lopdf::Document;
use tracing::{debug, instrument, warn};

/// Reads the text layer of lab report PDFs
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextAdapter;

impl PdfTextAdapter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn read_pages(pdf: &[u8]) -> Result<String, ApplicationError> {
        let document = Document::load_mem(pdf)
            .map_err(|e| DomainError::validation(format!("unreadable PDF: {e}")))?;

        let pages = document.get_pages();
        let mut text = String::new();
        for &number in pages.keys() {
            match document.extract_text(&[number]) {
                Ok(page) => {
                    text.push_str(page.trim_end());
                    text.push('\n');
                }
                Err(e) => warn!(page = number, error = %e, "Skipping unreadable PDF page"),
            }
        }

        debug!(pages = pages.len(), chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

#[async_trait]
impl PdfTextPort for PdfTextAdapter {
    #[instrument(skip(self, pdf), fields(bytes = pdf.len()))]
    async fn extract_text(&self, pdf: &[u8]) -> Result<String, ApplicationError> {
        Self::read_pages(pdf)
    }
}
