//! PDF text port - Interface for reading the text layer of a PDF

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for PDF text extraction
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PdfTextPort: Send + Sync {
    /// Text of every page, in page order
    ///
    /// A scanned PDF without a text layer yields an empty string, not an
    /// error. Bytes that are not a readable PDF are a domain validation error.
    async fn extract_text(&self, pdf: &[u8]) -> Result<String, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn PdfTextPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn PdfTextPort>();
    }
}
