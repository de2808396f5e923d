//! Vision port - Interface for reading text out of images

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for vision-capable completion calls
#[cfg_attr(test, automock)]
#[async_trait]
pub trait VisionPort: Send + Sync {
    /// Ask a vision model to follow `prompt` for the given image
    ///
    /// # Arguments
    /// * `image` - Encoded image bytes
    /// * `mime_type` - Image content type, e.g. `image/jpeg`
    /// * `prompt` - Instruction sent alongside the image
    async fn transcribe_image(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn VisionPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn VisionPort>();
    }
}
