//! Vision adapter - Implements VisionPort using the Groq vision model

use ai_core::{GroqClient, ImageInput, ProviderConfig, ProviderError, VisionProvider};
use application::error::ApplicationError;
use application::ports::VisionPort;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Reads report images through a vision-capable completion call
#[derive(Debug)]
pub struct GroqVisionAdapter {
    client: GroqClient,
}

impl GroqVisionAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the provider configuration is invalid.
    pub fn new(config: ProviderConfig) -> Result<Self, ApplicationError> {
        let client =
            GroqClient::new(config).map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map provider error to application error
    fn map_error(err: ProviderError) -> ApplicationError {
        match err {
            ProviderError::RateLimited => ApplicationError::RateLimited,
            ProviderError::Configuration(e) => ApplicationError::Configuration(e),
            ProviderError::Authentication(e) => {
                ApplicationError::Configuration(format!("vision credentials rejected: {e}"))
            }
            ProviderError::ConnectionFailed(_)
            | ProviderError::Timeout(_)
            | ProviderError::ServerError(_) => ApplicationError::ExternalService(err.to_string()),
            ProviderError::RequestFailed(_)
            | ProviderError::ModelNotAvailable(_)
            | ProviderError::InvalidResponse(_)
            | ProviderError::InvalidRequest(_) => ApplicationError::Inference(err.to_string()),
        }
    }
}

#[async_trait]
impl VisionPort for GroqVisionAdapter {
    #[instrument(skip(self, image, prompt), fields(bytes = image.len()))]
    async fn transcribe_image(
        &self,
        image: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, ApplicationError> {
        let input = ImageInput::new(image.to_vec(), mime_type);
        let response = self
            .client
            .describe_image(&input, prompt)
            .await
            .map_err(Self::map_error)?;

        debug!(
            model = %response.model,
            chars = response.content.len(),
            "Image transcribed"
        );
        Ok(response.content)
    }
}
