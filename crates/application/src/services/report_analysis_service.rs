//! Medical report analysis
//!
//! Reads an uploaded report (plain text directly, PDFs through their text
//! layer, images through a vision model) and asks the completion providers
//! for a diet plan.

use std::{fmt, sync::Arc};

use domain::{ChatMessage, Conversation, DomainError, ProviderUsed};
use tracing::{debug, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{CompletionOptions, CompletionPort, PdfTextPort, VisionPort},
};

/// Instruction sent with report images
pub const TRANSCRIBE_PROMPT: &str =
    "Transcribe this medical report text exactly. Do not interpret yet, just extract the data.";

const TRANSCRIPT_HEADING: &str = "**Analysis of uploaded report:**";

/// An uploaded report
#[derive(Clone, PartialEq, Eq)]
pub enum ReportDocument {
    /// Already-extracted report text
    Text(String),
    /// Lab report exported as PDF
    Pdf(Vec<u8>),
    /// Photo or scan of a report
    Image { bytes: Vec<u8>, mime_type: String },
}

impl fmt::Debug for ReportDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f
                .debug_struct("Text")
                .field("chars", &text.chars().count())
                .finish(),
            Self::Pdf(bytes) => f.debug_struct("Pdf").field("bytes", &bytes.len()).finish(),
            Self::Image { bytes, mime_type } => f
                .debug_struct("Image")
                .field("bytes", &bytes.len())
                .field("mime_type", mime_type)
                .finish(),
        }
    }
}

impl ReportDocument {
    /// Classify raw upload bytes by content type
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::UnsupportedDocument`] for anything that is not
    /// `text/*`, `application/pdf` or `image/*`.
    pub fn from_bytes(bytes: Vec<u8>, mime_type: &str) -> Result<Self, DomainError> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence.starts_with("text/") {
            Ok(Self::Text(String::from_utf8_lossy(&bytes).into_owned()))
        } else if essence == "application/pdf" {
            Ok(Self::Pdf(bytes))
        } else if essence.starts_with("image/") {
            Ok(Self::Image {
                bytes,
                mime_type: essence,
            })
        } else {
            Err(DomainError::UnsupportedDocument(mime_type.to_string()))
        }
    }

    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }

    /// Short label for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Pdf(_) => "pdf",
            Self::Image { .. } => "image",
        }
    }
}

/// Extracted report text and the diet plan written from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportAnalysis {
    pub extracted_text: String,
    pub diet_plan: String,
    pub provider_used: ProviderUsed,
    pub model: Option<String>,
}

impl ReportAnalysis {
    /// Whether a provider wrote the plan (not the apology)
    #[must_use]
    pub const fn is_answered(&self) -> bool {
        self.provider_used.is_answered()
    }

    /// Assistant message that seeds the health chat with this analysis
    #[must_use]
    pub fn into_transcript_message(self) -> ChatMessage {
        ChatMessage::assistant(format!("{TRANSCRIPT_HEADING}\n\n{}", self.diet_plan))
    }
}

/// Report → extracted text → diet plan
pub struct ReportAnalysisService {
    completion: Arc<dyn CompletionPort>,
    vision: Arc<dyn VisionPort>,
    pdf: Arc<dyn PdfTextPort>,
    options: CompletionOptions,
}

impl fmt::Debug for ReportAnalysisService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportAnalysisService")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ReportAnalysisService {
    pub fn new(
        completion: Arc<dyn CompletionPort>,
        vision: Arc<dyn VisionPort>,
        pdf: Arc<dyn PdfTextPort>,
    ) -> Self {
        Self {
            completion,
            vision,
            pdf,
            options: CompletionOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: CompletionOptions) -> Self {
        self.options = options;
        self
    }

    /// Extract the report text and write a diet plan
    ///
    /// # Errors
    ///
    /// Returns an error if the vision call or PDF extraction fails, or no
    /// text could be read (a scanned PDF without a text layer included).
    /// A failed diet-plan completion is not an error; the plan is then the
    /// apology text.
    #[instrument(skip(self, document), fields(kind = document.kind()))]
    pub async fn analyze(
        &self,
        document: ReportDocument,
    ) -> Result<ReportAnalysis, ApplicationError> {
        let extracted_text = self.extract_text(document).await?;
        debug!(chars = extracted_text.chars().count(), "Report text extracted");

        let conversation =
            Conversation::from_messages([ChatMessage::user(diet_prompt(&extracted_text))]);
        let result = self.completion.resolve(&conversation, &self.options).await;

        info!(provider = %result.provider_used, "Diet plan generated");

        Ok(ReportAnalysis {
            extracted_text,
            diet_plan: result.text.trim().to_string(),
            provider_used: result.provider_used,
            model: result.model,
        })
    }

    async fn extract_text(&self, document: ReportDocument) -> Result<String, ApplicationError> {
        let text = match document {
            ReportDocument::Text(text) => text,
            ReportDocument::Pdf(bytes) => self.pdf.extract_text(&bytes).await?,
            ReportDocument::Image { bytes, mime_type } => {
                self.vision
                    .transcribe_image(&bytes, &mime_type, TRANSCRIBE_PROMPT)
                    .await?
            }
        };

        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::validation("no text could be read from the report").into());
        }
        Ok(text.to_string())
    }
}

fn diet_prompt(report: &str) -> String {
    format!(
        "You are a professional Nutritionist.\n\
         **Patient's Medical Data:**\n\
         {report}\n\n\
         **Task:**\n\
         1. Summarize the key findings from the report (Highs/Lows).\n\
         2. Create a specific, safe Diet Plan based on these findings.\n\
         3. List foods to AVOID and foods to EAT.\n\
         4. DISCLAIMER: Start by stating you are an AI and this is not medical advice."
    )
}
