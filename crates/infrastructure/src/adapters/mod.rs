//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod completion_adapter;
mod pdf_text_adapter;
mod speech_adapter;
mod vision_adapter;
mod weather_adapter;
mod websearch_adapter;

pub use completion_adapter::FallbackCompletionAdapter;
pub use pdf_text_adapter::PdfTextAdapter;
pub use speech_adapter::SpeechAdapter;
pub use vision_adapter::GroqVisionAdapter;
pub use weather_adapter::WeatherAdapter;
pub use websearch_adapter::WebSearchAdapter;
