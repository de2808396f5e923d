//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod completion_port;
mod pdf_text_port;
mod speech_port;
mod vision_port;
mod weather_port;
mod websearch_port;

#[cfg(test)]
pub use completion_port::MockCompletionPort;
pub use completion_port::{CompletionOptions, CompletionPort};
#[cfg(test)]
pub use pdf_text_port::MockPdfTextPort;
pub use pdf_text_port::PdfTextPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::SpeechPort;
#[cfg(test)]
pub use vision_port::MockVisionPort;
pub use vision_port::VisionPort;
#[cfg(test)]
pub use weather_port::MockWeatherPort;
pub use weather_port::{ForecastSlot, WeatherPort, WeatherSnapshot};
#[cfg(test)]
pub use websearch_port::MockWebSearchPort;
pub use websearch_port::{SearchHit, WebSearchPort, render_hits};
