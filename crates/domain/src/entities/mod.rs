//! Domain entities - Objects with identity and lifecycle

mod audio_artifact;
mod chat_message;
mod conversation;
mod provider_result;

pub use audio_artifact::AudioArtifact;
pub use chat_message::{ChatMessage, MessageMetadata, MessageRole};
pub use conversation::Conversation;
pub use provider_result::{ProviderResult, ProviderUsed};
