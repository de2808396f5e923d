//! Domain layer for LifePlanner
//!
//! Contains the conversation model, reply classification and domain errors.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod language_tag;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use language_tag::{LANGUAGE_TAG_INSTRUCTION, ParsedReply, parse_reply};
pub use value_objects::*;
