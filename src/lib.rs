//! Product description generator: a one-shot request to a description
//! service with a deterministic template fallback, plus the service itself.

pub mod api;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod form;
pub mod io;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod state;
pub mod templates;

pub use dispatcher::{DescriptionClient, GenerationResult, HttpDescriptionClient, Source};
pub use form::{FormState, Language, Tone};
pub use session::GenerationSession;
