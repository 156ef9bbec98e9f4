//! Question answering over the legal vector index.
//!
//! [`Agent`] retrieves the chunks closest to a question, renders them into
//! the configured prompt and asks a [`Generator`] for the answer. Every
//! failure inside [`Agent::handle_query`] becomes a plain-text reply.

pub mod agent;
pub mod generator;
pub mod messages;
pub mod state;

pub use agent::{Agent, AgentError, CONTEXT_SEPARATOR};
pub use generator::{parse_generation_response, strip_prompt_echo, GenerationError, Generator, HuggingFaceClient};
pub use state::AgentState;
