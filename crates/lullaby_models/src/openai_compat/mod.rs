//! Generic OpenAI-compatible API client.
//!
//! Any provider that follows the OpenAI chat completions format (OpenAI,
//! Groq, HuggingFace router, a local mistral.rs or llama.cpp server) can back
//! the pipeline through this client.

mod client;
mod conversions;
mod dto;

pub use client::{DEFAULT_TIMEOUT, OPENAI_CHAT_COMPLETIONS_URL, OpenAICompatibleClient};
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage, ResponseMessage};
