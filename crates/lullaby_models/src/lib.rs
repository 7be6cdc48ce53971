//! LLM provider integrations for Lullaby.
//!
//! Each provider implements [`lullaby_interface::GenerationClient`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai_compat;

pub use openai_compat::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage,
    DEFAULT_TIMEOUT, OPENAI_CHAT_COMPLETIONS_URL, OpenAICompatibleClient, ResponseMessage,
};
