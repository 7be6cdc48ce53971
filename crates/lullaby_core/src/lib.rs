//! Core data types for the Lullaby story generation service.
//!
//! This crate provides the request, format flag, stage names and the per-run
//! [`StageContext`] shared by the pipeline and the HTTP server.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod format;
mod request;
mod stage;

pub use context::StageContext;
pub use format::Format;
pub use request::{GenerationRequest, GenerationRequestBuilder, GenerationRequestBuilderError};
pub use stage::{ContextSlot, StageName};
