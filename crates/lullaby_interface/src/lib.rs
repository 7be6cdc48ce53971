//! Trait definitions for the Lullaby story generation service.
//!
//! The pipeline only ever talks to a language model through
//! [`GenerationClient`], so any provider (or a test double) can back it.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;

pub use client::GenerationClient;
