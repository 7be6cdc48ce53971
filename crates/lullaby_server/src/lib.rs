//! HTTP surface and configuration for the Lullaby story service.
//!
//! - [`LullabyConfig`]: layered process configuration
//! - [`create_router`]: axum router with `/generate-story`, `/generate-poem`
//!   and `/health`
//! - [`serve`]: bind and run until shutdown

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod error;
mod server;

pub use api::{AppState, StoryResponse, create_router};
pub use config::{
    ENV_PREFIX, FALLBACK_API_KEY_VAR, LullabyConfig, LullabyConfigBuilder,
    LullabyConfigBuilderError, LullabySettings,
};
pub use error::{ApiError, ErrorBody};
pub use server::serve;
