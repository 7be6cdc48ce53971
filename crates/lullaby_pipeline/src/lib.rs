//! Three-stage diary to story generation pipeline.
//!
//! A request flows through a fixed sequence of stages:
//!
//! 1. **Analyze**: extract the dominant emotion and a short event summary
//! 2. **Draft**: write a story or poem starring the chosen character
//! 3. **Adjust**: rewrite the draft to convey the requested mood
//!
//! Each stage reads earlier outputs from the run's [`StageContext`] and writes
//! its own slot. The adjust stage's output is the final text.
//!
//! # Example
//!
//! ```no_run
//! use lullaby_core::GenerationRequest;
//! use lullaby_interface::GenerationClient;
//! use lullaby_pipeline::Pipeline;
//! use std::sync::Arc;
//!
//! # async fn run(client: Arc<dyn GenerationClient>) -> lullaby_error::LullabyResult<()> {
//! let pipeline = Pipeline::new(client, "gpt-4o-mini");
//! let request = GenerationRequest::builder()
//!     .diary("It rained all day.")
//!     .mood("calm")
//!     .character("Rabbit")
//!     .build()
//!     .unwrap();
//! let story = pipeline.run(request).await?;
//! println!("{story}");
//! # Ok(())
//! # }
//! ```
//!
//! [`StageContext`]: lullaby_core::StageContext

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cleanup;
mod execution;
mod pipeline;
pub mod prompts;
mod selector;
mod stage;

pub use execution::{PipelineExecution, StageExecution};
pub use pipeline::{Pipeline, PipelineResult};
pub use selector::{StageSet, select, select_by_flag};
pub use stage::{PromptTemplate, Stage, StagePersona};
