//! Query-processing pipeline.
//!
//! One linear workflow per submission: attach patient context, draft an
//! answer, score the draft, persist for doctor review. Steps short-circuit
//! once an error is recorded on the state.

pub mod evaluate;
pub mod generate;
pub mod ollama;
pub mod orchestrator;
pub mod prompt;
pub mod scenarios;
pub mod state;

pub use orchestrator::QueryPipeline;
pub use state::PipelineState;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Rejected before any step runs; no record is created.
    #[error("Invalid submission: {0}")]
    Validation(String),

    /// The store could not persist the processed query. Fatal for the
    /// request; nothing partial is left behind.
    #[error("Failed to save query for review: {0}")]
    Persistence(#[from] DatabaseError),
}
