//! HTTP boundary for UI callers.
//!
//! The patient and doctor surfaces talk to the core exclusively through
//! these routes; there is no template rendering and no session state here.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use types::ApiContext;
