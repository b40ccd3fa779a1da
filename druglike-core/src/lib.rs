//! Shared primitives for the druglike workspace.
//!
//! - **Error types** — [`DruglikeError`] and [`Result`] for structured error handling
//! - **Traits** — [`Annotated`] and [`Summarizable`], implemented by molecules,
//!   descriptor records and datasets

pub mod error;
pub mod traits;

pub use error::{DruglikeError, Result};
pub use traits::*;
