//! Server module.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod fields;
pub mod errors;
mod health;
mod issues;
pub mod metrics;
pub mod server;

pub use errors::{Result, ServerError};
pub use issues::rejection_body;
