//! Error handling for the relay
//!
//! This module defines the relay error type and how each failure kind is
//! rendered as an HTTP response.

mod helpers;
mod response;
mod types;

pub use response::{AccessDeniedDiagnostic, DeadlineExceededBody};
pub use types::{RelayError, Result};
