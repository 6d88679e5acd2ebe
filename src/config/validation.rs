//! Configuration validation
//!
//! Each configuration section implements [`Validate`]; the messages are
//! wrapped into `RelayError::Config` by [`crate::config::Config::validate`].

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
