//! Common test utilities for plushy-relay
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures::{ConfigFactory, MultipartBody};
//!
//! #[actix_web::test]
//! async fn my_test() {
//!     let config = ConfigFactory::with_provider("http://127.0.0.1:9999");
//!     let (content_type, body) = MultipartBody::new().file("logo.png", b"PNG").build();
//!     // ...
//! }
//! ```


pub use fixtures::{ConfigFactory, MultipartBody};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
