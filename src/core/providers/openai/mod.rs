//! OpenAI-compatible image edit provider
//!
//! Works against any service exposing `POST {api_base}/images/edits` with
//! bearer authentication and a multipart body.

pub mod client;
pub mod image_edit;

pub use client::OpenAIImageClient;
pub use image_edit::build_edit_form;
