//! # plushy-relay
//!
//! A small HTTP relay that turns an uploaded logo into a plush product render.
//!
//! One multipart `POST` comes in with the logo (`file`) and optional `bg` and
//! `size` fields. The relay loads a style reference image, renders the prompt,
//! and sends a single `/images/edits` call to an OpenAI-compatible provider.
//! The first returned image comes back as a PNG data URI.
//!
//! ## Running the relay
//!
//! ```rust,no_run
//! use plushy_relay::{Config, Relay};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/relay.yaml").await?;
//!     let relay = Relay::new(config)?;
//!     relay.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Using the relay without HTTP
//!
//! ```rust,no_run
//! use plushy_relay::{Config, ImageEditRelay, RelayRequest, Upload};
//!
//! # async fn demo(logo: Vec<u8>) -> plushy_relay::Result<()> {
//! let config = Config::from_env()?;
//! let relay = ImageEditRelay::from_config(&config.relay)?;
//! let image = relay
//!     .handle(RelayRequest {
//!         file: Some(Upload::new(logo, Some("logo.png".into()), None)),
//!         bg: Some("#FFFFFF".into()),
//!         ..RelayRequest::default()
//!     })
//!     .await?;
//! println!("{}", image.image.len());
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

pub use config::Config;
pub use crate::core::{
    ImageEditProvider, ImageEditRelay, ImageEditRequest, ImagePart, ProviderReply, RelayImage,
    RelayRequest, Upload,
};
pub use utils::error::{RelayError, Result};

use tracing::info;

/// The relay service: configuration plus the HTTP server
pub struct Relay {
    config: Config,
    server: server::server::HttpServer,
}

impl Relay {
    /// Validate the configuration and prepare the server
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let server = server::server::HttpServer::new(&config)?;
        Ok(Self { config, server })
    }

    /// Serve until shutdown
    pub async fn run(self) -> Result<()> {
        info!("Starting {} v{}", NAME, VERSION);
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
