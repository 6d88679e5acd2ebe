//! Core relay functionality
//!
//! - **relay**: the image edit relay, one request in, one provider call out
//! - **prompt**: prompt template rendering
//! - **style**: style reference loading strategies
//! - **deadline**: bounded provider calls with scoped cancellation
//! - **providers**: image edit provider trait and the OpenAI client

pub mod deadline;
pub mod prompt;
pub mod providers;
pub mod relay;
pub mod style;

pub use deadline::run_with_deadline;
pub use prompt::PromptTemplate;
pub use providers::{ImageEditProvider, ImageEditRequest, ImagePart, ProviderReply};
pub use relay::{ImageEditRelay, RelayImage, RelayRequest, Upload};
pub use style::StyleReferenceLoader;
