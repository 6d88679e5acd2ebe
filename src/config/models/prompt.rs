//! Prompt configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Template used when none is configured. `{bg}` and `{size}` are replaced per request.
pub const DEFAULT_PROMPT_TEMPLATE: &str = "\
Combine the visual style of the first image (soft plush, ribbed-knit coral material) with the uploaded logo.
Output a soft plush speech-bubble pillow (rounded square with a small tail) in bright coral ribbed knit.
Place the uploaded logo as a white chenille patch centered on the front, slightly raised, clean edges.
The object FLOATS (no ground shadow). Gentle {bg} background. Composition {size}.
Soft studio lighting, gentle depth-of-field (background slightly blurred), logo crisp.
Photoreal textile detail (fine ribbing, soft fibers).
Do not add any extra text or watermarks.";

/// Prompt and request defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Background used when the caller sends no `bg`
    #[serde(default = "default_bg")]
    pub default_bg: String,
    /// Output size used when the caller sends no `size`
    #[serde(default = "default_size")]
    pub default_size: String,
    /// Whether the caller's `size` field is honored
    #[serde(default = "default_true")]
    pub allow_size_override: bool,
    /// Prompt text with `{bg}` and `{size}` placeholders
    #[serde(default = "default_template")]
    pub template: String,
}

fn default_template() -> String {
    DEFAULT_PROMPT_TEMPLATE.to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            default_bg: default_bg(),
            default_size: default_size(),
            allow_size_override: true,
            template: default_template(),
        }
    }
}

impl Validate for PromptConfig {
    /// Validate prompt configuration
    fn validate(&self) -> Result<(), String> {
        if self.default_bg.trim().is_empty() {
            return Err("Default background cannot be empty".to_string());
        }
        if !is_valid_size(&self.default_size) {
            return Err(format!(
                "Default size must look like WIDTHxHEIGHT, got: {}",
                self.default_size
            ));
        }
        if self.template.trim().is_empty() {
            return Err("Prompt template cannot be empty".to_string());
        }
        Ok(())
    }
}
