//! Prompt rendering
//!
//! Templates carry `{bg}` and `{size}` placeholders. Substitution is a single
//! pass, so caller-supplied values are never re-expanded.

use crate::config::PromptConfig;

const BG_PLACEHOLDER: &str = "{bg}";
const SIZE_PLACEHOLDER: &str = "{size}";

/// A prompt template with `{bg}` and `{size}` placeholders
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Render the prompt for one request
    pub fn render(&self, bg: &str, size: &str) -> String {
        let mut rendered = String::with_capacity(self.template.len() + bg.len() + size.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let tail = &rest[start..];
            if let Some(after) = tail.strip_prefix(BG_PLACEHOLDER) {
                rendered.push_str(bg);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(SIZE_PLACEHOLDER) {
                rendered.push_str(size);
                rest = after;
            } else {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
        rendered.push_str(rest);

        rendered.trim().to_string()
    }
}

impl From<&PromptConfig> for PromptTemplate {
    fn from(config: &PromptConfig) -> Self {
        Self::new(config.template.clone())
    }
}

/// Resolve the request's `bg` and `size` against the configured defaults
///
/// Blank values count as absent. `size` is only honored when overrides are allowed.
pub fn resolve_params(
    config: &PromptConfig,
    bg: Option<&str>,
    size: Option<&str>,
) -> (String, String) {
    let bg = non_blank(bg).unwrap_or(config.default_bg.as_str());
    let size = if config.allow_size_override {
        non_blank(size).unwrap_or(config.default_size.as_str())
    } else {
        config.default_size.as_str()
    };
    (bg.to_string(), size.to_string())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
