//! Template rendering for generated script files.
use crate::error::{Error, Result};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// Replaces `#KEY#` placeholders with the matching context value.
///
/// The context must be a JSON object. String values are inserted as-is,
/// other values in their JSON form. Placeholders without a matching key are
/// left untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let Some(values) = context.as_object() else {
            return Err(Error::TemplateError(
                "placeholder context must be a JSON object".to_string(),
            ));
        };

        let mut rendered = template.to_string();
        for (key, value) in values {
            let replacement = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            rendered = rendered.replace(&format!("#{}#", key), &replacement);
        }
        Ok(rendered)
    }
}
