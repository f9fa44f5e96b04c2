// CSS Emitter

use crate::ast::{Category, Target, TokenDocument};
use crate::error::EmitError;
use super::convert::flatten;
use super::TokenEmitter;

/// Breakpoints that get a `.container` media rule; `2xl` is left out
const CONTAINER_BREAKPOINTS: [&str; 4] = ["sm", "md", "lg", "xl"];

/// Emitter for CSS custom properties
pub struct CssEmitter;

impl CssEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CssEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEmitter for CssEmitter {
    fn target(&self) -> Target {
        Target::Css
    }

    fn emit(&self, tokens: &TokenDocument) -> Result<String, EmitError> {
        let sections = self.emit_categories(tokens, &Category::ALL)?;

        let mut css = String::from(":root {\n");
        css.push_str(&sections.join("\n\n"));
        css.push_str("\n}\n\n");

        css.push_str(
            "/* Utility Classes */\n\
             .container {\n\
             \x20 width: 100%;\n\
             \x20 margin-left: auto;\n\
             \x20 margin-right: auto;\n\
             \x20 padding-left: var(--spacing-4);\n\
             \x20 padding-right: var(--spacing-4);\n\
             }\n\n",
        );

        css.push_str(&self.emit_media_queries(tokens)?.join("\n\n"));
        css.push('\n');
        Ok(css)
    }

    fn emit_category(&self, tokens: &TokenDocument, category: Category) -> Result<String, EmitError> {
        let prefix = category.css_prefix();
        let lines: Vec<String> = flatten(tokens.group(category))
            .iter()
            .map(|token| match token.group {
                Some(group) => format!(
                    "  --{}-{}-{}: {};",
                    prefix,
                    group,
                    token.key,
                    token.value.lexeme()
                ),
                None => format!("  --{}-{}: {};", prefix, token.key, token.value.lexeme()),
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

// CSS emit helpers
impl CssEmitter {
    /// One `.container` rule per breakpoint. Custom properties cannot be
    /// resolved inside a media condition, so the condition uses the literal.
    fn emit_media_queries(&self, tokens: &TokenDocument) -> Result<Vec<String>, EmitError> {
        CONTAINER_BREAKPOINTS
            .iter()
            .map(|key| {
                let width = tokens.breakpoints.leaf(key).ok_or_else(|| {
                    EmitError::new(format!("breakpoint '{}' is required for container rules", key))
                })?;
                Ok(format!(
                    "@media (min-width: {}) {{\n  .container {{ max-width: var(--breakpoint-{}); }}\n}}",
                    width.lexeme(),
                    key
                ))
            })
            .collect()
    }
}
