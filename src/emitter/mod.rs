// TokenEmitter trait and implementations

pub mod convert;
pub mod css;
pub mod dart;
pub mod typescript;

use crate::ast::{Category, Target, TokenDocument};
use crate::error::EmitError;

/// Trait for emitting one target artifact from the token tree
pub trait TokenEmitter: Send + Sync {
    /// Convert the whole document to target source text
    fn emit(&self, tokens: &TokenDocument) -> Result<String, EmitError> {
        Ok(self.emit_categories(tokens, &Category::ALL)?.join("\n\n"))
    }

    /// Emit several categories in order, dropping empty ones
    fn emit_categories(
        &self,
        tokens: &TokenDocument,
        categories: &[Category],
    ) -> Result<Vec<String>, EmitError> {
        let results: Result<Vec<String>, EmitError> = categories
            .iter()
            .map(|category| self.emit_category(tokens, *category))
            .collect();
        Ok(results?.into_iter().filter(|s| !s.is_empty()).collect())
    }

    /// Emit the entries of a single category
    fn emit_category(&self, tokens: &TokenDocument, category: Category) -> Result<String, EmitError>;

    /// What target does this emitter produce?
    fn target(&self) -> Target;
}
