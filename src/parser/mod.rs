// TokenParser trait and implementations

pub mod json;

use crate::ast::TokenDocument;
use crate::error::ParseError;

/// Trait for parsing a source document into the typed token tree
pub trait TokenParser: Send + Sync {
    /// Parse and validate the source text
    fn parse(&self, source: &str) -> Result<TokenDocument, ParseError>;

    /// Short name of the source format, used in logs
    fn format(&self) -> &'static str;
}

/// Parse a JSON token document
pub fn parse_document(source: &str) -> Result<TokenDocument, ParseError> {
    json::JsonTokenParser::new().parse(source)
}
