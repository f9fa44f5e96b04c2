// Shared test fixtures

use serde_json::Value;

use crate::ast::TokenDocument;
use crate::parser::parse_document;

/// The sample document shipped in `design-tokens/`
pub const TOKENS: &str = include_str!("../design-tokens/tokens.json");

pub fn document() -> TokenDocument {
    parse_document(TOKENS).unwrap()
}

/// The sample document with an edit applied, as JSON text
pub fn with(edit: impl FnOnce(&mut Value)) -> String {
    let mut value: Value = serde_json::from_str(TOKENS).unwrap();
    edit(&mut value);
    serde_json::to_string_pretty(&value).unwrap()
}
