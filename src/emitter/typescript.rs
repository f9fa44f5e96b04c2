// TypeScript Emitter

use crate::ast::{Category, Section, Target, TokenDocument, TokenGroup, TokenNode, TokenValue};
use crate::error::EmitError;
use super::convert::{is_identifier, single_quoted};
use super::TokenEmitter;

/// Emitter for the typed TypeScript module
pub struct TypeScriptEmitter;

impl TypeScriptEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TypeScriptEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEmitter for TypeScriptEmitter {
    fn target(&self) -> Target {
        Target::TypeScript
    }

    fn emit(&self, tokens: &TokenDocument) -> Result<String, EmitError> {
        let literal = serde_json::to_string_pretty(&tokens.to_json())
            .map_err(|e| EmitError::new(format!("cannot serialise document: {}", e)))?;

        let mut ts = format!("export const designTokens = {} as const;\n\n", literal);
        ts.push_str("export type DesignTokens = typeof designTokens;\n\n");

        let namespaces = [
            ("colors", "Type-safe color accessors", vec![Category::Colors]),
            ("spacing", "Spacing utilities", vec![Category::Spacing]),
            ("typography", "Typography utilities", tokens.typography.order.clone()),
            ("borderRadius", "Border radius utilities", vec![Category::BorderRadius]),
            ("shadows", "Shadow utilities", vec![Category::Shadows]),
            ("breakpoints", "Breakpoint utilities", vec![Category::Breakpoints]),
        ];

        for (name, comment, categories) in &namespaces {
            let body = self.emit_categories(tokens, categories)?;

            ts.push_str(&format!("// {}\nexport const {} = {{\n", comment, name));
            for entries in body {
                ts.push_str(&entries);
                ts.push('\n');
            }
            ts.push_str("} as const;\n\n");
        }

        ts.push_str("// Default export\nexport default {\n");
        for (name, _, _) in &namespaces {
            ts.push_str(&format!("  {},\n", name));
        }
        ts.push_str("};\n");

        Ok(ts)
    }

    fn emit_category(&self, tokens: &TokenDocument, category: Category) -> Result<String, EmitError> {
        let group = tokens.group(category);
        match category.section() {
            // typography categories nest one level inside the namespace
            Section::Typography => {
                let mut lines = vec![format!("  {}: {{", property_key(category.key()))];
                self.emit_entries(group, category, 2, &mut lines);
                lines.push("  },".to_string());
                Ok(lines.join("\n"))
            }
            _ => {
                let mut lines = Vec::new();
                self.emit_entries(group, category, 1, &mut lines);
                Ok(lines.join("\n"))
            }
        }
    }
}

// TypeScript emit helpers
impl TypeScriptEmitter {
    /// Walk a group in source order, nesting groups as object literals
    fn emit_entries(&self, group: &TokenGroup, category: Category, depth: usize, lines: &mut Vec<String>) {
        let indent = "  ".repeat(depth);
        for (key, node) in group.iter() {
            match node {
                TokenNode::Leaf(value) => {
                    lines.push(format!(
                        "{}{}: {} as const,",
                        indent,
                        property_key(key),
                        self.emit_value(value, category)
                    ));
                }
                TokenNode::Group(inner) => {
                    lines.push(format!("{}{}: {{", indent, property_key(key)));
                    self.emit_entries(inner, category, depth + 1, lines);
                    lines.push(format!("{}}},", indent));
                }
            }
        }
    }

    /// Font weights and line heights are numbers, everything else a string
    fn emit_value(&self, value: &TokenValue, category: Category) -> String {
        if category.is_numeric() {
            value.lexeme()
        } else {
            single_quoted(&value.lexeme())
        }
    }
}

/// Bare identifiers and canonical integers stay unquoted
fn property_key(key: &str) -> String {
    let canonical_integer = !key.is_empty()
        && key.chars().all(|c| c.is_ascii_digit())
        && (key == "0" || !key.starts_with('0'));

    if is_identifier(key) || canonical_integer {
        key.to_string()
    } else {
        single_quoted(key)
    }
}
