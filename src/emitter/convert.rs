// Shared traversal, naming and unit helpers

use crate::ast::{TokenGroup, TokenNode, TokenValue};
use crate::error::EmitError;

/// Pixels per `rem`
pub const REM_PX: f64 = 16.0;

/// One leaf of a two-level token category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatToken<'a> {
    /// Enclosing group key, `None` for a leaf stored directly on the category
    pub group: Option<&'a str>,
    pub key: &'a str,
    pub value: &'a TokenValue,
}

/// Walk a category: groups recurse one level, leaves yield themselves.
pub fn flatten(group: &TokenGroup) -> Vec<FlatToken<'_>> {
    let mut tokens = Vec::new();
    for (key, node) in group.iter() {
        match node {
            TokenNode::Leaf(value) => tokens.push(FlatToken { group: None, key, value }),
            TokenNode::Group(inner) => {
                for (leaf_key, leaf) in inner.iter() {
                    // the parser rejects anything deeper
                    if let TokenNode::Leaf(value) = leaf {
                        tokens.push(FlatToken {
                            group: Some(key),
                            key: leaf_key,
                            value,
                        });
                    }
                }
            }
        }
    }
    tokens
}

/// `extra-bold` → `extraBold`; digits and already-camel keys pass through.
/// An all-caps key (`DEFAULT`, `EXTRA_BOLD`) is lowercased word by word.
pub fn lower_camel(key: &str) -> String {
    let all_caps = key.chars().any(|c| c.is_ascii_uppercase()) && !key.chars().any(|c| c.is_ascii_lowercase());

    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for c in key.chars() {
        if c.is_ascii_alphanumeric() {
            if upper_next && !out.is_empty() {
                out.push(c.to_ascii_uppercase());
            } else if out.is_empty() || all_caps {
                out.push(c.to_ascii_lowercase());
            } else {
                out.push(c);
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    out
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Combine a group key and a leaf key into one flat identifier
pub fn join_name(group: &str, key: &str) -> String {
    format!("{}{}", group, capitalize(&lower_camel(key)))
}

/// Identifier for a bare key; keys starting with a digit or clashing with a
/// Dart reserved word get `stem` in front
pub fn member_name(key: &str, stem: &str) -> String {
    let name = lower_camel(key);
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", stem, name)
    } else if DART_RESERVED.contains(&name.as_str()) {
        join_name(stem, &name)
    } else {
        name
    }
}

const DART_RESERVED: [&str; 33] = [
    "assert", "break", "case", "catch", "class", "const", "continue", "default", "do", "else",
    "enum", "extends", "false", "final", "finally", "for", "if", "in", "is", "new", "null",
    "rethrow", "return", "super", "switch", "this", "throw", "true", "try", "var", "void",
    "while", "with",
];

pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Convert a length to pixels: `0`, `<n>rem` and `<n>px` are supported
pub fn to_px(length: &str) -> Result<f64, EmitError> {
    let length = length.trim();
    if length == "0" {
        return Ok(0.0);
    }

    let (magnitude, scale) = if let Some(n) = length.strip_suffix("rem") {
        (n, REM_PX)
    } else if let Some(n) = length.strip_suffix("px") {
        (n, 1.0)
    } else {
        return Err(EmitError::new(format!(
            "cannot convert '{}' to pixels (expected rem or px)",
            length
        )));
    };

    match magnitude.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n * scale),
        _ => Err(EmitError::new(format!("invalid length '{}'", length))),
    }
}

/// Exactly one digit after the decimal point
pub fn format_px(px: f64) -> String {
    format!("{:.1}", px)
}

/// `#2563EB` → `0xFF2563EB`
pub fn hex_to_argb(hex: &str) -> Result<String, EmitError> {
    match hex.strip_prefix('#') {
        Some(rgb) if rgb.len() == 6 && rgb.chars().all(|c| c.is_ascii_hexdigit()) => {
            Ok(format!("0xFF{}", rgb.to_ascii_uppercase()))
        }
        _ => Err(EmitError::new(format!("'{}' is not a #RRGGBB color", hex))),
    }
}

/// Escape a value for a single-quoted string literal
pub fn single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}
