// JSON token document parser

use serde_json::{Map, Value};

use crate::ast::{
    Category, Section, TokenDocument, TokenGroup, TokenNode, TokenValue, Typography,
};
use crate::error::ParseError;
use super::TokenParser;

/// Parser for the canonical `tokens.json` document
pub struct JsonTokenParser;

impl JsonTokenParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonTokenParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenParser for JsonTokenParser {
    fn format(&self) -> &'static str {
        "json"
    }

    fn parse(&self, source: &str) -> Result<TokenDocument, ParseError> {
        // Step 1: syntax
        let value: Value = serde_json::from_str(source)?;

        // Step 2: shape, into the typed tree
        self.convert_document(&value)
    }
}

// Conversion helpers
impl JsonTokenParser {
    fn convert_document(&self, value: &Value) -> Result<TokenDocument, ParseError> {
        let root = expect_object(value, "document")?;

        let mut sections = Vec::new();
        for key in root.keys() {
            match Section::from_key(key) {
                Some(section) => sections.push(section),
                None => {
                    return Err(ParseError::with_location(
                        "unknown top-level field",
                        key.as_str(),
                    ))
                }
            }
        }

        for section in Section::ALL {
            if !sections.contains(&section) {
                return Err(ParseError::new(format!(
                    "missing required field '{}'",
                    section.key()
                )));
            }
        }

        let colors = self.convert_colors(&root[Section::Colors.key()])?;
        let typography = self.convert_typography(&root[Section::Typography.key()])?;
        let spacing = self.convert_flat(&root[Section::Spacing.key()], Category::Spacing, "spacing")?;
        let border_radius = self.convert_flat(
            &root[Section::BorderRadius.key()],
            Category::BorderRadius,
            "borderRadius",
        )?;
        let shadows = self.convert_flat(&root[Section::Shadows.key()], Category::Shadows, "shadows")?;
        let breakpoints = self.convert_flat(
            &root[Section::Breakpoints.key()],
            Category::Breakpoints,
            "breakpoints",
        )?;
        self.check_ascending(&breakpoints)?;

        Ok(TokenDocument {
            colors,
            typography,
            spacing,
            border_radius,
            shadows,
            breakpoints,
            sections,
        })
    }

    /// Colors are either a bare color or one level of shade → color
    fn convert_colors(&self, value: &Value) -> Result<TokenGroup, ParseError> {
        let palettes = expect_object(value, "colors")?;
        let mut colors = TokenGroup::new();

        for (name, entry) in palettes {
            let path = format!("colors.{}", name);
            let node = match entry {
                Value::String(hex) => TokenNode::Leaf(self.convert_color(hex, &path)?),
                Value::Object(shades) => {
                    let mut group = TokenGroup::new();
                    for (shade, color) in shades {
                        let path = format!("{}.{}", path, shade);
                        match color {
                            Value::String(hex) => {
                                group.push(shade.as_str(), TokenNode::Leaf(self.convert_color(hex, &path)?))
                            }
                            other => {
                                return Err(ParseError::with_location(
                                    format!("expected a color string, found {}", describe(other)),
                                    path,
                                ))
                            }
                        }
                    }
                    TokenNode::Group(group)
                }
                other => {
                    return Err(ParseError::with_location(
                        format!("expected a color or a group of colors, found {}", describe(other)),
                        path,
                    ))
                }
            };
            colors.push(name.as_str(), node);
        }

        Ok(colors)
    }

    fn convert_color(&self, hex: &str, path: &str) -> Result<TokenValue, ParseError> {
        if is_hex_color(hex) {
            Ok(TokenValue::Text(hex.to_string()))
        } else {
            Err(ParseError::with_location(
                format!("'{}' is not a #RRGGBB color", hex),
                path,
            ))
        }
    }

    fn convert_typography(&self, value: &Value) -> Result<Typography, ParseError> {
        let fields = expect_object(value, "typography")?;

        let mut order = Vec::new();
        for key in fields.keys() {
            match Category::from_typography_key(key) {
                Some(category) => order.push(category),
                None => {
                    return Err(ParseError::with_location(
                        "unknown typography group",
                        format!("typography.{}", key),
                    ))
                }
            }
        }

        let group = |category: Category| -> Result<TokenGroup, ParseError> {
            let path = format!("typography.{}", category.key());
            match fields.get(category.key()) {
                Some(value) => self.convert_flat(value, category, &path),
                None => Err(ParseError::new(format!("missing required field '{}'", path))),
            }
        };

        Ok(Typography {
            font_family: group(Category::FontFamily)?,
            font_size: group(Category::FontSize)?,
            font_weight: group(Category::FontWeight)?,
            line_height: group(Category::LineHeight)?,
            order,
        })
    }

    /// Convert a single-level key → scalar mapping
    fn convert_flat(
        &self,
        value: &Value,
        category: Category,
        path: &str,
    ) -> Result<TokenGroup, ParseError> {
        let entries = expect_object(value, path)?;
        let mut group = TokenGroup::new();

        for (key, entry) in entries {
            let path = format!("{}.{}", path, key);
            let token = match entry {
                Value::String(s) => TokenValue::Text(s.clone()),
                Value::Number(n) if category.is_numeric() => TokenValue::Number(n.clone()),
                other => {
                    return Err(ParseError::with_location(
                        format!("expected a string, found {}", describe(other)),
                        path,
                    ))
                }
            };
            self.check_value(category, &token, &path)?;
            group.push(key.as_str(), TokenNode::Leaf(token));
        }

        Ok(group)
    }

    /// Per-category value constraints
    fn check_value(&self, category: Category, token: &TokenValue, path: &str) -> Result<(), ParseError> {
        let lexeme = token.lexeme();
        match category {
            Category::FontWeight => {
                let valid = lexeme
                    .parse::<u32>()
                    .map(|w| (100..=900).contains(&w) && w % 100 == 0 && w.to_string() == lexeme)
                    .unwrap_or(false);
                if !valid {
                    return Err(ParseError::with_location(
                        format!("font weight '{}' must be 100-900 in steps of 100", lexeme),
                        path,
                    ));
                }
            }
            Category::LineHeight => {
                if !lexeme.parse::<f64>().map(f64::is_finite).unwrap_or(false) {
                    return Err(ParseError::with_location(
                        format!("line height '{}' must be a unitless number", lexeme),
                        path,
                    ));
                }
            }
            Category::Breakpoints => {
                if parse_px(&lexeme).is_none() {
                    return Err(ParseError::with_location(
                        format!("breakpoint '{}' must be a pixel length", lexeme),
                        path,
                    ));
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Media queries cascade correctly only when breakpoints ascend
    fn check_ascending(&self, breakpoints: &TokenGroup) -> Result<(), ParseError> {
        let mut previous: Option<(&str, f64)> = None;
        for (key, node) in breakpoints.iter() {
            let px = match node {
                TokenNode::Leaf(value) => parse_px(&value.lexeme()),
                TokenNode::Group(_) => None,
            };
            let Some(px) = px else { continue };
            if let Some((prev_key, prev_px)) = previous {
                if px <= prev_px {
                    return Err(ParseError::with_location(
                        format!("breakpoint must be larger than '{}' ({}px)", prev_key, prev_px),
                        format!("breakpoints.{}", key),
                    ));
                }
            }
            previous = Some((key, px));
        }
        Ok(())
    }
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ParseError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ParseError::with_location(
            format!("expected an object, found {}", describe(other)),
            path,
        )),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn parse_px(s: &str) -> Option<f64> {
    s.strip_suffix("px")?.parse::<f64>().ok().filter(|v| v.is_finite())
}
