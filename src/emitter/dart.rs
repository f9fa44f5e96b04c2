// Dart (Flutter) Emitter

use std::collections::HashMap;

use crate::ast::{Category, Target, TokenDocument, TokenNode};
use crate::error::EmitError;
use super::convert::{
    capitalize, flatten, format_px, hex_to_argb, join_name, member_name, single_quoted, to_px,
};
use super::TokenEmitter;

/// Border radius meaning "fully rounded"
pub const RADIUS_FULL: &str = "9999px";
/// Border radius meaning "no rounding"
pub const RADIUS_NONE: &str = "0";

/// Elevation steps for `AppShadows`; Flutter shadows are built inline
const ELEVATIONS: [u32; 6] = [1, 2, 3, 4, 6, 8];

/// Emitter for Flutter constants
pub struct DartEmitter;

impl DartEmitter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DartEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenEmitter for DartEmitter {
    fn target(&self) -> Target {
        Target::Dart
    }

    fn emit(&self, tokens: &TokenDocument) -> Result<String, EmitError> {
        let typography = self.emit_categories(tokens, &tokens.typography.order)?;

        let classes = [
            self.emit_class(
                "AppColors",
                "Design system colors",
                " // Private constructor to prevent instantiation",
                vec![self.emit_category(tokens, Category::Colors)?],
            ),
            self.emit_class("AppTypography", "Design system typography", "", typography),
            self.emit_class(
                "AppSpacing",
                "Design system spacing",
                "",
                vec![self.emit_category(tokens, Category::Spacing)?],
            ),
            self.emit_class(
                "AppBorderRadius",
                "Design system border radius",
                "",
                vec![self.emit_category(tokens, Category::BorderRadius)?],
            ),
            self.emit_class(
                "AppShadows",
                "Design system shadows",
                "",
                vec![self.emit_category(tokens, Category::Shadows)?],
            ),
            self.emit_class(
                "AppBreakpoints",
                "Design system breakpoints (in logical pixels)",
                "",
                vec![self.emit_category(tokens, Category::Breakpoints)?],
            ),
        ];

        let mut dart = String::from("import 'package:flutter/material.dart';\n\n");
        dart.push_str(&classes.join("\n\n"));
        dart.push('\n');
        Ok(dart)
    }

    fn emit_category(&self, tokens: &TokenDocument, category: Category) -> Result<String, EmitError> {
        let group = tokens.group(category);
        let mut members = Members::default();
        let mut lines = Vec::new();

        match category {
            Category::Colors => return self.emit_colors(tokens, &mut members),
            Category::FontFamily => {
                lines.push("  // Font families".to_string());
                for token in flatten(group) {
                    let family = first_family(&token.value.lexeme());
                    lines.push(format!(
                        "  static const {} = {};",
                        members.claim(join_name("fontFamily", token.key), category, token.key)?,
                        dart_string(&family)
                    ));
                }
            }
            Category::FontSize => {
                lines.push("  // Font sizes (in logical pixels)".to_string());
                for token in flatten(group) {
                    let px = self.px(&token.value.lexeme(), category, token.key)?;
                    let name = members.claim(join_name("fontSize", token.key), category, token.key)?;
                    lines.push(format!("  static const {} = {};", name, px));
                }
            }
            Category::FontWeight => {
                lines.push("  // Font weights".to_string());
                for token in flatten(group) {
                    lines.push(format!(
                        "  static const {} = FontWeight.w{};",
                        members.claim(join_name("fontWeight", token.key), category, token.key)?,
                        token.value.lexeme()
                    ));
                }
            }
            Category::LineHeight => {
                lines.push("  // Line heights".to_string());
                for token in flatten(group) {
                    lines.push(format!(
                        "  static const {} = {};",
                        members.claim(join_name("lineHeight", token.key), category, token.key)?,
                        double_literal(&token.value.lexeme())
                    ));
                }
            }
            Category::Spacing => {
                for token in flatten(group) {
                    let px = self.px(&token.value.lexeme(), category, token.key)?;
                    let name = members.claim(join_name("space", token.key), category, token.key)?;
                    lines.push(format!("  static const {} = {};", name, px));
                }
            }
            Category::BorderRadius => return self.emit_border_radius(tokens, &mut members),
            Category::Shadows => {
                lines.push("  // Note: Flutter shadows are defined inline".to_string());
                lines.push("  // Use BoxShadow with these elevation-like values:".to_string());
                for level in ELEVATIONS {
                    let name = format!("elevation{}", level);
                    members.reserve(&name);
                    lines.push(format!("  static const {} = {}.0;", name, level));
                }
                lines.push(String::new());
                lines.push("  // CSS shadow specifications".to_string());
                for token in flatten(group) {
                    lines.push(format!(
                        "  static const {} = {};",
                        members.claim(member_name(token.key, "shadow"), category, token.key)?,
                        dart_string(&token.value.lexeme())
                    ));
                }
            }
            Category::Breakpoints => {
                for token in flatten(group) {
                    let px = self.px(&token.value.lexeme(), category, token.key)?;
                    let name = members.claim(member_name(token.key, "breakpoint"), category, token.key)?;
                    lines.push(format!("  static const {} = {};", name, px));
                }
            }
        }

        Ok(lines.join("\n"))
    }
}

/// Constant names already used in one class, with the token each came from
#[derive(Default)]
struct Members {
    seen: HashMap<String, String>,
}

impl Members {
    /// Record `name` for `category.key`; two tokens folding to one name is an error
    fn claim(&mut self, name: String, category: Category, key: &str) -> Result<String, EmitError> {
        self.claim_path(name, format!("{}.{}", category.key(), key))
    }

    fn claim_path(&mut self, name: String, path: String) -> Result<String, EmitError> {
        if let Some(previous) = self.seen.get(&name) {
            return Err(EmitError::new(format!(
                "'{}' and '{}' both map to the Dart constant '{}'",
                previous, path, name
            )));
        }
        self.seen.insert(name.clone(), path);
        Ok(name)
    }

    /// Names the class emits on its own, not from a token
    fn reserve(&mut self, name: &str) {
        self.seen.insert(name.to_string(), "built-in".to_string());
    }
}

// Dart emit helpers
impl DartEmitter {
    fn emit_class(&self, name: &str, doc: &str, ctor_comment: &str, sections: Vec<String>) -> String {
        let body: Vec<String> = sections.into_iter().filter(|s| !s.is_empty()).collect();
        let mut class = format!("/// {}\nclass {} {{\n  {}._();{}\n", doc, name, name, ctor_comment);
        if !body.is_empty() {
            class.push('\n');
            class.push_str(&body.join("\n\n"));
            class.push('\n');
        }
        class.push('}');
        class
    }

    /// Grouped palettes get a heading comment; bare colors a single line
    fn emit_colors(&self, tokens: &TokenDocument, members: &mut Members) -> Result<String, EmitError> {
        let mut blocks = Vec::new();
        for (name, node) in tokens.colors.iter() {
            match node {
                TokenNode::Leaf(value) => {
                    blocks.push(format!(
                        "  static const {} = {};",
                        members.claim_path(member_name(name, "color"), format!("colors.{}", name))?,
                        self.color(&value.lexeme(), name)?
                    ));
                }
                TokenNode::Group(shades) => {
                    let mut lines = vec![format!("  // {} colors", capitalize(name))];
                    for (shade, shade_node) in shades.iter() {
                        if let TokenNode::Leaf(value) = shade_node {
                            let path = format!("{}.{}", name, shade);
                            let member = join_name(&member_name(name, "color"), shade);
                            lines.push(format!(
                                "  static const {} = {};",
                                members.claim_path(member, format!("colors.{}", path))?,
                                self.color(&value.lexeme(), &path)?
                            ));
                        }
                    }
                    blocks.push(lines.join("\n"));
                }
            }
        }
        Ok(blocks.join("\n\n"))
    }

    /// Sentinels map to fixed descriptors; the `circular*` view skips them
    fn emit_border_radius(&self, tokens: &TokenDocument, members: &mut Members) -> Result<String, EmitError> {
        let mut descriptors = Vec::new();
        let mut circular = vec!["  // Circular radius values".to_string()];

        for token in flatten(&tokens.border_radius) {
            let name = members.claim(member_name(token.key, "radius"), Category::BorderRadius, token.key)?;
            let value = token.value.lexeme();
            match value.as_str() {
                RADIUS_FULL => descriptors.push(format!(
                    "  static const {} = BorderRadius.all(Radius.circular(9999));",
                    name
                )),
                RADIUS_NONE => descriptors.push(format!("  static const {} = BorderRadius.zero;", name)),
                _ => {
                    let px = self.px(&value, Category::BorderRadius, token.key)?;
                    descriptors.push(format!(
                        "  static const {} = BorderRadius.all(Radius.circular({}));",
                        name, px
                    ));
                    let circular_name =
                        members.claim(join_name("circular", token.key), Category::BorderRadius, token.key)?;
                    circular.push(format!("  static const {} = {};", circular_name, px));
                }
            }
        }

        Ok(format!("{}\n\n{}", descriptors.join("\n"), circular.join("\n")))
    }

    fn px(&self, value: &str, category: Category, key: &str) -> Result<String, EmitError> {
        to_px(value)
            .map(format_px)
            .map_err(|e| EmitError::new(format!("{}.{}: {}", category.key(), key, e.message)))
    }

    fn color(&self, hex: &str, path: &str) -> Result<String, EmitError> {
        hex_to_argb(hex)
            .map(|argb| format!("Color({})", argb))
            .map_err(|e| EmitError::new(format!("colors.{}: {}", path, e.message)))
    }
}

/// First entry of a font stack, quotes stripped
fn first_family(stack: &str) -> String {
    stack
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .chars()
        .filter(|c| *c != '\'' && *c != '"')
        .collect()
}

/// Single-quoted Dart string; `$` would start an interpolation
fn dart_string(s: &str) -> String {
    single_quoted(s).replace('$', "\\$")
}

/// Dart needs a decimal point to type the constant as `double`
fn double_literal(lexeme: &str) -> String {
    if lexeme.contains(['.', 'e', 'E']) {
        lexeme.to_string()
    } else {
        format!("{}.0", lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use crate::parser::parse_document;

    fn emit_sample() -> String {
        DartEmitter::new().emit(&fixtures::document()).unwrap()
    }

    #[test]
    fn test_color_constants() {
        let dart = emit_sample();

        assert!(dart.contains("  // Primary colors\n  static const primary50 = Color(0xFFEFF6FF);"), "Got:\n{}", dart);
        assert!(dart.contains("  static const primary500 = Color(0xFF3B82F6);"));
        assert!(dart.contains("  static const primary600 = Color(0xFF2563EB);"));
        assert!(dart.contains("  static const neutralWhite = Color(0xFFFFFFFF);"));
        assert!(dart.contains("  static const semanticSuccess = Color(0xFF10B981);"));
        assert!(dart.contains("  AppColors._(); // Private constructor to prevent instantiation"));
    }

    #[test]
    fn test_bare_color_constant() {
        let doc = parse_document(&fixtures::with(|v| {
            v["colors"]["brand"] = "#aabbcc".into();
        }))
        .unwrap();

        let colors = DartEmitter::new().emit_category(&doc, Category::Colors).unwrap();
        assert!(colors.contains("  static const brand = Color(0xFFAABBCC);"), "Got:\n{}", colors);
    }

    #[test]
    fn test_typography_constants() {
        let dart = emit_sample();

        assert!(dart.contains("  static const fontFamilySans = 'Inter';"), "Got:\n{}", dart);
        assert!(dart.contains("  static const fontFamilyMono = 'JetBrains Mono';"));
        assert!(dart.contains("  static const fontSizeBase = 16.0;"));
        assert!(dart.contains("  static const fontSizeXs = 12.0;"));
        assert!(dart.contains("  static const fontSize2xl = 24.0;"));
        assert!(dart.contains("  static const fontWeightSemibold = FontWeight.w600;"));
        assert!(dart.contains("  static const lineHeightTight = 1.25;"));
        assert!(dart.contains("  static const lineHeightLoose = 2.0;"));
    }

    #[test]
    fn test_quoted_font_family() {
        let doc = parse_document(&fixtures::with(|v| {
            v["typography"]["fontFamily"]["serif"] = "\"Source Serif\", Georgia, serif".into();
        }))
        .unwrap();

        let fonts = DartEmitter::new().emit_category(&doc, Category::FontFamily).unwrap();
        assert!(fonts.contains("  static const fontFamilySerif = 'Source Serif';"), "Got:\n{}", fonts);
    }

    #[test]
    fn test_spacing_constants() {
        let dart = emit_sample();

        assert!(dart.contains("  static const space0 = 0.0;"), "Got:\n{}", dart);
        assert!(dart.contains("  static const space1 = 4.0;"));
        assert!(dart.contains("  static const space4 = 16.0;"));
        assert!(dart.contains("  static const space32 = 128.0;"));
    }

    #[test]
    fn test_border_radius_sentinels() {
        let dart = emit_sample();

        assert!(dart.contains("  static const full = BorderRadius.all(Radius.circular(9999));"), "Got:\n{}", dart);
        assert!(dart.contains("  static const none = BorderRadius.zero;"));
        assert!(dart.contains("  static const md = BorderRadius.all(Radius.circular(6.0));"));
        assert!(dart.contains("  static const radius2xl = BorderRadius.all(Radius.circular(16.0));"));
    }

    #[test]
    fn test_circular_view_skips_sentinels() {
        let dart = emit_sample();

        assert!(dart.contains("  // Circular radius values\n  static const circularSm = 2.0;"), "Got:\n{}", dart);
        assert!(dart.contains("  static const circular2xl = 16.0;"));
        assert!(dart.contains("  static const circular3xl = 24.0;"));
        assert!(!dart.contains("circularFull"));
        assert!(!dart.contains("circularNone"));
    }

    #[test]
    fn test_fixed_elevation_scale() {
        let dart = emit_sample();

        for level in ELEVATIONS {
            assert!(dart.contains(&format!("  static const elevation{} = {}.0;", level, level)));
        }

        // independent of the document
        let doc = parse_document(&fixtures::with(|v| {
            v["shadows"] = serde_json::json!({});
        }))
        .unwrap();
        let shadows = DartEmitter::new().emit_category(&doc, Category::Shadows).unwrap();
        assert!(shadows.contains("elevation8 = 8.0;"));
    }

    #[test]
    fn test_shadow_and_breakpoint_constants() {
        let dart = emit_sample();

        assert!(dart.contains("  static const inner = 'inset 0 2px 4px 0 rgba(0, 0, 0, 0.06)';"), "Got:\n{}", dart);
        assert!(dart.contains("  static const shadow2xl = '0 25px 50px -12px rgba(0, 0, 0, 0.25)';"));
        assert!(dart.contains("class AppBreakpoints {"));
        assert!(dart.contains("  static const sm = 640.0;"));
        assert!(dart.contains("  static const breakpoint2xl = 1536.0;"));
    }

    #[test]
    fn test_class_layout() {
        let dart = emit_sample();

        assert!(dart.starts_with("import 'package:flutter/material.dart';\n\n/// Design system colors\nclass AppColors {\n"));
        for class in ["AppColors", "AppTypography", "AppSpacing", "AppBorderRadius", "AppShadows", "AppBreakpoints"] {
            assert!(dart.contains(&format!("class {} {{\n  {}._();", class, class)), "Missing {}", class);
        }
        assert!(dart.ends_with("}\n"));
    }

    #[test]
    fn test_unconvertible_length() {
        let doc = parse_document(&fixtures::with(|v| {
            v["spacing"]["4"] = "1em".into();
        }))
        .unwrap();

        let err = DartEmitter::new().emit(&doc).unwrap_err();
        assert!(err.message.contains("spacing.4"), "Got: {}", err);
    }

    #[test]
    fn test_colliding_names_rejected() {
        let doc = parse_document(&fixtures::with(|v| {
            v["typography"]["fontWeight"]["extra-bold"] = "800".into();
            v["typography"]["fontWeight"]["extraBold"] = "900".into();
        }))
        .unwrap();

        let err = DartEmitter::new().emit(&doc).unwrap_err();
        assert!(err.message.contains("'fontWeight.extra-bold'"), "Got: {}", err);
        assert!(err.message.contains("'fontWeight.extraBold'"), "Got: {}", err);
        assert!(err.message.contains("'fontWeightExtraBold'"), "Got: {}", err);
    }

    #[test]
    fn test_bare_color_colliding_with_palette() {
        let doc = parse_document(&fixtures::with(|v| {
            v["colors"]["primary500"] = "#000000".into();
        }))
        .unwrap();

        let err = DartEmitter::new().emit_category(&doc, Category::Colors).unwrap_err();
        assert!(err.message.contains("'colors.primary.500'"), "Got: {}", err);
        assert!(err.message.contains("'colors.primary500'"), "Got: {}", err);
    }

    #[test]
    fn test_shadow_named_like_elevation() {
        let doc = parse_document(&fixtures::with(|v| {
            v["shadows"]["elevation2"] = "0 0 2px black".into();
        }))
        .unwrap();

        let err = DartEmitter::new().emit_category(&doc, Category::Shadows).unwrap_err();
        assert!(err.message.contains("'elevation2'"), "Got: {}", err);
    }

    #[test]
    fn test_all_caps_keys() {
        let doc = parse_document(&fixtures::with(|v| {
            v["borderRadius"]["DEFAULT"] = "0.25rem".into();
        }))
        .unwrap();

        let radius = DartEmitter::new().emit_category(&doc, Category::BorderRadius).unwrap();
        assert!(
            radius.contains("  static const radiusDefault = BorderRadius.all(Radius.circular(4.0));"),
            "Got:\n{}",
            radius
        );
        assert!(radius.contains("  static const circularDefault = 4.0;"));
        assert!(!radius.contains("dEFAULT"));
    }

    #[test]
    fn test_double_literal() {
        assert_eq!(double_literal("2"), "2.0");
        assert_eq!(double_literal("1.5"), "1.5");
        assert_eq!(double_literal("1e2"), "1e2");
    }

    #[test]
    fn test_dart_string_escapes_interpolation() {
        assert_eq!(dart_string("$price"), "'\\$price'");
    }
}
