// Main TokenGenerator

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::debug;

use crate::ast::{Target, TokenDocument};
use crate::emitter::css::CssEmitter;
use crate::emitter::dart::DartEmitter;
use crate::emitter::typescript::TypeScriptEmitter;
use crate::emitter::TokenEmitter;
use crate::error::GenerateError;
use crate::parser::json::JsonTokenParser;
use crate::parser::TokenParser;

const BANNER: &str = "Auto-generated from design tokens - DO NOT EDIT MANUALLY";

/// One generated file, not yet written anywhere
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub target: Target,
    pub contents: String,
}

pub struct TokenGenerator {
    parser: Box<dyn TokenParser>,
    emitters: HashMap<Target, Box<dyn TokenEmitter>>,
    generated_at: Option<DateTime<Utc>>,
}

impl TokenGenerator {
    pub fn new() -> Self {
        let mut emitters: HashMap<Target, Box<dyn TokenEmitter>> = HashMap::new();

        let registered: [Box<dyn TokenEmitter>; 3] = [
            Box::new(CssEmitter::new()),
            Box::new(TypeScriptEmitter::new()),
            Box::new(DartEmitter::new()),
        ];
        for emitter in registered {
            emitters.insert(emitter.target(), emitter);
        }

        Self {
            parser: Box::new(JsonTokenParser::new()),
            emitters,
            generated_at: None,
        }
    }

    /// Stamp every artifact with a `Last generated` line
    pub fn with_timestamp(mut self, generated_at: DateTime<Utc>) -> Self {
        self.generated_at = Some(generated_at);
        self
    }

    /// Parse and validate a source document
    pub fn parse(&self, source: &str) -> Result<TokenDocument, GenerateError> {
        let tokens = self.parser.parse(source)?;
        debug!(
            format = self.parser.format(),
            tokens = tokens.leaf_count(),
            "parsed token document"
        );
        Ok(tokens)
    }

    /// Emit one artifact
    pub fn generate(&self, tokens: &TokenDocument, target: Target) -> Result<Artifact, GenerateError> {
        let emitter = self
            .emitters
            .get(&target)
            .ok_or(GenerateError::UnsupportedTarget(target))?;

        let body = emitter
            .emit(tokens)
            .map_err(|source| GenerateError::Emit { target, source })?;

        let mut contents = self.banner(target);
        contents.push_str(&body);
        debug!(artifact = %target, bytes = contents.len(), "emitted artifact");

        Ok(Artifact { target, contents })
    }

    /// Emit every requested artifact, or none of them
    pub fn generate_all(
        &self,
        tokens: &TokenDocument,
        targets: &[Target],
    ) -> Result<Vec<Artifact>, GenerateError> {
        targets
            .iter()
            .map(|target| self.generate(tokens, *target))
            .collect()
    }

    /// Convert source text straight to one target
    pub fn convert(&self, source: &str, target: Target) -> Result<String, GenerateError> {
        // 1. Parse source → token tree
        let tokens = self.parse(source)?;

        // 2. Emit target source
        let artifact = self.generate(&tokens, target)?;

        Ok(artifact.contents)
    }

    fn banner(&self, target: Target) -> String {
        let mut banner = target.comment(BANNER);
        banner.push('\n');
        if let Some(at) = &self.generated_at {
            let stamp = format!("Last generated: {}", at.to_rfc3339_opts(SecondsFormat::Millis, true));
            banner.push_str(&target.comment(&stamp));
            banner.push('\n');
        }
        banner.push('\n');
        banner
    }
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Category, TokenNode};
    use crate::emitter::convert::{flatten, format_px, hex_to_argb, to_px};
    use crate::fixtures;
    use chrono::TimeZone;

    #[test]
    fn test_generate_all_targets() {
        let generator = TokenGenerator::new();
        let doc = fixtures::document();

        let artifacts = generator.generate_all(&doc, &Target::ALL).unwrap();

        assert_eq!(artifacts.len(), 3);
        assert_eq!(artifacts[0].target, Target::Css);
        assert!(artifacts[0].contents.starts_with("/* Auto-generated from design tokens - DO NOT EDIT MANUALLY */\n\n:root {"));
        assert!(artifacts[1].contents.starts_with("// Auto-generated from design tokens - DO NOT EDIT MANUALLY\n\nexport const designTokens"));
        assert!(artifacts[2].contents.starts_with("// Auto-generated from design tokens - DO NOT EDIT MANUALLY\n\nimport 'package:flutter/material.dart';"));
    }

    #[test]
    fn test_timestamp_banner() {
        let at = Utc.with_ymd_and_hms(2025, 11, 12, 2, 42, 23).unwrap();
        let generator = TokenGenerator::new().with_timestamp(at);

        let css = generator.convert(fixtures::TOKENS, Target::Css).unwrap();
        assert!(css.contains("/* Last generated: 2025-11-12T02:42:23.000Z */\n\n:root {"), "Got:\n{}", css);

        let dart = generator.convert(fixtures::TOKENS, Target::Dart).unwrap();
        assert!(dart.contains("// Last generated: 2025-11-12T02:42:23.000Z\n\nimport"));
    }

    #[test]
    fn test_idempotent_apart_from_timestamp() {
        let doc = fixtures::document();
        let first = TokenGenerator::new()
            .with_timestamp(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
            .generate_all(&doc, &Target::ALL)
            .unwrap();
        let second = TokenGenerator::new()
            .with_timestamp(Utc.with_ymd_and_hms(2026, 6, 1, 12, 30, 0).unwrap())
            .generate_all(&doc, &Target::ALL)
            .unwrap();

        let strip = |s: &str| -> String {
            s.lines()
                .filter(|l| !l.contains("Last generated:"))
                .collect::<Vec<_>>()
                .join("\n")
        };
        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.contents, b.contents);
            assert_eq!(strip(&a.contents), strip(&b.contents));
        }

        // unstamped output is byte-identical
        let plain = TokenGenerator::new();
        assert_eq!(
            plain.generate_all(&doc, &Target::ALL).unwrap(),
            plain.generate_all(&doc, &Target::ALL).unwrap()
        );
    }

    #[test]
    fn test_every_leaf_reaches_every_artifact() {
        let generator = TokenGenerator::new();
        let doc = fixtures::document();
        let artifacts = generator.generate_all(&doc, &Target::ALL).unwrap();
        let (css, ts, dart) = (&artifacts[0].contents, &artifacts[1].contents, &artifacts[2].contents);

        for category in Category::ALL {
            for token in flatten(doc.group(category)) {
                let raw = token.value.lexeme();
                assert!(css.contains(&format!(": {};", raw)), "{} missing from CSS", raw);
                assert!(ts.contains(&raw), "{} missing from TypeScript", raw);

                let converted = match category {
                    Category::Colors => hex_to_argb(&raw).unwrap(),
                    Category::FontSize | Category::Spacing | Category::Breakpoints => {
                        format!("= {};", format_px(to_px(&raw).unwrap()))
                    }
                    Category::BorderRadius if raw == "9999px" => "Radius.circular(9999)".to_string(),
                    Category::BorderRadius if raw == "0" => "BorderRadius.zero".to_string(),
                    Category::BorderRadius => format!("= {};", format_px(to_px(&raw).unwrap())),
                    Category::FontWeight => format!("FontWeight.w{};", raw),
                    Category::FontFamily => raw.split(',').next().unwrap().trim().to_string(),
                    Category::LineHeight | Category::Shadows => raw.clone(),
                };
                assert!(dart.contains(&converted), "{} ({}) missing from Dart", raw, converted);
            }
        }
    }

    #[test]
    fn test_naming_agrees_across_targets() {
        let generator = TokenGenerator::new();
        let doc = fixtures::document();

        let primary = match doc.colors.get("primary") {
            Some(TokenNode::Group(g)) => g,
            other => panic!("Expected primary group, got {:?}", other),
        };
        assert_eq!(primary.leaf("500").unwrap().lexeme(), "#3B82F6");

        let dart = generator.generate(&doc, Target::Dart).unwrap().contents;
        let ts = generator.generate(&doc, Target::TypeScript).unwrap().contents;
        assert!(dart.contains("static const primary500 = Color(0xFF3B82F6);"));
        assert!(ts.contains("  primary: {\n    50: '#EFF6FF' as const,"));
        assert!(ts.contains("    500: '#3B82F6' as const,"));
    }

    #[test]
    fn test_unregistered_target() {
        let mut generator = TokenGenerator::new();
        generator.emitters.remove(&Target::Dart);
        let doc = fixtures::document();

        let err = generator.generate_all(&doc, &Target::ALL).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedTarget(Target::Dart)), "Got: {:?}", err);
        assert_eq!(err.to_string(), "Unsupported target: Dart");
        assert!(generator.generate(&doc, Target::Css).is_ok());
    }

    #[test]
    fn test_parse_failure_emits_nothing() {
        let generator = TokenGenerator::new();
        let source = fixtures::with(|v| {
            v.as_object_mut().unwrap().remove("colors");
        });

        let err = generator.convert(&source, Target::Css).unwrap_err();
        assert!(matches!(err, GenerateError::Parse(_)), "Got: {:?}", err);
    }

    #[test]
    fn test_emit_failure_names_target() {
        let generator = TokenGenerator::new();
        let source = fixtures::with(|v| {
            v["typography"]["fontSize"]["base"] = "100%".into();
        });
        let doc = generator.parse(&source).unwrap();

        let err = generator.generate_all(&doc, &Target::ALL).unwrap_err();
        assert!(matches!(err, GenerateError::Emit { target: Target::Dart, .. }), "Got: {:?}", err);
        assert!(err.to_string().starts_with("Dart: "), "Got: {}", err);

        // CSS and TypeScript pass values through untouched
        assert!(generator.generate(&doc, Target::Css).is_ok());
        assert!(generator.generate(&doc, Target::TypeScript).is_ok());
    }
}
