// Design-token tree types

use serde_json::{Map, Number, Value};

/// Output targets the generator can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Target {
    Css,
    #[value(name = "typescript", alias = "ts")]
    TypeScript,
    Dart,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Css, Target::TypeScript, Target::Dart];

    /// Default output path, relative to the project root
    pub fn default_path(&self) -> &'static str {
        match self {
            Target::Css => "frontend/styles/tokens.css",
            Target::TypeScript => "frontend/config/design-tokens.ts",
            Target::Dart => "mobile/lib/constants/design_tokens.dart",
        }
    }

    /// Wrap a line in the target's comment syntax
    pub fn comment(&self, text: &str) -> String {
        match self {
            Target::Css => format!("/* {} */", text),
            Target::TypeScript | Target::Dart => format!("// {}", text),
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Css => write!(f, "CSS"),
            Target::TypeScript => write!(f, "TypeScript"),
            Target::Dart => write!(f, "Dart"),
        }
    }
}

/// A scalar token value
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Number(Number), // only fontWeight and lineHeight accept bare numbers
}

impl TokenValue {
    /// The value as it appears in generated source
    pub fn lexeme(&self) -> String {
        match self {
            TokenValue::Text(s) => s.clone(),
            TokenValue::Number(n) => n.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            TokenValue::Text(s) => Value::String(s.clone()),
            TokenValue::Number(n) => Value::Number(n.clone()),
        }
    }
}

/// A node in the token tree: either a scalar or a nested group of nodes
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Leaf(TokenValue),
    Group(TokenGroup),
}

impl TokenNode {
    fn to_json(&self) -> Value {
        match self {
            TokenNode::Leaf(value) => value.to_json(),
            TokenNode::Group(group) => Value::Object(group.to_json()),
        }
    }
}

/// Ordered key → node mapping; source order is preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenGroup {
    entries: Vec<(String, TokenNode)>,
}

impl TokenGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, node: TokenNode) {
        self.entries.push((key.into(), node));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenNode)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&TokenNode> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Look up a leaf by key, ignoring groups
    pub fn leaf(&self, key: &str) -> Option<&TokenValue> {
        match self.get(key)? {
            TokenNode::Leaf(value) => Some(value),
            TokenNode::Group(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect()
    }
}

/// Top-level sections of the token document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Colors,
    Typography,
    Spacing,
    BorderRadius,
    Shadows,
    Breakpoints,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Colors,
        Section::Typography,
        Section::Spacing,
        Section::BorderRadius,
        Section::Shadows,
        Section::Breakpoints,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Colors => "colors",
            Section::Typography => "typography",
            Section::Spacing => "spacing",
            Section::BorderRadius => "borderRadius",
            Section::Shadows => "shadows",
            Section::Breakpoints => "breakpoints",
        }
    }

    pub fn from_key(key: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// Flat token categories, in stylesheet order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Colors,
    FontFamily,
    FontSize,
    FontWeight,
    LineHeight,
    Spacing,
    BorderRadius,
    Shadows,
    Breakpoints,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Colors,
        Category::FontFamily,
        Category::FontSize,
        Category::FontWeight,
        Category::LineHeight,
        Category::Spacing,
        Category::BorderRadius,
        Category::Shadows,
        Category::Breakpoints,
    ];

    pub const TYPOGRAPHY: [Category; 4] = [
        Category::FontFamily,
        Category::FontSize,
        Category::FontWeight,
        Category::LineHeight,
    ];

    /// Custom-property prefix used by the stylesheet
    pub fn css_prefix(&self) -> &'static str {
        match self {
            Category::Colors => "color",
            Category::FontFamily => "font-family",
            Category::FontSize => "font-size",
            Category::FontWeight => "font-weight",
            Category::LineHeight => "line-height",
            Category::Spacing => "spacing",
            Category::BorderRadius => "radius",
            Category::Shadows => "shadow",
            Category::Breakpoints => "breakpoint",
        }
    }

    /// Key of this category inside its section
    pub fn key(&self) -> &'static str {
        match self {
            Category::FontFamily => "fontFamily",
            Category::FontSize => "fontSize",
            Category::FontWeight => "fontWeight",
            Category::LineHeight => "lineHeight",
            other => other.section().key(),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            Category::Colors => Section::Colors,
            Category::FontFamily
            | Category::FontSize
            | Category::FontWeight
            | Category::LineHeight => Section::Typography,
            Category::Spacing => Section::Spacing,
            Category::BorderRadius => Section::BorderRadius,
            Category::Shadows => Section::Shadows,
            Category::Breakpoints => Section::Breakpoints,
        }
    }

    pub fn from_typography_key(key: &str) -> Option<Category> {
        Category::TYPOGRAPHY.into_iter().find(|c| c.key() == key)
    }

    /// Whether leaves of this category are numbers rather than strings
    pub fn is_numeric(&self) -> bool {
        matches!(self, Category::FontWeight | Category::LineHeight)
    }
}

/// Typography sub-groups
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    pub font_family: TokenGroup,
    pub font_size: TokenGroup,
    pub font_weight: TokenGroup,
    pub line_height: TokenGroup,
    /// Source order of the sub-groups
    pub order: Vec<Category>,
}

/// The canonical design-token document
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    pub colors: TokenGroup,
    pub typography: Typography,
    pub spacing: TokenGroup,
    pub border_radius: TokenGroup,
    pub shadows: TokenGroup,
    pub breakpoints: TokenGroup,
    /// Source order of the top-level sections
    pub sections: Vec<Section>,
}

impl TokenDocument {
    /// The group holding a category's tokens
    pub fn group(&self, category: Category) -> &TokenGroup {
        match category {
            Category::Colors => &self.colors,
            Category::FontFamily => &self.typography.font_family,
            Category::FontSize => &self.typography.font_size,
            Category::FontWeight => &self.typography.font_weight,
            Category::LineHeight => &self.typography.line_height,
            Category::Spacing => &self.spacing,
            Category::BorderRadius => &self.border_radius,
            Category::Shadows => &self.shadows,
            Category::Breakpoints => &self.breakpoints,
        }
    }

    /// Rebuild the source JSON, preserving key order at every level
    pub fn to_json(&self) -> Value {
        let mut root = Map::new();
        for section in &self.sections {
            let value = match section {
                Section::Typography => {
                    let typography: Map<String, Value> = self
                        .typography
                        .order
                        .iter()
                        .map(|c| (c.key().to_string(), Value::Object(self.group(*c).to_json())))
                        .collect();
                    Value::Object(typography)
                }
                Section::Colors => Value::Object(self.colors.to_json()),
                Section::Spacing => Value::Object(self.spacing.to_json()),
                Section::BorderRadius => Value::Object(self.border_radius.to_json()),
                Section::Shadows => Value::Object(self.shadows.to_json()),
                Section::Breakpoints => Value::Object(self.breakpoints.to_json()),
            };
            root.insert(section.key().to_string(), value);
        }
        Value::Object(root)
    }

    /// Total number of leaf tokens across all categories
    pub fn leaf_count(&self) -> usize {
        Category::ALL
            .iter()
            .map(|c| {
                self.group(*c)
                    .iter()
                    .map(|(_, node)| match node {
                        TokenNode::Leaf(_) => 1,
                        TokenNode::Group(g) => g.len(),
                    })
                    .sum::<usize>()
            })
            .sum()
    }
}
