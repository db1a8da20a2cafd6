//! figgen Code Generator
//!
//! Turns a design node tree into two outputs: markup (HTML or React JSX) and a
//! deduplicated CSS stylesheet. Markup generation folds recognizable child
//! patterns into component props first; CSS synthesis reads the tree as-is.
//!
//! ```text
//! DesignNode → compile() → CompilerOutput { markup, css }
//!                │
//!                ├─ resolve   (icons, form slots, headline → props)
//!                ├─ props     (variant/component props → attributes)
//!                ├─ tag       (node → tag + props + child template)
//!                ├─ markup    (recursive emission, fragment elision)
//!                └─ css       (shared class rules + per-id overrides)
//! ```

pub mod css;
pub mod markup;
pub mod props;
pub mod resolve;
pub mod tag;

use std::fmt;
use std::str::FromStr;

use figgen_model::{slugify, DesignNode};
use serde::Deserialize;
use tracing::debug;

/// Markup flavor to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Html,
    #[serde(alias = "jsx")]
    React,
}

impl Target {
    pub fn is_react(self) -> bool {
        self == Target::React
    }

    /// Attribute carrying the class name.
    pub fn class_attr(self) -> &'static str {
        match self {
            Target::Html => "class",
            Target::React => "className",
        }
    }

    /// File extension for generated markup.
    pub fn extension(self) -> &'static str {
        match self {
            Target::Html => "html",
            Target::React => "jsx",
        }
    }
}

impl FromStr for Target {
    type Err = CodegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(Target::Html),
            "react" | "jsx" => Ok(Target::React),
            _ => Err(CodegenError::UnknownTarget(s.to_string())),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Html => f.write_str("html"),
            Target::React => f.write_str("react"),
        }
    }
}

/// Design-system specific settings for one generation call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub target: Target,
    /// Component tag prefix (`db` → `db-button` / `DBButton`).
    pub prefix: String,
    /// Icon name substituted for `visual=icon`.
    pub default_icon: String,
    /// Image URL substituted for `visual=image`.
    pub default_image: String,
    /// Property keys starting with this character are design-token bindings.
    pub variable_marker: char,
    /// Attribute flagging components with no known mapping.
    pub custom_marker: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            target: Target::Html,
            prefix: "db".into(),
            default_icon: "placeholder".into(),
            default_image: "/images/placeholder.jpg".into(),
            variable_marker: '$',
            custom_marker: "data-custom-component".into(),
        }
    }
}

impl GeneratorConfig {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_default_icon(mut self, icon: impl Into<String>) -> Self {
        self.default_icon = icon.into();
        self
    }

    pub fn with_default_image(mut self, image: impl Into<String>) -> Self {
        self.default_image = image.into();
        self
    }

    pub fn with_variable_marker(mut self, marker: char) -> Self {
        self.variable_marker = marker;
        self
    }

    /// Reject settings that would produce invalid tags or attributes.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if slugify(&self.prefix) != self.prefix {
            return Err(CodegenError::InvalidConfig(format!(
                "prefix '{}' must be lower-case alphanumerics separated by '-'",
                self.prefix
            )));
        }
        if self.variable_marker.is_ascii_alphanumeric() {
            return Err(CodegenError::InvalidConfig(format!(
                "variable marker '{}' would hide ordinary properties",
                self.variable_marker
            )));
        }
        if self.custom_marker.is_empty() || slugify(&self.custom_marker) != self.custom_marker {
            return Err(CodegenError::InvalidConfig(format!(
                "custom marker '{}' is not a valid attribute name",
                self.custom_marker
            )));
        }
        Ok(())
    }
}

/// Counters reported alongside the generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileStats {
    pub nodes: usize,
    pub id_rules: usize,
    pub class_rules: usize,
}

/// The generated code for one design tree.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilerOutput {
    pub markup: String,
    pub css: String,
    pub stats: CompileStats,
}

/// Code generation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodegenError {
    #[error("Unknown target '{0}' (expected 'html' or 'react')")]
    UnknownTarget(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Generate markup and CSS for a design tree.
///
/// `root` is left untouched; resolvers work on a private copy.
pub fn compile(root: &DesignNode, config: &GeneratorConfig) -> Result<CompilerOutput, CodegenError> {
    config.validate()?;

    let markup = markup::generate(root, config);
    let stylesheet = css::synthesize(root);
    let css = stylesheet.render();

    let stats = CompileStats {
        nodes: root.count(),
        id_rules: stylesheet.id_rules.len(),
        class_rules: stylesheet.class_rules.len(),
    };

    debug!(
        target_flavor = %config.target,
        nodes = stats.nodes,
        markup_bytes = markup.len(),
        css_bytes = css.len(),
        "Compiled design tree"
    );

    Ok(CompilerOutput { markup, css, stats })
}
