//! Tag resolution.
//!
//! Decides which tag a node becomes: a layout `div`, a text `p`, a design
//! system component (`db-button` / `DBButton`) or a flagged placeholder for
//! components without a known mapping.

use figgen_model::{pascal_case, slugify, DesignNode, NodeKind};
use tracing::warn;

use crate::props::{normalize_properties, Props};
use crate::{GeneratorConfig, Target};

/// The tag a node renders as. An empty `tag` means the node emits its
/// content without a wrapper.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTag {
    pub tag: String,
    pub props: Props,
    pub child_template: Option<ChildTemplate>,
}

impl ResolvedTag {
    fn plain(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            props: Props::new(),
            child_template: None,
        }
    }

    fn suppressed() -> Self {
        Self::plain("")
    }

    pub fn is_suppressed(&self) -> bool {
        self.tag.is_empty()
    }
}

/// Resolve the tag for `node`, given the node it renders inside.
pub fn resolve_tag(node: &DesignNode, parent: Option<&DesignNode>, config: &GeneratorConfig) -> ResolvedTag {
    match &node.kind {
        NodeKind::Frame | NodeKind::Group => ResolvedTag::plain("div"),
        NodeKind::Text => {
            if parent.is_some_and(|p| is_component(p, config)) {
                ResolvedTag::suppressed()
            } else {
                ResolvedTag::plain("p")
            }
        }
        NodeKind::Instance => resolve_instance(node, parent, config),
        NodeKind::Other(kind) => {
            warn!(node = %node.id, %kind, "Unsupported node type");
            custom(Props::new(), config)
        }
    }
}

/// An instance whose properties name a design system component.
fn is_component(node: &DesignNode, config: &GeneratorConfig) -> bool {
    node.is_instance() && normalize_properties(node, Target::Html, config).contains_key("component")
}

fn resolve_instance(node: &DesignNode, parent: Option<&DesignNode>, config: &GeneratorConfig) -> ResolvedTag {
    let target = config.target;
    let mut props = normalize_properties(node, target, config);

    let component = match props.remove("component") {
        Some(component) if !component.is_empty() => component,
        _ => {
            warn!(node = %node.id, name = %node.name, "Instance without a component mapping");
            return custom(props, config);
        }
    };

    if component == "card" && parent.is_some_and(DesignNode::is_instance) {
        return ResolvedTag::suppressed();
    }

    let prefix = props.remove("prefix").unwrap_or_else(|| config.prefix.clone());
    let child_template = props
        .remove("children")
        .map(|spec| resolve_props_children(&spec, target));

    ResolvedTag {
        tag: component_tag(&prefix, &component, target),
        props,
        child_template,
    }
}

fn custom(mut props: Props, config: &GeneratorConfig) -> ResolvedTag {
    props.insert(config.custom_marker.clone(), "true".to_string());
    ResolvedTag {
        tag: "div".to_string(),
        props,
        child_template: None,
    }
}

/// `db` + `custom-select` → `db-custom-select` or `DBCustomSelect`.
pub fn component_tag(prefix: &str, component: &str, target: Target) -> String {
    match target {
        Target::React => format!(
            "{}{}",
            slugify(prefix).replace('-', "").to_uppercase(),
            pascal_case(component)
        ),
        Target::Html if prefix.is_empty() => slugify(component),
        Target::Html => format!("{}-{}", slugify(prefix), slugify(component)),
    }
}

// =========================================================================
// Child templates
// =========================================================================

/// Form control a component's text content can be wrapped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Checkbox,
    Radio,
    Button,
}

impl Control {
    fn from_token(token: &str) -> Option<Self> {
        if token.contains("checkbox") {
            Some(Control::Checkbox)
        } else if token.contains("radio") {
            Some(Control::Radio)
        } else if token.contains("button") {
            Some(Control::Button)
        } else {
            None
        }
    }

    fn wrap(self, text: &str) -> String {
        match self {
            Control::Checkbox => format!("<label>{text}<input type=\"checkbox\"/></label>"),
            Control::Radio => format!("<label>{text}<input type=\"radio\"/></label>"),
            Control::Button => format!("<button>{text}</button>"),
        }
    }
}

/// Wraps a component's rendered content in the controls its `children`
/// property allows. The first control is used; the others are left behind
/// in a comment as alternatives.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildTemplate {
    controls: Vec<Control>,
    target: Target,
}

impl ChildTemplate {
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn apply(&self, text: &str) -> String {
        let Some((first, alternatives)) = self.controls.split_first() else {
            return text.to_string();
        };

        let mut out = first.wrap(text);
        if !alternatives.is_empty() {
            let alternatives = alternatives
                .iter()
                .map(|c| c.wrap(text))
                .collect::<Vec<_>>()
                .join("\n");
            out.push('\n');
            match self.target {
                Target::Html => out.push_str(&format!("<!--\n{alternatives}\n-->")),
                Target::React => out.push_str(&format!("{{/*\n{alternatives}\n*/}}")),
            }
        }
        out
    }
}

/// Build the child template for a `children` property such as
/// `checkbox-radio-button`.
pub fn resolve_props_children(spec: &str, target: Target) -> ChildTemplate {
    ChildTemplate {
        controls: spec.split('-').filter_map(Control::from_token).collect(),
        target,
    }
}
