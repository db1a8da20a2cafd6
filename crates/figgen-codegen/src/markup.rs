//! Markup generator.
//!
//! Walks the design tree depth-first. Each instance is resolved (see
//! [`crate::resolve`]) right before it is rendered, so its folded children
//! never reach the output. Single-child layout containers are transparent:
//! they render their child directly, without a wrapper.

use figgen_model::{derive_class_name, derive_id, DesignNode};

use crate::props::Props;
use crate::resolve::resolve_node;
use crate::tag::resolve_tag;
use crate::GeneratorConfig;

/// Generate markup for a design tree. `root` itself is not modified.
pub fn generate(root: &DesignNode, config: &GeneratorConfig) -> String {
    render(root.clone(), None, config)
}

fn render(mut node: DesignNode, parent: Option<&DesignNode>, config: &GeneratorConfig) -> String {
    resolve_node(&mut node, config);

    if node.is_container() && node.children.len() == 1 {
        if let Some(child) = node.children.pop() {
            return render(child, parent, config);
        }
    }

    let children = std::mem::take(&mut node.children);
    let mut inner = children
        .into_iter()
        .map(|child| render(child, Some(&node), config))
        .filter(|rendered| !rendered.is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    if let Some(text) = &node.text {
        inner.push_str(text);
    }

    let resolved = resolve_tag(&node, parent, config);
    if let Some(template) = &resolved.child_template {
        inner = template.apply(inner.trim());
    }

    if resolved.is_suppressed() {
        return inner;
    }

    let tag = &resolved.tag;
    let attrs = attributes(&node, &resolved.props, config);
    if inner.is_empty() {
        if !config.target.is_react() {
            return String::new();
        }
        if node.is_instance() {
            return format!("<{tag}{attrs} />");
        }
    }
    format!("<{tag}{attrs}>{inner}</{tag}>")
}

/// ` id="…" class="…" key="value"…`, with a leading space.
fn attributes(node: &DesignNode, props: &Props, config: &GeneratorConfig) -> String {
    let mut out = format!(" id=\"{}\"", derive_id(node));

    let class_name = derive_class_name(node);
    if !class_name.is_empty() {
        out.push_str(&format!(" {}=\"{class_name}\"", config.target.class_attr()));
    }

    let flattened = flatten_props(props);
    if !flattened.is_empty() {
        out.push(' ');
        out.push_str(&flattened);
    }
    out
}

/// Render props as attributes: `"false"` is omitted, `"true"` becomes a bare
/// attribute, everything else is `key="value"`.
pub fn flatten_props(props: &Props) -> String {
    props
        .iter()
        .filter_map(|(key, value)| match value.as_str() {
            "false" => None,
            "true" => Some(key.clone()),
            _ => Some(format!("{key}=\"{}\"", escape_attr(value))),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}
