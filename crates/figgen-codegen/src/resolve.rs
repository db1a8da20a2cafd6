//! Structural resolvers.
//!
//! A component instance in the design tree often spells out content that the
//! coded component takes as a prop: an icon layer, a `*` required marker, a
//! placeholder text layer. Each resolver finds such children, removes them
//! and records the derived value as a variant property of the instance.
//!
//! All resolvers share [`take_matching`]: the matching children are taken
//! from the first node (depth-first, starting at the instance) that has any.
//! The search descends through every child, nested instances included, so the
//! outermost instance claims a slot before the instances inside it see it.

use figgen_model::{slugify, DesignNode};
use tracing::{trace, warn};

use crate::props::normalize_properties;
use crate::{GeneratorConfig, Target};

/// Resolve every instance in the tree, returning a new tree.
///
/// Resolving an already resolved tree is a no-op.
pub fn resolve_tree(root: &DesignNode, config: &GeneratorConfig) -> DesignNode {
    let mut root = root.clone();
    resolve_subtree(&mut root, config);
    root
}

fn resolve_subtree(node: &mut DesignNode, config: &GeneratorConfig) {
    resolve_node(node, config);
    for child in &mut node.children {
        resolve_subtree(child, config);
    }
}

/// Run every resolver on `node` itself. Only instances are affected.
pub(crate) fn resolve_node(node: &mut DesignNode, config: &GeneratorConfig) {
    if !node.is_instance() {
        return;
    }
    resolve_icons(node);
    resolve_required(node);
    resolve_placeholder(node);
    resolve_value(node);
    resolve_label(node);
    resolve_info_text(node, config);
    resolve_headline(node);
}

/// Remove and return the children of the first node that has children
/// matching `pred`. Remaining children keep their order.
pub fn take_matching(
    node: &mut DesignNode,
    pred: &dyn Fn(&DesignNode) -> bool,
) -> Vec<DesignNode> {
    if node.children.iter().any(|c| pred(c)) {
        let (matched, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut node.children)
            .into_iter()
            .partition(|c| pred(c));
        node.children = kept;
        return matched;
    }

    for child in &mut node.children {
        let matched = take_matching(child, pred);
        if !matched.is_empty() {
            return matched;
        }
    }

    Vec::new()
}

/// Take matching children and store `derive(matched)` under `key`.
fn fold(
    node: &mut DesignNode,
    key: &str,
    pred: &dyn Fn(&DesignNode) -> bool,
    derive: impl FnOnce(&[DesignNode]) -> String,
) {
    let matched = take_matching(node, pred);
    if matched.is_empty() {
        return;
    }
    trace!(node = %node.id, key, matched = matched.len(), "Folded children into property");
    let value = derive(&matched);
    node.variant_properties.insert(key.to_string(), value);
}

/// Text of a node, or of its first text descendant.
fn text_of(node: &DesignNode) -> &str {
    node.find(&|n| n.text.is_some())
        .and_then(|n| n.text.as_deref())
        .unwrap_or_default()
}

fn joined_text(nodes: &[DesignNode]) -> String {
    nodes.iter().map(text_of).collect::<Vec<_>>().join("\n")
}

fn slug_is(node: &DesignNode, name: &str) -> bool {
    slugify(&node.name) == name
}

// =========================================================================
// Resolvers
// =========================================================================

fn resolve_icons(node: &mut DesignNode) {
    let containers = take_matching(node, &|c| c.name.to_lowercase().contains("icon"));

    for container in &containers {
        let Some(instance) = container.find(&DesignNode::is_instance) else {
            warn!(node = %node.id, container = %container.name, "Icon container without an instance");
            continue;
        };
        let icon = icon_name(instance);
        let position = slugify(&container.name);
        let key = if position.contains("leading") {
            "icon"
        } else if position.contains("trailing") {
            "iconAfter"
        } else {
            warn!(node = %node.id, container = %container.name, %icon, "Dropped icon without a position");
            continue;
        };
        trace!(node = %node.id, key, %icon, "Resolved icon");
        node.variant_properties.insert(key.to_string(), icon);
    }
}

/// `Icon / Star` → `star`.
fn icon_name(instance: &DesignNode) -> String {
    let source = instance
        .component_name
        .as_deref()
        .or(instance.main_component_name.as_deref())
        .unwrap_or("unknown");
    let slug = slugify(source);
    match slug.strip_prefix("icon-") {
        Some(rest) => rest.to_string(),
        None => slug,
    }
}

fn resolve_required(node: &mut DesignNode) {
    fold(
        node,
        "required",
        &|c| c.text.as_deref() == Some("*"),
        |_| "true".to_string(),
    );
}

fn resolve_placeholder(node: &mut DesignNode) {
    fold(
        node,
        "placeholder",
        &|c| slugify(&c.name).contains("placeholder"),
        joined_text,
    );
}

fn resolve_value(node: &mut DesignNode) {
    fold(node, "value", &|c| slug_is(c, "input-text"), joined_text);
}

fn resolve_label(node: &mut DesignNode) {
    let primary = take_matching(node, &|c| slug_is(c, "label"));
    let screen_reader = take_matching(node, &|c| slug_is(c, "label-screenreader"));

    let source = if !primary.is_empty() {
        primary
    } else if !screen_reader.is_empty() {
        screen_reader
    } else {
        return;
    };
    node.variant_properties
        .insert("label".to_string(), joined_text(&source));
}

fn resolve_info_text(node: &mut DesignNode, config: &GeneratorConfig) {
    let own = normalize_properties(node, Target::Html, config);
    let validation = own.get("validation").cloned();
    let show_message = own.get("show-message").is_some_and(|v| v == "true");
    if validation.is_none() && !show_message {
        return;
    }

    let key = match validation.as_deref() {
        Some("valid") => "validMessage",
        Some("invalid") => "invalidMessage",
        _ => "message",
    };
    fold(
        node,
        key,
        &|c| {
            normalize_properties(c, Target::Html, config)
                .get("component")
                .is_some_and(|v| v == "infotext")
        },
        |matched| {
            matched
                .iter()
                .map(|m| m.children.first().map(text_of).unwrap_or_default())
                .collect::<Vec<_>>()
                .join("\n")
        },
    );
}

fn resolve_headline(node: &mut DesignNode) {
    fold(node, "headlinePlain", &|c| slug_is(c, "headline"), joined_text);
}
