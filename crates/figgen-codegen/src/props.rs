//! Property normalizer.
//!
//! Turns a component instance's variant and component properties into the
//! attribute map emitted on its tag.

use std::collections::BTreeMap;

use figgen_model::{camel_case, slugify, DesignNode};

use crate::{GeneratorConfig, Target};

/// Normalized attributes, keyed by attribute name.
pub type Props = BTreeMap<String, String>;

/// Keys whose values are free-form user text and are never slugified.
const PASSTHROUGH_KEYS: &[&str] = &[
    "placeholder",
    "label",
    "value",
    "message",
    "valid-message",
    "invalid-message",
    "placement",
    "headline-plain",
];

/// Component properties allowed to override a variant property of the same name.
const BOOLEAN_OVERRIDE_KEYS: &[&str] = &[
    "disabled",
    "checked",
    "required",
    "show-icon",
    "show-message",
    "show-label",
];

/// Component properties that only describe alternative layers in the host.
const ALTERNATIVE_PREFIX: &str = "↳ OR ";

/// Value prefix marking the default choice of a variant axis.
const DEFAULT_VALUE_PREFIX: &str = "def-";

/// Normalize the properties of `node` for `target`.
pub fn normalize_properties(node: &DesignNode, target: Target, config: &GeneratorConfig) -> Props {
    let mut props = Props::new();
    let mut defaults = Vec::new();

    for (raw_key, raw_value) in &node.variant_properties {
        match normalize_entry(raw_key, raw_value, config) {
            Some(Entry::Plain(key, value)) => {
                props.insert(key, value);
            }
            Some(Entry::Default(key, value)) => defaults.push((key, value)),
            None => {}
        }
    }

    for (raw_key, raw_value) in &node.component_properties {
        if raw_key.starts_with(ALTERNATIVE_PREFIX) {
            continue;
        }
        let name = raw_key.split_once('#').map_or(raw_key.as_str(), |(name, _)| name);
        match normalize_entry(name, &raw_value.to_attr_string(), config) {
            Some(Entry::Plain(key, value)) => {
                if props.contains_key(&key) && !BOOLEAN_OVERRIDE_KEYS.contains(&key.as_str()) {
                    continue;
                }
                props.insert(key, value);
            }
            Some(Entry::Default(key, value)) => defaults.push((key, value)),
            None => {}
        }
    }

    // Substituted defaults never replace content resolved from the tree.
    for (key, value) in defaults {
        props.entry(key).or_insert(value);
    }

    match target {
        Target::Html => props,
        Target::React => props
            .into_iter()
            .map(|(key, value)| (react_key(&key), value))
            .collect(),
    }
}

enum Entry {
    Plain(String, String),
    Default(String, String),
}

fn normalize_entry(raw_key: &str, raw_value: &str, config: &GeneratorConfig) -> Option<Entry> {
    if raw_key.starts_with(config.variable_marker) {
        return None;
    }
    let key = slugify(raw_key);
    if key.is_empty() {
        return None;
    }
    if PASSTHROUGH_KEYS.contains(&key.as_str()) {
        return Some(Entry::Plain(key, raw_value.to_string()));
    }

    let value = slugify(raw_value);
    let value = value.strip_prefix(DEFAULT_VALUE_PREFIX).unwrap_or(&value);
    let value = strip_key(value, &key);

    Some(match (key.as_str(), value) {
        ("visual", "icon") => Entry::Default("icon".into(), config.default_icon.clone()),
        ("visual", "image") => Entry::Default("image".into(), config.default_image.clone()),
        _ => Entry::Plain(key.clone(), value.to_string()),
    })
}

/// `size-large` under key `size` → `large`.
fn strip_key<'a>(value: &'a str, key: &str) -> &'a str {
    let value = value
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix('-'))
        .unwrap_or(value);
    value
        .strip_suffix(key)
        .and_then(|rest| rest.strip_suffix('-'))
        .unwrap_or(value)
}

/// React reads initial form state from uncontrolled `default*` props.
fn react_key(key: &str) -> String {
    match key {
        "value" => "defaultValue".into(),
        "checked" => "defaultChecked".into(),
        _ => camel_case(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn html(node: &DesignNode) -> Props {
        normalize_properties(node, Target::Html, &GeneratorConfig::default())
    }

    fn react(node: &DesignNode) -> Props {
        normalize_properties(node, Target::React, &GeneratorConfig::default())
    }

    fn props(pairs: &[(&str, &str)]) -> Props {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // =========================================================================
    // Variant properties
    // =========================================================================

    #[test]
    fn test_no_properties() {
        assert_eq!(html(&DesignNode::instance("x", "1")), Props::new());
    }

    #[test]
    fn test_keys_and_values_are_slugified() {
        let node = DesignNode::instance("x", "1").with_variant("Variant Type", "Primary Solid");
        assert_eq!(html(&node), props(&[("variant-type", "primary-solid")]));
    }

    #[test]
    fn test_default_prefix_is_stripped() {
        let node = DesignNode::instance("x", "1").with_variant("variant", "def-primary");
        assert_eq!(html(&node), props(&[("variant", "primary")]));
    }

    #[test]
    fn test_key_copy_is_stripped_from_value() {
        let node = DesignNode::instance("x", "1")
            .with_variant("size", "size-large")
            .with_variant("width", "full-width");
        assert_eq!(html(&node), props(&[("size", "large"), ("width", "full")]));
    }

    #[test]
    fn test_value_equal_to_key_is_kept() {
        let node = DesignNode::instance("x", "1").with_variant("size", "size");
        assert_eq!(html(&node), props(&[("size", "size")]));
    }

    #[test]
    fn test_default_prefix_then_key_strip() {
        let node = DesignNode::instance("x", "1").with_variant("Size", "def-Size-Small");
        assert_eq!(html(&node), props(&[("size", "small")]));
    }

    #[test]
    fn test_variable_bindings_are_dropped() {
        let node = DesignNode::instance("x", "1")
            .with_variant("$theme", "dark")
            .with_variant("size", "small");
        assert_eq!(html(&node), props(&[("size", "small")]));
    }

    #[test]
    fn test_custom_variable_marker() {
        let config = GeneratorConfig::default().with_variable_marker('%');
        let node = DesignNode::instance("x", "1")
            .with_variant("%theme", "dark")
            .with_variant("$size", "small");
        assert_eq!(
            normalize_properties(&node, Target::Html, &config),
            props(&[("size", "small")])
        );
    }

    #[test]
    fn test_passthrough_values_keep_user_text() {
        let node = DesignNode::instance("x", "1")
            .with_variant("placeholder", "Enter your E-Mail")
            .with_variant("validMessage", "Looks good!")
            .with_variant("headlinePlain", "Heads up");
        assert_eq!(
            html(&node),
            props(&[
                ("headline-plain", "Heads up"),
                ("placeholder", "Enter your E-Mail"),
                ("valid-message", "Looks good!"),
            ])
        );
    }

    // =========================================================================
    // Visual substitution
    // =========================================================================

    #[test]
    fn test_visual_icon_uses_default_icon() {
        let node = DesignNode::instance("x", "1").with_variant("Visual", "Icon");
        assert_eq!(html(&node), props(&[("icon", "placeholder")]));
    }

    #[test]
    fn test_visual_image_uses_default_image() {
        let config = GeneratorConfig::default().with_default_image("/img/hero.png");
        let node = DesignNode::instance("x", "1").with_variant("visual", "image");
        assert_eq!(
            normalize_properties(&node, Target::Html, &config),
            props(&[("image", "/img/hero.png")])
        );
    }

    #[test]
    fn test_visual_icon_does_not_replace_resolved_icon() {
        let node = DesignNode::instance("x", "1")
            .with_variant("visual", "icon")
            .with_variant("icon", "star");
        assert_eq!(html(&node), props(&[("icon", "star")]));
    }

    #[test]
    fn test_visual_other_value_is_kept() {
        let node = DesignNode::instance("x", "1").with_variant("visual", "emoji");
        assert_eq!(html(&node), props(&[("visual", "emoji")]));
    }

    // =========================================================================
    // Component properties
    // =========================================================================

    #[test]
    fn test_component_properties_are_merged() {
        let node = DesignNode::instance("x", "1")
            .with_variant("size", "small")
            .with_component_property("Show Icon#12:0", true)
            .with_component_property("Text#3:1", "Click me");
        assert_eq!(
            html(&node),
            props(&[("show-icon", "true"), ("size", "small"), ("text", "click-me")])
        );
    }

    #[test]
    fn test_component_property_does_not_override_variant() {
        let node = DesignNode::instance("x", "1")
            .with_variant("size", "small")
            .with_component_property("size", "large");
        assert_eq!(html(&node), props(&[("size", "small")]));
    }

    #[test]
    fn test_boolean_component_property_overrides_variant() {
        let node = DesignNode::instance("x", "1")
            .with_variant("disabled", "false")
            .with_component_property("disabled", true);
        assert_eq!(html(&node), props(&[("disabled", "true")]));
    }

    #[test]
    fn test_alternative_component_properties_are_skipped() {
        let node = DesignNode::instance("x", "1")
            .with_component_property("↳ OR Icon#1:2", true)
            .with_component_property("disabled", false);
        assert_eq!(html(&node), props(&[("disabled", "false")]));
    }

    #[test]
    fn test_component_property_variable_binding_dropped() {
        let node = DesignNode::instance("x", "1").with_component_property("$token", "x");
        assert_eq!(html(&node), Props::new());
    }

    // =========================================================================
    // React flavor
    // =========================================================================

    #[test]
    fn test_react_camel_cases_keys() {
        let node = DesignNode::instance("x", "1")
            .with_variant("show message", "true")
            .with_variant("invalidMessage", "Required");
        assert_eq!(
            react(&node),
            props(&[("invalidMessage", "Required"), ("showMessage", "true")])
        );
    }

    #[test]
    fn test_react_uncontrolled_renames() {
        let node = DesignNode::instance("x", "1")
            .with_variant("value", "Hello World")
            .with_variant("checked", "true");
        assert_eq!(
            react(&node),
            props(&[("defaultChecked", "true"), ("defaultValue", "Hello World")])
        );
    }
}
