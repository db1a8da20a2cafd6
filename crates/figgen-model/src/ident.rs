//! Identifier derivation.
//!
//! Every name that ends up in generated markup or CSS goes through [`slugify`],
//! so ids, class names and attribute keys are always `[a-z0-9-]`.

use convert_case::{Case, Casing};

use crate::node::DesignNode;

/// Lower-case `input` and join its words with `-`. Every run of
/// non-alphanumeric characters separates words and is dropped, as are leading
/// and trailing separators.
///
/// Case humps also separate words, so `iconAfter` and `icon after` both
/// become `icon-after`.
pub fn slugify(input: &str) -> String {
    words(input).to_case(Case::Kebab)
}

/// ASCII alphanumeric runs of `input`, separated by single spaces.
fn words(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// DOM-safe id: slug of `"{type}-{id}"`.
pub fn derive_id(node: &DesignNode) -> String {
    slugify(&format!("{}-{}", node.kind, node.id))
}

/// Class name: slug of the node's human-authored name.
/// Structurally similar nodes intentionally share it.
pub fn derive_class_name(node: &DesignNode) -> String {
    slugify(&node.name)
}

/// `show-message` → `showMessage`.
pub fn camel_case(input: &str) -> String {
    slugify(input).to_case(Case::Camel)
}

/// `custom-select` → `CustomSelect`.
pub fn pascal_case(input: &str) -> String {
    slugify(input).to_case(Case::Pascal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{DesignNode, NodeKind};
    use pretty_assertions::assert_eq;

    // =========================================================================
    // slugify
    // =========================================================================

    #[test]
    fn test_slugify_lowercases() {
        assert_eq!(slugify("Button"), "button");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("Icon  /  Leading"), "icon-leading");
    }

    #[test]
    fn test_slugify_trims_separators() {
        assert_eq!(slugify("  --Primary--  "), "primary");
    }

    #[test]
    fn test_slugify_splits_camel_humps() {
        assert_eq!(slugify("iconAfter"), "icon-after");
        assert_eq!(slugify("validMessage"), "valid-message");
    }

    #[test]
    fn test_slugify_splits_pascal_case() {
        assert_eq!(slugify("CustomSelect"), "custom-select");
    }

    #[test]
    fn test_slugify_drops_non_ascii() {
        assert_eq!(slugify("↳ OR Size"), "or-size");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("***"), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        let once = slugify("Input Text / Placeholder");
        assert_eq!(slugify(&once), once);
    }

    // =========================================================================
    // derive_id / derive_class_name
    // =========================================================================

    #[test]
    fn test_derive_id() {
        let node = DesignNode::text("t", "2", "Hello");
        assert_eq!(derive_id(&node), "text-2");
    }

    #[test]
    fn test_derive_id_host_style_id() {
        let node = DesignNode::new(NodeKind::Instance, "Button", "12:345");
        assert_eq!(derive_id(&node), "instance-12-345");
    }

    #[test]
    fn test_derive_id_unknown_kind() {
        let node = DesignNode::new(NodeKind::Other("BOOLEAN_OPERATION".into()), "x", "7");
        assert_eq!(derive_id(&node), "boolean-operation-7");
    }

    #[test]
    fn test_class_name_shared_by_similar_nodes() {
        let a = DesignNode::frame("Card Body", "1");
        let b = DesignNode::frame("Card Body", "2");
        assert_eq!(derive_class_name(&a), "card-body");
        assert_eq!(derive_class_name(&a), derive_class_name(&b));
        assert_ne!(derive_id(&a), derive_id(&b));
    }

    // =========================================================================
    // Casing
    // =========================================================================

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("show-message"), "showMessage");
        assert_eq!(camel_case("icon"), "icon");
        assert_eq!(camel_case("headline-plain"), "headlinePlain");
    }

    #[test]
    fn test_camel_case_is_stable() {
        assert_eq!(camel_case("defaultValue"), "defaultValue");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("button"), "Button");
        assert_eq!(pascal_case("custom-select"), "CustomSelect");
        assert_eq!(pascal_case("Custom Select"), "CustomSelect");
    }

    #[test]
    fn test_casing_of_empty_input() {
        assert_eq!(camel_case("***"), "");
        assert_eq!(pascal_case(""), "");
    }
}
