//! CSS rule synthesizer.
//!
//! Every node gets an id and a class name. Properties that all nodes of a
//! class declare are hoisted into one shared class rule; the rest stay on
//! per-id rules. A node without CSS declares nothing, so its class keeps
//! everything on the id rules.
//!
//! A hoisted property takes the value of the first node seen for that class,
//! even when other nodes of the class declare a different value. Those other
//! values are not re-emitted as id overrides.
// TODO: emit differing values of a hoisted property as id-level overrides.

use std::collections::HashMap;
use std::fmt;

use figgen_model::{derive_class_name, derive_id, DesignNode, StyleMap};
use indexmap::IndexMap;
use tracing::warn;

/// What a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Id(String),
    Class(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "#{id}"),
            Selector::Class(class) => write!(f, ".{class}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CssRule {
    pub selector: Selector,
    pub declarations: StyleMap,
}

impl fmt::Display for CssRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {{", self.selector)?;
        for (property, value) in &self.declarations {
            writeln!(f, "  {property}: {value};")?;
        }
        writeln!(f, "}}")
    }
}

/// Id rules in tree order, followed by class rules in first-seen order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stylesheet {
    pub id_rules: Vec<CssRule>,
    pub class_rules: Vec<CssRule>,
}

impl Stylesheet {
    pub fn is_empty(&self) -> bool {
        self.id_rules.is_empty() && self.class_rules.is_empty()
    }

    pub fn rules(&self) -> impl Iterator<Item = &CssRule> {
        self.id_rules.iter().chain(&self.class_rules)
    }

    pub fn render(&self) -> String {
        self.rules()
            .map(CssRule::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Generate the stylesheet text for a design tree.
pub fn generate(root: &DesignNode) -> String {
    synthesize(root).render()
}

struct Styled<'a> {
    id: String,
    class_name: String,
    css: Option<&'a StyleMap>,
}

impl<'a> Styled<'a> {
    fn declarations(&self) -> impl Iterator<Item = (&'a String, &'a String)> + 'a {
        self.css.into_iter().flatten()
    }

    fn declares(&self, property: &str) -> bool {
        self.css.is_some_and(|css| css.contains_key(property))
    }
}

/// Every node of the tree in pre-order. A node without CSS still carries its
/// class name, so it blocks promotion for that class.
fn collect<'a>(node: &'a DesignNode, out: &mut Vec<Styled<'a>>) {
    let class_name = derive_class_name(node);
    if class_name.is_empty() && node.css.as_ref().is_some_and(|css| !css.is_empty()) {
        warn!(node = %node.id, name = %node.name, "No class name; styles stay on the id rule");
    }
    out.push(Styled {
        id: derive_id(node),
        class_name,
        css: node.css.as_ref(),
    });
    for child in &node.children {
        collect(child, out);
    }
}

/// Build the deduplicated rule set for a design tree.
pub fn synthesize(root: &DesignNode) -> Stylesheet {
    let mut styled = Vec::new();
    collect(root, &mut styled);

    let mut classes: IndexMap<&str, Vec<&Styled>> = IndexMap::new();
    for entry in styled.iter().filter(|s| !s.class_name.is_empty()) {
        classes.entry(entry.class_name.as_str()).or_default().push(entry);
    }

    let mut sheet = Stylesheet::default();
    let mut hoisted: HashMap<&str, StyleMap> = HashMap::new();
    for (class_name, members) in &classes {
        let shared: StyleMap = members[0]
            .declarations()
            .filter(|(property, _)| members.iter().all(|m| m.declares(property)))
            .map(|(property, value)| (property.clone(), value.clone()))
            .collect();
        if !shared.is_empty() {
            sheet.class_rules.push(CssRule {
                selector: Selector::Class(class_name.to_string()),
                declarations: shared.clone(),
            });
        }
        hoisted.insert(*class_name, shared);
    }

    for entry in &styled {
        let shared = hoisted.get(entry.class_name.as_str());
        let remaining: StyleMap = entry
            .declarations()
            .filter(|(property, _)| !shared.is_some_and(|s| s.contains_key(*property)))
            .map(|(property, value)| (property.clone(), value.clone()))
            .collect();
        if !remaining.is_empty() {
            sheet.id_rules.push(CssRule {
                selector: Selector::Id(entry.id.clone()),
                declarations: remaining,
            });
        }
    }

    sheet
}
