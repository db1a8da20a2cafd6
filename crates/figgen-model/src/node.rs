//! The design node tree.
//!
//! Mirrors what the host's selection inspector exports: a tree of typed nodes
//! with optional text, resolved CSS and component metadata. The generator only
//! reads this shape; it never talks to the host itself.

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ModelError;

/// Resolved CSS of a node, in declaration order.
pub type StyleMap = IndexMap<String, String>;

/// Node type discriminator.
///
/// Unknown host types are kept verbatim so newer exports still load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    #[default]
    Frame,
    Group,
    Text,
    Instance,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Frame => "FRAME",
            NodeKind::Group => "GROUP",
            NodeKind::Text => "TEXT",
            NodeKind::Instance => "INSTANCE",
            NodeKind::Other(kind) => kind,
        }
    }
}

impl From<String> for NodeKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "FRAME" => NodeKind::Frame,
            "GROUP" => NodeKind::Group,
            "TEXT" => NodeKind::Text,
            "INSTANCE" => NodeKind::Instance,
            _ => NodeKind::Other(kind),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a non-variant component property.
///
/// The host exports either a bare value or a `{ "type": ..., "value": ... }`
/// object; both decode to the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Text(String),
}

impl PropertyValue {
    /// The value as it appears in generated attributes.
    pub fn to_attr_string(&self) -> String {
        match self {
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Text(s) => s.clone(),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::Text(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::Text(s)
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawPropertyValue::deserialize(deserializer).map(PropertyValue::from)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPropertyValue {
    Bool(bool),
    Text(String),
    Typed { value: Box<RawPropertyValue> },
}

impl From<RawPropertyValue> for PropertyValue {
    fn from(raw: RawPropertyValue) -> Self {
        match raw {
            RawPropertyValue::Bool(b) => PropertyValue::Bool(b),
            RawPropertyValue::Text(s) => PropertyValue::Text(s),
            RawPropertyValue::Typed { value } => PropertyValue::from(*value),
        }
    }
}

/// One node of the design tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignNode {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub css: Option<StyleMap>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub variant_properties: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub component_properties: BTreeMap<String, PropertyValue>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<DesignNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_component_name: Option<String>,
}

/// Exports write `null` for absent collections.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl DesignNode {
    pub fn new(kind: NodeKind, name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn frame(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(NodeKind::Frame, name, id)
    }

    pub fn group(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(NodeKind::Group, name, id)
    }

    pub fn instance(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self::new(NodeKind::Instance, name, id)
    }

    pub fn text(name: impl Into<String>, id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(NodeKind::Text, name, id)
        }
    }

    /// Decode a tree from the plugin's JSON export.
    pub fn from_json(source: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ModelError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn with_child(mut self, child: DesignNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = DesignNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_variant(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variant_properties.insert(key.into(), value.into());
        self
    }

    pub fn with_component_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.component_properties.insert(key.into(), value.into());
        self
    }

    pub fn with_css(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.css
            .get_or_insert_with(StyleMap::new)
            .insert(property.into(), value.into());
        self
    }

    pub fn with_component_name(mut self, name: impl Into<String>) -> Self {
        self.component_name = Some(name.into());
        self
    }

    pub fn is_instance(&self) -> bool {
        self.kind == NodeKind::Instance
    }

    /// `FRAME` or `GROUP`: plain layout containers.
    pub fn is_container(&self) -> bool {
        matches!(self.kind, NodeKind::Frame | NodeKind::Group)
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(DesignNode::count).sum::<usize>()
    }

    /// First node in pre-order (starting at `self`) that satisfies `pred`.
    pub fn find(&self, pred: &impl Fn(&DesignNode) -> bool) -> Option<&DesignNode> {
        if pred(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(pred))
    }
}
