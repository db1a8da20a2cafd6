//! figgen Model
//!
//! The design node tree consumed by the generator, plus the pure identifier
//! helpers (slugs, DOM ids, class names, key casing) shared by every pass.
//!
//! Trees usually arrive as JSON exported by a design-tool plugin:
//!
//! ```
//! use figgen_model::{derive_class_name, derive_id, DesignNode};
//!
//! let node = DesignNode::from_json(r#"{"type":"TEXT","name":"Title","id":"1:2","text":"Hi"}"#).unwrap();
//! assert_eq!(derive_id(&node), "text-1-2");
//! assert_eq!(derive_class_name(&node), "title");
//! ```

pub mod ident;
pub mod node;

pub use ident::{camel_case, derive_class_name, derive_id, pascal_case, slugify};
pub use node::{DesignNode, NodeKind, PropertyValue, StyleMap};

/// Error raised while loading a design tree.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Invalid design tree: {0}")]
    Json(#[from] serde_json::Error),
}
