//! CMS content blocks and their rendering machinery.
//!
//! A page from the CMS arrives as an immutable tree of [`ContentBlock`]
//! nodes. Each node names its component via a type discriminator; the
//! [`BlockRegistry`](registry::BlockRegistry) maps discriminators to render
//! functions and is validated against every loaded tree at startup, so an
//! unknown discriminator fails fast instead of silently rendering nothing.
//!
//! Blocks carry the CMS editability marker (`_editable`); the attributes
//! derived from it are emitted on each block's root element so the CMS
//! live-edit overlay can target it.

pub mod components;
pub mod personalized;
pub mod registry;

pub use personalized::{VariantGroup, VisitorContext, select_variants};
pub use registry::BlockRegistry;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from block parsing and rendering.
#[derive(Debug, Error)]
pub enum BlockError {
    /// No renderer is registered for the block's type discriminator.
    #[error("unknown block component `{component}` (block {uid})")]
    UnknownComponent {
        /// The unrecognized type discriminator.
        component: String,
        /// `_uid` of the offending block.
        uid: String,
    },

    /// A type-specific field did not match the expected shape.
    #[error("block {uid}: invalid `{field}` field: {message}")]
    InvalidField {
        /// `_uid` of the offending block.
        uid: String,
        /// Field name.
        field: &'static str,
        /// Parse failure detail.
        message: String,
    },

    /// Template rendering failed.
    #[error("template error: {0}")]
    Render(#[from] askama::Error),
}

/// An opaque CMS content node.
///
/// `_uid` is unique among siblings and serves as the stable render key;
/// `component` selects the registered renderer; all type-specific fields
/// stay as raw JSON until the renderer interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Stable unique key within the render tree.
    #[serde(rename = "_uid")]
    pub uid: String,
    /// Type discriminator used for renderer dispatch.
    pub component: String,
    /// Raw CMS editability marker, when present.
    #[serde(rename = "_editable", default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<String>,
    /// Type-specific fields.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl ContentBlock {
    /// Get a type-specific field.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Get a type-specific field as a string.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Build the editability attributes for this block's root element.
    ///
    /// The CMS ships its marker as an HTML comment wrapping a JSON payload
    /// (`<!--#storyblok#{...}-->`). The overlay expects that payload back as
    /// `data-blok-c` plus a `data-blok-uid` of the form `{id}-{uid}`.
    /// Returns an empty string when the marker is absent or malformed, which
    /// simply renders the block as non-editable.
    #[must_use]
    pub fn editable_attributes(&self) -> String {
        let Some(marker) = self.editable.as_deref() else {
            return String::new();
        };

        let Some(payload) = marker
            .strip_prefix("<!--#storyblok#")
            .and_then(|s| s.strip_suffix("-->"))
        else {
            return String::new();
        };

        let Ok(parsed) = serde_json::from_str::<Value>(payload) else {
            return String::new();
        };

        let id = parsed.get("id").and_then(Value::as_str).unwrap_or_default();
        let uid = parsed.get("uid").and_then(Value::as_str).unwrap_or_default();

        format!(
            r#" data-blok-c="{}" data-blok-uid="{}""#,
            escape_attr(payload),
            escape_attr(&format!("{id}-{uid}"))
        )
    }
}

/// Direct child blocks of a block, in document order.
///
/// Children may be nested inside intermediate structures (variant group
/// entries, asset wrappers); any JSON object carrying both `_uid` and a
/// string `component` counts as a child block.
#[must_use]
pub fn child_blocks(block: &ContentBlock) -> Vec<ContentBlock> {
    let mut children = Vec::new();
    for value in block.fields.values() {
        collect_blocks(value, &mut children);
    }
    children
}

fn collect_blocks(value: &Value, out: &mut Vec<ContentBlock>) {
    match value {
        Value::Array(items) => {
            for item in items {
                collect_blocks(item, out);
            }
        }
        Value::Object(map) => {
            if map.contains_key("_uid") && map.get("component").is_some_and(Value::is_string) {
                if let Ok(block) = serde_json::from_value(Value::Object(map.clone())) {
                    out.push(block);
                }
                return;
            }
            for nested in map.values() {
                collect_blocks(nested, out);
            }
        }
        _ => {}
    }
}

/// Escape a string for use inside a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block_from_json(value: Value) -> ContentBlock {
        serde_json::from_value(value).expect("valid block")
    }

    #[test]
    fn test_content_block_deserializes_fields() {
        let block = block_from_json(json!({
            "_uid": "b-1",
            "component": "teaser",
            "headline": "Hello"
        }));

        assert_eq!(block.uid, "b-1");
        assert_eq!(block.component, "teaser");
        assert_eq!(block.str_field("headline"), Some("Hello"));
        assert!(block.str_field("missing").is_none());
    }

    #[test]
    fn test_editable_attributes_from_marker() {
        let block = block_from_json(json!({
            "_uid": "b-1",
            "component": "teaser",
            "_editable": "<!--#storyblok#{\"name\":\"teaser\",\"space\":\"99\",\"uid\":\"b-1\",\"id\":\"42\"}-->"
        }));

        let attrs = block.editable_attributes();
        assert!(attrs.contains("data-blok-uid=\"42-b-1\""));
        assert!(attrs.contains("data-blok-c=\""));
        // The JSON payload must be attribute-escaped
        assert!(attrs.contains("&quot;name&quot;"));
    }

    #[test]
    fn test_editable_attributes_absent_or_malformed() {
        let block = block_from_json(json!({"_uid": "b-1", "component": "teaser"}));
        assert_eq!(block.editable_attributes(), "");

        let malformed = block_from_json(json!({
            "_uid": "b-2",
            "component": "teaser",
            "_editable": "not a marker"
        }));
        assert_eq!(malformed.editable_attributes(), "");
    }

    #[test]
    fn test_child_blocks_found_through_nested_structures() {
        let block = block_from_json(json!({
            "_uid": "root",
            "component": "personalized_banners",
            "variants": [
                {
                    "_uid": "g-1",
                    "user_type": "performance",
                    "blocks": [
                        {"_uid": "c-1", "component": "teaser", "headline": "A"},
                        {"_uid": "c-2", "component": "teaser", "headline": "B"}
                    ]
                }
            ]
        }));

        let children = child_blocks(&block);
        let uids: Vec<&str> = children.iter().map(|b| b.uid.as_str()).collect();
        assert_eq!(uids, vec!["c-1", "c-2"]);
    }

    #[test]
    fn test_sibling_uids_stay_unique_keys() {
        let block = block_from_json(json!({
            "_uid": "root",
            "component": "personalized_grid",
            "variants": [{
                "_uid": "g-1",
                "user_type": "performance",
                "blocks": [
                    {"_uid": "c-1", "component": "teaser"},
                    {"_uid": "c-2", "component": "teaser"},
                    {"_uid": "c-3", "component": "image_banner"}
                ]
            }]
        }));

        let children = child_blocks(&block);
        let mut uids: Vec<&str> = children.iter().map(|b| b.uid.as_str()).collect();
        uids.sort_unstable();
        uids.dedup();
        assert_eq!(uids.len(), children.len());
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"a"b<c>&d"#), "a&quot;b&lt;c&gt;&amp;d");
    }
}
