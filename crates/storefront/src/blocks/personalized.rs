//! Personalized block components.
//!
//! A personalized block carries a list of variant groups, each tagged with a
//! visitor classification and holding its own nested child blocks. Rendering
//! selects the groups matching the visitor's classification and dispatches
//! every surviving child through the registry.

use askama::Template;
use serde::{Deserialize, Serialize};

use super::registry::BlockRegistry;
use super::{BlockError, ContentBlock};

/// A personalization entry pairing a visitor classification with nested
/// content blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantGroup {
    /// Stable unique key within the parent block.
    #[serde(rename = "_uid")]
    pub uid: String,
    /// Visitor classification this group targets.
    pub user_type: String,
    /// Child blocks rendered when the group is selected.
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
}

/// The visitor classification used to select personalization variants.
///
/// Constructed explicitly by the caller so the classification source stays
/// swappable; today every visitor is classified as `performance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorContext {
    /// Classification matched against [`VariantGroup::user_type`].
    pub classification: String,
}

impl VisitorContext {
    /// Create a context with the given classification.
    pub fn new(classification: impl Into<String>) -> Self {
        Self {
            classification: classification.into(),
        }
    }
}

impl Default for VisitorContext {
    fn default() -> Self {
        Self::new("performance")
    }
}

/// Select the variant groups matching the visitor's classification.
///
/// Pure, order-preserving filter; no match yields an empty selection, not an
/// error.
#[must_use]
pub fn select_variants<'a>(
    groups: &'a [VariantGroup],
    visitor: &VisitorContext,
) -> Vec<&'a VariantGroup> {
    groups
        .iter()
        .filter(|group| group.user_type == visitor.classification)
        .collect()
}

#[derive(Template)]
#[template(path = "blocks/personalized.html")]
struct PersonalizedTemplate<'a> {
    uid: &'a str,
    container_class: &'a str,
    editable: String,
    children: Vec<String>,
}

fn variant_groups(block: &ContentBlock) -> Result<Vec<VariantGroup>, BlockError> {
    let Some(value) = block.field("variants") else {
        return Ok(Vec::new());
    };
    serde_json::from_value(value.clone()).map_err(|e| BlockError::InvalidField {
        uid: block.uid.clone(),
        field: "variants",
        message: e.to_string(),
    })
}

fn render_personalized(
    registry: &BlockRegistry,
    block: &ContentBlock,
    visitor: &VisitorContext,
    container_class: &str,
) -> Result<String, BlockError> {
    let groups = variant_groups(block)?;

    let mut children = Vec::new();
    for group in select_variants(&groups, visitor) {
        for child in &group.blocks {
            children.push(registry.render(child, visitor)?);
        }
    }

    let template = PersonalizedTemplate {
        uid: &block.uid,
        container_class,
        editable: block.editable_attributes(),
        children,
    };
    Ok(template.render()?)
}

/// `personalized_banners` block: full-width banner stack.
pub fn render_personalized_banners(
    registry: &BlockRegistry,
    block: &ContentBlock,
    visitor: &VisitorContext,
) -> Result<String, BlockError> {
    render_personalized(registry, block, visitor, "banners center-container")
}

/// `personalized_grid` block: identical selection logic, grid layout.
pub fn render_personalized_grid(
    registry: &BlockRegistry,
    block: &ContentBlock,
    visitor: &VisitorContext,
) -> Result<String, BlockError> {
    render_personalized(registry, block, visitor, "block-grid")
}
