//! Block component registry: type discriminator to render function.

use std::collections::HashMap;

use super::personalized::VisitorContext;
use super::{BlockError, ContentBlock, child_blocks, components, personalized};

/// Render function for a single block component.
///
/// Receives the registry so container components can dispatch their
/// children, and the visitor context so personalization stays an explicit
/// input rather than ambient state.
pub type RenderFn =
    fn(&BlockRegistry, &ContentBlock, &VisitorContext) -> Result<String, BlockError>;

/// Registry of block components keyed by type discriminator.
pub struct BlockRegistry {
    renderers: HashMap<&'static str, RenderFn>,
}

impl BlockRegistry {
    /// Create a registry with all built-in block components registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut renderers: HashMap<&'static str, RenderFn> = HashMap::new();
        renderers.insert("page", components::render_page);
        renderers.insert("teaser", components::render_teaser);
        renderers.insert("image_banner", components::render_image_banner);
        renderers.insert(
            "personalized_banners",
            personalized::render_personalized_banners,
        );
        renderers.insert("personalized_grid", personalized::render_personalized_grid);
        Self { renderers }
    }

    /// Whether a renderer is registered for the discriminator.
    #[must_use]
    pub fn contains(&self, component: &str) -> bool {
        self.renderers.contains_key(component)
    }

    /// Render a block by dispatching on its type discriminator.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::UnknownComponent`] for unregistered
    /// discriminators, or the renderer's own failure.
    pub fn render(
        &self,
        block: &ContentBlock,
        visitor: &VisitorContext,
    ) -> Result<String, BlockError> {
        let renderer = self.renderers.get(block.component.as_str()).ok_or_else(|| {
            BlockError::UnknownComponent {
                component: block.component.clone(),
                uid: block.uid.clone(),
            }
        })?;
        renderer(self, block, visitor)
    }

    /// Validate a block tree against the registry.
    ///
    /// Walks the whole tree; the first unknown discriminator fails the
    /// validation. Run at startup for every loaded story.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::UnknownComponent`] naming the offending block.
    pub fn validate_tree(&self, block: &ContentBlock) -> Result<(), BlockError> {
        if !self.contains(&block.component) {
            return Err(BlockError::UnknownComponent {
                component: block.component.clone(),
                uid: block.uid.clone(),
            });
        }
        for child in child_blocks(block) {
            self.validate_tree(&child)?;
        }
        Ok(())
    }
}
