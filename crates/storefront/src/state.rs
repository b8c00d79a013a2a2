//! Application state shared across handlers.

use std::sync::Arc;

use crate::blocks::BlockRegistry;
use crate::config::StorefrontConfig;
use crate::content::ContentStore;
use crate::shopify::StorefrontClient;

/// Error building the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("content error: {0}")]
    Content(#[from] crate::content::ContentError),
    #[error("story `{slug}` failed validation: {source}")]
    InvalidStory {
        slug: String,
        #[source]
        source: crate::blocks::BlockError,
    },
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the Shopify client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    storefront: StorefrontClient,
    content: ContentStore,
    blocks: BlockRegistry,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Loads the CMS stories from the configured content directory and
    /// validates every block tree against the registry, so unknown block
    /// discriminators fail startup instead of rendering nothing at request
    /// time.
    ///
    /// # Errors
    ///
    /// Returns an error if stories cannot be loaded or a story references an
    /// unregistered block component.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let storefront = StorefrontClient::new(&config.shopify);
        let content = ContentStore::load(&config.content_dir)?;
        let blocks = BlockRegistry::with_builtins();

        for story in content.stories() {
            blocks
                .validate_tree(&story.content)
                .map_err(|source| StateError::InvalidStory {
                    slug: story.slug.clone(),
                    source,
                })?;
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                storefront,
                content,
                blocks,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }

    /// Get a reference to the CMS content store.
    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Get a reference to the block component registry.
    #[must_use]
    pub fn blocks(&self) -> &BlockRegistry {
        &self.inner.blocks
    }
}
