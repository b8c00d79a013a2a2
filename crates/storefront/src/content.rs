//! CMS story storage.
//!
//! The external CMS owns authoring; this module loads the per-page story
//! documents it publishes (JSON block trees) from the `content/stories`
//! directory at startup and serves them by slug for the duration of the
//! process. Story trees are immutable once loaded.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::blocks::ContentBlock;

/// A published CMS story: one page's block tree.
#[derive(Debug, Clone)]
pub struct Story {
    /// URL slug (derived from the filename).
    pub slug: String,
    /// Display name for the page title.
    pub name: String,
    /// Root content block (a `page` block).
    pub content: ContentBlock,
}

/// On-disk story document shape.
#[derive(Debug, Deserialize)]
struct StoryDoc {
    #[serde(default)]
    name: Option<String>,
    content: ContentBlock,
}

/// Content store that holds all loaded stories in memory
#[derive(Debug, Clone)]
pub struct ContentStore {
    stories: Arc<HashMap<String, Story>>,
}

impl ContentStore {
    /// Load all stories from the content directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the stories directory cannot be read.
    pub fn load(content_dir: &Path) -> Result<Self, ContentError> {
        let stories = Self::load_stories(&content_dir.join("stories"))?;

        Ok(Self {
            stories: Arc::new(stories),
        })
    }

    fn load_stories(dir: &Path) -> Result<HashMap<String, Story>, ContentError> {
        let mut stories = HashMap::new();

        if !dir.exists() {
            tracing::warn!("Stories directory does not exist: {:?}", dir);
            return Ok(stories);
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ContentError::Io(e.to_string()))?;

        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                match Self::load_story(&path) {
                    Ok(story) => {
                        tracing::info!("Loaded story: {}", story.slug);
                        stories.insert(story.slug.clone(), story);
                    }
                    Err(e) => {
                        tracing::error!("Failed to load story {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(stories)
    }

    fn load_story(path: &Path) -> Result<Story, ContentError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ContentError::Io(e.to_string()))?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ContentError::Parse("Invalid filename".to_string()))?
            .to_string();

        let doc: StoryDoc = serde_json::from_str(&raw)
            .map_err(|e| ContentError::Parse(format!("Failed to parse story: {e}")))?;

        let name = doc.name.unwrap_or_else(|| slug.clone());

        Ok(Story {
            slug,
            name,
            content: doc.content,
        })
    }

    /// Get a story by slug
    #[must_use]
    pub fn get_story(&self, slug: &str) -> Option<&Story> {
        self.stories.get(slug)
    }

    /// Get all loaded stories
    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.stories.values()
    }
}

/// Content loading errors
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}
