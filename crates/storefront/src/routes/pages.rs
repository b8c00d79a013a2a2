//! CMS story page route handlers.
//!
//! Serves pages authored in the CMS as block trees, rendered through the
//! block registry.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tracing::instrument;

use crate::blocks::VisitorContext;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Story page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/story.html")]
pub struct StoryPageTemplate {
    pub title: String,
    pub content_html: String,
}

/// Render a story by slug through the block registry.
pub fn render_story(state: &AppState, slug: &str) -> Result<StoryPageTemplate> {
    let story = state
        .content()
        .get_story(slug)
        .ok_or_else(|| AppError::NotFound(format!("story: {slug}")))?;

    // Classification source is explicit; today every visitor is "performance"
    let visitor = VisitorContext::default();
    let content_html = state.blocks().render(&story.content, &visitor)?;

    Ok(StoryPageTemplate {
        title: story.name.clone(),
        content_html,
    })
}

/// Display a CMS story page.
///
/// # Errors
///
/// Returns 404 if no story exists for the slug.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> Result<StoryPageTemplate> {
    render_story(&state, &slug)
}
