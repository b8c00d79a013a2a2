//! Home page route handler.

use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

use super::pages::{StoryPageTemplate, render_story};

/// Display the home page (the `home` CMS story).
///
/// # Errors
///
/// Returns 404 if the `home` story has not been published.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<StoryPageTemplate> {
    render_story(&state, "home")
}
