use crate::handlers::{render_page, PageError};
use crate::views::{FormState, HomePage};
use axum::response::Html;
use tracing::debug;

/// Entry page with an empty item form
pub async fn home_page() -> Result<Html<String>, PageError> {
    debug!("Home page requested");
    render_page(&HomePage { form: FormState::empty() })
}
