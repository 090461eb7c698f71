pub mod health;
pub mod home;
pub mod new_list;
pub mod view_list;

pub use health::*;
pub use home::*;
pub use new_list::*;
pub use view_list::*;

use crate::views::{NotFoundPage, ServerErrorPage};
use askama::Template;
use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::error;

/// Error half of a page handler's result
pub type PageError = (StatusCode, Html<String>);

/// Render a page template, turning a rendering failure into a 500
pub fn render_page<T: Template>(page: &T) -> Result<Html<String>, PageError> {
    page.render().map(Html).map_err(|e| {
        error!("Failed to render page: {}", e);
        internal_error()
    })
}

/// 302 redirect to `location`
pub fn redirect_found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

pub fn not_found() -> PageError {
    let page = NotFoundPage.render().unwrap_or_else(|e| {
        error!("Failed to render not-found page: {}", e);
        "Not found".to_string()
    });
    (StatusCode::NOT_FOUND, Html(page))
}

pub fn internal_error() -> PageError {
    let page = ServerErrorPage.render().unwrap_or_else(|e| {
        error!("Failed to render error page: {}", e);
        "Internal server error".to_string()
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Html(page))
}
