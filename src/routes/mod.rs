pub mod api;
pub mod pages;

pub use api::create_api_routes;
pub use pages::create_page_routes;

use crate::{docs::ApiDoc, state::AppState};
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assemble the whole application router
pub fn create_app(state: AppState, with_swagger: bool) -> Router {
    // HTML pages at the root
    let mut app = create_page_routes()
        // Mount API routes
        .nest("/api", create_api_routes())
        .with_state(state);

    if with_swagger {
        // Mount Swagger UI
        app = app.merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    // Add tracing layer
    app.layer(TraceLayer::new_for_http())
}
