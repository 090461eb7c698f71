use crate::{handlers::{add_item, home_page, new_list, view_list}, state::AppState};
use axum::{routing::{get, post}, Router};

/// Create the HTML page routes
pub fn create_page_routes() -> Router<AppState> {
    Router::<AppState>::new()
        .route("/", get(home_page))
        .route("/lists/new", post(new_list))
        .route("/lists/:list_id/", get(view_list).post(add_item))
}
