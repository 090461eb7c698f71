use utoipa::OpenApi;
use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Readiness check endpoint
#[utoipa::path(
    get,
    path = "/api/ready",
    responses(
        (status = 200, description = "Database is reachable", body = ReadyResponse),
        (status = 503, description = "Database is unavailable", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn ready_check_doc() {}

/// Entry page with an empty item form
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Entry page", content_type = "text/html", body = String)
    )
)]
#[allow(dead_code)]
pub async fn home_page_doc() {}

/// Start a new list from a form field `text`
#[utoipa::path(
    post,
    path = "/lists/new",
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "text=<item text>"),
    responses(
        (status = 302, description = "List created, redirect to /lists/{id}/"),
        (status = 200, description = "Entry page re-rendered with a validation error", content_type = "text/html", body = String)
    )
)]
#[allow(dead_code)]
pub async fn new_list_doc() {}

/// Show a list and its items
#[utoipa::path(
    get,
    path = "/lists/{list_id}/",
    params(("list_id" = i64, Path, description = "List identifier")),
    responses(
        (status = 200, description = "List page", content_type = "text/html", body = String),
        (status = 404, description = "No such list", content_type = "text/html", body = String)
    )
)]
#[allow(dead_code)]
pub async fn view_list_doc() {}

/// Add an item to an existing list from a form field `text`
#[utoipa::path(
    post,
    path = "/lists/{list_id}/",
    params(("list_id" = i64, Path, description = "List identifier")),
    request_body(content = String, content_type = "application/x-www-form-urlencoded", description = "text=<item text>"),
    responses(
        (status = 302, description = "Item added, redirect back to the list"),
        (status = 200, description = "List page re-rendered with a validation error", content_type = "text/html", body = String),
        (status = 404, description = "No such list", content_type = "text/html", body = String)
    )
)]
#[allow(dead_code)]
pub async fn add_item_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        ready_check_doc,
        home_page_doc,
        new_list_doc,
        view_list_doc,
        add_item_doc,
    ),
    components(
        schemas(HealthResponse, ReadyResponse, ErrorResponse)
    ),
    tags(
        (name = "api", description = "API endpoints"),
        (name = "lists", description = "To-do list pages")
    )
)]
pub struct ApiDoc;
