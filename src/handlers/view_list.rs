use crate::{
    handlers::{internal_error, not_found, redirect_found, render_page, PageError},
    models::{ItemForm, List},
    services::item_service::{self, ItemError, ItemTarget},
    state::AppState,
    views::{FormState, ListPage},
};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::{debug, error};

/// Show a list and its items
pub async fn view_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let list = load_list(&state, &list_id).await?;
    render_list(&state, &list, FormState::empty()).await
}

/// Add the submitted item to an existing list
pub async fn add_item(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Form(form): Form<ItemForm>,
) -> Result<Response, PageError> {
    let list = load_list(&state, &list_id).await?;

    match item_service::save_item(&state.db, ItemTarget::AppendToList(list.id), &form.text).await {
        Ok(_) => Ok(redirect_found(&list.location())),
        Err(ItemError::Validation(e)) => {
            let page = render_list(&state, &list, FormState::with_error(form.text, e.to_string())).await?;
            Ok(page.into_response())
        }
        Err(ItemError::ListNotFound(_)) => Err(not_found()),
        Err(e) => {
            error!("Failed to add item to list {}: {}", list.id, e);
            Err(internal_error())
        }
    }
}

/// Parse a list id from the path. Only the canonical decimal form names a list,
/// so `+1` and `01` are rejected.
pub fn parse_list_id(raw_id: &str) -> Option<i64> {
    let list_id: i64 = raw_id.parse().ok()?;
    if list_id.to_string() != raw_id {
        return None;
    }
    Some(list_id)
}

async fn load_list(state: &AppState, raw_id: &str) -> Result<List, PageError> {
    let list_id = match parse_list_id(raw_id) {
        Some(id) => id,
        None => {
            debug!("Invalid list id '{}'", raw_id);
            return Err(not_found());
        }
    };

    match state.db.get_list(list_id).await {
        Ok(Some(list)) => Ok(list),
        Ok(None) => {
            debug!("List {} not found", list_id);
            Err(not_found())
        }
        Err(e) => {
            error!("Error loading list {}: {}", list_id, e);
            Err(internal_error())
        }
    }
}

async fn render_list(state: &AppState, list: &List, form: FormState) -> Result<Html<String>, PageError> {
    let items = state.db.list_items(list.id).await.map_err(|e| {
        error!("Error loading items of list {}: {}", list.id, e);
        internal_error()
    })?;
    render_page(&ListPage::new(list, items, form))
}
