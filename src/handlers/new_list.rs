use crate::{
    handlers::{internal_error, not_found, redirect_found, render_page, PageError},
    models::{list_location, ItemForm},
    services::item_service::{self, ItemError, ItemTarget},
    state::AppState,
    views::{FormState, HomePage},
};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Form,
};
use tracing::{error, info};

/// Start a new list from the submitted item
pub async fn new_list(
    State(state): State<AppState>,
    Form(form): Form<ItemForm>,
) -> Result<Response, PageError> {
    match item_service::save_item(&state.db, ItemTarget::CreateNewList, &form.text).await {
        Ok(item) => {
            info!("Created list {}", item.list_id);
            Ok(redirect_found(&list_location(item.list_id)))
        }
        Err(ItemError::Validation(e)) => {
            let page = HomePage { form: FormState::with_error(form.text, e.to_string()) };
            Ok(render_page(&page)?.into_response())
        }
        Err(ItemError::ListNotFound(list_id)) => {
            error!("List {} vanished while creating it", list_id);
            Err(not_found())
        }
        Err(e) => {
            error!("Failed to create a new list: {}", e);
            Err(internal_error())
        }
    }
}
