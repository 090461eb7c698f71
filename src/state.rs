use crate::db::dblists::ListsDb;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<ListsDb>,
}

impl AppState {
    pub fn new(db: ListsDb) -> Self {
        Self { db: Arc::new(db) }
    }
}
