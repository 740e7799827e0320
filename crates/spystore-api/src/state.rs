//! Application state shared by all handlers.

use spystore_db::StoreContext;

use crate::error::ExceptionFilter;

#[derive(Clone, Debug)]
pub struct AppState {
    pub store: StoreContext,
    pub filter: ExceptionFilter,
}

impl AppState {
    pub fn new(store: StoreContext, filter: ExceptionFilter) -> Self {
        Self { store, filter }
    }
}
