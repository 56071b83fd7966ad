use std::sync::Arc;

use crate::store::RecordStore;

pub struct AppState {
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        AppState { store }
    }
}
