use crate::models::AppData;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(data: AppData) -> Self {
        Self {
            data: Arc::new(Mutex::new(data)),
        }
    }
}
