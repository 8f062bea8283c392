use crate::fetcher::ApiClient;
use crate::view::DashboardView;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ApiClient>,
    pub view: Arc<Mutex<DashboardView>>,
    pub palette_size: usize,
}

impl AppState {
    pub fn new(client: ApiClient, palette_size: usize) -> Self {
        Self {
            client: Arc::new(client),
            view: Arc::new(Mutex::new(DashboardView::new(palette_size))),
            palette_size,
        }
    }
}
