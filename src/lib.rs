pub mod app;
pub mod auth;
pub mod chart;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod handlers;
pub mod loader;
pub mod models;
pub mod palette;
pub mod session;
pub mod state;
pub mod ui;
pub mod view;

pub use app::router;
pub use config::DashboardConfig;
pub use fetcher::ApiClient;
pub use state::AppState;
