use crate::palette::DEFAULT_PALETTE_SIZE;
use std::{env, path::PathBuf};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TOKEN_PATH: &str = "data/session.json";

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub port: u16,
    pub api_base_url: String,
    pub token_path: PathBuf,
    pub palette_size: usize,
}

impl DashboardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().unwrap_or_else(|err| {
                warn!("invalid PORT value {value:?} ({err}), using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let api_base_url = lookup("TREMOR_API_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| {
                info!("TREMOR_API_URL not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            })
            .trim()
            .trim_end_matches('/')
            .to_string();

        let token_path = lookup("DASHBOARD_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH));

        Self {
            port,
            api_base_url,
            token_path,
            palette_size: DEFAULT_PALETTE_SIZE,
        }
    }
}
