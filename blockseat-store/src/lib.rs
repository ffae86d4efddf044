pub mod app_config;
pub mod block_seat_repo;
pub mod booking_repo;
pub mod http;
pub mod token_store;
pub mod visa_repo;

use blockseat_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Http(e) if e.is_decode() => CoreError::Decode(e.to_string()),
            StoreError::Http(e) => CoreError::Transport(e.to_string()),
            StoreError::Json(e) => CoreError::Decode(e.to_string()),
            other => CoreError::Internal(other.to_string()),
        }
    }
}

pub use app_config::Config;
pub use block_seat_repo::HttpBlockSeatRepository;
pub use booking_repo::HttpBookingRepository;
pub use http::BackendClient;
pub use token_store::FileTokenStore;
pub use visa_repo::HttpVisaRepository;
