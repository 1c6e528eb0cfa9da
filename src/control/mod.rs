pub mod api;
pub mod config;
pub mod fetcher;
pub mod models;

pub use api::ControlPlaneClient;
pub use config::ControlPlaneConfig;
pub use fetcher::EntityFetcher;
