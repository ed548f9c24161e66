pub mod app;
pub mod chart;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod form;
pub mod geometry;
pub mod handlers;
pub mod location;
pub mod models;
pub mod state;
pub mod summary;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
