pub mod app;
pub mod config;
pub mod errors;
pub mod geometry;
pub mod handlers;
pub mod history;
pub mod imaging;
pub mod inference;
pub mod messages;
pub mod models;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
