pub mod config;
pub mod http;
pub mod session;

pub use config::ConfigStore;
pub use http::{create_router, AppState};
pub use session::SessionStore;
