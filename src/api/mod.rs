//! HTTP API module: directory page, search, and operational endpoints.

pub mod docs;
pub mod handlers;
pub mod page;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
