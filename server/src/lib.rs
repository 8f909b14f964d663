pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use server::{BoundServer, Server, ServerBuilder};
pub use state::AppState;
