pub mod api;
pub mod app;
pub mod draft;
pub mod state;

pub use api::{ApiClient, ClientError};
pub use app::App;
pub use draft::{Draft, FormError};
pub use state::{AppState, Row, RowMode};
