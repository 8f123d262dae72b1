//! REST API server for flattext.
//!
//! An Axum-based HTTP front end over [`Dispatcher`](crate::Dispatcher).
//!
//! # Endpoints
//!
//! - `POST /convert` - Extract text from an uploaded `file` or a `url` (form data)
//! - `GET /health` - Health check endpoint
//! - `GET /info` - Server information
//!
//! # Examples
//!
//! ## Starting the server
//!
//! ```no_run
//! use flattext::api::serve;
//!
//! #[tokio::main]
//! async fn main() -> flattext::Result<()> {
//!     serve("127.0.0.1", 8000).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding the router in your app
//!
//! ```no_run
//! use flattext::{Dispatcher, api::create_router};
//! use axum::Router;
//!
//! # fn main() -> flattext::Result<()> {
//! let router = create_router(Dispatcher::with_defaults()?, None);
//! let app: Router = Router::new().nest("/flattext", router);
//! # Ok(())
//! # }
//! ```
//!
//! # cURL Examples
//!
//! ```bash
//! curl -F "file=@report.pdf" http://localhost:8000/convert
//! curl -F "url=https://example.com" -H "x-api-key: $FLATTEXT_API_KEY" http://localhost:8000/convert
//! curl http://localhost:8000/info
//! ```

mod error;
mod handlers;
mod server;
mod types;

pub use error::{ApiError, UNAUTHORIZED_DETAIL, status_for};
pub use handlers::API_KEY_HEADER;
pub use server::{
    API_KEY_ENV, create_router, create_router_with_limits, parse_size_limits_from_env, serve, serve_with_config,
    serve_with_config_and_limits,
};
pub use types::{ApiSizeLimits, ApiState, ConvertResponse, ErrorResponse, HealthResponse, InfoResponse};
