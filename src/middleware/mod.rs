// ABOUTME: HTTP middleware for request tracing, authentication, and CORS
// ABOUTME: Provides request ID generation, span creation, and bearer token resolution

pub mod auth;
pub mod cors;
pub mod tracing;

// Authentication
pub use auth::authenticate_request;

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use tracing::{create_request_span, with_request_tracing, REQUEST_ID_HEADER};
