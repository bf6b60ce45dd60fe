//! HTTP middleware stack for the site API.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Rate limiting on login and intake routes (governor)
//!
//! The access gate is not a layer: admin handlers take [`RequireAdmin`] as
//! their first extractor, so a rejected token short-circuits before the body
//! is read.

pub mod auth;
pub mod rate_limit;
pub mod request_id;

pub use auth::RequireAdmin;
pub use rate_limit::{RateLimiterLayer, auth_rate_limiter};
pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
