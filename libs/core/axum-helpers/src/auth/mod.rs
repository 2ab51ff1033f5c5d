//! Static shared-secret Basic Auth gate.
//!
//! Every inbound API request must carry an `Authorization: Basic` header
//! matching a single credential pair known to the server process. This is
//! process-level gating, not per-user authentication.

mod config;
mod middleware;

pub use config::BasicAuthConfig;
pub use middleware::basic_auth_middleware;
