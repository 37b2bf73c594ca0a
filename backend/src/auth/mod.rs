//! Authentication and authorization module
//!
//! Provides JWT bearer tokens, bcrypt password hashing, the request
//! identity extractor, and the per-resource ownership guard.

mod jwt;
mod middleware;
mod ownership;
mod password;

pub use jwt::{Claims, TokenError, TokenService};
pub use middleware::CurrentUser;
pub use ownership::ensure_owner;
pub use password::PasswordService;
