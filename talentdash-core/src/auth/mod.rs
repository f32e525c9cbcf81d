//! Authentication and authorization
//!
//! - `password`: bcrypt hashing and fail-closed verification
//! - `session`: the caller-held `Anonymous -> Authenticated(role)` state
//! - `service`: user creation and login against the `Users` table

pub mod password;
pub mod service;
pub mod session;

pub use password::{hash_password, verify_password, PasswordHash};
pub use service::AuthService;
pub use session::Session;
