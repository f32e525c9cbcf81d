//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One scoped connection per call, released on every exit path
//! - Mutating calls check the caller's `Session` first
//! - Handles conflicts via constraint errors (no check-then-insert)

pub mod recruiters;
pub mod jobs;
pub mod candidates;
pub mod users;
pub mod audit;

pub use recruiters::RecruiterRepo;
pub use jobs::{JobRepo, SalaryChange};
pub use candidates::CandidateRepo;
pub use users::{Credentials, UserRepo};
pub use audit::AuditRepo;
