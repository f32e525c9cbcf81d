//! Schema model with validation at construction
//!
//! Stored rows are decoded as-is (free-text columns stay free text). Input
//! records (`New*`) are validated before they reach a statement; invalid
//! input returns `ValidationError`, not panic.

pub mod validation;
pub mod recruiter;
pub mod job;
pub mod candidate;
pub mod user;
pub mod audit;

pub use validation::ValidationError;
pub use recruiter::{NewRecruiter, Recruiter};
pub use job::{Job, JobTitle, NewJob};
pub use candidate::{Candidate, EdLevel, NewCandidate};
pub use user::{Role, User, Username};
pub use audit::AuditEntry;
