//! Command implementations for the talentdash CLI

pub mod audit;
pub mod candidate;
pub mod job;
pub mod recruiter;
pub mod report;
pub mod user;

// Re-export dispatchers for flat access from main.rs
pub use audit::run_audit;
pub use candidate::run_candidate;
pub use job::run_job;
pub use recruiter::run_recruiter;
pub use report::run_report;
pub use user::run_user;
