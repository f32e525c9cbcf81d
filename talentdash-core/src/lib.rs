//! talentdash-core - data access, authentication and reporting for the
//! talent acquisition dashboard
//!
//! The crate talks to an existing MySQL schema (`Recruiter`, `Job`,
//! `Candidate`, `Users`, `Job_Audit`) and exposes:
//!
//! - [`db`]: the connection provider and one repository per table
//! - [`auth`]: bcrypt password handling, sessions and role checks
//! - [`reports`]: the fixed analytic report catalog
//! - [`config`]: TOML configuration with environment overrides
//!
//! Presentation lives elsewhere (see the `talentdash` binary).

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod reports;

pub use config::DashConfig;
pub use db::Database;
pub use error::{DashError, Result};
