//! Report catalog
//!
//! - `parse`: lenient parsing of the free-text `Experience`, `SalaryRange`
//!   and `Skills` columns
//! - `catalog`: the fixed set of analytic reports
//! - `table`: the uniform tabular shape every report is rendered into

pub mod catalog;
pub mod parse;
pub mod table;

pub use catalog::{
    MeanSalary, RecruiterJob, RecruiterJobCount, RecruiterPosting, ReportCatalog, ReportKind,
    ReportParams, SkillCount, SkillJob, SkillsBenchmark,
};
pub use table::{Cell, ReportTable, TableRow};
