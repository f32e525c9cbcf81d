//! `talentdash report` - the report catalog

use anyhow::Result;
use clap::{Parser, ValueEnum};
use talentdash_core::models::EdLevel;
use talentdash_core::reports::{ReportCatalog, ReportKind, ReportParams};

use crate::context::AppContext;
use crate::ui;

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Which report to run
    #[arg(value_enum)]
    pub kind: ReportName,

    /// Exact job location (recruiters-by-location)
    #[arg(long)]
    pub location: Option<String>,

    /// Skill substring (jobs-by-skill-salary, mean-salary-by-skill)
    #[arg(long)]
    pub skill: Option<String>,

    /// Undergraduate, Master or PhD (mean-salary-by-ed-level)
    #[arg(long)]
    pub ed_level: Option<EdLevel>,

    /// Recruiter contact person; all recruiters when omitted (jobs-by-min-experience)
    #[arg(long)]
    pub recruiter: Option<String>,

    /// Minimum years of experience (jobs-by-min-experience)
    #[arg(long, default_value_t = 0)]
    pub min_experience: u32,
}

/// Report names as typed on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportName {
    RecruiterJobCounts,
    TopSkills,
    RecruitersByLocation,
    JobsBySkillSalary,
    JobsByMinExperience,
    MeanSalaryByEdLevel,
    MeanSalaryBySkill,
    SkillsSalaryBenchmark,
}

impl From<ReportName> for ReportKind {
    fn from(name: ReportName) -> Self {
        match name {
            ReportName::RecruiterJobCounts => ReportKind::RecruiterJobCounts,
            ReportName::TopSkills => ReportKind::TopSkills,
            ReportName::RecruitersByLocation => ReportKind::RecruitersByLocation,
            ReportName::JobsBySkillSalary => ReportKind::JobsBySkillSalary,
            ReportName::JobsByMinExperience => ReportKind::JobsByMinExperience,
            ReportName::MeanSalaryByEdLevel => ReportKind::MeanSalaryByEdLevel,
            ReportName::MeanSalaryBySkill => ReportKind::MeanSalaryBySkill,
            ReportName::SkillsSalaryBenchmark => ReportKind::SkillsSalaryBenchmark,
        }
    }
}

impl ReportArgs {
    fn params(&self) -> ReportParams {
        ReportParams {
            location: self.location.clone(),
            skill: self.skill.clone(),
            ed_level: self.ed_level,
            recruiter: self.recruiter.clone(),
            min_experience: self.min_experience,
        }
    }
}

pub async fn run_report(ctx: &AppContext, args: ReportArgs) -> Result<()> {
    let kind = ReportKind::from(args.kind);
    let table = ReportCatalog::new(&ctx.db).run(kind, &args.params()).await?;
    ui::emit_table(&table, ctx.json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_names_match_catalog_names() {
        for name in ReportName::value_variants() {
            let possible = name.to_possible_value().unwrap();
            assert_eq!(possible.get_name(), ReportKind::from(*name).name());
        }
        assert_eq!(ReportName::value_variants().len(), ReportKind::ALL.len());
    }
}
