//! Analysis pipelines
//!
//! Each analysis loads its source tables, runs a pure compute step, renders
//! one or more artifacts, and returns the paths it wrote. The compute steps
//! never touch the filesystem, so they are tested directly on small inputs.

pub mod disparities;
pub mod employment;
pub mod postings;
pub mod skills;

use crate::config::AnalysisConfig;
use crate::error::Result;
use std::path::PathBuf;

/// The analyses this crate can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    /// Employment growth by exposure bin
    EmploymentGrowth,
    /// Skill categories correlated with exposure
    SkillCorrelates,
    /// Wage and education disparities across exposure groups
    WageEducation,
    /// AI-related postings share over time
    PostingsTrend,
}

impl Analysis {
    /// Every analysis, in execution order
    pub const ALL: [Self; 4] = [
        Self::EmploymentGrowth,
        Self::SkillCorrelates,
        Self::WageEducation,
        Self::PostingsTrend,
    ];

    /// Stable name used on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::EmploymentGrowth => "employment-growth",
            Self::SkillCorrelates => "skill-correlates",
            Self::WageEducation => "wage-education",
            Self::PostingsTrend => "postings-trend",
        }
    }

    /// Parse a command line name
    ///
    /// The artifact prefixes q1/q2/q3/ctx are accepted as shorthand.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "employment-growth" | "q1" => Some(Self::EmploymentGrowth),
            "skill-correlates" | "q2" => Some(Self::SkillCorrelates),
            "wage-education" | "q3" => Some(Self::WageEducation),
            "postings-trend" | "ctx" => Some(Self::PostingsTrend),
            _ => None,
        }
    }

    /// Run the analysis, returning the artifact paths it wrote
    pub fn run(self, config: &AnalysisConfig) -> Result<Vec<PathBuf>> {
        match self {
            Self::EmploymentGrowth => employment::run(config),
            Self::SkillCorrelates => skills::run(config),
            Self::WageEducation => disparities::run(config),
            Self::PostingsTrend => postings::run(config),
        }
    }
}
