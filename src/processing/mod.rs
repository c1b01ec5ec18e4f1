//! Rule-based resume analysis: normalization, extraction, scoring and advice

pub mod text_processor;
pub mod taxonomy;
pub mod skills;
pub mod sections;
pub mod scorer;
pub mod advisor;
pub mod analyzer;

pub use analyzer::{AtsAnalyzer, AtsDetails, AtsResult, ResultLimits};
pub use scorer::{ScoreBreakdown, ScoringWeights};
pub use sections::{SectionAnalysis, SectionType};
pub use taxonomy::{SkillCategory, SkillTaxonomy};
