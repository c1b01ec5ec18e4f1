//! End-to-end ATS analysis: scoring, tips and summary in one result

use crate::error::Result;
use crate::processing::advisor::{build_summary, build_tips, MAX_TIPS};
use crate::processing::scorer::{ScoreBreakdown, Scorer, ScoringWeights};
use crate::processing::sections::SectionAnalyzer;
use crate::processing::skills::SkillExtractor;
use crate::processing::taxonomy::SkillTaxonomy;
use serde::{Deserialize, Serialize};

/// The analysis result handed to callers. Field names are part of the
/// external contract and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsResult {
    pub ats_score: u8,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub improvement_tips: Vec<String>,
    pub resume_sections_to_improve: Vec<String>,
    pub summary: String,
    pub details: AtsDetails,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtsDetails {
    pub keyword_match_percentage: u32,
    /// Raw skill score; above 100 when resume variants double up on a job skill.
    pub skill_match_percentage: u32,
    pub section_completeness: u32,
    pub total_resume_skills: usize,
    pub total_job_skills: usize,
}

/// Caps applied to the list fields of [`AtsResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResultLimits {
    pub max_missing_skills: usize,
    pub max_tips: usize,
    pub max_sections_to_improve: usize,
}

impl Default for ResultLimits {
    fn default() -> Self {
        Self {
            max_missing_skills: 10,
            max_tips: MAX_TIPS,
            max_sections_to_improve: 3,
        }
    }
}

/// Rule-based resume analyzer.
///
/// Construction compiles every taxonomy and section pattern once; after that
/// the analyzer is immutable and can be shared freely between threads.
pub struct AtsAnalyzer {
    taxonomy: SkillTaxonomy,
    skills: SkillExtractor,
    sections: SectionAnalyzer,
    weights: ScoringWeights,
    limits: ResultLimits,
}

impl AtsAnalyzer {
    /// Analyzer over the built-in taxonomy with default weights and limits.
    pub fn new() -> Result<Self> {
        Self::with_taxonomy(SkillTaxonomy::default())
    }

    pub fn with_taxonomy(taxonomy: SkillTaxonomy) -> Result<Self> {
        let skills = SkillExtractor::new(&taxonomy)?;
        let sections = SectionAnalyzer::new()?;

        log::debug!("ATS analyzer ready with {} skills", skills.skill_count());

        Ok(Self {
            taxonomy,
            skills,
            sections,
            weights: ScoringWeights::default(),
            limits: ResultLimits::default(),
        })
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Result<Self> {
        weights.validate()?;
        self.weights = weights;
        Ok(self)
    }

    pub fn with_limits(mut self, limits: ResultLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Score a resume against a job description.
    ///
    /// Never fails: empty or degenerate text only drives the affected
    /// sub-scores to zero.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> AtsResult {
        let breakdown = self.score(resume_text, job_text);
        self.build_result(&breakdown)
    }

    /// Raw sub-scores without tips or truncation.
    pub fn score(&self, resume_text: &str, job_text: &str) -> ScoreBreakdown {
        Scorer::new(&self.skills, &self.sections, self.weights).score(resume_text, job_text)
    }

    /// Skills from the taxonomy found in `text`.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        self.skills.extract(text)
    }

    pub fn section_analyzer(&self) -> &SectionAnalyzer {
        &self.sections
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn skill_count(&self) -> usize {
        self.skills.skill_count()
    }

    /// Turn a breakdown into the capped result with tips and summary.
    pub fn build_result(&self, breakdown: &ScoreBreakdown) -> AtsResult {
        let improvement_tips = build_tips(breakdown, self.limits.max_tips);
        let summary = build_summary(
            breakdown.ats_score,
            &breakdown.matched_skills,
            &breakdown.missing_skills,
        );

        AtsResult {
            ats_score: breakdown.ats_score,
            matched_skills: breakdown.matched_skills.clone(),
            missing_skills: breakdown
                .missing_skills
                .iter()
                .take(self.limits.max_missing_skills)
                .cloned()
                .collect(),
            improvement_tips,
            resume_sections_to_improve: breakdown
                .missing_sections()
                .iter()
                .take(self.limits.max_sections_to_improve)
                .map(|s| s.to_string())
                .collect(),
            summary,
            details: AtsDetails {
                keyword_match_percentage: breakdown.keyword_score.round() as u32,
                skill_match_percentage: breakdown.skill_score.round() as u32,
                section_completeness: breakdown.section_score.round() as u32,
                total_resume_skills: breakdown.resume_skill_count,
                total_job_skills: breakdown.job_skill_count,
            },
        }
    }
}
