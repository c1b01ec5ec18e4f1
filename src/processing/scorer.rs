//! Weighted ATS scoring

use crate::error::{AtsError, Result};
use crate::processing::sections::{SectionAnalysis, SectionAnalyzer, SectionType};
use crate::processing::skills::{compare_skills, SkillExtractor};
use crate::processing::text_processor::{extract_keywords, keyword_match_percentage};
use serde::{Deserialize, Serialize};

/// Relative weight of each sub-score in the final ATS score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub keyword: f64,
    pub section: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.45,
            keyword: 0.35,
            section: 0.20,
        }
    }
}

impl ScoringWeights {
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in [("skill", self.skill), ("keyword", self.keyword), ("section", self.section)] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AtsError::Configuration(format!(
                    "Scoring weight '{}' must be a non-negative number, got {}",
                    name, weight
                )));
            }
        }
        Ok(())
    }
}

/// Everything the scorer derives from one resume / job description pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Final weighted score, 0–100.
    pub ats_score: u8,
    pub keyword_score: f64,
    pub skill_score: f64,
    pub section_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub sections: SectionAnalysis,
    pub resume_skill_count: usize,
    pub job_skill_count: usize,
}

impl ScoreBreakdown {
    pub fn missing_sections(&self) -> &[SectionType] {
        &self.sections.missing_sections
    }
}

/// Combines keyword, skill and section sub-scores into one ATS score.
pub struct Scorer<'a> {
    skills: &'a SkillExtractor,
    sections: &'a SectionAnalyzer,
    weights: ScoringWeights,
}

impl<'a> Scorer<'a> {
    pub fn new(skills: &'a SkillExtractor, sections: &'a SectionAnalyzer, weights: ScoringWeights) -> Self {
        Self { skills, sections, weights }
    }

    pub fn score(&self, resume_text: &str, job_text: &str) -> ScoreBreakdown {
        let resume_keywords = extract_keywords(resume_text);
        let job_keywords = extract_keywords(job_text);
        let keyword_score = keyword_match_percentage(&resume_keywords, &job_keywords);

        let resume_skills = self.skills.extract(resume_text);
        let job_skills = self.skills.extract(job_text);
        let skill_match = compare_skills(&resume_skills, &job_skills);

        let sections = self.sections.analyze(resume_text);
        let section_score = sections.completeness();

        let ats_score = combine(&self.weights, skill_match.score, keyword_score, section_score);

        log::debug!(
            "Scored pair: {} job keywords ({:.1}% matched), skills {} resume / {} job ({:.1}%), sections {}/7, ats {}",
            job_keywords.len(),
            keyword_score,
            resume_skills.len(),
            job_skills.len(),
            skill_match.score,
            sections.found_count(),
            ats_score,
        );

        ScoreBreakdown {
            ats_score,
            keyword_score,
            skill_score: skill_match.score,
            section_score,
            matched_skills: skill_match.matched_skills,
            missing_skills: skill_match.missing_skills,
            sections,
            resume_skill_count: resume_skills.len(),
            job_skill_count: job_skills.len(),
        }
    }
}

/// Weighted blend rounded to the nearest integer and clamped to 0–100.
pub fn combine(weights: &ScoringWeights, skill: f64, keyword: f64, section: f64) -> u8 {
    let raw = skill * weights.skill + keyword * weights.keyword + section * weights.section;
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::taxonomy::SkillTaxonomy;

    fn score(resume: &str, job: &str) -> ScoreBreakdown {
        let skills = SkillExtractor::new(&SkillTaxonomy::default()).unwrap();
        let sections = SectionAnalyzer::new().unwrap();
        Scorer::new(&skills, &sections, ScoringWeights::default()).score(resume, job)
    }

    #[test]
    fn test_combine_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(combine(&weights, 100.0, 100.0, 100.0), 100);
        assert_eq!(combine(&weights, 0.0, 0.0, 0.0), 0);
        // 45 + 10.5 + 10 = 65.5 -> 66
        assert_eq!(combine(&weights, 100.0, 30.0, 50.0), 66);
    }

    #[test]
    fn test_combine_clamps() {
        let heavy = ScoringWeights { skill: 1.0, keyword: 1.0, section: 1.0 };
        assert_eq!(combine(&heavy, 100.0, 100.0, 100.0), 100);
        assert_eq!(combine(&ScoringWeights::default(), f64::NAN, 0.0, 0.0), 0);
    }

    #[test]
    fn test_invalid_weights() {
        let weights = ScoringWeights { skill: -0.1, keyword: 0.5, section: 0.5 };
        assert!(matches!(weights.validate(), Err(AtsError::Configuration(_))));
        assert!(ScoringWeights::default().validate().is_ok());
    }

    #[test]
    fn test_empty_job_description() {
        let breakdown = score("Python developer with AWS experience. Education: BSc.", "");

        assert_eq!(breakdown.keyword_score, 0.0);
        assert_eq!(breakdown.skill_score, 0.0);
        assert_eq!(breakdown.job_skill_count, 0);
        assert!(breakdown.missing_skills.is_empty());
        assert!(breakdown.ats_score <= 100);
    }

    #[test]
    fn test_empty_resume() {
        let breakdown = score("", "Looking for a Rust engineer with Docker.");

        assert_eq!(breakdown.keyword_score, 0.0);
        assert_eq!(breakdown.skill_score, 0.0);
        assert_eq!(breakdown.section_score, 0.0);
        assert_eq!(breakdown.ats_score, 0);
        assert_eq!(breakdown.missing_skills, vec!["rust".to_string(), "docker".to_string()]);
    }

    #[test]
    fn test_skill_variants_lift_blend_before_clamp() {
        let breakdown = score("react reactjs react.js", "react");

        assert_eq!(breakdown.skill_score, 300.0);
        assert_eq!(breakdown.keyword_score, 100.0);
        assert_eq!(breakdown.section_score, 0.0);
        // 300 * 0.45 + 100 * 0.35 clamps to 100
        assert_eq!(breakdown.ats_score, 100);
    }

    #[test]
    fn test_identical_texts_score_high() {
        let text = "Email: jane@example.com. Summary: Rust engineer. Skills: Rust, Docker, Kubernetes. \
                    Experience: 5 years. Education: BSc. Projects: compiler. Certifications: CKA.";
        let breakdown = score(text, text);

        assert_eq!(breakdown.keyword_score, 100.0);
        assert_eq!(breakdown.skill_score, 100.0);
        assert_eq!(breakdown.section_score, 100.0);
        assert_eq!(breakdown.ats_score, 100);
    }
}
