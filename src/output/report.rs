//! Report structures wrapping an ATS result with run metadata

use crate::processing::analyzer::AtsResult;
use crate::processing::scorer::ScoringWeights;
use crate::processing::taxonomy::SkillTaxonomy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One analysis run: the contract result plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    pub result: AtsResult,

    /// Matched skills grouped by taxonomy category.
    pub matched_by_category: BTreeMap<String, Vec<String>>,

    /// Missing skills (before truncation) grouped by taxonomy category.
    pub missing_by_category: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub resume_source: String,
    pub job_source: String,
    pub processing_time_ms: u64,
    pub taxonomy_size: usize,
    pub weights: ScoringWeights,
}

impl ReportMetadata {
    pub fn new(resume_source: impl Into<String>, job_source: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_source: resume_source.into(),
            job_source: job_source.into(),
            processing_time_ms: 0,
            taxonomy_size: 0,
            weights: ScoringWeights::default(),
        }
    }
}

impl AnalysisReport {
    pub fn new(
        result: AtsResult,
        all_missing_skills: &[String],
        taxonomy: &SkillTaxonomy,
        metadata: ReportMetadata,
    ) -> Self {
        Self {
            matched_by_category: group_by_category(&result.matched_skills, taxonomy),
            missing_by_category: group_by_category(all_missing_skills, taxonomy),
            metadata,
            result,
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.result.ats_score)
    }
}

/// Score bands shared by every formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Moderate,
    Low,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Moderate,
            _ => ScoreBand::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "EXCELLENT",
            ScoreBand::Good => "GOOD",
            ScoreBand::Moderate => "MODERATE",
            ScoreBand::Low => "LOW",
        }
    }
}

/// Scores for one resume against several job descriptions, best first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub entries: Vec<RankingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub job_source: String,
    pub result: AtsResult,
}

impl RankingReport {
    /// Sort by score descending; equal scores keep input order.
    pub fn new(resume_source: impl Into<String>, scored: Vec<(String, AtsResult)>) -> Self {
        let mut scored = scored;
        scored.sort_by(|a, b| b.1.ats_score.cmp(&a.1.ats_score));

        Self {
            generated_at: Utc::now(),
            resume_source: resume_source.into(),
            entries: scored
                .into_iter()
                .enumerate()
                .map(|(idx, (job_source, result))| RankingEntry {
                    rank: idx + 1,
                    job_source,
                    result,
                })
                .collect(),
        }
    }
}

fn group_by_category(skills: &[String], taxonomy: &SkillTaxonomy) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for skill in skills {
        let category = taxonomy.category_of(skill).unwrap_or("other");
        grouped.entry(category.to_string()).or_default().push(skill.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AtsDetails;

    fn result(score: u8) -> AtsResult {
        AtsResult {
            ats_score: score,
            matched_skills: vec!["python".into(), "aws".into()],
            missing_skills: vec!["docker".into()],
            improvement_tips: Vec::new(),
            resume_sections_to_improve: Vec::new(),
            summary: String::new(),
            details: AtsDetails {
                keyword_match_percentage: 0,
                skill_match_percentage: 0,
                section_completeness: 0,
                total_resume_skills: 2,
                total_job_skills: 3,
            },
        }
    }

    #[test]
    fn test_score_bands() {
        assert_eq!(ScoreBand::from_score(100), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(80), ScoreBand::Excellent);
        assert_eq!(ScoreBand::from_score(79), ScoreBand::Good);
        assert_eq!(ScoreBand::from_score(40), ScoreBand::Moderate);
        assert_eq!(ScoreBand::from_score(39), ScoreBand::Low);
    }

    #[test]
    fn test_report_groups_by_category() {
        let taxonomy = SkillTaxonomy::default();
        let report = AnalysisReport::new(
            result(70),
            &["docker".to_string(), "cobol-85".to_string()],
            &taxonomy,
            ReportMetadata::new("resume.txt", "job.txt"),
        );

        assert_eq!(report.matched_by_category["programming"], vec!["python".to_string()]);
        assert_eq!(report.matched_by_category["cloud"], vec!["aws".to_string()]);
        assert_eq!(report.missing_by_category["cloud"], vec!["docker".to_string()]);
        assert_eq!(report.missing_by_category["other"], vec!["cobol-85".to_string()]);
        assert_eq!(report.score_band(), ScoreBand::Good);
    }

    #[test]
    fn test_ranking_is_stable() {
        let ranking = RankingReport::new(
            "resume.txt",
            vec![
                ("a.txt".into(), result(40)),
                ("b.txt".into(), result(90)),
                ("c.txt".into(), result(40)),
            ],
        );

        let order: Vec<&str> = ranking.entries.iter().map(|e| e.job_source.as_str()).collect();
        assert_eq!(order, vec!["b.txt", "a.txt", "c.txt"]);
        assert_eq!(ranking.entries[0].rank, 1);
        assert_eq!(ranking.entries[2].rank, 3);
    }
}
