//! Property tests for the scoring pipeline

use proptest::prelude::*;
use resume_ats::processing::AtsAnalyzer;
use std::sync::OnceLock;

const VOCABULARY: &[&str] = &[
    "python", "java", "javascript", "react", "reactjs", "node.js", "c++", "c#", ".net", "aws",
    "docker", "kubernetes", "spring", "spring boot", "mysql", "rest api", "ci/cd", "agile",
    "leadership", "experience", "education", "skills", "projects", "summary", "email",
    "engineer", "built", "team", "the", "and", "with", "years", "backend", "frontend", "cloud",
];

fn analyzer() -> &'static AtsAnalyzer {
    static ANALYZER: OnceLock<AtsAnalyzer> = OnceLock::new();
    ANALYZER.get_or_init(|| AtsAnalyzer::new().unwrap())
}

fn document() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|words| words.join(" ")),
        "[a-zA-Z0-9 +#./,-]{0,200}",
    ]
}

proptest! {
    #[test]
    fn analysis_is_deterministic(resume in document(), job in document()) {
        let first = analyzer().analyze(&resume, &job);
        let second = analyzer().analyze(&resume, &job);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn results_stay_within_bounds(resume in document(), job in document()) {
        let result = analyzer().analyze(&resume, &job);

        prop_assert!(result.ats_score <= 100);
        prop_assert!(result.missing_skills.len() <= 10);
        prop_assert!(result.improvement_tips.len() <= 5);
        prop_assert!(result.resume_sections_to_improve.len() <= 3);
        prop_assert!(result.details.keyword_match_percentage <= 100);
        prop_assert!(
            result.details.skill_match_percentage as usize <= 100 * result.details.total_resume_skills
        );
        prop_assert!(result.details.section_completeness <= 100);
    }

    #[test]
    fn appending_job_text_never_lowers_keyword_match(resume in document(), job in document()) {
        let before = analyzer().score(&resume, &job);
        let after = analyzer().score(&format!("{} {}", resume, job), &job);
        prop_assert!(after.keyword_score >= before.keyword_score);
    }

    #[test]
    fn empty_job_scores_zero_for_keywords_and_skills(resume in document()) {
        let result = analyzer().analyze(&resume, "");
        prop_assert_eq!(result.details.keyword_match_percentage, 0);
        prop_assert_eq!(result.details.skill_match_percentage, 0);
        prop_assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn section_markers_give_full_completeness(filler in "[a-z ]{0,80}") {
        let resume = format!(
            "{} email summary experience education skills projects certifications",
            filler
        );
        let result = analyzer().analyze(&resume, "python");
        prop_assert_eq!(result.details.section_completeness, 100);
        prop_assert!(result.resume_sections_to_improve.is_empty());
    }
}
