//! Taxonomy-driven skill extraction and skill overlap scoring

use crate::error::Result;
use crate::processing::taxonomy::SkillTaxonomy;
use crate::processing::text_processor::{is_word_char, normalize};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Skill overlap between a resume and a job description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillMatchResult {
    /// Percentage of job skills matched; exceeds 100 when several resume
    /// variants match the same job skill.
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Matches normalized text against every skill in a taxonomy.
///
/// One pattern per distinct skill is compiled up front and reused for every
/// call, so a single extractor can be shared across threads.
pub struct SkillExtractor {
    patterns: Vec<(String, Regex)>,
}

impl SkillExtractor {
    pub fn new(taxonomy: &SkillTaxonomy) -> Result<Self> {
        let patterns = taxonomy
            .flattened()
            .into_iter()
            .map(|skill| Ok((skill.to_string(), Regex::new(&skill_pattern(skill))?)))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Compiled {} skill patterns", patterns.len());
        Ok(Self { patterns })
    }

    /// Skills found in `text`, in taxonomy order.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let normalized = normalize(text);
        if normalized.is_empty() {
            return Vec::new();
        }

        self.patterns
            .iter()
            .filter(|(_, pattern)| pattern.is_match(&normalized))
            .map(|(skill, _)| skill.clone())
            .collect()
    }

    pub fn skill_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Build the boundary-anchored pattern for one skill.
///
/// Edges that are word characters use `\b`. Edges that are punctuation
/// (`c++`, `c#`, `.net`) cannot rely on `\b`, so they are anchored on the
/// start/end of the text or a neighbouring character that could not
/// continue the token. A trailing `+` or `#` therefore does not match inside
/// `c+++` or `c##`.
pub(crate) fn skill_pattern(skill: &str) -> String {
    let escaped = regex::escape(skill);

    let leading = match skill.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:^|[^\w])",
    };
    let trailing = match skill.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:$|[^\w+#])",
    };

    format!("(?i){}{}{}", leading, escaped, trailing)
}

/// Two skills match when, after normalization, they are equal or either
/// contains the other.
pub fn skills_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a == b || a.contains(&b) || b.contains(&a)
}

/// Compare extracted resume skills against extracted job skills.
///
/// `matched_skills` lists resume skills that match any job skill;
/// `missing_skills` lists job skills no resume skill matches. The score is
/// the matched count over the job skill count. It is not capped: several
/// resume variants may match the same job skill and push it past 100, and
/// only the blended ATS score is clamped.
pub fn compare_skills(resume_skills: &[String], job_skills: &[String]) -> SkillMatchResult {
    let matched_skills: Vec<String> = resume_skills
        .iter()
        .filter(|r| job_skills.iter().any(|j| skills_match(r, j)))
        .cloned()
        .collect();

    let missing_skills: Vec<String> = job_skills
        .iter()
        .filter(|j| !resume_skills.iter().any(|r| skills_match(r, j)))
        .cloned()
        .collect();

    let score = if job_skills.is_empty() {
        0.0
    } else {
        matched_skills.len() as f64 / job_skills.len() as f64 * 100.0
    };

    SkillMatchResult { score, matched_skills, missing_skills }
}
