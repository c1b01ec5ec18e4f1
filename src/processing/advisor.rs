//! Improvement tips and summary text derived from a score breakdown

use crate::processing::scorer::ScoreBreakdown;
use crate::processing::sections::SectionType;

/// Maximum number of tips returned by [`build_tips`].
pub const MAX_TIPS: usize = 5;

const MISSING_SKILLS_NAMED: usize = 3;
const LOW_KEYWORD_THRESHOLD: f64 = 50.0;

/// Build improvement tips in fixed priority order, capped at `max_tips`.
pub fn build_tips(analysis: &ScoreBreakdown, max_tips: usize) -> Vec<String> {
    let mut tips = Vec::new();

    if analysis.keyword_score < LOW_KEYWORD_THRESHOLD {
        tips.push(
            "Add more keywords from the job description to your resume to improve keyword matching."
                .to_string(),
        );
    }

    if !analysis.missing_skills.is_empty() {
        let named: Vec<&str> = analysis
            .missing_skills
            .iter()
            .take(MISSING_SKILLS_NAMED)
            .map(String::as_str)
            .collect();
        tips.push(format!(
            "Consider adding these skills if you have them: {}.",
            named.join(", ")
        ));
    }

    let sections = &analysis.sections;
    if sections.is_missing(SectionType::Summary) {
        tips.push(
            "Add a professional summary at the top of your resume highlighting your key qualifications."
                .to_string(),
        );
    }
    if sections.is_missing(SectionType::Skills) {
        tips.push("Include a dedicated skills section listing your technical and soft skills.".to_string());
    }
    if sections.is_missing(SectionType::Projects) {
        tips.push(
            "Add a projects section to showcase hands-on work with relevant technologies.".to_string(),
        );
    }
    if sections.is_missing(SectionType::Certifications) {
        tips.push("Consider adding relevant certifications to strengthen your profile.".to_string());
    }

    match analysis.ats_score {
        0..=39 => {
            tips.push(
                "Your resume needs significant improvement to match this job description.".to_string(),
            );
            tips.push(
                "Tailor your resume for this role by using exact phrases from the job posting."
                    .to_string(),
            );
        }
        40..=59 => tips.push(
            "Quantify your achievements with specific metrics and numbers where possible.".to_string(),
        ),
        60..=79 => tips.push(
            "Use industry-specific terminology that mirrors the job description.".to_string(),
        ),
        _ => {}
    }

    if tips.len() < 3 {
        tips.push("Start bullet points with strong action verbs to describe your accomplishments.".to_string());
    }
    if tips.len() < 4 {
        tips.push(
            "Keep an ATS-friendly format: standard headings, no tables, images or multi-column layouts."
                .to_string(),
        );
    }

    tips.truncate(max_tips);
    tips
}

/// One-paragraph verdict chosen by score band.
pub fn build_summary(score: u8, matched_skills: &[String], missing_skills: &[String]) -> String {
    let matched = matched_skills.len();
    let missing = missing_skills.len();

    match score {
        80..=u8::MAX => format!(
            "Excellent match! Your resume aligns well with the job requirements, covering {} of the key skills. \
             Fine-tune the remaining details to stand out.",
            matched
        ),
        60..=79 => format!(
            "Good match. Your resume covers {} relevant skills but is missing {} skills from the job description. \
             Adding them where you have real experience would strengthen your application.",
            matched, missing
        ),
        40..=59 => format!(
            "Moderate match. Your resume shows {} matching skills, but {} required skills are missing. \
             Tailor your resume more closely to this role.",
            matched, missing
        ),
        _ => format!(
            "Low match. Your resume matches only {} skills and is missing {} key skills for this position. \
             Significant tailoring is recommended before applying.",
            matched, missing
        ),
    }
}
