//! Resume section detection

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Canonical resume sections, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Contact,
    Education,
    Experience,
    Skills,
    Projects,
    Certifications,
    Summary,
}

impl SectionType {
    pub const ALL: [SectionType; 7] = [
        SectionType::Contact,
        SectionType::Education,
        SectionType::Experience,
        SectionType::Skills,
        SectionType::Projects,
        SectionType::Certifications,
        SectionType::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Contact => "contact",
            SectionType::Education => "education",
            SectionType::Experience => "experience",
            SectionType::Skills => "skills",
            SectionType::Projects => "projects",
            SectionType::Certifications => "certifications",
            SectionType::Summary => "summary",
        }
    }

    /// Synonym disjunction used to detect the section anywhere in raw text.
    fn pattern(&self) -> &'static str {
        match self {
            SectionType::Contact => {
                r"(?i)(email|e-mail|phone|mobile|contact|linkedin|github\.com|address|[\w.+-]+@[\w-]+\.[\w.]+)"
            }
            SectionType::Education => {
                r"(?i)(education|degree|university|college|bachelor|master|b\.tech|m\.tech|b\.sc|m\.sc|bsc|msc|b\.e\.|phd|diploma|academic)"
            }
            SectionType::Experience => {
                r"(?i)(experience|employment|work history|internship|worked at|career history)"
            }
            SectionType::Skills => {
                r"(?i)(skills|technologies|technical proficiency|competencies|tech stack|expertise)"
            }
            SectionType::Projects => r"(?i)(projects?|portfolio)",
            SectionType::Certifications => {
                r"(?i)(certifications?|certificates?|certified|licen[cs]es?|accreditations?)"
            }
            SectionType::Summary => {
                r"(?i)(summary|objective|profile|about me|professional overview)"
            }
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which canonical sections a resume appears to contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionAnalysis {
    pub found_sections: BTreeMap<SectionType, bool>,
    /// Canonical order.
    pub missing_sections: Vec<SectionType>,
}

impl SectionAnalysis {
    pub fn found_count(&self) -> usize {
        self.found_sections.values().filter(|found| **found).count()
    }

    pub fn is_missing(&self, section: SectionType) -> bool {
        self.missing_sections.contains(&section)
    }

    /// Found sections as a percentage of all canonical sections.
    pub fn completeness(&self) -> f64 {
        self.found_count() as f64 / SectionType::ALL.len() as f64 * 100.0
    }
}

/// Detects canonical sections with one case-insensitive pattern per section.
///
/// Matching is a plain substring test over the raw text; a stray "degree"
/// anywhere counts as an education section.
pub struct SectionAnalyzer {
    rules: Vec<(SectionType, Regex)>,
}

impl SectionAnalyzer {
    pub fn new() -> Result<Self> {
        let rules = SectionType::ALL
            .iter()
            .map(|section| Ok((*section, Regex::new(section.pattern())?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    pub fn analyze(&self, resume_text: &str) -> SectionAnalysis {
        let mut found_sections = BTreeMap::new();
        let mut missing_sections = Vec::new();

        for (section, pattern) in &self.rules {
            if pattern.is_match(resume_text) {
                found_sections.insert(*section, true);
            } else {
                missing_sections.push(*section);
            }
        }

        SectionAnalysis { found_sections, missing_sections }
    }
}
