//! Skill taxonomy: the fixed vocabulary of skills the extractor looks for

use crate::error::{AtsError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const PROGRAMMING: &[&str] = &[
    "javascript", "typescript", "python", "java", "c++", "c#", "ruby", "php",
    "swift", "kotlin", "golang", "rust", "scala", "perl", "dart", "elixir",
    "haskell", "matlab", "sql", "html", "css", "sass", "bash", "powershell",
];

const FRAMEWORKS: &[&str] = &[
    "react", "reactjs", "react.js", "react native", "angular", "vue", "vue.js",
    "next.js", "nextjs", "node.js", "nodejs", "express", "express.js", "django",
    "flask", "fastapi", "spring", "spring boot", "ruby on rails", "rails",
    "laravel", ".net", "asp.net", "jquery", "bootstrap", "tailwind", "redux",
    "tensorflow", "pytorch", "keras", "pandas", "numpy", "scikit-learn",
];

const DATABASES: &[&str] = &[
    "mysql", "postgresql", "postgres", "mongodb", "redis", "sqlite", "oracle",
    "sql server", "dynamodb", "cassandra", "elasticsearch", "firebase",
    "mariadb", "neo4j", "nosql",
];

const CLOUD: &[&str] = &[
    "aws", "azure", "gcp", "google cloud", "heroku", "vercel", "netlify",
    "docker", "kubernetes", "terraform", "ansible", "jenkins", "ci/cd",
    "github actions", "serverless", "cloudformation",
];

const TOOLS: &[&str] = &[
    "git", "github", "gitlab", "bitbucket", "jira", "confluence", "postman",
    "webpack", "vite", "babel", "figma", "linux", "nginx", "kafka", "rabbitmq",
    "graphql", "rest api", "restful", "rest", "grpc", "jest", "mocha",
    "cypress", "selenium", "pytest", "junit", "tableau", "power bi", "excel",
];

const CONCEPTS: &[&str] = &[
    "machine learning", "deep learning", "artificial intelligence",
    "data science", "data analysis", "data structures", "algorithms", "nlp",
    "computer vision", "microservices", "system design", "distributed systems",
    "object-oriented programming", "oop", "design patterns", "agile", "scrum",
    "devops", "unit testing", "test-driven development", "tdd", "api",
    "responsive design", "cloud computing", "cybersecurity", "etl",
];

const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "problem solving",
    "problem-solving", "critical thinking", "time management",
    "project management", "collaboration", "adaptability", "mentoring",
    "analytical", "attention to detail", "creativity", "presentation",
    "stakeholder management",
];

/// One named group of skills, kept in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

/// Ordered category → skills mapping.
///
/// Entries are lowercase canonical surface forms. Variants such as "react",
/// "reactjs" and "react.js" are intentionally separate entries; each is
/// matched on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    #[serde(rename = "category")]
    categories: Vec<SkillCategory>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        let builtin = [
            ("programming", PROGRAMMING),
            ("frameworks", FRAMEWORKS),
            ("databases", DATABASES),
            ("cloud", CLOUD),
            ("tools", TOOLS),
            ("concepts", CONCEPTS),
            ("soft_skills", SOFT_SKILLS),
        ];

        Self {
            categories: builtin
                .iter()
                .map(|(name, skills)| SkillCategory {
                    name: name.to_string(),
                    skills: skills.iter().map(|s| s.to_string()).collect(),
                })
                .collect(),
        }
    }
}

impl SkillTaxonomy {
    /// Build a taxonomy from explicit categories. Entries are trimmed and
    /// lowercased; empty entries are rejected.
    pub fn new(categories: Vec<SkillCategory>) -> Result<Self> {
        let mut taxonomy = Self { categories: Vec::with_capacity(categories.len()) };
        for category in categories {
            taxonomy.extend_category(&category.name, category.skills)?;
        }
        Ok(taxonomy)
    }

    /// Parse a taxonomy from TOML:
    ///
    /// ```toml
    /// [[category]]
    /// name = "programming"
    /// skills = ["rust", "python"]
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: SkillTaxonomy = toml::from_str(content)?;
        Self::new(raw.categories)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AtsError::Configuration(format!(
                "Failed to read taxonomy file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Append skills to a category, creating the category at the end if it
    /// does not exist yet.
    pub fn extend_category<I, S>(&mut self, name: &str, skills: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim().to_lowercase();
        if name.is_empty() {
            return Err(AtsError::Configuration("Skill category name is empty".to_string()));
        }

        let mut cleaned = Vec::new();
        for skill in skills {
            let skill = skill.as_ref().trim().to_lowercase();
            if skill.is_empty() {
                return Err(AtsError::Configuration(format!(
                    "Empty skill entry in category '{}'",
                    name
                )));
            }
            cleaned.push(skill);
        }

        match self.categories.iter_mut().find(|c| c.name == name) {
            Some(category) => category.skills.extend(cleaned),
            None => self.categories.push(SkillCategory { name, skills: cleaned }),
        }
        Ok(())
    }

    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&SkillCategory> {
        self.categories.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Name of the first category that lists `skill`.
    pub fn category_of(&self, skill: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.skills.iter().any(|s| s == skill))
            .map(|c| c.name.as_str())
    }

    /// All skills in category order with duplicates removed (first
    /// occurrence wins).
    pub fn flattened(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.categories
            .iter()
            .flat_map(|c| c.skills.iter())
            .map(String::as_str)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Number of distinct skills.
    pub fn len(&self) -> usize {
        self.flattened().len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.iter().all(|c| c.skills.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_categories() {
        let taxonomy = SkillTaxonomy::default();
        let names: Vec<&str> = taxonomy.categories().iter().map(|c| c.name.as_str()).collect();

        assert_eq!(
            names,
            vec!["programming", "frameworks", "databases", "cloud", "tools", "concepts", "soft_skills"]
        );
        assert!(taxonomy.len() > 100);
    }

    #[test]
    fn test_default_entries_are_lowercase() {
        let taxonomy = SkillTaxonomy::default();
        for skill in taxonomy.flattened() {
            assert_eq!(skill, skill.to_lowercase());
            assert_eq!(skill, skill.trim());
        }
    }

    #[test]
    fn test_flattened_deduplicates_in_order() {
        let taxonomy = SkillTaxonomy::new(vec![
            SkillCategory { name: "a".into(), skills: vec!["rust".into(), "go".into()] },
            SkillCategory { name: "b".into(), skills: vec!["Rust".into(), "zig".into()] },
        ])
        .unwrap();

        assert_eq!(taxonomy.flattened(), vec!["rust", "go", "zig"]);
        assert_eq!(taxonomy.category_of("rust"), Some("a"));
        assert_eq!(taxonomy.category_of("zig"), Some("b"));
    }

    #[test]
    fn test_from_toml() {
        let content = r#"
[[category]]
name = "languages"
skills = ["Rust", " Python "]

[[category]]
name = "soft"
skills = ["leadership"]
"#;
        let taxonomy = SkillTaxonomy::from_toml_str(content).unwrap();
        assert_eq!(taxonomy.flattened(), vec!["rust", "python", "leadership"]);
        assert!(taxonomy.category("LANGUAGES").is_some());
    }

    #[test]
    fn test_rejects_empty_entries() {
        let content = r#"
[[category]]
name = "languages"
skills = ["rust", "  "]
"#;
        assert!(matches!(
            SkillTaxonomy::from_toml_str(content),
            Err(AtsError::Configuration(_))
        ));
    }

    #[test]
    fn test_extend_category() {
        let mut taxonomy = SkillTaxonomy::default();
        let before = taxonomy.len();

        taxonomy.extend_category("programming", ["zig"]).unwrap();
        taxonomy.extend_category("hardware", ["verilog", "fpga"]).unwrap();

        assert_eq!(taxonomy.len(), before + 3);
        assert_eq!(taxonomy.category_of("zig"), Some("programming"));
        assert_eq!(taxonomy.categories().last().unwrap().name, "hardware");
    }
}
