//! Configuration management for the ATS scorer

use crate::error::{AtsError, Result};
use crate::processing::analyzer::ResultLimits;
use crate::processing::scorer::ScoringWeights;
use crate::processing::taxonomy::SkillTaxonomy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub limits: LimitsConfig,
    pub input: InputConfig,
    pub taxonomy: TaxonomyConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub skill_weight: f64,
    pub keyword_weight: f64,
    pub section_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_missing_skills: usize,
    pub max_tips: usize,
    pub max_sections_to_improve: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Resume text is cut to this many characters before scoring.
    pub max_resume_chars: usize,
    pub max_file_size_bytes: u64,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomyConfig {
    /// TOML taxonomy file replacing the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Skills appended per category on top of the base taxonomy.
    pub extra_skills: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        let weights = ScoringWeights::default();
        let limits = ResultLimits::default();

        Self {
            scoring: ScoringConfig {
                skill_weight: weights.skill,
                keyword_weight: weights.keyword,
                section_weight: weights.section,
            },
            limits: LimitsConfig {
                max_missing_skills: limits.max_missing_skills,
                max_tips: limits.max_tips,
                max_sections_to_improve: limits.max_sections_to_improve,
            },
            input: InputConfig::default(),
            taxonomy: TaxonomyConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Config::default().scoring
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Config::default().limits
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_resume_chars: 20_000,
            max_file_size_bytes: 5 * 1024 * 1024,
            enable_cache: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("No configuration found, writing defaults to {}", config_path.display());
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| AtsError::Configuration(format!("Failed to parse config '{}': {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ats")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.weights().validate()?;

        if self.input.max_resume_chars == 0 {
            return Err(AtsError::Configuration("input.max_resume_chars must be greater than 0".to_string()));
        }
        if self.input.max_file_size_bytes == 0 {
            return Err(AtsError::Configuration("input.max_file_size_bytes must be greater than 0".to_string()));
        }
        Ok(())
    }

    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            skill: self.scoring.skill_weight,
            keyword: self.scoring.keyword_weight,
            section: self.scoring.section_weight,
        }
    }

    pub fn limits(&self) -> ResultLimits {
        ResultLimits {
            max_missing_skills: self.limits.max_missing_skills,
            max_tips: self.limits.max_tips,
            max_sections_to_improve: self.limits.max_sections_to_improve,
        }
    }

    /// Base taxonomy (built-in or from `taxonomy.path`) plus `extra_skills`.
    pub fn build_taxonomy(&self) -> Result<SkillTaxonomy> {
        let mut taxonomy = match &self.taxonomy.path {
            Some(path) => {
                log::info!("Loading skill taxonomy from {}", path.display());
                SkillTaxonomy::from_file(path)?
            }
            None => SkillTaxonomy::default(),
        };

        for (category, skills) in &self.taxonomy.extra_skills {
            taxonomy.extend_category(category, skills)?;
        }

        Ok(taxonomy)
    }
}
