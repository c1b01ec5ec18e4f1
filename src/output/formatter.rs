//! Output formatters: console, JSON, Markdown and HTML renderings of a report

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{AnalysisReport, RankingReport, ScoreBand};
use crate::processing::sections::{SectionAnalysis, SectionType};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON output. Without metadata only the bare result object is emitted.
pub struct JsonFormatter {
    pretty: bool,
    include_metadata: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>ATS Resume Analysis</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 860px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .badge { display: inline-block; padding: 6px 14px; border-radius: 16px; font-weight: bold; color: white; margin-left: 10px; }
        .band-excellent { background: #28a745; }
        .band-good { background: #17a2b8; }
        .band-moderate { background: #ffc107; color: #000; }
        .band-low { background: #dc3545; }
        .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; }
        .metric { background: #f8f9fa; padding: 12px; border-radius: 6px; border-left: 4px solid #007acc; }
        .skill { display: inline-block; padding: 2px 10px; margin: 3px; border-radius: 12px; background: #e9ecef; }
        .matched { background: #d4edda; }
        .missing { background: #f8d7da; }
        .metadata { background: #e9ecef; padding: 12px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>ATS Resume Analysis</h1>
            <h2>Score: {{ ats_score }}/100 <span class="badge {{ band_class }}">{{ band_label }}</span></h2>
            <p>{{ summary }}</p>
        </div>

        <h2>Breakdown</h2>
        <div class="grid">
            <div class="metric"><strong>Keyword match</strong><br>{{ keyword_pct }}%</div>
            <div class="metric"><strong>Skill match</strong><br>{{ skill_pct }}%</div>
            <div class="metric"><strong>Section completeness</strong><br>{{ section_pct }}%</div>
            <div class="metric"><strong>Skills found</strong><br>{{ resume_skills }} resume / {{ job_skills }} job</div>
        </div>

        <h2>Matched Skills</h2>
        <p>{% for skill in matched_skills %}<span class="skill matched">{{ skill }}</span>{% endfor %}{% if matched_skills.is_empty() %}None{% endif %}</p>

        <h2>Missing Skills</h2>
        <p>{% for skill in missing_skills %}<span class="skill missing">{{ skill }}</span>{% endfor %}{% if missing_skills.is_empty() %}None{% endif %}</p>

        {% if !sections_to_improve.is_empty() %}
        <h2>Sections to Add</h2>
        <ul>{% for section in sections_to_improve %}<li>{{ section }}</li>{% endfor %}</ul>
        {% endif %}

        <h2>Improvement Tips</h2>
        <ol>{% for tip in tips %}<li>{{ tip }}</li>{% endfor %}</ol>

        <div class="metadata">
            <p>Generated by resume-ats v{{ version }} on {{ generated_at }} in {{ processing_time }}ms</p>
            <p>Resume: {{ resume_source }} | Job: {{ job_source }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate<'a> {
    include_styles: bool,
    ats_score: u8,
    band_class: &'static str,
    band_label: &'static str,
    summary: &'a str,
    keyword_pct: u32,
    skill_pct: u32,
    section_pct: u32,
    resume_skills: usize,
    job_skills: usize,
    matched_skills: &'a [String],
    missing_skills: &'a [String],
    sections_to_improve: &'a [String],
    tips: &'a [String],
    version: &'a str,
    generated_at: String,
    processing_time: u64,
    resume_source: String,
    job_source: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "▓".blue().bold(), title.blue().bold())
        } else {
            format!("\n{} {}\n", "▓", title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::Good => Color::BrightGreen,
            ScoreBand::Moderate => Color::Yellow,
            ScoreBand::Low => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", band.label().color(color).bold())
        } else {
            format!("[{}]", band.label())
        }
    }

    /// Every canonical section with a found/missing marker, then completeness
    /// over all canonical sections.
    pub fn format_sections(&self, source: &str, analysis: &SectionAnalysis) -> String {
        let mut output = self.format_header(&format!("SECTIONS in {}", source));

        for section in SectionType::ALL {
            if analysis.is_missing(section) {
                output.push_str(&format!("  {} {}\n", self.colorize("✗", Color::Red), section));
            } else {
                output.push_str(&format!("  {} {}\n", self.colorize("✓", Color::Green), section));
            }
        }

        output.push_str(&format!(
            "\nCompleteness: {:.0}% ({}/{})\n",
            analysis.completeness(),
            analysis.found_count(),
            SectionType::ALL.len()
        ));
        output
    }

    pub fn format_ranking(&self, ranking: &RankingReport) -> String {
        let mut output = self.format_header(&format!("JOB RANKING for {}", ranking.resume_source));

        for entry in &ranking.entries {
            let band = ScoreBand::from_score(entry.result.ats_score);
            output.push_str(&format!(
                "{:>3}. {:>3}/100 {} {}\n",
                entry.rank,
                entry.result.ats_score,
                self.format_score_badge(band),
                entry.job_source
            ));
            if self.detailed && !entry.result.missing_skills.is_empty() {
                output.push_str(&format!(
                    "       missing: {}\n",
                    self.colorize(&entry.result.missing_skills.join(", "), Color::Red)
                ));
            }
        }

        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("ATS RESUME ANALYSIS"));
        output.push_str(&format!(
            "ATS Score: {}/100 {}\n",
            result.ats_score,
            self.format_score_badge(report.score_band())
        ));
        output.push_str(&format!("{}\n", self.colorize(&result.summary, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown"));
        output.push_str(&format!(
            "  • Keyword match: {}% (weight {:.0}%)\n",
            result.details.keyword_match_percentage,
            report.metadata.weights.keyword * 100.0
        ));
        output.push_str(&format!(
            "  • Skill match: {}% (weight {:.0}%)\n",
            result.details.skill_match_percentage,
            report.metadata.weights.skill * 100.0
        ));
        output.push_str(&format!(
            "  • Section completeness: {}% (weight {:.0}%)\n",
            result.details.section_completeness,
            report.metadata.weights.section * 100.0
        ));
        output.push_str(&format!(
            "  • Skills found: {} in resume, {} in job description\n",
            result.details.total_resume_skills, result.details.total_job_skills
        ));

        output.push_str(&self.format_header("Skills"));
        if result.matched_skills.is_empty() {
            output.push_str("  Matched: none\n");
        } else {
            output.push_str(&format!(
                "  Matched: {}\n",
                self.colorize(&result.matched_skills.join(", "), Color::Green)
            ));
        }
        if result.missing_skills.is_empty() {
            output.push_str("  Missing: none\n");
        } else {
            output.push_str(&format!(
                "  Missing: {}\n",
                self.colorize(&result.missing_skills.join(", "), Color::Red)
            ));
        }

        if self.detailed {
            for (category, skills) in &report.matched_by_category {
                output.push_str(&format!("    ✓ {}: {}\n", category, skills.join(", ")));
            }
            for (category, skills) in &report.missing_by_category {
                output.push_str(&format!("    ✗ {}: {}\n", category, skills.join(", ")));
            }
        }

        if !result.resume_sections_to_improve.is_empty() {
            output.push_str(&self.format_header("Sections to Add"));
            for section in &result.resume_sections_to_improve {
                output.push_str(&format!("  • {}\n", section));
            }
        }

        output.push_str(&self.format_header("Improvement Tips"));
        for (i, tip) in result.improvement_tips.iter().enumerate() {
            output.push_str(&format!("  {}. {}\n", i + 1, tip));
        }

        if self.detailed {
            output.push_str(&format!(
                "\nGenerated: {} | Processing time: {}ms | Taxonomy: {} skills\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms,
                report.metadata.taxonomy_size
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool, include_metadata: bool) -> Self {
        Self { pretty, include_metadata }
    }

    pub fn format_ranking(&self, ranking: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(ranking)?)
        } else {
            Ok(serde_json::to_string(ranking)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        match (self.include_metadata, self.pretty) {
            (true, true) => Ok(serde_json::to_string_pretty(report)?),
            (true, false) => Ok(serde_json::to_string(report)?),
            (false, true) => Ok(serde_json::to_string_pretty(&report.result)?),
            (false, false) => Ok(serde_json::to_string(&report.result)?),
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# ATS Resume Analysis\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.resume_source, report.metadata.job_source
            ));
        }

        output.push_str(&format!(
            "**ATS Score:** {}/100 ({})\n\n",
            result.ats_score,
            report.score_band().label()
        ));
        output.push_str(&format!("{}\n\n", result.summary));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        output.push_str(&format!(
            "| Skill match | {}% | {:.0}% |\n",
            result.details.skill_match_percentage,
            report.metadata.weights.skill * 100.0
        ));
        output.push_str(&format!(
            "| Keyword match | {}% | {:.0}% |\n",
            result.details.keyword_match_percentage,
            report.metadata.weights.keyword * 100.0
        ));
        output.push_str(&format!(
            "| Section completeness | {}% | {:.0}% |\n\n",
            result.details.section_completeness,
            report.metadata.weights.section * 100.0
        ));

        output.push_str("## Skills\n\n");
        output.push_str(&format!("- **Matched:** {}\n", join_or_none(&result.matched_skills)));
        output.push_str(&format!("- **Missing:** {}\n\n", join_or_none(&result.missing_skills)));

        if !result.resume_sections_to_improve.is_empty() {
            output.push_str("## Sections to Add\n\n");
            for section in &result.resume_sections_to_improve {
                output.push_str(&format!("- {}\n", section));
            }
            output.push('\n');
        }

        output.push_str("## Improvement Tips\n\n");
        for (i, tip) in result.improvement_tips.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, tip));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let band = report.score_band();

        let template = HtmlTemplate {
            include_styles: self.include_styles,
            ats_score: result.ats_score,
            band_class: match band {
                ScoreBand::Excellent => "band-excellent",
                ScoreBand::Good => "band-good",
                ScoreBand::Moderate => "band-moderate",
                ScoreBand::Low => "band-low",
            },
            band_label: band.label(),
            summary: &result.summary,
            keyword_pct: result.details.keyword_match_percentage,
            skill_pct: result.details.skill_match_percentage,
            section_pct: result.details.section_completeness,
            resume_skills: result.details.total_resume_skills,
            job_skills: result.details.total_job_skills,
            matched_skills: &result.matched_skills,
            missing_skills: &result.missing_skills,
            sections_to_improve: &result.resume_sections_to_improve,
            tips: &result.improvement_tips,
            version: &report.metadata.tool_version,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            resume_source: display_name(&report.metadata.resume_source),
            job_source: display_name(&report.metadata.job_source),
        };

        Ok(template.render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json, include_metadata),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }

    /// Rankings only have console and JSON renderings; other formats fall
    /// back to JSON.
    pub fn generate_ranking(&self, ranking: &RankingReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => Ok(self.console_formatter.format_ranking(ranking)),
            _ => self.json_formatter.format_ranking(ranking),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_ats{}.{}", base_name, timestamp_suffix, extension)
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn display_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}
