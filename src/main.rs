//! resume-ats: rule-based ATS resume scorer

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use resume_ats::cli::{self, Cli, Commands, ConfigAction};
use resume_ats::config::{Config, OutputFormat};
use resume_ats::input::file_detector::FileType;
use resume_ats::input::InputManager;
use resume_ats::output::{
    save_report_to_file, AnalysisReport, ConsoleFormatter, RankingReport, ReportGenerator, ReportMetadata,
};
use resume_ats::processing::AtsAnalyzer;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> resume_ats::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn build_analyzer(config: &Config) -> anyhow::Result<AtsAnalyzer> {
    let taxonomy = config.build_taxonomy().context("Failed to build skill taxonomy")?;
    let analyzer = AtsAnalyzer::with_taxonomy(taxonomy)
        .context("Failed to compile skill patterns")?
        .with_weights(config.weights())?
        .with_limits(config.limits());
    Ok(analyzer)
}

async fn run_command(command: Commands, config: Config, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            job_text,
            output,
            save,
            detailed,
            no_color,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };
            let detailed = detailed || config.output.detailed;
            let use_colors = config.output.color_output && !no_color && save.is_none();

            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;

            info!("Starting ATS analysis of {}", resume.display());
            let started = Instant::now();

            let mut input_manager = InputManager::from_config(&config.input);
            let resume_text = input_manager
                .extract_resume(&resume)
                .await
                .with_context(|| format!("Failed to read resume {}", resume.display()))?;

            let (job_text, job_source) = match (job, job_text) {
                (Some(path), _) => {
                    validate_job_file(&path)?;
                    let text = input_manager
                        .extract_text(&path)
                        .await
                        .with_context(|| format!("Failed to read job description {}", path.display()))?;
                    (text, path.display().to_string())
                }
                (None, Some(text)) => (text, "inline".to_string()),
                (None, None) => bail!("Either --job or --job-text is required"),
            };

            let analyzer = build_analyzer(&config)?;
            let breakdown = analyzer.score(&resume_text, &job_text);
            let result = analyzer.build_result(&breakdown);

            let mut metadata = ReportMetadata::new(resume.display().to_string(), job_source);
            metadata.processing_time_ms = started.elapsed().as_millis() as u64;
            metadata.taxonomy_size = analyzer.skill_count();
            metadata.weights = *analyzer.weights();

            let report = AnalysisReport::new(result, &breakdown.missing_skills, analyzer.taxonomy(), metadata);
            let generator = ReportGenerator::with_options(use_colors, detailed, true, detailed);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    println!("✅ Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }

            info!("Analysis complete: ATS score {}/100", report.result.ats_score);
        }

        Commands::Rank { resume, jobs, output } => {
            let output_format = cli::parse_output_format(&output).map_err(anyhow::Error::msg)?;
            if matches!(output_format, OutputFormat::Markdown | OutputFormat::Html) {
                warn!("Rankings only render as console or JSON, falling back to JSON");
            }

            cli::validate_file_extension(&resume, RESUME_EXTENSIONS)
                .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;

            let mut input_manager = InputManager::from_config(&config.input);
            let resume_text = Arc::new(
                input_manager
                    .extract_resume(&resume)
                    .await
                    .with_context(|| format!("Failed to read resume {}", resume.display()))?,
            );

            let mut job_texts = Vec::with_capacity(jobs.len());
            for job in &jobs {
                validate_job_file(job)?;
                let text = input_manager
                    .extract_text(job)
                    .await
                    .with_context(|| format!("Failed to read job description {}", job.display()))?;
                job_texts.push((job.display().to_string(), text));
            }

            let analyzer = Arc::new(build_analyzer(&config)?);

            let progress = ProgressBar::new(job_texts.len() as u64);
            progress.set_style(ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")?);
            progress.set_message("scoring");

            let handles: Vec<_> = job_texts
                .into_iter()
                .map(|(source, job_text)| {
                    let analyzer = Arc::clone(&analyzer);
                    let resume_text = Arc::clone(&resume_text);
                    tokio::task::spawn_blocking(move || {
                        let result = analyzer.analyze(&resume_text, &job_text);
                        (source, result)
                    })
                })
                .collect();

            let mut scored = Vec::with_capacity(handles.len());
            for handle in handles {
                let (source, result) = handle.await.context("Scoring task panicked")?;
                debug!("{} scored {}", source, result.ats_score);
                progress.inc(1);
                scored.push((source, result));
            }
            progress.finish_and_clear();

            let ranking = RankingReport::new(resume.display().to_string(), scored);
            let generator = ReportGenerator::with_options(config.output.color_output, config.output.detailed, true, false);
            println!("{}", generator.generate_ranking(&ranking, &output_format)?);
        }

        Commands::Skills { category, text, file } => {
            let analyzer = build_analyzer(&config)?;

            let source_text = match (text, file) {
                (Some(text), _) => Some(text),
                (None, Some(path)) => {
                    let mut input_manager = InputManager::from_config(&config.input);
                    Some(
                        input_manager
                            .extract_resume(&path)
                            .await
                            .with_context(|| format!("Failed to read {}", path.display()))?,
                    )
                }
                (None, None) => None,
            };

            match source_text {
                Some(text) => {
                    let skills = analyzer.extract_skills(&text);
                    println!("🔍 Found {} skills", skills.len());
                    for skill in skills {
                        let skill_category = analyzer.taxonomy().category_of(&skill).unwrap_or("other");
                        if category.as_deref().map_or(true, |c| c == skill_category) {
                            println!("  • {} ({})", skill, skill_category);
                        }
                    }
                }
                None => {
                    let taxonomy = analyzer.taxonomy();
                    let categories: Vec<_> = match &category {
                        Some(name) => match taxonomy.category(name) {
                            Some(found) => vec![found],
                            None => bail!("Unknown skill category: {}", name),
                        },
                        None => taxonomy.categories().iter().collect(),
                    };

                    println!("📚 Skill taxonomy ({} skills)\n", analyzer.skill_count());
                    for skill_category in categories {
                        println!("{} ({}):", skill_category.name, skill_category.skills.len());
                        println!("  {}\n", skill_category.skills.join(", "));
                    }
                }
            }
        }

        Commands::Sections { file } => {
            let mut input_manager = InputManager::from_config(&config.input);
            let text = input_manager
                .extract_resume(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let analyzer = build_analyzer(&config)?;
            let analysis = analyzer.section_analyzer().analyze(&text);

            let formatter = ConsoleFormatter::new(config.output.color_output, false);
            println!("{}", formatter.format_sections(&file.display().to_string(), &analysis));
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);

            match action {
                Some(ConfigAction::Show) | None => {
                    println!("⚙️  Current Configuration ({})\n", path.display());
                    println!("Scoring Weights:");
                    println!("  Skills: {:.1}%", config.scoring.skill_weight * 100.0);
                    println!("  Keywords: {:.1}%", config.scoring.keyword_weight * 100.0);
                    println!("  Sections: {:.1}%", config.scoring.section_weight * 100.0);
                    println!("\nLimits:");
                    println!("  Missing skills: {}", config.limits.max_missing_skills);
                    println!("  Tips: {}", config.limits.max_tips);
                    println!("  Sections to improve: {}", config.limits.max_sections_to_improve);
                    println!("\nInput:");
                    println!("  Resume character budget: {}", config.input.max_resume_chars);
                    println!("  Max file size: {} bytes", config.input.max_file_size_bytes);
                    if let Some(taxonomy_path) = &config.taxonomy.path {
                        println!("\nTaxonomy file: {}", taxonomy_path.display());
                    }
                    if !config.taxonomy.extra_skills.is_empty() {
                        println!("Extra skill categories: {}", config.taxonomy.extra_skills.len());
                    }
                    println!("\nOutput format: {:?}", config.output.format);
                }

                Some(ConfigAction::Reset) => {
                    println!("🔄 Resetting configuration to defaults...");
                    Config::default()
                        .save_to(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✅ Configuration reset successfully!");
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

fn validate_job_file(path: &Path) -> anyhow::Result<()> {
    let file_type = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(FileType::from_extension)
        .unwrap_or(FileType::Unknown);

    if !file_type.is_supported() {
        bail!("Unsupported job description file: {}", path.display());
    }
    Ok(())
}
