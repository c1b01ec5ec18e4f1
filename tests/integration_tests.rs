//! Integration tests for the ATS resume scorer

use pretty_assertions::assert_eq;
use resume_ats::config::{Config, InputConfig, OutputFormat};
use resume_ats::input::manager::InputManager;
use resume_ats::output::{AnalysisReport, RankingReport, ReportGenerator, ReportMetadata};
use resume_ats::processing::{AtsAnalyzer, SkillTaxonomy};
use resume_ats::AtsError;
use std::path::Path;
use std::sync::Arc;

#[tokio::test]
async fn test_text_extraction_from_txt() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
}

#[tokio::test]
async fn test_text_extraction_from_markdown() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.md");

    let text = manager.extract_text(path).await.unwrap();
    assert!(text.contains("John Doe"));
    assert!(text.contains("Software Engineer"));
    assert!(text.contains("React"));
    assert!(text.contains("Node.js"));
    assert!(!text.contains("**"));
    assert!(!text.contains("##"));
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = InputManager::new();
    let path = Path::new("tests/fixtures/sample_resume.txt");

    let text1 = manager.extract_text(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let text2 = manager.extract_text(path).await.unwrap();
    assert_eq!(text1, text2);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_cache_disabled() {
    let mut manager = InputManager::new().with_cache(false);
    manager
        .extract_text(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(result, Err(AtsError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = InputManager::new();
    let result = manager.extract_text(Path::new("tests/fixtures/nonexistent.txt")).await;
    assert!(matches!(result, Err(AtsError::InvalidInput(_))));
}

#[tokio::test]
async fn test_resume_budget_applied() {
    let mut manager = InputManager::from_config(&InputConfig {
        max_resume_chars: 8,
        ..InputConfig::default()
    });

    let text = manager
        .extract_resume(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    assert_eq!(text, "John Doe");
}

#[tokio::test]
async fn test_analyze_fixture_resume() {
    let mut manager = InputManager::new();
    let resume = manager
        .extract_resume(Path::new("tests/fixtures/sample_resume.txt"))
        .await
        .unwrap();
    let job = manager
        .extract_text(Path::new("tests/fixtures/sample_job.txt"))
        .await
        .unwrap();

    let analyzer = AtsAnalyzer::new().unwrap();
    let result = analyzer.analyze(&resume, &job);

    for skill in ["react", "typescript", "node.js", "aws", "docker"] {
        assert!(result.matched_skills.contains(&skill.to_string()), "{} should match", skill);
    }
    assert!(result.missing_skills.contains(&"graphql".to_string()));
    assert!(result.missing_skills.contains(&"kubernetes".to_string()));
    assert!(result.resume_sections_to_improve.is_empty());
    assert_eq!(result.details.section_completeness, 100);
    assert!(result.ats_score > 0 && result.ats_score <= 100);
    assert!(!result.improvement_tips.is_empty() && result.improvement_tips.len() <= 5);
}

#[tokio::test]
async fn test_ranking_prefers_closer_job() {
    let mut manager = InputManager::new();
    let resume = Arc::new(
        manager
            .extract_resume(Path::new("tests/fixtures/sample_resume.txt"))
            .await
            .unwrap(),
    );

    let mut jobs = Vec::new();
    for path in ["tests/fixtures/backend_job.txt", "tests/fixtures/sample_job.txt"] {
        jobs.push((path.to_string(), manager.extract_text(Path::new(path)).await.unwrap()));
    }

    let analyzer = Arc::new(AtsAnalyzer::new().unwrap());
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|(source, job)| {
            let analyzer = Arc::clone(&analyzer);
            let resume = Arc::clone(&resume);
            tokio::task::spawn_blocking(move || (source, analyzer.analyze(&resume, &job)))
        })
        .collect();

    let mut scored = Vec::new();
    for handle in handles {
        scored.push(handle.await.unwrap());
    }

    let ranking = RankingReport::new("tests/fixtures/sample_resume.txt", scored);
    assert_eq!(ranking.entries[0].job_source, "tests/fixtures/sample_job.txt");
    assert!(ranking.entries[0].result.ats_score >= ranking.entries[1].result.ats_score);
}

#[test]
fn test_shared_analyzer_across_threads() {
    let analyzer = Arc::new(AtsAnalyzer::new().unwrap());
    let resume = "Skills: Python, AWS, Docker. Experience: 5 years. Education: BSc.";
    let job = "Python engineer with AWS and Docker";
    let expected = analyzer.analyze(resume, job);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            std::thread::spawn(move || analyzer.analyze(resume, job))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_custom_taxonomy_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let taxonomy_path = dir.path().join("taxonomy.toml");
    std::fs::write(
        &taxonomy_path,
        "[[category]]\nname = \"kitchen\"\nskills = [\"pastry\", \"sous vide\"]\n",
    )
    .unwrap();

    let mut config = Config::default();
    config.taxonomy.path = Some(taxonomy_path);
    config
        .taxonomy
        .extra_skills
        .insert("kitchen".into(), vec!["butchery".into()]);

    let taxonomy: SkillTaxonomy = config.build_taxonomy().unwrap();
    let analyzer = AtsAnalyzer::with_taxonomy(taxonomy).unwrap();

    let result = analyzer.analyze("Pastry chef, trained in sous vide", "Need pastry and butchery skills");
    assert_eq!(result.matched_skills, vec!["pastry".to_string()]);
    assert_eq!(result.missing_skills, vec!["butchery".to_string()]);
}

#[test]
fn test_saved_report_formats() {
    let analyzer = AtsAnalyzer::new().unwrap();
    let resume = "Summary: Rust developer. Skills: Rust, Docker. Experience: 3 years.";
    let job = "Rust developer with Docker and Kubernetes";
    let breakdown = analyzer.score(resume, job);
    let report = AnalysisReport::new(
        analyzer.build_result(&breakdown),
        &breakdown.missing_skills,
        analyzer.taxonomy(),
        ReportMetadata::new("resume.txt", "job.txt"),
    );

    let dir = tempfile::tempdir().unwrap();
    let generator = ReportGenerator::with_options(false, true, true, true);

    for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Html] {
        let rendered = generator.generate_report(&report, &format).unwrap();
        let file_name = resume_ats::output::suggest_filename(&format, "resume.txt", false);
        let path = dir.path().join("reports").join(&file_name);

        resume_ats::output::save_report_to_file(&rendered, &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), rendered);
    }
}
