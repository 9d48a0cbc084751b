//! Integration tests for batch outline and ranking runs.

use std::fs;
use std::path::Path;

use docoutline::batch::{Outcome, METADATA_FILE};
use docoutline::{
    AnalysisOptions, BBox, BatchProcessor, DocOutline, Error, LayoutDocument, OutlineJson,
    PageLayout, RankOptions, RankingDescriptor, RankingReport, Warning,
};

/// A layout document with one numbered chapter per page.
fn chapters(title: &str, chapters: &[(&str, &str)]) -> LayoutDocument {
    let mut doc = LayoutDocument::new("").with_title(title);
    for (heading, text) in chapters {
        let mut page = PageLayout::letter(1);
        page.add_text(*heading, "Helvetica-Bold", 18.0, BBox::new(72.0, 150.0, 300.0, 168.0));
        page.add_text(*text, "Times-Roman", 10.0, BBox::new(72.0, 175.0, 540.0, 185.0));
        doc.add_page(page);
    }
    doc
}

fn write_doc(dir: &Path, file: &str, doc: &LayoutDocument) {
    fs::write(dir.join(file), doc.to_json().unwrap()).unwrap();
}

fn setup_recipes(dir: &Path) {
    write_doc(
        dir,
        "mains.json",
        &chapters(
            "Main Dishes",
            &[
                ("1. Roasts", "Slow roasted beef and lamb with gravy."),
                ("2. Vegetarian Mains", "Vegetarian lasagna and stuffed peppers for a buffet."),
            ],
        ),
    );
    write_doc(
        dir,
        "desserts.json",
        &chapters(
            "Desserts",
            &[
                ("1. Cakes", "Chocolate cake and lemon drizzle."),
                ("2. Buffet Desserts", "Vegetarian buffet desserts served in small cups."),
            ],
        ),
    );
}

#[test]
fn test_outline_directory_writes_one_file_per_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    setup_recipes(input.path());
    fs::write(input.path().join("corrupt.json"), "{\"pages\": [").unwrap();

    let processor = BatchProcessor::new(AnalysisOptions::new().sequential(), RankOptions::default());
    let statuses = processor
        .outline_directory(input.path(), output.path())
        .unwrap();

    let names: Vec<&str> = statuses.iter().map(|s| s.document.as_str()).collect();
    assert_eq!(names, vec!["corrupt.json", "desserts.json", "mains.json"]);
    assert!(!statuses[0].is_ok());
    assert!(statuses[1].is_ok());
    assert!(matches!(statuses[2].outcome, Outcome::Ok { headings: 2, .. }));

    let written = fs::read_to_string(output.path().join("mains.json")).unwrap();
    let outline: OutlineJson = serde_json::from_str(&written).unwrap();
    assert_eq!(outline.title, "Main Dishes");
    let texts: Vec<&str> = outline.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(texts, vec!["1. Roasts", "2. Vegetarian Mains"]);
    assert_eq!(outline.outline[1].page, 2);
    assert!(!output.path().join("corrupt.json").exists());
}

#[test]
fn test_non_layout_json_reported_as_failure() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    setup_recipes(input.path());
    let previous = r#"{"title": "Main Dishes", "outline": [{"level": "H1", "text": "1. Roasts", "page": 1}]}"#;
    fs::write(input.path().join("result.json"), previous).unwrap();

    let statuses = BatchProcessor::default()
        .outline_directory(input.path(), output.path())
        .unwrap();

    let stale = statuses.iter().find(|s| s.document == "result.json").unwrap();
    assert!(!stale.is_ok());
    assert!(stale.warnings().is_empty());
    assert!(!output.path().join("result.json").exists());
    assert_eq!(statuses.iter().filter(|s| s.is_ok()).count(), 2);
}

#[test]
fn test_parallel_matches_sequential() {
    let input = tempfile::tempdir().unwrap();
    setup_recipes(input.path());

    let seq_out = tempfile::tempdir().unwrap();
    let par_out = tempfile::tempdir().unwrap();
    BatchProcessor::new(AnalysisOptions::new().sequential(), RankOptions::default())
        .outline_directory(input.path(), seq_out.path())
        .unwrap();
    BatchProcessor::default()
        .outline_directory(input.path(), par_out.path())
        .unwrap();

    for file in ["mains.json", "desserts.json"] {
        assert_eq!(
            fs::read_to_string(seq_out.path().join(file)).unwrap(),
            fs::read_to_string(par_out.path().join(file)).unwrap()
        );
    }
}

#[test]
fn test_missing_input_directory_is_error() {
    let output = tempfile::tempdir().unwrap();
    let result = BatchProcessor::default()
        .outline_directory(Path::new("/nonexistent/input"), output.path());
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_rank_directory_pools_documents() {
    let input = tempfile::tempdir().unwrap();
    setup_recipes(input.path());
    fs::write(
        input.path().join(METADATA_FILE),
        r#"{"persona": {"role": "Chef"},
            "job_to_be_done": {"task": "Plan a vegetarian buffet"},
            "documents": [{"filename": "mains.pdf"}, "missing.pdf", "desserts.pdf"]}"#,
    )
    .unwrap();

    let run = DocOutline::new()
        .sequential()
        .rank_directory(input.path())
        .unwrap();

    let names: Vec<&str> = run.statuses.iter().map(|s| s.document.as_str()).collect();
    assert_eq!(names, vec!["mains.pdf", "missing.pdf", "desserts.pdf"]);
    assert_eq!(run.failed_count(), 1);

    let report = &run.report;
    assert_eq!(
        report.metadata.documents,
        vec!["mains.pdf", "missing.pdf", "desserts.pdf"]
    );
    assert_eq!(report.metadata.persona, "Chef");
    assert_eq!(report.extracted_sections.len(), 4);

    let top2: Vec<&str> = report
        .extracted_sections
        .iter()
        .take(2)
        .map(|s| s.section_title.as_str())
        .collect();
    assert!(top2.contains(&"2. Vegetarian Mains"));
    assert!(top2.contains(&"2. Buffet Desserts"));

    let ranks: Vec<usize> = report
        .extracted_sections
        .iter()
        .map(|s| s.importance_rank)
        .collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    assert_eq!(report.subsection_analysis.len(), 4);
    assert!(chrono::DateTime::parse_from_rfc3339(&report.metadata.processed_at).is_ok());

    let json = report.to_json(docoutline::JsonFormat::Compact).unwrap();
    let parsed: RankingReport = serde_json::from_str(&json).unwrap();
    assert_eq!(&parsed, report);
}

#[test]
fn test_rank_providers_in_memory() {
    let mut mains = chapters("Main Dishes", &[("1. Salads", "Grain salads for a vegetarian buffet.")]);
    mains.name = "mains.pdf".into();
    let mut blank = LayoutDocument::new("blank.pdf");
    blank.add_page(PageLayout::letter(1));

    let descriptor = RankingDescriptor::new(
        "Caterer",
        "vegetarian buffet",
        vec!["mains.pdf".into(), "blank.pdf".into()],
    )
    .unwrap();
    let run = BatchProcessor::default().rank_providers(&descriptor, &[mains, blank]);

    assert_eq!(run.failed_count(), 0);
    assert_eq!(run.statuses[1].warnings(), &[Warning::EmptyDocument]);
    assert_eq!(run.ranking.sections[0].section.document_id, "mains.pdf");
    assert_eq!(run.ranking.sections[0].rank, 1);
}

#[test]
fn test_invalid_descriptor_fails_run() {
    let input = tempfile::tempdir().unwrap();
    fs::write(
        input.path().join(METADATA_FILE),
        r#"{"persona": "Chef", "documents": ["a.pdf"]}"#,
    )
    .unwrap();

    let err = DocOutline::new().rank_directory(input.path()).unwrap_err();
    assert!(matches!(err, Error::InvalidMetadata(_)));
}
