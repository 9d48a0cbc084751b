//! Benchmarks for outline extraction and section ranking.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic layout documents.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use docoutline::{
    segment_sections, BBox, LayoutDocument, OutlineExtractor, PageLayout, RelevanceRanker,
};

const TOPICS: [&str; 6] = [
    "harbor ferry timetable and ticket prices",
    "vegetarian restaurants near the old town square",
    "museum opening hours and guided tours",
    "hiking trails along the coastal cliffs",
    "nightlife venues with live music",
    "family beaches with lifeguards",
];

/// Creates a layout document with one chapter heading and two paragraphs per page.
fn create_test_document(page_count: usize) -> LayoutDocument {
    let mut doc = LayoutDocument::new("bench.pdf").with_title("Benchmark Guide");
    for i in 0..page_count {
        let topic = TOPICS[i % TOPICS.len()];
        let mut page = PageLayout::letter(1);
        page.add_text(
            format!("{}. Chapter {}", i + 1, i + 1),
            "Helvetica-Bold",
            18.0,
            BBox::new(72.0, 120.0, 400.0, 138.0),
        );
        for p in 0..2 {
            let y = 160.0 + p as f32 * 60.0;
            page.add_text(
                format!(
                    "This paragraph covers {} in enough words to read as running body text.",
                    topic
                ),
                "Times-Roman",
                10.0,
                BBox::new(72.0, y, 540.0, y + 10.0),
            );
        }
        doc.add_page(page);
    }
    doc
}

/// Benchmark outline extraction at various sizes.
fn bench_outline_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("outline_extraction");
    let extractor = OutlineExtractor::default();

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| extractor.extract(black_box(&doc)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark TF-IDF ranking over pooled sections.
fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let extractor = OutlineExtractor::default();
    let ranker = RelevanceRanker::default();

    for page_count in [10, 50].iter() {
        let doc = create_test_document(*page_count);
        let analysis = extractor.extract(&doc).unwrap();
        let sections = segment_sections("bench.pdf", &analysis.outline, &analysis.page_texts);

        group.bench_function(format!("{}_sections", sections.len()), |b| {
            b.iter(|| {
                ranker.rank(
                    black_box("Travel planner looking for vegetarian restaurants"),
                    sections.clone(),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_outline_extraction, bench_ranking);
criterion_main!(benches);
