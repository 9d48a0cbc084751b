//! Integration tests for segmentation and relevance ranking.

use docoutline::ranking::{build_query, RankOptions, Vectorizer};
use docoutline::{
    segment_sections, BBox, HeadingCandidate, HeadingLevel, LayoutDocument, Outline,
    OutlineExtractor, PageLayout, RelevanceRanker, Section,
};

fn section(doc: &str, page: u32, title: &str, body: &str) -> Section {
    Section {
        document_id: doc.to_string(),
        start_page: page,
        end_page: page,
        title: title.to_string(),
        body_text: body.to_string(),
    }
}

fn pages(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Text of page {}.", i)).collect()
}

fn outline_at(pages: &[u32]) -> Outline {
    Outline::new(
        "Handbook",
        pages
            .iter()
            .enumerate()
            .map(|(i, p)| {
                HeadingCandidate::new(format!("Part {}", i + 1), *p, HeadingLevel::H1, 6, 100.0)
            })
            .collect(),
    )
}

#[test]
fn test_vegetarian_buffet_ranks_first() {
    let sections = vec![
        section(
            "guide.pdf",
            1,
            "Mountain Trails",
            "Hiking routes climb through pine forests to alpine lakes. Trail maps \
             show elevation, distance and the best season for each route.",
        ),
        section(
            "guide.pdf",
            4,
            "Vegetarian Buffet Menu",
            "A vegetarian buffet menu should balance grains and vegetables. Plan the \
             buffet menu with vegetarian mains, vegetarian sides and a dessert table. \
             Label every buffet dish on the menu.",
        ),
        section(
            "guide.pdf",
            7,
            "Tax Deadlines",
            "Quarterly estimated payments are due in April, June, September and \
             January. Keep receipts for deductible expenses.",
        ),
    ];

    let query = build_query("Chef", "planning a vegetarian buffet");
    let ranking = RelevanceRanker::default().rank(&query, sections);

    assert_eq!(ranking.sections.len(), 3);
    let top = &ranking.sections[0];
    assert_eq!(top.rank, 1);
    assert_eq!(top.section.title, "Vegetarian Buffet Menu");
    assert!(top.relevance_score > ranking.sections[1].relevance_score);
    assert!(top.relevance_score > ranking.sections[2].relevance_score);
    assert!(!ranking.is_degenerate());
}

#[test]
fn test_self_query_scores_highest() {
    let bodies = [
        "Irrigation schedules for tomato beds during dry summer weeks.",
        "Compost turning, moisture and temperature checks for healthy soil.",
        "Pruning fruit trees in late winter before buds open.",
        "Seed starting indoors under lights with heat mats.",
    ];
    let sections: Vec<Section> = bodies
        .iter()
        .enumerate()
        .map(|(i, b)| section("garden.pdf", i as u32 + 1, &format!("S{}", i), b))
        .collect();

    for (i, body) in bodies.iter().enumerate() {
        let scores = RelevanceRanker::default().score(body, &sections);
        let max = scores.iter().cloned().fold(f64::MIN, f64::max);
        assert!((scores[i] - max).abs() < 1e-12, "section {} not maximal", i);
        assert!((scores[i] - 1.0).abs() < 1e-9);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }
}

#[test]
fn test_scores_bounded_for_arbitrary_text() {
    let sections = vec![
        section("a.pdf", 1, "A", "Ünïcödé façade — naïve café résumé"),
        section("a.pdf", 2, "B", "12 34 5678 !!! ???"),
        section("a.pdf", 3, "C", ""),
        section("a.pdf", 4, "D", "cafe cafe cafe menu"),
    ];
    let ranking = RelevanceRanker::default().rank("café menu", sections);
    for ranked in &ranking.sections {
        assert!((0.0..=1.0).contains(&ranked.relevance_score));
    }
    let ranks: Vec<usize> = ranking.sections.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
}

#[test]
fn test_ties_keep_extraction_order() {
    let sections: Vec<Section> = (0..5)
        .map(|i| section("a.pdf", i + 1, &format!("Copy {}", i), "harbor ferry schedule"))
        .collect();
    let ranking = RelevanceRanker::default().rank("ferry", sections);
    let pages: Vec<u32> = ranking.sections.iter().map(|r| r.section.start_page).collect();
    assert_eq!(pages, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_top_k_limits_output() {
    let sections: Vec<Section> = (0..25)
        .map(|i| section("a.pdf", i + 1, "S", &format!("lesson {} fractions", i)))
        .collect();

    let ranking = RelevanceRanker::default().rank("fractions", sections.clone());
    assert_eq!(ranking.sections.len(), 10);

    let ranker = RelevanceRanker::new(RankOptions::new().with_top_k(3));
    assert_eq!(ranker.rank("fractions", sections).sections.len(), 3);
}

#[test]
fn test_vectorizer_shared_space() {
    let corpus = ["solar panel output", "panel wiring diagram", "battery storage"];
    let (vectorizer, vectors) = Vectorizer::fit_transform(&corpus);
    assert_eq!(vectors.len(), 3);
    assert_eq!(vectorizer.vocabulary_size(), 7);
    assert!(vectorizer.transform("unseen words only").is_zero());
}

#[test]
fn test_sections_cover_every_page() {
    let cases: Vec<(usize, Vec<u32>)> = vec![
        (1, vec![]),
        (1, vec![1]),
        (5, vec![1, 3]),
        (5, vec![2, 2, 4]),
        (6, vec![3]),
        (4, vec![1, 2, 3, 4]),
    ];

    for (count, heads) in cases {
        let texts = pages(count);
        let sections = segment_sections("h.pdf", &outline_at(&heads), &texts);

        assert_eq!(sections[0].start_page, 1);
        assert_eq!(sections.last().unwrap().end_page, count as u32);
        for pair in sections.windows(2) {
            assert!(pair[0].start_page <= pair[1].start_page);
            // Contiguous: the next section starts on or right after this one's end.
            assert!(pair[1].start_page <= pair[0].end_page + 1);
        }
        for page in 1..=count as u32 {
            assert!(
                sections.iter().any(|s| s.pages().contains(&page)),
                "page {} uncovered for {:?}",
                page,
                heads
            );
        }
    }
}

#[test]
fn test_document_to_ranked_sections() {
    let mut doc = LayoutDocument::new("travel.pdf").with_title("Coastal Travel Guide");
    let chapters = [
        ("1. Beaches", "Sandy beaches with lifeguards and calm water for swimming."),
        ("2. Nightlife", "Bars, live music venues and late night clubs near the harbor."),
        ("3. Museums", "Maritime museum exhibits on shipbuilding and lighthouse history."),
    ];
    for (title, text) in chapters.iter() {
        let mut page = PageLayout::letter(1);
        page.add_text(*title, "Helvetica-Bold", 18.0, BBox::new(72.0, 150.0, 300.0, 168.0));
        page.add_text(*text, "Times-Roman", 10.0, BBox::new(72.0, 175.0, 540.0, 185.0));
        doc.add_page(page);
    }

    let analysis = OutlineExtractor::default().extract(&doc).unwrap();
    let sections = segment_sections("travel.pdf", &analysis.outline, &analysis.page_texts);
    assert_eq!(sections.len(), 3);
    assert_eq!(sections[1].title, "2. Nightlife");
    assert!(sections[1].body_text.contains("late night clubs"));

    let ranking = RelevanceRanker::default().rank("student group looking for nightlife and clubs", sections);
    assert_eq!(ranking.sections[0].section.title, "2. Nightlife");
    assert_eq!(ranking.sections[0].section.start_page, 2);
}
