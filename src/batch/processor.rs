//! Multi-document outline and ranking runs.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rayon::prelude::*;

use super::descriptor::RankingDescriptor;
use super::DocumentStatus;
use crate::analysis::{AnalysisOptions, OutlineExtractor};
use crate::error::{Error, Result};
use crate::layout::{LayoutDocument, LayoutProvider};
use crate::model::Section;
use crate::ranking::{segment_sections, RankOptions, Ranking, RelevanceRanker};
use crate::render::{outline_to_json, JsonFormat, RankingReport};

/// File name of the descriptor inside an input directory.
pub const METADATA_FILE: &str = "metadata.json";

/// Result of a ranking run.
#[derive(Debug, Clone)]
pub struct RankingRun {
    /// Output document
    pub report: RankingReport,

    /// Ranked sections with their scores
    pub ranking: Ranking,

    /// One entry per requested document, in descriptor order
    pub statuses: Vec<DocumentStatus>,
}

impl RankingRun {
    /// Number of documents that failed.
    pub fn failed_count(&self) -> usize {
        self.statuses.iter().filter(|s| !s.is_ok()).count()
    }
}

/// Runs the outline and ranking pipelines over many documents.
///
/// Documents never share state, so with `parallel` set they are handed
/// to the rayon pool. A document that fails to load or analyze is
/// reported in its [`DocumentStatus`] and never stops the others.
pub struct BatchProcessor {
    extractor: OutlineExtractor,
    ranker: RelevanceRanker,
    format: JsonFormat,
}

impl BatchProcessor {
    /// Create a processor.
    pub fn new(options: AnalysisOptions, rank_options: RankOptions) -> Self {
        Self {
            extractor: OutlineExtractor::new(options),
            ranker: RelevanceRanker::new(rank_options),
            format: JsonFormat::Pretty,
        }
    }

    /// Set the JSON format of written outlines.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// The outline extractor in use.
    pub fn extractor(&self) -> &OutlineExtractor {
        &self.extractor
    }

    fn parallel(&self) -> bool {
        self.extractor.options().parallel
    }

    /// Layout documents (`*.json`, descriptor excluded) in a directory, sorted.
    pub fn list_documents(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let is_json = path
                .extension()
                .map(|e| e.eq_ignore_ascii_case("json"))
                .unwrap_or(false);
            let is_metadata = path
                .file_name()
                .map(|n| n == METADATA_FILE)
                .unwrap_or(false);
            if path.is_file() && is_json && !is_metadata {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Extract the outline of one file and write `<stem>.json` to `output_dir`.
    pub fn outline_file(&self, path: &Path, output_dir: &Path) -> DocumentStatus {
        let name = file_name(path);
        let result = LayoutDocument::from_path(path)
            .and_then(|doc| self.extractor.extract(&doc))
            .and_then(|analysis| {
                let json = outline_to_json(&analysis.outline, self.format)?;
                let stem = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_else(|| name.clone());
                fs::write(output_dir.join(format!("{}.json", stem)), json)?;
                Ok(analysis)
            });

        match result {
            Ok(analysis) => DocumentStatus::ok(name, analysis.outline.len(), analysis.warnings),
            Err(e) => DocumentStatus::failed(name, &e),
        }
    }

    /// Outline every given file, calling `on_done` as each one finishes.
    pub fn outline_paths_with<F>(
        &self,
        paths: &[PathBuf],
        output_dir: &Path,
        on_done: F,
    ) -> Vec<DocumentStatus>
    where
        F: Fn(&DocumentStatus) + Sync,
    {
        let run = |path: &PathBuf| {
            let status = self.outline_file(path, output_dir);
            status.log();
            on_done(&status);
            status
        };

        if self.parallel() {
            paths.par_iter().map(run).collect()
        } else {
            paths.iter().map(run).collect()
        }
    }

    /// Outline every layout document in `input_dir` into `output_dir`.
    ///
    /// Fails only when a directory cannot be read or created.
    pub fn outline_directory(&self, input_dir: &Path, output_dir: &Path) -> Result<Vec<DocumentStatus>> {
        let paths = Self::list_documents(input_dir)?;
        fs::create_dir_all(output_dir)?;
        log::info!(
            "Extracting outlines of {} documents from {}",
            paths.len(),
            input_dir.display()
        );
        Ok(self.outline_paths_with(&paths, output_dir, |_| {}))
    }

    /// Rank the sections of the descriptor's documents found in `input_dir`.
    pub fn rank_directory(&self, input_dir: &Path, descriptor: &RankingDescriptor) -> RankingRun {
        let run = |name: &String| match resolve_document(input_dir, name) {
            Ok(doc) => self.sections_of(name, &doc),
            Err(e) => (DocumentStatus::failed(name.clone(), &e), Vec::new()),
        };

        let results: Vec<(DocumentStatus, Vec<Section>)> = if self.parallel() {
            descriptor.documents.par_iter().map(run).collect()
        } else {
            descriptor.documents.iter().map(run).collect()
        };
        self.finish_ranking(descriptor, results)
    }

    /// Rank the sections of in-memory documents.
    ///
    /// Sections are attributed to each provider's
    /// [`document_id`](LayoutProvider::document_id).
    pub fn rank_providers<P: LayoutProvider + Sync>(
        &self,
        descriptor: &RankingDescriptor,
        providers: &[P],
    ) -> RankingRun {
        let run = |provider: &P| self.sections_of(provider.document_id(), provider);

        let results: Vec<(DocumentStatus, Vec<Section>)> = if self.parallel() {
            providers.par_iter().map(run).collect()
        } else {
            providers.iter().map(run).collect()
        };
        self.finish_ranking(descriptor, results)
    }

    fn sections_of<P: LayoutProvider + ?Sized>(
        &self,
        name: &str,
        provider: &P,
    ) -> (DocumentStatus, Vec<Section>) {
        match self.extractor.extract(provider) {
            Ok(analysis) => {
                let sections = segment_sections(name, &analysis.outline, &analysis.page_texts);
                let status = DocumentStatus::ok(name, analysis.outline.len(), analysis.warnings);
                (status, sections)
            }
            Err(e) => (DocumentStatus::failed(name, &e), Vec::new()),
        }
    }

    fn finish_ranking(
        &self,
        descriptor: &RankingDescriptor,
        results: Vec<(DocumentStatus, Vec<Section>)>,
    ) -> RankingRun {
        let mut statuses = Vec::with_capacity(results.len());
        let mut sections = Vec::new();
        for (status, doc_sections) in results {
            status.log();
            statuses.push(status);
            sections.extend(doc_sections);
        }

        log::info!(
            "Ranking {} sections from {} documents",
            sections.len(),
            statuses.len()
        );
        let ranking = self.ranker.rank(&descriptor.query(), sections);
        let report = RankingReport::new(
            descriptor.documents.clone(),
            descriptor.persona.clone(),
            descriptor.job_to_be_done.clone(),
            Utc::now(),
            &ranking.sections,
            self.ranker.options().excerpt_chars,
        );

        RankingRun {
            report,
            ranking,
            statuses,
        }
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new(AnalysisOptions::default(), RankOptions::default())
    }
}

/// Find and load the layout dump for a descriptor entry.
///
/// `name.pdf` resolves to `name.pdf` when that file is a layout dump,
/// then `name.json`, then `name.pdf.json`. The loaded document is named
/// after the descriptor entry.
pub fn resolve_document(dir: &Path, name: &str) -> Result<LayoutDocument> {
    let direct = dir.join(name);
    let mut candidates = vec![direct.clone(), direct.with_extension("json")];
    candidates.push(dir.join(format!("{}.json", name)));
    candidates.dedup();

    let mut last_error = None;
    for path in candidates.iter().filter(|p| p.is_file()) {
        match LayoutDocument::from_path(path) {
            Ok(mut doc) => {
                doc.name = name.to_string();
                return Ok(doc);
            }
            Err(e) => {
                log::debug!("{} is not a layout dump: {}", path.display(), e);
                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| Error::layout(name, 0, "no layout file found")))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
