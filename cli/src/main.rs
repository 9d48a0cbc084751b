//! docoutline CLI - heading outlines and section ranking

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docoutline::analysis::TitleSource;
use docoutline::batch::METADATA_FILE;
use docoutline::{
    AnalysisOptions, BatchProcessor, DocumentStatus, JsonFormat, LayoutDocument, LayoutProvider,
    OutlineExtractor, RankOptions, RankingDescriptor, ScoringTable,
};

#[derive(Parser)]
#[command(name = "docoutline")]
#[command(version)]
#[command(about = "Extract heading outlines and rank document sections", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the outline of one layout document
    Outline {
        /// Input layout document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Scoring table (JSON) overriding the default weights and thresholds
        #[arg(long, value_name = "FILE")]
        scoring: Option<PathBuf>,

        /// Fail on undecodable pages instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Extract outlines of every layout document in a directory
    Batch {
        /// Input directory
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        /// Scoring table (JSON) overriding the default weights and thresholds
        #[arg(long, value_name = "FILE")]
        scoring: Option<PathBuf>,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Rank sections of the documents listed in a metadata descriptor
    Rank {
        /// Input directory holding the layout documents
        #[arg(value_name = "INPUT_DIR")]
        input: PathBuf,

        /// Metadata descriptor (default: <INPUT_DIR>/metadata.json)
        #[arg(short, long, value_name = "FILE")]
        metadata: Option<PathBuf>,

        /// Output file
        #[arg(short, long, value_name = "FILE", default_value = "result.json")]
        output: PathBuf,

        /// Number of sections to keep
        #[arg(long, default_value = "10")]
        top_k: usize,

        /// Process documents one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show document information
    Info {
        /// Input layout document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the size profile as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Outline {
            input,
            output,
            compact,
            scoring,
            strict,
        } => cmd_outline(&input, output.as_deref(), compact, scoring.as_deref(), strict),
        Commands::Batch {
            input,
            output,
            scoring,
            sequential,
        } => cmd_batch(&input, &output, scoring.as_deref(), sequential),
        Commands::Rank {
            input,
            metadata,
            output,
            top_k,
            sequential,
        } => cmd_rank(&input, metadata.as_deref(), &output, top_k, sequential),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn analysis_options(scoring: Option<&Path>) -> Result<AnalysisOptions, Box<dyn std::error::Error>> {
    let mut options = AnalysisOptions::new();
    if let Some(path) = scoring {
        let table = ScoringTable::from_path(path)
            .map_err(|e| format!("Invalid scoring table {}: {}", path.display(), e))?;
        log::debug!("Loaded scoring table from {}", path.display());
        options = options.with_scoring(table);
    }
    Ok(options)
}

fn print_status(status: &DocumentStatus) {
    if status.is_ok() {
        println!("  {} {}", "✓".green(), status);
    } else {
        println!("  {} {}", "✗".red(), status);
    }
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    scoring: Option<&Path>,
    strict: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = analysis_options(scoring)?;
    if strict {
        options = options.strict();
    }

    let doc = LayoutDocument::from_path(input)?;
    let analysis = OutlineExtractor::new(options).extract(&doc)?;

    for warning in &analysis.warnings {
        eprintln!("{}: {}", "Warning".yellow(), warning);
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = docoutline::render::outline_to_json(&analysis.outline, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    scoring: Option<&Path>,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = analysis_options(scoring)?.with_parallel(!sequential);
    let processor = BatchProcessor::new(options, RankOptions::default());

    let paths = BatchProcessor::list_documents(input)?;
    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let statuses = processor.outline_paths_with(&paths, output, |status| {
        pb.set_message(status.document.clone());
        pb.inc(1);
    });
    pb.finish_and_clear();

    println!("{}", "Documents:".cyan().bold());
    for status in &statuses {
        print_status(status);
    }

    let failed = statuses.iter().filter(|s| !s.is_ok()).count();
    println!(
        "\n{} {} processed, {} failed -> {}",
        "Done!".green().bold(),
        statuses.len() - failed,
        failed,
        output.display()
    );

    Ok(())
}

fn cmd_rank(
    input: &Path,
    metadata: Option<&Path>,
    output: &Path,
    top_k: usize,
    sequential: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let metadata_path = metadata
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| input.join(METADATA_FILE));
    let descriptor = RankingDescriptor::from_path(&metadata_path)?;

    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!(
        "Ranking {} documents...",
        descriptor.documents.len()
    ));

    let processor = BatchProcessor::new(
        AnalysisOptions::new().with_parallel(!sequential),
        RankOptions::new().with_top_k(top_k),
    );
    let run = processor.rank_directory(input, &descriptor);
    pb.finish_and_clear();

    println!("{}", "Documents:".cyan().bold());
    for status in &run.statuses {
        print_status(status);
    }

    if run.ranking.is_degenerate() {
        eprintln!(
            "{}: no section shares a term with the query; ranking follows document order",
            "Warning".yellow()
        );
    }

    let json = run.report.to_json(JsonFormat::Pretty)?;
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, json)?;

    println!(
        "\n{} {} sections ranked, {} documents failed",
        "Done!".green().bold(),
        run.ranking.sections.len(),
        run.failed_count()
    );
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = LayoutDocument::from_path(input)?;
    let analysis = OutlineExtractor::default().extract(&doc)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis.profile)?);
        return Ok(());
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!("{}: {}", "Blocks".bold(), analysis.block_count);
    if let Some(title) = doc.metadata_title() {
        println!("{}: {}", "Metadata title".bold(), title);
    }
    let source = match analysis.title_source {
        TitleSource::Metadata => "metadata",
        TitleSource::Heading => "heading",
        TitleSource::Fallback => "largest text",
        TitleSource::None => "none",
    };
    println!(
        "{}: {} ({})",
        "Title".bold(),
        analysis.outline.title,
        source
    );

    println!();
    println!("{}", "Size Profile".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let profile = &analysis.profile;
    println!("{}: {:.1}", "Median".bold(), profile.median_size);
    println!("{}: {:.1}", "H1".bold(), profile.h1_size);
    println!("{}: {:.1}", "H2".bold(), profile.h2_size);
    println!("{}: {:.1}", "H3".bold(), profile.h3_size);
    println!("{}: {:.1}", "Body".bold(), profile.body_size);
    println!("{}: {}", "Distinct sizes".bold(), profile.distinct_sizes());
    println!("{}: {}", "Headings".bold(), analysis.outline.len());

    for warning in &analysis.warnings {
        println!("{}: {}", "Warning".yellow(), warning);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docoutline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heading outline extraction and section ranking");
    println!();
    println!("License: MIT");
}
