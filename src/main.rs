use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use similo::{
    export_saved, load_csv, CategoryWeights, Comparison, EntitySchema, Granularity,
    RankingLimits, RankingRequest, SavedRow, SimilarResponse, SimilarityEngine,
    SimilarityStats,
};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Find the locations most similar to a ZIP code or city
#[derive(Parser, Debug)]
#[command(name = "similo")]
#[command(about = "Find similar locations across the United States", long_about = None)]
struct Args {
    /// Path to the dataset CSV (master ZIP or city table)
    #[arg(short, long)]
    data: PathBuf,

    /// Dataset granularity: zip or city
    #[arg(short, long, default_value = "zip")]
    granularity: Granularity,

    /// Reference location: a ZIP code or "City, ST"
    #[arg(short, long, required_unless_present = "list_states")]
    reference: Option<String>,

    /// Only return locations in this state (repeatable)
    #[arg(long = "state")]
    states: Vec<String>,

    /// Number of similar locations to return
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Importance of the People category
    #[arg(long, default_value_t = 1.0)]
    people: f64,

    /// Importance of the Home category
    #[arg(long, default_value_t = 1.0)]
    home: f64,

    /// Importance of the Work category
    #[arg(long, default_value_t = 1.0)]
    work: f64,

    /// Importance of the Environment category
    #[arg(long, default_value_t = 1.0)]
    environment: f64,

    /// JSON file overriding the weight and result count limits
    #[arg(long)]
    limits: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Compare the reference with the result at this rank
    #[arg(long)]
    compare: Option<usize>,

    /// Write the saved ranks to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Ranks to save when exporting, comma separated
    #[arg(long, value_delimiter = ',')]
    save: Vec<usize>,

    /// Notes stored with every saved row
    #[arg(long, default_value = "")]
    notes: String,

    /// List the states present in the dataset and exit
    #[arg(long)]
    list_states: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Similo v{}", env!("CARGO_PKG_VERSION"));

    let schema = EntitySchema::for_granularity(args.granularity);
    let limits = match &args.limits {
        Some(path) => load_limits(path)?,
        None => RankingLimits::default(),
    };

    let pool = load_csv(&args.data, &schema)
        .with_context(|| format!("failed to load dataset {}", args.data.display()))?;

    if args.list_states {
        for state in pool.states() {
            println!("{}", state);
        }
        return Ok(());
    }

    let reference = args
        .reference
        .as_deref()
        .ok_or_else(|| anyhow!("a reference location is required"))?;

    let engine = SimilarityEngine::new(schema)?.with_limits(limits);
    let request = RankingRequest::new(reference)
        .with_states(args.states.iter().cloned())
        .with_weights(CategoryWeights::new(
            args.people,
            args.home,
            args.work,
            args.environment,
        ))
        .with_result_count(args.count.unwrap_or(limits.default_results));

    let ranking = engine.search(&pool, &request)?;
    let response = SimilarResponse::from_ranking(&ranking, engine.schema());
    let stats = SimilarityStats::compute(&ranking);
    info!(
        "Ranked {} of {} candidates, best score {:.2}",
        stats.results_count, stats.candidates_count, stats.best_score
    );

    match args.format {
        OutputFormat::Table => print_table(&response),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    if let Some(rank) = args.compare {
        let ranked = ranking
            .by_rank(rank)
            .ok_or_else(|| anyhow!("rank {} is not part of the result", rank))?;
        let reference = pool.get(&ranking.reference_id)?;
        let comparison = Comparison::new(reference, ranked, engine.schema());
        match args.format {
            OutputFormat::Table => print_comparison(&comparison),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        }
    }

    if let Some(path) = &args.export {
        let saved: Vec<SavedRow> = args
            .save
            .iter()
            .map(|&rank| SavedRow::new(rank).with_notes(args.notes.clone()))
            .collect();
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let written = export_saved(file, &response, engine.schema(), &saved)?;
        info!("Saved {} rows to {}", written, path.display());
    }

    Ok(())
}

fn load_limits(path: &Path) -> anyhow::Result<RankingLimits> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read limits file {}", path.display()))?;
    let limits = serde_json::from_str(&text)
        .with_context(|| format!("invalid limits file {}", path.display()))?;
    Ok(limits)
}

fn print_table(response: &SimilarResponse) {
    println!("Top {} most similar locations to {}", response.result.len(), response.reference);
    println!(
        "{:>4}  {:<50} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "RANK", "LOCATION", "OVERALL", "PEOPLE", "HOME", "WORK", "ENV"
    );
    for row in &response.result {
        println!(
            "{:>4}  {:<50} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            row.rank,
            row.label,
            row.overall,
            row.scores.people,
            row.scores.home,
            row.scores.work,
            row.scores.environment
        );
    }
    if let Some(center) = response.map_center {
        println!("Map center: {:.4}, {:.4}", center.lat, center.lon);
    }
}

fn print_comparison(comparison: &Comparison) {
    println!();
    println!("Selected: {}", comparison.reference_label);
    println!("Similar:  {}", comparison.candidate_label);
    println!(
        "Overall {:.2} | People {:.2} | Home {:.2} | Work {:.2} | Environment {:.2}",
        comparison.overall,
        comparison.scores.people,
        comparison.scores.home,
        comparison.scores.work,
        comparison.scores.environment
    );
    println!("{:<24} {:>14} {:>14} {:>14}", "FEATURE", "SELECTED", "SIMILAR", "DELTA");
    for (column, value) in &comparison.features {
        println!(
            "{:<24} {:>14.2} {:>14.2} {:>+14.2}",
            column, value.reference, value.candidate, value.delta
        );
    }
}
