use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use homework::advert::Advert;
use homework::color::Color;
use homework::config::Config;
use homework::features::count::CountVectorizer;
use homework::features::tfidf::TfidfVectorizer;
use homework::features::traits::Vectorizer;
use homework::output::{format_weight, terminal};

/// Homework: small self-contained exercises behind one CLI.
#[derive(Parser)]
#[command(name = "homework", version, about)]
struct Cli {
    /// Prefix every output line with the local time
    #[arg(long, global = true)]
    timestamps: bool,

    /// Write output to this file instead of stdout
    #[arg(long, global = true)]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a pokemon with its type emoji
    Pokemon {
        name: String,
        /// electric, grass or water
        poketype: String,
    },

    /// Show colors, their mix, and an optional contrast adjustment
    Color {
        /// Colors as r,g,b or #rrggbb
        #[arg(required = true)]
        colors: Vec<Color>,

        /// Contrast level in [0, 1] applied to the mix
        #[arg(long)]
        contrast: Option<f64>,
    },

    /// Vectorize a text file, one document per line
    Vectorize {
        file: PathBuf,

        /// Show raw counts instead of TF-IDF weights
        #[arg(long)]
        counts: bool,

        /// Drop English stop words
        #[arg(long)]
        stop_words: bool,

        /// Regex for tokens (default: split on whitespace)
        #[arg(long)]
        token_pattern: Option<String>,
    },

    /// One-hot encode categories
    OneHot {
        #[arg(required = true)]
        categories: Vec<String>,
    },

    /// Square the first N numbers lazily, printing as they are computed
    Lazy {
        #[arg(default_value = "10")]
        count: usize,

        /// Print in chunks of this size
        #[arg(long, default_value = "5")]
        chunk: usize,
    },

    /// Department salary tools over a semicolon-delimited staff sheet
    Salary {
        #[command(subcommand)]
        action: SalaryAction,
    },

    /// Load an advert from a JSON file and print it
    Advert {
        file: PathBuf,

        /// Dotted field path to print instead of the whole advert
        #[arg(long)]
        field: Option<String>,
    },

    /// Ask the world clock API what year it is
    Year,

    /// Run CPU-heavy requests concurrently through the blocking pool
    Handle {
        /// Number of requests
        #[arg(long, default_value = "8")]
        requests: usize,

        /// Requests in flight at once
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Milliseconds of CPU work per request
        #[arg(long, default_value = "250")]
        work_ms: u64,
    },
}

#[derive(Subcommand)]
enum SalaryAction {
    /// Show departments and their teams
    Hierarchy { file: PathBuf },

    /// Print the department summary and save it as CSV
    Report {
        file: PathBuf,

        /// Where to save the summary (default: HOMEWORK_REPORT_PATH)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("homework=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let mut out = homework::stamp::open_sink(
        cli.timestamps || config.timestamps,
        cli.output_file.as_deref(),
    )?;

    run(cli.command, &config, out.as_mut()).await?;
    out.flush().context("Failed to flush output")?;
    Ok(())
}

async fn run(command: Commands, config: &Config, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Pokemon { name, poketype } => {
            let pokemon = homework::pokemon::Pokemon::parse(name, &poketype)?;
            writeln!(out, "{pokemon}")?;
        }

        Commands::Color { colors, contrast } => {
            for color in &colors {
                writeln!(
                    out,
                    "  {color}  ({}, {}, {})",
                    color.red, color.green, color.blue
                )?;
            }

            let mix: Color = colors.iter().copied().sum();
            writeln!(
                out,
                "{} {mix}  ({}, {}, {})",
                "Mix:".bold(),
                mix.red,
                mix.green,
                mix.blue
            )?;

            if let Some(level) = contrast {
                let adjusted = mix.contrast(level)?;
                writeln!(
                    out,
                    "{} {adjusted}  ({}, {}, {})",
                    format!("Contrast {level}:").bold(),
                    adjusted.red,
                    adjusted.green,
                    adjusted.blue
                )?;
            }
        }

        Commands::Vectorize {
            file,
            counts,
            stop_words,
            token_pattern,
        } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let corpus: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
            info!(documents = corpus.len(), "Vectorizing corpus");

            let mut counter = CountVectorizer::new();
            if let Some(pattern) = &token_pattern {
                counter = counter.with_token_pattern(pattern)?;
            }
            if stop_words {
                counter = counter.with_english_stop_words();
            }

            if counts {
                let matrix = counter.fit_transform(&corpus);
                terminal::display_matrix(out, "Term Counts", counter.feature_names(), &matrix)?;
            } else {
                let mut vectorizer = TfidfVectorizer::with_counter(counter);
                let matrix: Vec<Vec<String>> = vectorizer
                    .fit_transform(&corpus)
                    .into_iter()
                    .map(|row| row.into_iter().map(format_weight).collect())
                    .collect();
                terminal::display_matrix(out, "TF-IDF", vectorizer.feature_names(), &matrix)?;
            }
        }

        Commands::OneHot { categories } => {
            let rows = homework::features::one_hot::fit_transform(&categories)?;
            terminal::display_one_hot(out, &rows)?;
        }

        Commands::Lazy { count, chunk } => {
            let squares = homework::lazy::squares(count as u64)?;
            for (i, batch) in homework::lazy::chunked(squares.iter(), chunk)?.enumerate() {
                let batch: Vec<String> = batch.iter().map(u64::to_string).collect();
                writeln!(
                    out,
                    "  chunk {}: {}  {}",
                    i + 1,
                    batch.join(", "),
                    format!("(evaluated {})", squares.evaluated()).dimmed()
                )?;
            }
        }

        Commands::Salary { action } => match action {
            SalaryAction::Hierarchy { file } => {
                let employees = homework::salary::report::load_employees(&file)?;
                let hierarchy = homework::salary::report::department_hierarchy(&employees);
                terminal::display_hierarchy(out, &hierarchy)?;
            }
            SalaryAction::Report { file, output } => {
                let employees = homework::salary::report::load_employees(&file)?;
                let report = homework::salary::report::department_report(&employees);
                terminal::display_report(out, &report)?;

                let path = output.unwrap_or_else(|| config.report_path.clone());
                homework::salary::report::write_report(&path, &report)?;
                writeln!(out, "\n{} {}", "Report saved to".bold(), path.display())?;
            }
        },

        Commands::Advert { file, field } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let advert: Advert = Advert::from_json(&text)?;

            match field {
                Some(path) => match advert.path(&path) {
                    Some(homework::advert::Field::Nested(inner)) => writeln!(out, "{inner}")?,
                    Some(homework::advert::Field::Value(value)) => match value.as_str() {
                        Some(s) => writeln!(out, "{s}")?,
                        None => writeln!(out, "{value}")?,
                    },
                    None => anyhow::bail!("Advert has no field {path:?}"),
                },
                // Reset the color so the shell prompt isn't tinted
                None => writeln!(out, "{advert}\x1b[0m")?,
            }
        }

        Commands::Year => {
            let client = homework::clock::worldclock::WorldClockClient::new(
                &config.worldclock_api_url,
            )?;
            let year = homework::clock::year::what_is_year_now(&client).await?;
            writeln!(out, "{year}")?;
        }

        Commands::Handle {
            requests,
            concurrency,
            work_ms,
        } => {
            let model = homework::worker::BusyModel {
                duration: Duration::from_millis(work_ms),
            };
            let handler = homework::worker::Handler::new(Arc::new(model));

            let progress = ProgressBar::new(requests as u64);
            progress.set_style(
                ProgressStyle::with_template("  [{bar:30}] {pos}/{len} requests ({elapsed})")
                    .context("Invalid progress template")?
                    .progress_chars("=> "),
            );

            let started = std::time::Instant::now();
            let completed = handler
                .handle_many_with_progress(requests, concurrency, |done| {
                    progress.set_position(done as u64)
                })
                .await?;
            progress.finish_and_clear();

            writeln!(
                out,
                "{} {completed} requests in {:.2?} ({}ms of work each, {} in flight)",
                "Done:".bold(),
                started.elapsed(),
                work_ms,
                concurrency.max(1)
            )?;
        }
    }

    Ok(())
}
