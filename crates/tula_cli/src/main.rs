use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tula_config::Study;
use tula_geometry::OrbitalPlane;
use tula_model::{BodyTable, NodeProvenance};
use tula_nodes::{
    AnalyticalOutcome, CrossCheck, GridSearchConfig, NodeProblem, cross_validate, solve_body_node,
};
use tula_search::{ResultRow, SearchConfig, SearchOutcome, columns};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const EARTH_INCLINATION_DEG: f64 = 1.578_666_63;
const EARTH_NODE_DEG: f64 = 284.51;

#[derive(Parser)]
#[command(name = "tula", about = "Orbital-plane node solver and balance search")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Jsonl,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the body table
    Bodies {
        /// Study file (TOML); built-in table if omitted
        #[arg(long)]
        study: Option<PathBuf>,
    },
    /// Solve the ascending node numerically and analytically
    SolveNode {
        /// Body from the table to solve
        #[arg(long, conflicts_with_all = ["inclination", "target", "guess"])]
        body: Option<String>,
        /// Study file (TOML); built-in table if omitted
        #[arg(long)]
        study: Option<PathBuf>,
        /// Planet inclination to the reference plane (deg)
        #[arg(long, requires_all = ["target", "guess"])]
        inclination: Option<f64>,
        /// Target apparent inclination (deg)
        #[arg(long)]
        target: Option<f64>,
        /// Starting guess and disambiguation hint (deg)
        #[arg(long)]
        guess: Option<f64>,
        /// Second body's inclination (deg)
        #[arg(long, default_value_t = EARTH_INCLINATION_DEG)]
        ref_inclination: f64,
        /// Second body's ascending node (deg)
        #[arg(long, default_value_t = EARTH_NODE_DEG)]
        ref_node: f64,
    },
    /// Cross-validate the node of every body with a known apparent inclination
    CrossCheck {
        /// Study file (TOML); built-in table if omitted
        #[arg(long)]
        study: Option<PathBuf>,
        /// Maximum allowed numerical/analytical difference (deg)
        #[arg(long, default_value_t = 1e-4)]
        tolerance: f64,
    },
    /// Run the balance search and write the retained rows
    Search {
        /// Study file (TOML); built-in study if omitted
        #[arg(long)]
        study: Option<PathBuf>,
        /// Balance threshold in [0, 100]; study value if omitted
        #[arg(long)]
        threshold: Option<f64>,
        /// Restrict to a named scenario (repeatable)
        #[arg(long = "scenario")]
        scenarios: Vec<String>,
        /// Write at most this many rows
        #[arg(long)]
        limit: Option<usize>,
        /// Output format
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
        /// Output file; stdout if omitted
        #[arg(long)]
        output: Option<PathBuf>,
        /// Evaluate on the calling thread only
        #[arg(long)]
        sequential: bool,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Bodies { study } => {
            let study = load_study(study.as_ref());
            print_bodies(&study.table);
        }

        Commands::SolveNode {
            body,
            study,
            inclination,
            target,
            guess,
            ref_inclination,
            ref_node,
        } => {
            let config = GridSearchConfig::standard();
            let check = match (body, inclination, target, guess) {
                (Some(name), ..) => {
                    let study = load_study(study.as_ref());
                    solve_body_node(&study.table, &name, &config)
                }
                (None, Some(inclination), Some(target), Some(guess)) => {
                    let problem = NodeProblem::new(
                        inclination,
                        OrbitalPlane::new(ref_inclination, ref_node),
                        target,
                    );
                    cross_validate(&problem, guess, &config)
                }
                _ => {
                    eprintln!("Give --body NAME, or --inclination, --target and --guess");
                    std::process::exit(1);
                }
            };
            let check = check.unwrap_or_else(|e| {
                eprintln!("Node solve failed: {e}");
                std::process::exit(1);
            });
            print_solution(&check);
        }

        Commands::CrossCheck { study, tolerance } => {
            let study = load_study(study.as_ref());
            if !run_cross_check(&study.table, tolerance) {
                std::process::exit(1);
            }
        }

        Commands::Search {
            study,
            threshold,
            scenarios,
            limit,
            format,
            output,
            sequential,
        } => {
            let mut study = load_study(study.as_ref());
            if !scenarios.is_empty() {
                study.space = study
                    .space
                    .with_scenarios_named(scenarios.as_slice())
                    .unwrap_or_else(|e| {
                        eprintln!("Invalid scenario selection: {e}");
                        std::process::exit(1);
                    });
            }
            let config = SearchConfig {
                threshold: threshold.unwrap_or(study.search.threshold),
                parallel: study.search.parallel && !sequential,
            };
            let outcome = study
                .engine(config)
                .and_then(|mut engine| engine.run())
                .unwrap_or_else(|e| {
                    eprintln!("Search failed: {e}");
                    std::process::exit(1);
                });
            eprintln!(
                "{} configurations, {} retained, {} passing, {} rejected",
                outcome.stats.enumerated,
                outcome.stats.retained,
                outcome.stats.passing,
                outcome.stats.rejected
            );
            if let Err(e) = write_rows(&study.table, &outcome, limit, format, output.as_ref()) {
                eprintln!("Failed to write results: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(env_filter)
        .init();
}

fn load_study(path: Option<&PathBuf>) -> Study {
    tracing::debug!(?path, "loading study");
    let study = match path {
        Some(path) => Study::load(path),
        None => Study::builtin(),
    };
    study.unwrap_or_else(|e| {
        eprintln!("Failed to load study: {e}");
        std::process::exit(1);
    })
}

fn print_bodies(table: &BodyTable) {
    println!(
        "{:<10} {:>11} {:>10} {:>9} {:>10} {:>9} {:>9} {:>12} {:>15} {:>11}",
        "body", "mass", "a (AU)", "e", "incl", "node", "orig", "period (yr)", "bounds", "trend"
    );
    for (i, b) in table.bodies().iter().enumerate() {
        let marker = if i == table.reference_index() { "*" } else { "" };
        let original = b
            .node(NodeProvenance::OriginalReference)
            .map_or_else(|| "-".to_string(), |n| format!("{n:.2}"));
        println!(
            "{:<10} {:>11.4e} {:>10.6} {:>9.6} {:>10.7} {:>9.2} {:>9} {:>12.1} {:>15} {:>11}",
            format!("{}{marker}", b.name),
            b.mass_ratio,
            b.semi_major_axis_au,
            b.eccentricity,
            b.inclination_deg,
            b.preferred_node_deg(),
            original,
            b.precession_period_yr,
            format!("[{:.2}, {:.2}]", b.bounds.min_deg, b.bounds.max_deg),
            format!("{:?}", b.trend).to_lowercase(),
        );
    }
}

fn print_solution(check: &CrossCheck) {
    let n = &check.numerical;
    println!("Starting guess:   {:.4} deg", check.starting_guess_deg);
    println!(
        "Numerical node:   {:.4} deg (moved {:+.4} deg)",
        n.node_deg, n.delta_from_guess_deg
    );
    println!(
        "Apparent incl.:   {:.8} deg (target {:.8}, error {:.4}\")",
        n.apparent_inclination_deg, check.problem.target_apparent_deg, n.error_arcsec
    );
    match &check.analytical {
        AnalyticalOutcome::Solved(s) => {
            println!(
                "Analytical:       {:.4} / {:.4} deg (cos ratio {:.6})",
                s.candidates[0], s.candidates[1], s.cos_ratio
            );
            if let Some(chosen) = s.chosen {
                println!("Chosen candidate: {chosen:.4} deg");
            }
        }
        AnalyticalOutcome::NoSolution { cos_ratio } => {
            println!("Analytical:       no solution (cos ratio {cos_ratio:.6})");
        }
    }
    if let Some(diff) = check.node_difference_deg {
        println!("Difference:       {diff:.6} deg");
    }
}

/// Returns whether every checked body agrees within `tolerance`.
fn run_cross_check(table: &BodyTable, tolerance: f64) -> bool {
    let config = GridSearchConfig::standard();
    let mut all_agree = true;
    println!(
        "{:<10} {:>10} {:>11} {:>11} {:>10} {:>7}",
        "body", "guess", "numerical", "analytical", "diff", "ok"
    );
    for (i, body) in table.bodies().iter().enumerate() {
        if i != table.reference_index() && body.apparent_inclination_deg.is_none() {
            println!("{:<10} skipped: no apparent inclination", body.name);
            continue;
        }
        let check = match solve_body_node(table, &body.name, &config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}: {e}", body.name);
                all_agree = false;
                continue;
            }
        };
        let ok = check.agrees(tolerance);
        all_agree &= ok;
        let analytical = check
            .analytical
            .chosen()
            .map_or_else(|| "none".to_string(), |n| format!("{n:.4}"));
        let diff = check
            .node_difference_deg
            .map_or_else(|| "-".to_string(), |d| format!("{d:.6}"));
        println!(
            "{:<10} {:>10.2} {:>11.4} {:>11} {:>10} {:>7}",
            body.name,
            check.starting_guess_deg,
            check.numerical.node_deg,
            analytical,
            diff,
            if ok { "yes" } else { "NO" }
        );
    }
    all_agree
}

fn write_rows(
    table: &BodyTable,
    outcome: &SearchOutcome,
    limit: Option<usize>,
    format: OutputFormat,
    output: Option<&PathBuf>,
) -> io::Result<()> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    let mut out = BufWriter::new(sink);
    let take = limit.unwrap_or(usize::MAX);
    match format {
        OutputFormat::Csv => {
            writeln!(out, "{}", columns(table).join(","))?;
            for result in outcome.results.iter().take(take) {
                writeln!(out, "{}", ResultRow::from_result(result).values().join(","))?;
            }
        }
        OutputFormat::Jsonl => {
            for result in outcome.results.iter().take(take) {
                let line = serde_json::to_string(&ResultRow::from_result(result))?;
                writeln!(out, "{line}")?;
            }
        }
    }
    out.flush()
}
