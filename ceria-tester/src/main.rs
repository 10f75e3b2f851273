//! Scenario runner for the Ceria assessment engine.
//!
//! Feeds deterministic synthetic play telemetry through one engine
//! instance and reports the resulting per-domain aggregates, so tuning
//! changes to the scoring weights can be eyeballed quickly.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use ceria_engine::{
    AssessmentEngine, Difficulty, DomainCode, EngineConfig, GameKind, SessionRecord, normalize,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// Colored console table
    Console,
    /// Machine-readable JSON report
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "ceria-tester", version = "0.1.0")]
#[command(about = "Feeds synthetic telemetry through the Ceria assessment engine")]
struct Args {
    /// Seed for the synthetic telemetry generator
    #[arg(long, default_value_t = 1337)]
    seed: u64,

    /// Rounds to simulate per mini-game
    #[arg(long, default_value_t = 12)]
    rounds: u32,

    /// Games to simulate (comma-separated wire ids; default all)
    #[arg(long)]
    games: Option<String>,

    /// Report output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Optional JSON file overriding the engine configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    let games = resolve_games(args.games.as_deref())?;

    let mut engine = AssessmentEngine::new(config);
    let summary = run_simulation(&mut engine, &games, args.rounds, args.seed);

    let report = build_report(&engine, &summary);
    match args.report {
        ReportFormat::Console => print_console_report(&engine, &summary),
        ReportFormat::Json => write_json_report(&report, args.output.as_deref())?,
    }
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading engine config from {}", path.display()))?;
    EngineConfig::from_json(&json).context("parsing engine config")
}

fn resolve_games(csv: Option<&str>) -> Result<Vec<GameKind>> {
    let Some(csv) = csv else {
        return Ok(GameKind::ALL.to_vec());
    };
    csv.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<GameKind>()
                .with_context(|| format!("unknown game '{id}'"))
        })
        .collect()
}

/// Counters accumulated while feeding the engine.
#[derive(Debug, Default)]
struct RunSummary {
    rounds_fed: u32,
    rounds_rejected: u32,
    notifications: Vec<String>,
}

fn run_simulation(
    engine: &mut AssessmentEngine,
    games: &[GameKind],
    rounds: u32,
    seed: u64,
) -> RunSummary {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut summary = RunSummary::default();
    let base = DateTime::<Utc>::from_timestamp(1_750_000_000, 0).unwrap_or_default();
    let mut tick: i64 = 0;

    for round in 0..rounds {
        for &game in games {
            let difficulty = match round % 3 {
                0 => Difficulty::Easy,
                1 => Difficulty::Medium,
                _ => Difficulty::Hard,
            };
            let time_spent: u32 = rng.gen_range(20..=180);
            let errors: u32 = rng.gen_range(0..=5);
            let hints: u32 = rng.gen_range(0..=2);

            let weights = engine.weights_for(game).clone();
            let normalized = normalize(time_spent, errors, hints, difficulty, &weights);

            tick += 1;
            let timestamp = base + Duration::minutes(tick);
            let session = match SessionRecord::new(
                timestamp,
                time_spent,
                errors,
                normalized.score,
                difficulty,
                hints,
            ) {
                Ok(session) => session,
                Err(err) => {
                    log::warn!("synthetic session rejected: {err}");
                    summary.rounds_rejected += 1;
                    continue;
                }
            };

            match engine.record_session(game.as_str(), session) {
                Ok(_) => summary.rounds_fed += 1,
                Err(err) => {
                    log::warn!("engine rejected session for {game}: {err}");
                    summary.rounds_rejected += 1;
                }
            }
            if let Some(notice) = engine.take_notification() {
                summary.notifications.push(notice.spec.name);
            }
        }
    }
    summary
}

#[derive(Debug, Serialize)]
struct DomainReport {
    code: DomainCode,
    display_name: &'static str,
    total_played: u32,
    average_score: u32,
    best_score: u32,
    average_errors: f64,
    development_level: String,
}

#[derive(Debug, Serialize)]
struct Report {
    rounds_fed: u32,
    rounds_rejected: u32,
    domains: Vec<DomainReport>,
    earned_achievements: Vec<String>,
    notifications_seen: Vec<String>,
}

fn build_report(engine: &AssessmentEngine, summary: &RunSummary) -> Report {
    let domains = engine
        .all_domain_stats()
        .map(|(code, stats)| DomainReport {
            code,
            display_name: code.display_name(),
            total_played: stats.total_played,
            average_score: stats.average_score,
            best_score: stats.best_score,
            average_errors: stats.average_errors,
            development_level: stats.development_level.label().to_string(),
        })
        .collect();
    let earned_achievements = engine
        .achievements()
        .earned()
        .into_iter()
        .map(|notice| notice.spec.id)
        .collect();
    Report {
        rounds_fed: summary.rounds_fed,
        rounds_rejected: summary.rounds_rejected,
        domains,
        earned_achievements,
        notifications_seen: summary.notifications.clone(),
    }
}

fn print_console_report(engine: &AssessmentEngine, summary: &RunSummary) {
    println!(
        "{} {} rounds fed, {} rejected",
        "ceria-tester".bold(),
        summary.rounds_fed,
        summary.rounds_rejected
    );
    println!(
        "{:<5} {:<24} {:>6} {:>6} {:>6} {:>8}  {}",
        "code", "domain", "plays", "avg", "best", "errors", "level"
    );
    for (code, stats) in engine.all_domain_stats() {
        let level = match stats.development_level.label() {
            label @ "Sangat Baik" => label.green().bold(),
            label @ "Baik" => label.green(),
            label @ "Sesuai Usia" => label.yellow(),
            label => label.red(),
        };
        println!(
            "{:<5} {:<24} {:>6} {:>6} {:>6} {:>8.1}  {}",
            code.to_string(),
            code.display_name(),
            stats.total_played,
            stats.average_score,
            stats.best_score,
            stats.average_errors,
            level
        );
    }

    let earned = engine.achievements().earned();
    println!("\n{} ({})", "achievements".bold(), earned.len());
    for notice in earned {
        println!("  {} [{:?}]", notice.spec.name, notice.spec.rarity);
    }
}

fn write_json_report(report: &Report, output: Option<&std::path::Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serializing report")?;
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating report file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            writer.write_all(json.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        None => {
            let mut out = stdout();
            out.write_all(json.as_bytes())?;
            out.write_all(b"\n")?;
        }
    }
    Ok(())
}
