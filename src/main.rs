use anyhow::{bail, Context, Result};
use chrono::{Datelike, Local};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};
use volleyscraper::{
    config::{Config, ScrapeOptions},
    explore, export,
    fetch::HttpFetcher,
    league::Gender,
    pipeline,
    process::{OuaPlayerStats, Snapshot},
    summary::RunSummary,
};

/// Scrapes Polish league and OUA volleyball statistics into dated CSV snapshots.
#[derive(Parser, Debug)]
#[command(name = "volleyscraper")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape, clean and write snapshots
    Scrape(ScrapeArgs),
    /// Print the top point scorers from an OUA snapshot, per team for one
    /// season or overall across every season
    Leaders(LeadersArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Source {
    Polish,
    Oua,
    All,
}

#[derive(Args, Debug)]
struct ScrapeArgs {
    /// Which site family to scrape
    #[arg(long, value_enum, default_value_t = Source::All)]
    source: Source,

    /// First season (default: first published season of each source)
    #[arg(long)]
    from: Option<u16>,

    /// Last season (default: current year)
    #[arg(long)]
    to: Option<u16>,

    /// Directory for the CSV snapshots
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Requests in flight at once
    #[arg(long, default_value_t = 3)]
    concurrency: usize,

    /// YAML file overriding the user agent, OUA roster and aliases
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write the run summary as JSON
    #[arg(long)]
    summary: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct LeadersArgs {
    /// Season to rank per team (default: all seasons, players only)
    #[arg(long)]
    year: Option<i16>,

    #[arg(long, value_parser = parse_gender)]
    gender: Gender,

    /// Players listed (per team when --year is given)
    #[arg(long, default_value_t = 5)]
    top: usize,

    /// Snapshot to read (default: newest OUA snapshot in --dir)
    #[arg(long)]
    input: Option<PathBuf>,

    #[arg(long, default_value = ".")]
    dir: PathBuf,
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    s.parse().map_err(|e| format!("{e}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Scrape(args) => scrape(args).await,
        Command::Leaders(args) => leaders(args),
    }
}

async fn scrape(args: ScrapeArgs) -> Result<()> {
    let cfg = Config::load(args.config.as_deref())?;
    let today = Local::now().date_naive();
    let opts = ScrapeOptions {
        from: args.from,
        to: args.to.unwrap_or(today.year() as u16),
        concurrency: args.concurrency,
    };
    if let Some(from) = opts.from {
        if from > opts.to {
            bail!("--from {} is after --to {}", from, opts.to);
        }
    }
    info!(source = ?args.source, ?opts, out = %args.output_dir.display(), "startup");

    let fetcher = Arc::new(HttpFetcher::with_user_agent(&cfg.user_agent)?);
    let mut sources = Vec::new();
    if matches!(args.source, Source::Polish | Source::All) {
        sources.push(
            pipeline::run_polish(Arc::clone(&fetcher), &opts, &args.output_dir, today).await,
        );
    }
    if matches!(args.source, Source::Oua | Source::All) {
        sources.push(
            pipeline::run_oua(
                Arc::clone(&fetcher),
                &opts,
                &cfg.oua,
                &args.output_dir,
                today,
            )
            .await,
        );
    }

    let summary = RunSummary {
        date: today,
        sources,
    };
    summary.log();
    if let Some(path) = &args.summary {
        summary.write_json(path)?;
    }
    if summary.is_fatal() {
        bail!("run finished with fatal errors");
    }
    info!("all done");
    Ok(())
}

fn leaders(args: LeadersArgs) -> Result<()> {
    let path = match args.input {
        Some(p) => p,
        None => export::latest_snapshot(&args.dir, OuaPlayerStats::TAG)?.with_context(|| {
            format!("no {} snapshot in {}", OuaPlayerStats::TAG, args.dir.display())
        })?,
    };
    let rows: Vec<OuaPlayerStats> = export::read_back(&path)?;
    info!(path = %path.display(), rows = rows.len(), "loaded snapshot");

    let Some(year) = args.year else {
        let players = explore::top_scorers(&rows, args.gender, None, args.top);
        if players.is_empty() {
            warn!(gender = %args.gender, "no rows for that gender");
        }
        for (name, pts) in players {
            println!("{:<30} {:>6}", name, pts);
        }
        return Ok(());
    };

    let teams = explore::points_leaders(&rows, year, args.gender, args.top);
    if teams.is_empty() {
        warn!(year, gender = %args.gender, "no rows for that season");
    }
    for t in teams {
        println!("{} ({} pts)", t.team, t.team_total);
        for (name, pts) in t.players {
            println!("  {:<28} {:>5}", name, pts);
        }
    }
    Ok(())
}
