use adforge::asset::write_assets;
use adforge::background::WhiteKeyRemover;
use adforge::banner::{generate_all_banners, generate_banners, Region};
use adforge::campaign::{CampaignSession, FranchiseReport, ReportSheet};
use adforge::config::{AppConfig, BannerJob, StoryJob};
use adforge::constants::DEFAULT_THEME_NAME;
use adforge::search::BraveSearchClient;
use adforge::story::Channel;
use adforge::themes::research_themes;
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Adforge - banner and story-frame generator for marketing campaigns
#[derive(Parser, Debug)]
#[command(name = "adforge")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the ILM banner set for one brand
    Banners {
        /// Banner job file
        #[arg(long)]
        job: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Only produce one naming set (us or ca)
        #[arg(long)]
        region: Option<Region>,
    },

    /// Render story frames for every franchise in a job
    Stories {
        /// Story job file
        #[arg(long)]
        job: PathBuf,

        /// Output directory
        #[arg(long)]
        out: PathBuf,

        /// Write the franchise report as JSON
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Research trend themes and print them as JSON
    Themes {
        /// Channel handle, repeatable; all channels when omitted
        #[arg(long = "channel")]
        channels: Vec<Channel>,

        /// Date driving the season (YYYY-MM-DD); today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn run_banners(job_path: &Path, out: &Path, region: Option<Region>) -> Result<()> {
    let job = BannerJob::from_file(job_path)?;
    let cfg = job
        .to_brand_config(&WhiteKeyRemover::default())
        .with_context(|| format!("Failed to prepare brand from {}", job_path.display()))?;

    let assets = match region.or(job.region) {
        Some(region) => generate_banners(&cfg, region)?,
        None => generate_all_banners(&cfg)?,
    };
    let written = write_assets(&assets, out)?;

    tracing::info!(
        brand = %cfg.brand_name,
        files = written.len(),
        out = %out.display(),
        "Banners written"
    );
    Ok(())
}

fn run_stories(job_path: &Path, out: &Path, report_path: Option<&Path>) -> Result<()> {
    let job = StoryJob::from_file(job_path)?;
    let date = job.date.unwrap_or_else(|| Local::now().date_naive());

    let job_themes = job.theme_names();
    let themes: HashMap<Channel, String> = Channel::ALL
        .into_iter()
        .map(|channel| {
            let name = job_themes
                .get(&channel)
                .cloned()
                .unwrap_or_else(|| DEFAULT_THEME_NAME.to_string());
            (channel, name)
        })
        .collect();

    let mut session = CampaignSession::new(date);
    session.approve_themes(themes)?;

    let curation = job
        .to_curation(&WhiteKeyRemover::default())
        .with_context(|| format!("Failed to load products from {}", job_path.display()))?;
    let review = session.submit_curation(curation)?;
    for warning in &review.warnings {
        tracing::warn!(warning = %warning, "Curation warning");
    }

    let written = write_assets(session.generate()?, out)?;
    tracing::info!(
        products = review.ready_count,
        files = written.len(),
        out = %out.display(),
        "Story frames written"
    );

    if let Some(path) = report_path {
        let sheets: Vec<ReportSheet> = session
            .report()?
            .iter()
            .map(FranchiseReport::to_sheet)
            .collect();
        let json = serde_json::to_string_pretty(&sheets)?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        tracing::info!(sheets = sheets.len(), path = %path.display(), "Report written");
    }
    Ok(())
}

fn run_themes(config: &AppConfig, channels: &[Channel], date: Option<NaiveDate>) -> Result<()> {
    if config.search.api_key.is_empty() {
        tracing::warn!("No search API key configured; themes will not include trend signals");
    }
    let client = BraveSearchClient::new(&config.search)?;
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let themes = research_themes(&client, channels, date);
    println!("{}", serde_json::to_string_pretty(&themes)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;

    if let Err(e) = adforge::logging::init_subscriber(&config.logging) {
        bail!("Failed to initialize logging subsystem: {}", e);
    }

    let overrides = config.apply_fonts()?;
    tracing::info!(
        config_file = ?args.config,
        font_overrides = overrides,
        "Configuration loaded successfully"
    );

    match args.command {
        Command::Banners { job, out, region } => run_banners(&job, &out, region),
        Command::Stories { job, out, report } => run_stories(&job, &out, report.as_deref()),
        Command::Themes { channels, date } => run_themes(&config, &channels, date),
    }
}
