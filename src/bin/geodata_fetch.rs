use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use geodata_fetch::census::CensusHttpClient;
use geodata_fetch::config::{ConfigLoader, ResolvedConfig};
use geodata_fetch::credentials::read_token;
use geodata_fetch::error::GeodataError;
use geodata_fetch::flood::{DateSelector, FloodDownloader};
use geodata_fetch::lidar::LidarDownloader;
use geodata_fetch::output::{JsonOutput, OutputMode, SummaryOutput};
use geodata_fetch::pipeline::{CensusPipeline, PipelineOptions};
use geodata_fetch::store::OutputStore;
use geodata_fetch::wget::SystemWget;

#[derive(Parser)]
#[command(name = "geodata-fetch")]
#[command(about = "Download census age/sex tables, 3DEP LIDAR tiles and MODIS flood products")]
#[command(version, author)]
struct Cli {
    /// Print results as JSON on stdout.
    #[arg(long, global = true)]
    json: bool,

    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Fetch population by age and sex and convert it to CSV")]
    Census(CensusArgs),
    #[command(about = "Download 3DEP 1 m LIDAR DEM tiles")]
    Lidar,
    #[command(about = "Download MCDWD flood products for one day")]
    Flood(FloodArgs),
}

#[derive(Args)]
struct CensusArgs {
    #[arg(long)]
    overwrite: bool,
}

#[derive(Args)]
struct FloodArgs {
    /// YYYY-MM-DD, 'today' or 'yesterday'.
    date: String,
}

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(error) = report.downcast_ref::<GeodataError>() {
            return ExitCode::from(map_exit_code(error));
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &GeodataError) -> u8 {
    if error.is_configuration() {
        return 2;
    }
    match error {
        GeodataError::CensusHttp(_)
        | GeodataError::CensusStatus { .. }
        | GeodataError::MissingTool(_) => 3,
        GeodataError::UnsupportedLevel(_) => 4,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Summary
    };
    let config = ConfigLoader::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Census(args) => run_census(args, config, output_mode),
        Commands::Lidar => run_lidar(config, output_mode),
        Commands::Flood(args) => run_flood(args, config, output_mode),
    }
}

fn run_census(
    args: CensusArgs,
    config: ResolvedConfig,
    output_mode: OutputMode,
) -> miette::Result<()> {
    let settings = config.census;
    let api_key = read_token(&settings.api_key_file)?;
    let client = CensusHttpClient::new(&settings.endpoint)?;
    let pipeline = CensusPipeline::new(
        OutputStore::new(settings.output_dir),
        client,
        api_key,
        settings.states,
        settings.age_boundaries,
    );
    let options = PipelineOptions {
        overwrite: args.overwrite,
    };

    let result = pipeline.run(&settings.admin_levels, options)?;
    match output_mode {
        OutputMode::Json => JsonOutput::print_census(&result).into_diagnostic()?,
        OutputMode::Summary => SummaryOutput::print_census(&result),
    }
    Ok(())
}

fn run_lidar(config: ResolvedConfig, output_mode: OutputMode) -> miette::Result<()> {
    let downloader = LidarDownloader::new(config.lidar, SystemWget::new());
    let result = downloader.run()?;
    match output_mode {
        OutputMode::Json => JsonOutput::print_tiles(&result).into_diagnostic()?,
        OutputMode::Summary => SummaryOutput::print_tiles(&result),
    }
    Ok(())
}

fn run_flood(
    args: FloodArgs,
    config: ResolvedConfig,
    output_mode: OutputMode,
) -> miette::Result<()> {
    let date = args.date.parse::<DateSelector>()?.resolve_local();
    let token = read_token(&config.flood.token_file)?;
    let downloader = FloodDownloader::new(config.flood, token, SystemWget::new());
    let result = downloader.run(date)?;
    match output_mode {
        OutputMode::Json => JsonOutput::print_flood(&result).into_diagnostic()?,
        OutputMode::Summary => SummaryOutput::print_flood(&result),
    }
    Ok(())
}
