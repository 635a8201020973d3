//! Point d'entrée CLI pour swegrid

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;
use swegrid_cli::Config;

/// Convertir des coordonnées entre WGS84, RT90 et SWEREF99
#[derive(Parser)]
#[command(name = "swegrid")]
#[command(author, version)]
#[command(about = "Convert coordinates between WGS84 and the Swedish grids RT90 / SWEREF99")]
#[command(long_about = "Gauss-Krüger conversions for the Swedish national grids.\n\nConvert single points, list the supported projections or reproject whole GeoJSON files.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    let config = Config::from_env()?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::ToGrid { lat, lon, projection } => {
            cli::cmd_to_grid(&config, lat, lon, projection.as_deref())?;
        }
        Commands::ToWgs84 {
            northing,
            easting,
            projection,
            format,
        } => {
            cli::cmd_to_wgs84(northing, easting, &projection, format.into())?;
        }
        Commands::Parse {
            text,
            format,
            projection,
        } => {
            cli::cmd_parse(&config, &text, format.map(Into::into), projection.as_deref())?;
        }
        Commands::Projections => cli::cmd_projections(),
        Commands::Reproject {
            input,
            output,
            from,
            to,
            jobs,
            precision,
            report,
        } => {
            cli::cmd_reproject(
                &config,
                &input,
                &output,
                &from,
                &to,
                jobs,
                precision,
                report.as_deref(),
            )?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
