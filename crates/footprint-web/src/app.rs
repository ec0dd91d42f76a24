//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::info;

use footprint_chart::ChartFormat;
use footprint_core::{format_kg, parse_number, FootprintInput};
use footprint_pdf::{ReportRenderer, REPORT_FILE_NAME};

use crate::config::Settings;
use crate::routes::Router;
use crate::server::ReportServer;

#[derive(Parser)]
#[command(name = "footprint")]
#[command(author, version, about = "Carbon footprint calculator", long_about = None)]
struct Cli {
    /// Verbose logging
    #[arg(long, global = true, env = "FOOTPRINT_DEBUG")]
    debug: bool,

    /// Configuration file path (default: ./footprint.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the calculator web application
    Serve {
        /// Bind address
        #[arg(long)]
        bind: Option<String>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Compute a footprint and write the PDF report to a file
    Report {
        /// Electricity usage in kWh
        #[arg(long, value_parser = finite_number)]
        electricity: f64,

        /// Travel distance in km
        #[arg(long, value_parser = finite_number)]
        distance: f64,

        /// Waste mass in kg
        #[arg(long, value_parser = finite_number)]
        waste: f64,

        /// Output PDF file
        #[arg(short, long, default_value = REPORT_FILE_NAME)]
        output: PathBuf,

        /// Embed the chart as svg or png
        #[arg(long)]
        chart_format: Option<ChartFormat>,
    },
}

/// Parse a command-line amount with the same rules as the web form
fn finite_number(raw: &str) -> std::result::Result<f64, String> {
    parse_number("value", raw).map_err(|e| e.user_message().to_string())
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let mut settings = Settings::discover(cli.config.as_deref(), &cwd)?;
    settings.debug |= cli.debug;

    init_tracing(settings.debug);

    match cli.command {
        Commands::Serve { bind, port } => {
            if let Some(bind) = bind {
                settings.server.bind = bind;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            serve_command(&settings)?;
        }
        Commands::Report {
            electricity,
            distance,
            waste,
            output,
            chart_format,
        } => {
            if let Some(format) = chart_format {
                settings.report.chart_format = format;
            }
            let input = FootprintInput {
                energy_kwh: electricity,
                distance_km: distance,
                waste_kg: waste,
            };
            report_command(&settings, input, &output)?;
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber for logging
///
/// `RUST_LOG` directives apply on top of the default level.
pub fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the serve command; blocks until the server stops
pub fn serve_command(settings: &Settings) -> Result<()> {
    info!(
        "Starting footprint v{} (debug: {})",
        env!("CARGO_PKG_VERSION"),
        settings.debug
    );

    let renderer =
        ReportRenderer::new(settings.report.clone()).context("Failed to load report fonts")?;
    let router = Router::new(renderer);
    let server = ReportServer::start(&settings.server, router).context("Failed to start server")?;

    println!("Serving on {}", server.url());
    server.wait();
    Ok(())
}

/// Execute the report command
pub fn report_command(settings: &Settings, input: FootprintInput, output: &Path) -> Result<()> {
    let breakdown = input.validate().context("Invalid footprint input")?.compute();

    println!("Energy Emission (Electricity): {} kg CO2", format_kg(breakdown.energy_emission));
    println!("Transport Emission: {} kg CO2", format_kg(breakdown.transport_emission));
    println!("Waste Emission: {} kg CO2", format_kg(breakdown.waste_emission));
    println!("Total Emission: {} kg CO2", format_kg(breakdown.total_emission));

    let renderer =
        ReportRenderer::new(settings.report.clone()).context("Failed to load report fonts")?;
    let pdf = renderer
        .render_pdf(&breakdown, Local::now().naive_local())
        .context("Failed to render report")?;
    pdf.save(output)
        .with_context(|| format!("Failed to write report: {}", output.display()))?;

    println!("Report written to {}", output.display());
    Ok(())
}
