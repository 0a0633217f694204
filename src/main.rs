/*!
 * Report Bridge CLI - Command Line Interface
 *
 * Looks up the ReportServer once at startup, runs one subcommand through
 * the fail-soft bridge and exits with a structured exit code.
 */

use anyhow::Context;
use clap::{Parser, Subcommand};
use report_bridge::{
    commands::{self, GenerateArgs},
    config::BridgeConfig,
    error::{BridgeError, EXIT_FATAL, EXIT_SUCCESS},
    logging, VERSION,
};
use report_connect::{GrpcRegistry, ReportBridge};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "report-bridge")]
#[command(version, about = "Client for a remote report generation server", long_about = None)]
struct Cli {
    /// Load settings from a TOML file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// ReportServer registry address (host:port)
    #[arg(short = 's', long = "server", env = "REPORT_BRIDGE_SERVER", global = true)]
    server: Option<String>,

    /// Connect timeout in seconds
    #[arg(long, value_name = "SECS", global = true)]
    connect_timeout: Option<u64>,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    /// Print machine readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether the ReportServer can serve requests
    Health,

    /// List the report templates the server publishes
    Templates,

    /// Generate a report and write it to disk
    Generate {
        /// Template identifier
        #[arg(short = 't', long = "template")]
        template: String,

        /// Output format, e.g. PDF or HTML
        #[arg(short = 'f', long = "format")]
        format: String,

        /// Template parameter (can be specified multiple times)
        #[arg(short = 'p', long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Include charts in the report
        #[arg(long)]
        charts: bool,

        /// Output file (default: filename supplied by the server)
        #[arg(short = 'o', long = "output", value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.downcast_ref::<BridgeError>()
                .map(BridgeError::exit_code)
                .unwrap_or(EXIT_FATAL)
        }
    };

    std::process::exit(code);
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli)?;
    logging::init_logging(&config).context("Failed to initialize logging")?;

    info!("report-bridge v{}", VERSION);
    debug!("Effective configuration: {:?}", config);

    let registry = GrpcRegistry::new(config.connect_options());
    let bridge = ReportBridge::connect_with(&registry, config.server_address.clone()).await;

    let mut stdout = std::io::stdout();

    match cli.command {
        Commands::Health => commands::run_health(&bridge, &mut stdout, cli.json).await?,
        Commands::Templates => commands::run_templates(&bridge, &mut stdout, cli.json).await?,
        Commands::Generate {
            template,
            format,
            params,
            charts,
            output,
        } => {
            let args = GenerateArgs {
                template_id: template,
                output_format: format,
                params,
                include_charts: charts,
                output,
            };
            commands::run_generate(&bridge, &args, &mut stdout, cli.json).await?;
        }
    }

    Ok(())
}

/// File settings first, then environment and command-line overrides
fn load_config(cli: &Cli) -> Result<BridgeConfig, BridgeError> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::from_file(path)?,
        None => BridgeConfig::default(),
    };

    if let Some(server) = &cli.server {
        config.server_address = server.clone();
    }
    if let Some(secs) = cli.connect_timeout {
        config.connect_timeout_secs = Some(secs);
    }
    if cli.verbose {
        config.verbose = true;
    }

    if config.server_address.trim().is_empty() {
        return Err(BridgeError::Config(
            "server address cannot be empty".to_string(),
        ));
    }

    Ok(config)
}
