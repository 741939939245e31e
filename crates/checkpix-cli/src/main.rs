mod commands;
mod logging;
mod output;
mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "checkpix",
    version,
    about = "Check Pix receipts against bank statements and report the result"
)]
struct Cli {
    /// Configuration file (TOML). Defaults to ./checkpix.toml when present
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Validation service URL (overrides configuration)
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides configuration)
    #[arg(long, global = true, value_name = "SECS")]
    timeout: Option<u64>,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send receipts and statements to the validation service
    Submit {
        /// Receipt file (repeat for several receipts)
        #[arg(short = 'c', long = "comprovante", value_name = "FILE")]
        comprovantes: Vec<PathBuf>,

        /// Corpx statement
        #[arg(long, value_name = "FILE")]
        corpx: Option<PathBuf>,

        /// Itaú statement
        #[arg(long, value_name = "FILE")]
        itau: Option<PathBuf>,

        /// Digital statement
        #[arg(long, value_name = "FILE")]
        digital: Option<PathBuf>,

        /// Generic statement
        #[arg(long, value_name = "FILE")]
        generico: Option<PathBuf>,

        /// Refuse to submit unless all four statements are given
        #[arg(long)]
        strict_sources: bool,

        /// Save the service response as JSON for later `view`/`export`
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        /// Also write the report document to FILE
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Show a saved response
    View {
        /// Response JSON saved by `submit --save`
        response_file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        output: String,
    },
    /// Write the report document for a saved response
    Export {
        /// Response JSON saved by `submit --save`
        response_file: PathBuf,

        /// Output file (defaults to the configured report file)
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = settings::load(cli.config.as_deref()).and_then(|mut settings| {
        if let Some(endpoint) = cli.endpoint {
            settings.endpoint = endpoint;
        }
        if let Some(timeout) = cli.timeout {
            settings.timeout_secs = timeout;
        }
        tracing::debug!(?settings, "configuration loaded");

        match cli.command {
            Commands::Submit {
                comprovantes,
                corpx,
                itau,
                digital,
                generico,
                strict_sources,
                save,
                report,
                output,
            } => commands::submit::run(
                &settings,
                commands::submit::Selection {
                    comprovantes,
                    corpx,
                    itau,
                    digital,
                    generico,
                    strict_sources,
                },
                save,
                report,
                &output,
            ),
            Commands::View {
                response_file,
                output,
            } => commands::view::run(&response_file, &output),
            Commands::Export { response_file, out } => {
                commands::export::run(&settings, &response_file, out)
            }
        }
    });

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
