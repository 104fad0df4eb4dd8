use anyhow::Context;
use clap::{Parser, Subcommand};
use libris_kernel::settings::Settings;

/// Libris book catalog service
#[derive(Debug, Parser)]
#[command(name = "libris", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved settings as JSON
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::load().with_context(|| "failed to load Libris settings")?;

    match cli.command {
        Command::Config => {
            let rendered =
                serde_json::to_string_pretty(&settings).context("failed to render settings")?;
            println!("{rendered}");
            Ok(())
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }

            libris_telemetry::init(&settings.telemetry)?;
            tracing::info!(env = ?settings.environment, "libris CLI serving");

            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(libris_app::run(settings))
        }
    }
}
