use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;
use todolists::Command;
use todolists::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "todolists", about = "In-memory todo list server and terminal client")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();
    let command = args.command.unwrap_or_default();

    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    match &command {
        // The server owns no terminal UI, so it logs straight to it
        Command::Serve { .. } => {
            let _ = TermLogger::init(
                LevelFilter::Info,
                log_config,
                TerminalMode::Mixed,
                ColorChoice::Auto,
            );
        }
        // Initialize file logger - writes to todolists.log in current directory
        Command::Ui { .. } => {
            if let Ok(log_file) = File::create("todolists.log") {
                let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
            }
        }
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        Default::default()
    });

    let cli = match &command {
        Command::Serve {
            host,
            port,
            no_seed,
        } => CliOverrides {
            host: host.clone(),
            port: *port,
            no_seed: *no_seed,
            api_url: None,
        },
        Command::Ui { api_url } => CliOverrides {
            api_url: api_url.clone(),
            ..Default::default()
        },
    };
    let resolved = config::resolve(&file_config, &cli);
    log::info!("todolists starting up: {:?}", command);

    match command {
        Command::Serve { .. } => todolists::server::run(resolved).await,
        Command::Ui { .. } => todolists::tui::run(resolved),
    }
}
