//! todolists library exports for testing

use clap::Subcommand;

pub mod api;
pub mod core;
pub mod server;
pub mod tui;

#[cfg(test)]
pub mod test_support;

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Run the REST server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Start with an empty store instead of the example lists
        #[arg(long)]
        no_seed: bool,
    },
    /// Open the terminal UI (default)
    Ui {
        /// Base URL of the REST API
        #[arg(long)]
        api_url: Option<String>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Ui { api_url: None }
    }
}
