use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use wellspring_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "wellspring", version, about = "Wellspring goal tracker")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Goal management and daily check-off
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

/// Log filter from `WELLSPRING_LOG`, else the configured level.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("WELLSPRING_LOG").unwrap_or_else(|_| {
        let level = Config::load_or_default().logging.level;
        EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
