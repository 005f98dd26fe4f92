use clap::{Parser, Subcommand};
use tracing::Level;

mod bundle;
mod config;
mod matrix;
mod parsers;
mod route;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the all-pairs travel-time matrix for a point file
    Matrix {
        #[command(flatten)]
        args: matrix::MatrixArgs,
    },
    /// Fetch a single origin/destination route geometry
    Route {
        #[command(flatten)]
        args: route::RouteArgs,
    },
    /// Re-request every off-diagonal pair of a stored matrix as one route collection
    Bundle {
        #[command(flatten)]
        args: bundle::BundleArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    match cli.command {
        Commands::Matrix { args } => matrix::run(args).await?,
        Commands::Route { args } => route::run(args).await?,
        Commands::Bundle { args } => bundle::run(args).await?,
    }

    Ok(())
}
