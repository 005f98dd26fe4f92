use std::path::PathBuf;

use clap::Args;
use tracing::info;
use wegzeit_core::matrix::DurationMatrix;
use wegzeit_core::point;
use wegzeit_ors::profile::OrsProfile;

use crate::{config, parsers};

#[derive(Args)]
pub struct MatrixArgs {
    /// GeoJSON point file with one feature per location
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Output CSV path (default: data/matrices/durations_in_minutes_<date>.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Feature attribute used to label points (e.g. ZIP4, bfs_nummer)
    #[arg(short, long)]
    attribute: String,

    /// Routing profile
    #[arg(short, long, default_value = "driving-car", value_parser = parsers::parse_profile)]
    profile: OrsProfile,
}

fn default_output_path() -> PathBuf {
    let date = jiff::Zoned::now().strftime("%Y-%m-%d");
    PathBuf::from(format!("data/matrices/durations_in_minutes_{date}.csv"))
}

pub async fn run(args: MatrixArgs) -> anyhow::Result<()> {
    let points = point::load_points(&args.input, &args.attribute)?;
    info!("loaded {} points from {}", points.len(), args.input.display());

    let client = config::client_from_env()?;
    let durations = client.fetch_matrix(&points, args.profile).await?;

    let matrix = DurationMatrix::from_seconds(&points, durations)?;
    let output = args.output.unwrap_or_else(default_output_path);
    matrix.write_csv(&output)?;

    info!("duration matrix saved to {}", output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_output_is_dated() {
        let path = default_output_path();
        let name = path.file_name().unwrap().to_str().unwrap();

        assert!(name.starts_with("durations_in_minutes_"));
        assert!(name.ends_with(".csv"));
        // YYYY-MM-DD between prefix and extension
        assert_eq!(name.len(), "durations_in_minutes_.csv".len() + 10);
    }
}
