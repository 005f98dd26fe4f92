use std::path::PathBuf;

use clap::Args;
use tracing::info;
use wegzeit_core::{point, route};
use wegzeit_ors::profile::OrsProfile;

use crate::{config, parsers};

#[derive(Args)]
pub struct RouteArgs {
    /// GeoJSON point file with one feature per location
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Origin identifier (value of the label attribute)
    #[arg(long)]
    origin: String,

    /// Destination identifier (value of the label attribute)
    #[arg(long)]
    destination: String,

    /// Feature attribute used to label points (e.g. ZIP4, bfs_nummer)
    #[arg(short, long)]
    attribute: String,

    /// Routing profile
    #[arg(short, long, default_value = "driving-car", value_parser = parsers::parse_profile)]
    profile: OrsProfile,

    /// Output path (default: data/id_<origin>_to_<destination>.geojson)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub async fn run(args: RouteArgs) -> anyhow::Result<()> {
    let points = point::load_points(&args.input, &args.attribute)?;
    let origin = point::find_point(&points, &args.origin)?.point;
    let destination = point::find_point(&points, &args.destination)?.point;

    let client = config::client_from_env()?;
    let collection = client.fetch_route(origin, destination, args.profile).await?;

    let summary = route::extract_summary(&collection)?;
    let annotated = route::annotate_route(
        collection,
        &[
            ("duration_min", summary.duration_min.into()),
            ("distance_km", summary.distance_km.into()),
        ],
    );

    let output = args.output.unwrap_or_else(|| {
        PathBuf::from(format!(
            "data/id_{}_to_{}.geojson",
            args.origin, args.destination
        ))
    });
    route::write_collection(&annotated, &output)?;

    info!("route saved to {}", output.display());

    Ok(())
}
