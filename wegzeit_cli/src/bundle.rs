use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info};
use wegzeit_core::matrix::DurationMatrix;
use wegzeit_core::route::{self, RouteBundle};
use wegzeit_core::point;
use wegzeit_ors::profile::OrsProfile;

use crate::{config, parsers};

const BUNDLE_COLLECTION_NAME: &str = "routes";

#[derive(Args)]
pub struct BundleArgs {
    /// Previously computed matrix CSV
    #[arg(short = 'i', long)]
    matrix: PathBuf,

    /// Output path for the combined route collection
    #[arg(short, long, default_value = "data/routes/matrix_as_route.geojson")]
    output: PathBuf,

    /// Routing profile
    #[arg(short, long, default_value = "driving-car", value_parser = parsers::parse_profile)]
    profile: OrsProfile,
}

pub async fn run(args: BundleArgs) -> anyhow::Result<()> {
    let matrix = DurationMatrix::read_csv(&args.matrix)?;
    let pairs = matrix.pairs();
    info!(
        "requesting {} origin/destination pairs from {}",
        pairs.len(),
        args.matrix.display()
    );

    let client = config::client_from_env()?;
    let mut bundle = RouteBundle::new();

    for pair in &pairs {
        let origin = point::parse_coord_label(pair.origin_label)?;
        let destination = point::parse_coord_label(pair.destination_label)?;

        let collection = client.fetch_route(origin, destination, args.profile).await?;
        let summary = route::extract_summary(&collection)?;

        let annotated = route::annotate_route(
            collection,
            &[
                ("origin", pair.origin_id.into()),
                ("destination", pair.destination_id.into()),
                ("distance_km", summary.distance_km.into()),
                (
                    "duration_matrix",
                    match pair.duration {
                        Some(minutes) => minutes.into(),
                        None => serde_json::Value::Null,
                    },
                ),
            ],
        );

        if !bundle.push(annotated, summary.distance_km) {
            debug!(
                "skipping route {} -> {}: distance {} km already bundled",
                pair.origin_id, pair.destination_id, summary.distance_km
            );
        }
    }

    let saved = bundle.len();
    route::write_collection(&bundle.into_collection(BUNDLE_COLLECTION_NAME), &args.output)?;

    info!("saved {} routes to {}", saved, args.output.display());

    Ok(())
}
