use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use geojson::{Feature, FeatureCollection, JsonObject, JsonValue};

use crate::error::GeoError;

/// Per-segment detail the directions endpoint attaches; none of it is
/// carried into the output files.
const DROPPED_PROPERTIES: [&str; 3] = ["segments", "way_points", "summary"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub duration_min: f64,
    pub distance_km: f64,
}

/// Reads duration and distance from the first feature's summary object.
pub fn extract_summary(collection: &FeatureCollection) -> Result<RouteSummary, GeoError> {
    let feature = collection.features.first().ok_or(GeoError::EmptyRoute)?;
    let summary = feature.property("summary").ok_or(GeoError::MissingSummary)?;

    let duration = summary
        .get("duration")
        .and_then(JsonValue::as_f64)
        .ok_or(GeoError::MissingSummary)?;
    let distance = summary
        .get("distance")
        .and_then(JsonValue::as_f64)
        .ok_or(GeoError::MissingSummary)?;

    Ok(RouteSummary {
        duration_min: duration / 60.0,
        distance_km: distance / 1000.0,
    })
}

/// Strips the per-segment detail from every feature and tags each one with
/// the given properties.
pub fn annotate_route(
    mut collection: FeatureCollection,
    properties: &[(&str, JsonValue)],
) -> FeatureCollection {
    for feature in &mut collection.features {
        for name in DROPPED_PROPERTIES {
            feature.remove_property(name);
        }
        for (name, value) in properties {
            feature.set_property(*name, value.clone());
        }
    }

    collection
}

/// Accumulates per-pair route features; a route whose distance was already
/// recorded is dropped (first occurrence wins).
#[derive(Debug, Default)]
pub struct RouteBundle {
    features: Vec<Feature>,
    seen_distances: HashSet<u64>,
}

impl RouteBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the collection's features were kept.
    pub fn push(&mut self, collection: FeatureCollection, distance_km: f64) -> bool {
        if !self.seen_distances.insert(distance_km.to_bits()) {
            return false;
        }

        self.features.extend(collection.features);
        true
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn into_collection(self, name: &str) -> FeatureCollection {
        let mut foreign_members = JsonObject::new();
        foreign_members.insert("name".to_string(), JsonValue::String(name.to_string()));

        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: Some(foreign_members),
        }
    }
}

pub fn write_collection(collection: &FeatureCollection, path: &Path) -> Result<(), GeoError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer(&mut writer, collection)?;
    writer.flush()?;

    Ok(())
}
