use std::path::Path;

use geo_types::Point;
use geojson::{FeatureCollection, GeoJson, Value};
use tracing::debug;

use crate::error::GeoError;

/// A point location with the identifier attribute chosen at load time
/// (ZIP code, municipality number, name).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoint {
    pub id: String,
    pub point: Point,
}

impl LabeledPoint {
    pub fn new(id: impl Into<String>, lng: f64, lat: f64) -> Self {
        Self {
            id: id.into(),
            point: Point::new(lng, lat),
        }
    }

    /// Label in "lat,lon" order, as stored in the matrix CSV headers.
    pub fn coord_label(&self) -> String {
        format!("{},{}", self.point.y(), self.point.x())
    }
}

impl From<&LabeledPoint> for Point {
    fn from(labeled: &LabeledPoint) -> Self {
        labeled.point
    }
}

/// Reconstructs a lon/lat point from a stored "lat,lon" label.
pub fn parse_coord_label(label: &str) -> Result<Point, GeoError> {
    let bad_label = || GeoError::BadCoordLabel(label.to_string());

    let (lat, lng) = label.split_once(',').ok_or_else(bad_label)?;
    let lat: f64 = lat.trim().parse().map_err(|_| bad_label())?;
    let lng: f64 = lng.trim().parse().map_err(|_| bad_label())?;

    Ok(Point::new(lng, lat))
}

/// Loads all features of a GeoJSON point file, labeling each by `attribute`.
/// Fails before returning anything if a feature is not a point geometry.
pub fn load_points(path: &Path, attribute: &str) -> Result<Vec<LabeledPoint>, GeoError> {
    let content = std::fs::read_to_string(path)?;
    let geojson: GeoJson = content.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;

    debug!(
        "read {} features from {}",
        collection.features.len(),
        path.display()
    );

    points_from_features(&collection, attribute)
}

pub fn points_from_features(
    collection: &FeatureCollection,
    attribute: &str,
) -> Result<Vec<LabeledPoint>, GeoError> {
    let mut points = Vec::with_capacity(collection.features.len());

    for (index, feature) in collection.features.iter().enumerate() {
        let geometry = feature
            .geometry
            .as_ref()
            .ok_or(GeoError::NotAPoint { index })?;

        let Value::Point(coords) = &geometry.value else {
            return Err(GeoError::NotAPoint { index });
        };
        if coords.len() < 2 {
            return Err(GeoError::NotAPoint { index });
        }

        let id = feature
            .property(attribute)
            .map(property_as_string)
            .ok_or_else(|| GeoError::MissingAttribute {
                index,
                attribute: attribute.to_string(),
            })?;

        points.push(LabeledPoint::new(id, coords[0], coords[1]));
    }

    Ok(points)
}

pub fn find_point<'a>(points: &'a [LabeledPoint], id: &str) -> Result<&'a LabeledPoint, GeoError> {
    points
        .iter()
        .find(|point| point.id == id)
        .ok_or_else(|| GeoError::UnknownId(id.to_string()))
}

// Identifier attributes are often numeric (ZIP codes); keep string values
// as-is and stringify everything else.
fn property_as_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
