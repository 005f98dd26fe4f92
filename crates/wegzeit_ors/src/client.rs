use geojson::FeatureCollection;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::profile::OrsProfile;

/// Coordinate pair in lon/lat order, as ORS expects it on the wire.
pub type OrsPoint = [f64; 2];

pub const DEFAULT_ORS_URL: &str = "http://localhost:8080/ors";

pub const ACCEPT_TYPES: &str =
    "application/json, application/geo+json, application/gpx+xml, img/png; charset=utf-8";

const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

const MATRIX_API_PATH: &str = "/v2/matrix";
const DIRECTIONS_API_PATH: &str = "/v2/directions";

#[derive(Debug, Error)]
pub enum OrsError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("matrix response is missing the durations field")]
    MissingDurations,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixRequestBody {
    /// All input coordinates; the response covers every origin/destination pair
    pub locations: Vec<OrsPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsRequestBody {
    /// Exactly origin then destination
    pub coordinates: [OrsPoint; 2],
}

#[derive(Deserialize)]
struct MatrixResponse {
    /// Travel times in seconds, `null` for unreachable pairs
    durations: Option<Vec<Vec<Option<f64>>>>,
}

pub struct OrsClientParams {
    pub base_url: String,
    pub api_key: String,
}

pub struct OrsClient {
    params: OrsClientParams,
    client: reqwest::Client,
}

impl OrsClient {
    pub fn new(params: OrsClientParams) -> Self {
        Self {
            params,
            client: reqwest::Client::new(),
        }
    }

    /// All-pairs travel times in seconds for the given points.
    pub async fn fetch_matrix<P>(
        &self,
        points: &[P],
        profile: OrsProfile,
    ) -> Result<Vec<Vec<Option<f64>>>, OrsError>
    where
        for<'a> &'a P: Into<geo_types::Point>,
    {
        let locations: Vec<OrsPoint> = points
            .iter()
            .map(|p| {
                let point: geo_types::Point = p.into();
                [point.x(), point.y()]
            })
            .collect();

        let body = MatrixRequestBody { locations };

        debug!("OrsClient: posting matrix request for {} locations", points.len());

        let response = self.post(&self.matrix_url(profile), &body).await?;
        let matrix: MatrixResponse = self.handle_response(response).await?;

        matrix.durations.ok_or(OrsError::MissingDurations)
    }

    /// Route geometry and summary for a single origin/destination pair.
    pub async fn fetch_route(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
        profile: OrsProfile,
    ) -> Result<FeatureCollection, OrsError> {
        let body = DirectionsRequestBody {
            coordinates: [
                [origin.x(), origin.y()],
                [destination.x(), destination.y()],
            ],
        };

        debug!(
            "OrsClient: posting directions request {},{} -> {},{}",
            origin.x(),
            origin.y(),
            destination.x(),
            destination.y()
        );

        let response = self.post(&self.directions_url(profile), &body).await?;
        self.handle_response(response).await
    }

    fn matrix_url(&self, profile: OrsProfile) -> String {
        format!(
            "{}{}/{}",
            self.params.base_url.trim_end_matches('/'),
            MATRIX_API_PATH,
            profile
        )
    }

    fn directions_url(&self, profile: OrsProfile) -> String {
        format!(
            "{}{}/{}/geojson",
            self.params.base_url.trim_end_matches('/'),
            DIRECTIONS_API_PATH,
            profile
        )
    }

    async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<reqwest::Response, OrsError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, self.params.api_key.as_str())
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE_JSON)
            .header(reqwest::header::ACCEPT, ACCEPT_TYPES)
            .json(body)
            .send()
            .await?;

        Ok(response)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, OrsError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            Err(OrsError::Api { status, message })
        }
    }
}
