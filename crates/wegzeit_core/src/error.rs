use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("feature {index} is not a point geometry")]
    NotAPoint { index: usize },

    #[error("feature {index} is missing the '{attribute}' attribute")]
    MissingAttribute { index: usize, attribute: String },

    #[error("no feature matches identifier '{0}'")]
    UnknownId(String),

    #[error("malformed coordinate label '{0}', expected 'lat,lon'")]
    BadCoordLabel(String),

    #[error("directions response contains no features")]
    EmptyRoute,

    #[error("directions response has no usable summary")]
    MissingSummary,
}

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("expected {expected} duration rows, got {got}")]
    RowCount { expected: usize, got: usize },

    #[error("duration row {row} has {got} cells, expected {expected}")]
    CellCount {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("matrix file is missing its two header rows")]
    MissingHeaders,

    #[error("unparsable duration cell '{0}'")]
    BadCell(String),
}
