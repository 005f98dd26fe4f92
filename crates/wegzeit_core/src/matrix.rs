use std::path::Path;

use tracing::debug;

use crate::error::MatrixError;
use crate::point::LabeledPoint;

/// Literal written for unreachable pairs.
pub const UNREACHABLE: &str = "N/A";

/// All-pairs travel times in minutes, positionally aligned with the points
/// of the source file. `None` marks an unreachable pair.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationMatrix {
    pub origin_labels: Vec<String>,
    pub origin_ids: Vec<String>,
    pub destination_labels: Vec<String>,
    pub destination_ids: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

/// One off-diagonal origin/destination pair of a stored matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixPair<'a> {
    pub origin_label: &'a str,
    pub origin_id: &'a str,
    pub destination_label: &'a str,
    pub destination_id: &'a str,
    /// Minutes carried from the matrix, not recomputed
    pub duration: Option<f64>,
}

pub fn seconds_to_minutes(seconds: f64) -> f64 {
    (seconds / 60.0 * 100.0).round() / 100.0
}

impl DurationMatrix {
    /// Builds the minutes matrix from an ORS seconds matrix, validating that
    /// the response shape matches the request's point count.
    pub fn from_seconds(
        points: &[LabeledPoint],
        durations: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, MatrixError> {
        if durations.len() != points.len() {
            return Err(MatrixError::RowCount {
                expected: points.len(),
                got: durations.len(),
            });
        }

        let mut cells = Vec::with_capacity(durations.len());
        for (row, seconds) in durations.into_iter().enumerate() {
            if seconds.len() != points.len() {
                return Err(MatrixError::CellCount {
                    row,
                    expected: points.len(),
                    got: seconds.len(),
                });
            }
            cells.push(
                seconds
                    .into_iter()
                    .map(|cell| cell.map(seconds_to_minutes))
                    .collect(),
            );
        }

        let labels: Vec<String> = points.iter().map(LabeledPoint::coord_label).collect();
        let ids: Vec<String> = points.iter().map(|point| point.id.clone()).collect();

        Ok(Self {
            origin_labels: labels.clone(),
            origin_ids: ids.clone(),
            destination_labels: labels,
            destination_ids: ids,
            cells,
        })
    }

    /// Off-diagonal origin/destination pairs in row-major order.
    pub fn pairs(&self) -> Vec<MatrixPair<'_>> {
        let mut pairs = Vec::new();

        for i in 0..self.origin_ids.len() {
            for j in 0..self.destination_ids.len() {
                if i == j {
                    continue;
                }
                pairs.push(MatrixPair {
                    origin_label: &self.origin_labels[i],
                    origin_id: &self.origin_ids[i],
                    destination_label: &self.destination_labels[j],
                    destination_id: &self.destination_ids[j],
                    duration: self
                        .cells
                        .get(i)
                        .and_then(|row| row.get(j))
                        .copied()
                        .flatten(),
                });
            }
        }

        pairs
    }

    /// Layout: row 0 destination coordinate labels, row 1 destination ids,
    /// then one row per origin with its label, id, and duration cells.
    pub fn write_csv(&self, path: &Path) -> Result<(), MatrixError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut writer = csv::Writer::from_path(path)?;

        let mut coord_row = vec!["From/To".to_string(), String::new()];
        coord_row.extend(self.destination_labels.iter().cloned());
        writer.write_record(&coord_row)?;

        let mut id_row = vec![String::new(), String::new()];
        id_row.extend(self.destination_ids.iter().cloned());
        writer.write_record(&id_row)?;

        for (i, row) in self.cells.iter().enumerate() {
            let mut record = vec![self.origin_labels[i].clone(), self.origin_ids[i].clone()];
            record.extend(row.iter().map(|cell| render_cell(*cell)));
            writer.write_record(&record)?;
        }

        writer.flush()?;

        Ok(())
    }

    pub fn read_csv(path: &Path) -> Result<Self, MatrixError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;
        let mut records = reader.records();

        let coord_row = records.next().ok_or(MatrixError::MissingHeaders)??;
        let id_row = records.next().ok_or(MatrixError::MissingHeaders)??;

        let destination_labels: Vec<String> = coord_row.iter().skip(2).map(str::to_string).collect();
        let destination_ids: Vec<String> = id_row.iter().skip(2).map(str::to_string).collect();

        let mut origin_labels = Vec::new();
        let mut origin_ids = Vec::new();
        let mut cells = Vec::new();

        for record in records {
            let record = record?;
            origin_labels.push(record.get(0).unwrap_or_default().to_string());
            origin_ids.push(record.get(1).unwrap_or_default().to_string());
            cells.push(
                record
                    .iter()
                    .skip(2)
                    .map(parse_cell)
                    .collect::<Result<Vec<_>, _>>()?,
            );
        }

        debug!(
            "parsed matrix with {} origins and {} destinations",
            origin_ids.len(),
            destination_ids.len()
        );

        Ok(Self {
            origin_labels,
            origin_ids,
            destination_labels,
            destination_ids,
            cells,
        })
    }
}

fn render_cell(cell: Option<f64>) -> String {
    match cell {
        Some(minutes) => minutes.to_string(),
        None => UNREACHABLE.to_string(),
    }
}

fn parse_cell(field: &str) -> Result<Option<f64>, MatrixError> {
    if field == UNREACHABLE {
        return Ok(None);
    }

    field
        .trim()
        .parse()
        .map(Some)
        .map_err(|_| MatrixError::BadCell(field.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_points() -> Vec<LabeledPoint> {
        vec![
            LabeledPoint::new("8002", 8.54, 47.37),
            LabeledPoint::new("3006", 7.44, 46.95),
        ]
    }

    #[test]
    fn from_seconds_converts_to_minutes() {
        let matrix = DurationMatrix::from_seconds(
            &two_points(),
            vec![vec![Some(0.0), Some(120.0)], vec![Some(180.0), Some(0.0)]],
        )
        .unwrap();

        assert_eq!(
            matrix.cells,
            vec![vec![Some(0.0), Some(2.0)], vec![Some(3.0), Some(0.0)]]
        );
    }

    #[test]
    fn from_seconds_rounds_to_two_decimals() {
        assert_eq!(seconds_to_minutes(125.0), 2.08);
        assert_eq!(seconds_to_minutes(1.0), 0.02);
    }

    #[test]
    fn from_seconds_keeps_unreachable_cells() {
        let matrix = DurationMatrix::from_seconds(
            &two_points(),
            vec![vec![Some(0.0), None], vec![None, Some(0.0)]],
        )
        .unwrap();

        assert_eq!(matrix.cells[0][1], None);
        assert_eq!(matrix.cells[1][0], None);
    }

    #[test]
    fn from_seconds_rejects_row_count_mismatch() {
        let err =
            DurationMatrix::from_seconds(&two_points(), vec![vec![Some(0.0), Some(1.0)]])
                .unwrap_err();

        assert!(matches!(err, MatrixError::RowCount { expected: 2, got: 1 }));
    }

    #[test]
    fn from_seconds_rejects_cell_count_mismatch() {
        let err = DurationMatrix::from_seconds(
            &two_points(),
            vec![vec![Some(0.0)], vec![Some(1.0), Some(0.0)]],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            MatrixError::CellCount {
                row: 0,
                expected: 2,
                got: 1
            }
        ));
    }

    #[test]
    fn csv_layout_has_two_header_rows_and_aligned_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        let matrix = DurationMatrix::from_seconds(
            &two_points(),
            vec![vec![Some(0.0), Some(120.0)], vec![None, Some(0.0)]],
        )
        .unwrap();

        matrix.write_csv(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let rows: Vec<&str> = content.lines().collect();

        // points + 2 rows
        assert_eq!(rows.len(), 4);

        // points + 2 columns in every row
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        for record in reader.records() {
            assert_eq!(record.unwrap().len(), 4);
        }

        assert_eq!(rows[0], "From/To,,\"47.37,8.54\",\"46.95,7.44\"");
        assert_eq!(rows[1], ",,8002,3006");
        assert_eq!(rows[2], "\"47.37,8.54\",8002,0,2");
        assert_eq!(rows[3], "\"46.95,7.44\",3006,N/A,0");
    }

    #[test]
    fn zero_is_written_as_a_number_not_the_sentinel() {
        assert_eq!(render_cell(Some(0.0)), "0");
        assert_eq!(render_cell(None), UNREACHABLE);
    }

    #[test]
    fn read_csv_is_the_inverse_of_write_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        let matrix = DurationMatrix::from_seconds(
            &two_points(),
            vec![vec![Some(0.0), Some(125.0)], vec![None, Some(0.0)]],
        )
        .unwrap();

        matrix.write_csv(&path).unwrap();
        let reread = DurationMatrix::read_csv(&path).unwrap();

        assert_eq!(reread, matrix);
    }

    #[test]
    fn read_csv_rejects_truncated_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matrix.csv");
        std::fs::write(&path, "From/To,,\"47.37,8.54\"\n").unwrap();

        let err = DurationMatrix::read_csv(&path).unwrap_err();

        assert!(matches!(err, MatrixError::MissingHeaders));
    }

    #[test]
    fn pairs_skip_the_diagonal() {
        let points = vec![
            LabeledPoint::new("a", 1.0, 1.0),
            LabeledPoint::new("b", 2.0, 2.0),
            LabeledPoint::new("c", 3.0, 3.0),
        ];
        let matrix = DurationMatrix::from_seconds(
            &points,
            vec![
                vec![Some(0.0), Some(60.0), Some(120.0)],
                vec![Some(60.0), Some(0.0), None],
                vec![Some(120.0), None, Some(0.0)],
            ],
        )
        .unwrap();

        let pairs = matrix.pairs();

        // n^2 - n requests for an n x n matrix
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|pair| pair.origin_id != pair.destination_id));
        assert_eq!(pairs[0].origin_id, "a");
        assert_eq!(pairs[0].destination_id, "b");
        assert_eq!(pairs[0].duration, Some(1.0));
        assert_eq!(pairs[3].origin_id, "b");
        assert_eq!(pairs[3].destination_id, "c");
        assert_eq!(pairs[3].duration, None);
    }
}
