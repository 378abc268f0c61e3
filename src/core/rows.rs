use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::types::{MISSING_SAMPLE, UnitMode};
use crate::error::{ChartError, ChartResult};

/// One cell of the matrix; `None` is a missing measurement.
pub type Sample = Option<f64>;

/// Series-major matrix of samples: one row per series, one column per category.
///
/// Rows are appended one at a time and must all have the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesMatrix {
    unit_mode: UnitMode,
    rows: Vec<Vec<Sample>>,
}

impl SeriesMatrix {
    #[must_use]
    pub fn new(unit_mode: UnitMode) -> Self {
        Self {
            unit_mode,
            rows: Vec::new(),
        }
    }

    /// Appends one series.
    ///
    /// The sentinel [`MISSING_SAMPLE`] becomes a missing cell; every other value
    /// is converted with the unit mode's ingest factor.
    pub fn append_row(&mut self, values: &[f64]) -> ChartResult<()> {
        if values.is_empty() {
            return Err(ChartError::InvalidData("row must not be empty".to_owned()));
        }
        if let Some(first) = self.rows.first() {
            if first.len() != values.len() {
                warn!(
                    row = self.rows.len(),
                    expected = first.len(),
                    found = values.len(),
                    "rejecting ragged row"
                );
                return Err(ChartError::RaggedRow {
                    row: self.rows.len(),
                    expected: first.len(),
                    found: values.len(),
                });
            }
        }
        if values.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(
                "row samples must be finite".to_owned(),
            ));
        }

        let factor = self.unit_mode.ingest_factor();
        let row: Vec<Sample> = values
            .iter()
            .map(|&value| (value != MISSING_SAMPLE).then_some(value * factor))
            .collect();
        trace!(
            row = self.rows.len(),
            samples = row.len(),
            missing = row.iter().filter(|s| s.is_none()).count(),
            "append row"
        );
        self.rows.push(row);
        Ok(())
    }

    #[must_use]
    pub fn unit_mode(&self) -> UnitMode {
        self.unit_mode
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of series.
    #[must_use]
    pub fn series_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of categories per series.
    #[must_use]
    pub fn sample_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Number of bar slots in the plot: one per cell.
    #[must_use]
    pub fn total_columns(&self) -> usize {
        self.series_count() * self.sample_count()
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Sample>] {
        &self.rows
    }

    #[must_use]
    pub fn get(&self, series: usize, category: usize) -> Sample {
        self.rows
            .get(series)
            .and_then(|row| row.get(category))
            .copied()
            .flatten()
    }

    /// Present samples in series-major, left-to-right order.
    pub fn present_samples(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().flatten().filter_map(|sample| *sample)
    }

    /// Mutable access to present samples in scan order.
    pub(crate) fn present_samples_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        self.rows.iter_mut().flatten().filter_map(Option::as_mut)
    }

    /// Returns a copy with `offset` subtracted from every present sample.
    #[must_use]
    pub fn shifted(&self, offset: f64) -> Self {
        let mut shifted = self.clone();
        if offset != 0.0 {
            for value in shifted.present_samples_mut() {
                *value -= offset;
            }
        }
        shifted
    }
}
