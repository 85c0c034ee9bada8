use crate::indexed_counts::IndexedCounts;
use crate::traits::MissingValue;

use ndarray::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DensifyError {
    /// Bad caller input; nothing was computed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Row and column bookkeeping disagreed; a logic defect, not a
    /// recoverable condition.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

/// Outcome of a densest-submatrix extraction.
#[derive(Debug, Clone)]
pub struct DensestSubset<T> {
    /// original indices of the removed rows, in removal order
    pub removed_rows: Vec<usize>,
    /// original indices of the removed columns, in removal order
    pub removed_columns: Vec<usize>,
    /// fraction of known cells after each completed step
    pub density_trace: Vec<f32>,
    /// coverage mask over the original, unreduced matrix
    pub coverage: Array2<bool>,
    /// input matrix with the removed rows and columns dropped, remaining
    /// order preserved
    pub submatrix: Array2<T>,
}

/// Mark which cells of `matrix` carry information: a cell is unknown when
/// it is natively missing (`NaN` for floats) or equal to `unknown`.
pub fn coverage_mask<T>(matrix: &Array2<T>, unknown: &T) -> Array2<bool>
where
    T: PartialEq + MissingValue,
{
    matrix.map(|x| !x.is_missing() && x != unknown)
}

/// Iteratively strip the sparsest rows or columns of `matrix` until the
/// fraction of known cells reaches `target_density` or the step budget
/// runs out (`max_steps` of `None` means unbounded; the loop still
/// terminates because every step shrinks an axis).
///
/// Ties between the two axes go to rows: `rowmin <= colmin` removes rows.
/// The asymmetry is a fixed policy kept for reproducibility of existing
/// outputs, not a derived property. All rows or columns tied at the axis
/// minimum are removed within the same step.
pub fn densest_subset<T>(
    matrix: &Array2<T>,
    unknown: &T,
    target_density: f32,
    max_steps: Option<usize>,
) -> Result<DensestSubset<T>, DensifyError>
where
    T: Clone + PartialEq + MissingValue,
{
    let (nrow, ncol) = matrix.dim();
    if nrow == 0 || ncol == 0 {
        return Err(DensifyError::InvalidArgument(format!(
            "empty matrix: {} x {}",
            nrow, ncol
        )));
    }
    if !(0.0..=1.0).contains(&target_density) {
        return Err(DensifyError::InvalidArgument(format!(
            "target density {} outside [0, 1]",
            target_density
        )));
    }

    let coverage = coverage_mask(matrix, unknown);

    let row_counts: Vec<usize> = coverage
        .rows()
        .into_iter()
        .map(|lane| lane.iter().filter(|&&known| known).count())
        .collect();
    let col_counts: Vec<usize> = coverage
        .columns()
        .into_iter()
        .map(|lane| lane.iter().filter(|&&known| known).count())
        .collect();

    let mut rowsums = IndexedCounts::new(row_counts);
    let mut colsums = IndexedCounts::new(col_counts);

    if rowsums.sum() == 0 {
        return Err(DensifyError::InvalidArgument(
            "every cell is unknown".to_string(),
        ));
    }

    let density = |rows: &IndexedCounts, cols: &IndexedCounts| {
        rows.sum() as f32 / (rows.len() * cols.len()) as f32
    };

    let mut removed_rows = Vec::new();
    let mut removed_columns = Vec::new();
    let mut density_trace = Vec::new();

    if density(&rowsums, &colsums) < target_density {
        let mut step = 0;
        loop {
            if max_steps.is_some_and(|budget| step >= budget) {
                break;
            }

            // both axes are non-empty between steps
            let rowmin = rowsums.min().expect("rows exhausted");
            let colmin = colsums.min().expect("columns exhausted");

            if rowmin <= colmin {
                let positions = rowsums.positions_at(rowmin);
                let dropped: Vec<usize> = positions
                    .iter()
                    .map(|&p| rowsums.original_index(p))
                    .collect();
                let deltas: Vec<usize> = colsums
                    .indices()
                    .iter()
                    .map(|&j| dropped.iter().filter(|&&i| coverage[(i, j)]).count())
                    .collect();
                colsums.subtract(&deltas)?;
                removed_rows.extend(rowsums.remove_positions(&positions));
            } else {
                let positions = colsums.positions_at(colmin);
                let dropped: Vec<usize> = positions
                    .iter()
                    .map(|&p| colsums.original_index(p))
                    .collect();
                let deltas: Vec<usize> = rowsums
                    .indices()
                    .iter()
                    .map(|&i| dropped.iter().filter(|&&j| coverage[(i, j)]).count())
                    .collect();
                rowsums.subtract(&deltas)?;
                removed_columns.extend(colsums.remove_positions(&positions));
            }
            step += 1;

            let known_by_rows = rowsums.sum();
            let known_by_cols = colsums.sum();
            if known_by_rows != known_by_cols {
                return Err(DensifyError::InvariantViolation(format!(
                    "known cells counted by rows ({}) and by columns ({}) disagree",
                    known_by_rows, known_by_cols
                )));
            }

            if rowsums.is_empty() || colsums.is_empty() {
                break;
            }

            let current = density(&rowsums, &colsums);
            density_trace.push(current);
            if current >= target_density {
                break;
            }
        }
    }

    let keep_rows = keep_indices(nrow, &removed_rows);
    let keep_cols = keep_indices(ncol, &removed_columns);
    let submatrix = matrix
        .select(Axis(0), &keep_rows)
        .select(Axis(1), &keep_cols);

    Ok(DensestSubset {
        removed_rows,
        removed_columns,
        density_trace,
        coverage,
        submatrix,
    })
}

/// Axis indices of `0..n` that are not in `removed`, ascending.
pub fn keep_indices(n: usize, removed: &[usize]) -> Vec<usize> {
    let mut drop = vec![false; n];
    for &i in removed {
        drop[i] = true;
    }
    (0..n).filter(|&i| !drop[i]).collect()
}
