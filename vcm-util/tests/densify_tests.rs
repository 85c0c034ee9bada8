use approx::assert_abs_diff_eq;
use ndarray::array;
use vcm_util::densify::{coverage_mask, densest_subset, DensifyError};
use vcm_util::indexed_counts::IndexedCounts;

#[test]
fn indexed_counts_bookkeeping() {
    let mut counts = IndexedCounts::new(vec![2, 1, 3, 1]);
    assert_eq!(counts.len(), 4);
    assert_eq!(counts.sum(), 7);
    assert_eq!(counts.min(), Some(1));
    assert_eq!(counts.positions_at(1), vec![1, 3]);

    let removed = counts.remove_positions(&[1, 3]);
    assert_eq!(removed, vec![1, 3]);
    assert_eq!(counts.values(), &[2, 3]);
    assert_eq!(counts.indices(), &[0, 2]);

    counts.subtract(&[1, 2]).unwrap();
    assert_eq!(counts.values(), &[1, 1]);

    // removing again keeps the original provenance
    let removed = counts.remove_positions(&[0]);
    assert_eq!(removed, vec![0]);
    assert_eq!(counts.indices(), &[2]);
}

#[test]
fn indexed_counts_underflow_is_fatal() {
    let mut counts = IndexedCounts::new(vec![1, 2]);
    let err = counts.subtract(&[2, 0]).unwrap_err();
    assert!(matches!(err, DensifyError::InvariantViolation(_)));

    let mut counts = IndexedCounts::new(vec![1, 2]);
    let err = counts.subtract(&[1]).unwrap_err();
    assert!(matches!(err, DensifyError::InvariantViolation(_)));
}

#[test]
fn coverage_mask_marks_unknowns() {
    let x = array![[1, 1, 0], [1, 0, 0]];
    let mask = coverage_mask(&x, &0);
    assert_eq!(mask, array![[true, true, false], [true, false, false]]);
}

#[test]
fn coverage_mask_treats_nan_as_missing() {
    let x = array![[1.0_f32, f32::NAN], [0.5, 2.0]];

    // NaN marker: only natively missing cells are unknown
    let mask = coverage_mask(&x, &f32::NAN);
    assert_eq!(mask, array![[true, false], [true, true]]);

    // a numeric marker hides both the marker and the NaN cell
    let mask = coverage_mask(&x, &0.5_f32);
    assert_eq!(mask, array![[true, false], [false, true]]);
}

#[test]
fn extraction_reference_scenario() {
    let x = array![[1, 1, 0], [1, 0, 0], [1, 1, 1]];
    let result = densest_subset(&x, &0, 1.0, None).unwrap();

    // row 1 is the sparsest line, then column 2 of the remainder
    assert_eq!(result.removed_rows, vec![1]);
    assert_eq!(result.removed_columns, vec![2]);
    assert_eq!(result.submatrix, array![[1, 1], [1, 1]]);

    assert_eq!(result.density_trace.len(), 2);
    assert_abs_diff_eq!(result.density_trace[0], 5.0 / 6.0, epsilon = 1e-6);
    assert_abs_diff_eq!(result.density_trace[1], 1.0, epsilon = 1e-6);

    // mask keeps the original shape
    assert_eq!(result.coverage.dim(), (3, 3));
}

#[test]
fn already_dense_input_is_untouched() {
    let x = array![[1, 2], [3, 4]];
    let result = densest_subset(&x, &0, 1.0, None).unwrap();
    assert!(result.removed_rows.is_empty());
    assert!(result.removed_columns.is_empty());
    assert!(result.density_trace.is_empty());
    assert_eq!(result.submatrix, x);
}

#[test]
fn zero_budget_means_no_deletions() {
    let x = array![[1, 1, 0], [1, 0, 0], [1, 1, 1]];
    let result = densest_subset(&x, &0, 1.0, Some(0)).unwrap();
    assert!(result.removed_rows.is_empty());
    assert!(result.removed_columns.is_empty());
    assert!(result.density_trace.is_empty());
    assert_eq!(result.submatrix, x);

    let result = densest_subset(&x, &0, 0.0, Some(0)).unwrap();
    assert_eq!(result.submatrix, x);
}

#[test]
fn budget_limits_the_number_of_steps() {
    let x = array![[1, 1, 0], [1, 0, 0], [1, 1, 1]];
    let result = densest_subset(&x, &0, 1.0, Some(1)).unwrap();
    assert_eq!(result.removed_rows, vec![1]);
    assert!(result.removed_columns.is_empty());
    assert_eq!(result.density_trace.len(), 1);
    assert_eq!(result.submatrix.dim(), (2, 3));
}

#[test]
fn ties_remove_every_minimal_line_at_once() {
    // rows 0 and 2 are tied at one known cell each
    let x = array![[1, 0, 0], [1, 1, 1], [0, 0, 1]];
    let result = densest_subset(&x, &0, 1.0, Some(1)).unwrap();
    assert_eq!(result.removed_rows, vec![0, 2]);
    assert_eq!(result.submatrix, array![[1, 1, 1]]);
}

#[test]
fn rows_win_axis_ties() {
    // rowmin == colmin == 1; the row policy must remove a row first
    let x = array![[1, 1], [1, 0]];
    let result = densest_subset(&x, &0, 1.0, Some(1)).unwrap();
    assert_eq!(result.removed_rows, vec![1]);
    assert!(result.removed_columns.is_empty());
}

#[test]
fn shape_matches_deletion_counts() {
    let x = array![
        [1, 0, 1, 0, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 0, 1],
        [1, 1, 1, 1, 1],
        [0, 1, 1, 0, 0]
    ];
    let result = densest_subset(&x, &0, 0.95, None).unwrap();
    let (r, c) = result.submatrix.dim();
    assert_eq!(r, 5 - result.removed_rows.len());
    assert_eq!(c, 5 - result.removed_columns.len());
    assert!(result.removed_rows.len() <= 5);
    assert!(result.removed_columns.len() <= 5);
}

#[test]
fn extraction_is_idempotent_at_the_target() {
    let x = array![
        [1, 0, 1, 0, 1],
        [0, 0, 0, 0, 1],
        [1, 1, 1, 0, 1],
        [1, 1, 1, 1, 1],
        [0, 1, 1, 0, 0]
    ];
    let target = 0.9;
    let first = densest_subset(&x, &0, target, None).unwrap();
    let again = densest_subset(&first.submatrix, &0, target, None).unwrap();
    assert!(again.removed_rows.is_empty());
    assert!(again.removed_columns.is_empty());
    assert_eq!(again.submatrix, first.submatrix);
}

#[test]
fn character_matrices_use_their_own_marker() {
    let x = array![['A', 'N'], ['C', 'G'], ['N', 'N']];
    let result = densest_subset(&x, &'N', 1.0, None).unwrap();
    assert_eq!(result.submatrix, array![['C', 'G']]);
}

#[test]
fn degenerate_inputs_are_rejected() {
    let all_unknown = array![[0, 0], [0, 0]];
    let err = densest_subset(&all_unknown, &0, 0.5, None).unwrap_err();
    assert!(matches!(err, DensifyError::InvalidArgument(_)));

    let x = array![[1, 0], [1, 1]];
    let err = densest_subset(&x, &0, 1.5, None).unwrap_err();
    assert!(matches!(err, DensifyError::InvalidArgument(_)));

    let empty = ndarray::Array2::<i32>::zeros((0, 3));
    let err = densest_subset(&empty, &0, 0.5, None).unwrap_err();
    assert!(matches!(err, DensifyError::InvalidArgument(_)));
}
