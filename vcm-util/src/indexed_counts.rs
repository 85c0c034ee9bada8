use crate::densify::DensifyError;

/// Per-axis counts of known cells paired with the original row or column
/// indices they belong to.
///
/// `values[p]` is the current count for original axis index `indices[p]`;
/// the two vectors have the same length at all times. Deletions keep the
/// pairing intact, so the counts survive repeated row/column removal
/// without ever rebuilding them from the full matrix.
#[derive(Debug, Clone)]
pub struct IndexedCounts {
    values: Vec<usize>,
    indices: Vec<usize>,
}

impl IndexedCounts {
    /// Start with one count per axis position, indexed `0..n`.
    pub fn new(values: Vec<usize>) -> Self {
        let indices = (0..values.len()).collect();
        IndexedCounts { values, indices }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Total count over the surviving positions.
    pub fn sum(&self) -> usize {
        self.values.iter().sum()
    }

    pub fn min(&self) -> Option<usize> {
        self.values.iter().copied().min()
    }

    pub fn values(&self) -> &[usize] {
        &self.values
    }

    /// Original axis indices of the surviving positions.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Original axis index represented at position `pos`.
    pub fn original_index(&self, pos: usize) -> usize {
        self.indices[pos]
    }

    /// Every current position holding exactly `value`. With the minimum
    /// as `value` this is the multi-hit `which_min`.
    pub fn positions_at(&self, value: usize) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v == value)
            .map(|(p, _)| p)
            .collect()
    }

    /// Drop the given positions (ascending order expected) and return the
    /// original axis indices they stood for, in the same order.
    pub fn remove_positions(&mut self, positions: &[usize]) -> Vec<usize> {
        let removed: Vec<usize> = positions.iter().map(|&p| self.indices[p]).collect();

        let mut drop = vec![false; self.values.len()];
        for &p in positions {
            drop[p] = true;
        }

        let mut p = 0;
        self.values.retain(|_| {
            let keep = !drop[p];
            p += 1;
            keep
        });
        let mut p = 0;
        self.indices.retain(|_| {
            let keep = !drop[p];
            p += 1;
            keep
        });

        removed
    }

    /// Element-wise decrement by a same-length delta vector. Underflow or
    /// a length mismatch means the caller's bookkeeping went wrong.
    pub fn subtract(&mut self, deltas: &[usize]) -> Result<(), DensifyError> {
        if deltas.len() != self.values.len() {
            return Err(DensifyError::InvariantViolation(format!(
                "subtracting {} deltas from {} counts",
                deltas.len(),
                self.values.len()
            )));
        }
        for (v, &d) in self.values.iter_mut().zip(deltas.iter()) {
            match v.checked_sub(d) {
                Some(next) => *v = next,
                None => {
                    return Err(DensifyError::InvariantViolation(format!(
                        "count underflow: subtracting {} from {}",
                        d, v
                    )))
                }
            }
        }
        Ok(())
    }
}
