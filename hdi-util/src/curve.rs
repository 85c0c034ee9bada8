use crate::{HdiError, Interval};

/// Highest density interval from a discretized density curve.
///
/// `x` is the ascending support grid and `y` the matching non-negative
/// density values. The search assumes a unimodal curve; on multimodal
/// input the reported interval may span low-density valleys between the
/// modes. Note the tie-break differs from the sample form: tied left
/// edges forming one run are centered by averaging their coordinates,
/// scattered ties keep the leftmost pair.
pub fn hdi_from_density(x: &[f32], y: &[f32], alpha: f32) -> Result<Interval, HdiError> {
    if !(0.0 < alpha && alpha < 1.0) {
        return Err(HdiError::InvalidArgument(format!(
            "alpha {} outside (0, 1)",
            alpha
        )));
    }
    if x.len() != y.len() {
        return Err(HdiError::InvalidArgument(format!(
            "support has {} points, density has {}",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(HdiError::InvalidArgument("empty density curve".to_string()));
    }
    if x.windows(2).any(|w| w[0] > w[1]) {
        return Err(HdiError::InvalidArgument(
            "support grid is not ascending".to_string(),
        ));
    }
    if y.iter().any(|&v| v < 0.0) {
        return Err(HdiError::InvalidArgument(
            "negative density values".to_string(),
        ));
    }

    let total: f64 = y.iter().map(|&v| v as f64).sum();
    if total <= 0.0 {
        return Err(HdiError::InvalidArgument(
            "density sums to zero".to_string(),
        ));
    }

    let mut cumul = Vec::with_capacity(y.len());
    let mut acc = 0.0_f64;
    for &v in y {
        acc += v as f64;
        cumul.push(acc / total);
    }

    let alpha = alpha as f64;
    let mass = 1.0 - alpha;

    // pair each candidate left edge with the tightest right edge spanning
    // at least the requested mass
    let mut best: Vec<(usize, usize)> = Vec::new();
    let mut best_span = usize::MAX;
    for i in 0..cumul.len() {
        if cumul[i] >= alpha {
            continue;
        }
        let bound = cumul[i] + mass;
        let j = cumul.partition_point(|&c| c <= bound);
        if j >= cumul.len() {
            continue;
        }
        let span = j - i;
        if span < best_span {
            best_span = span;
            best.clear();
        }
        if span == best_span {
            best.push((i, j));
        }
    }

    if best.is_empty() {
        return Err(HdiError::InvalidArgument(format!(
            "alpha {} below the first cumulative mass point, no valid left edge on this grid",
            alpha
        )));
    }

    let (i0, j0) = best[0];
    let run = best[best.len() - 1].0 - i0 + 1 == best.len();
    if best.len() > 1 && run {
        let lower = best.iter().map(|&(i, _)| x[i] as f64).sum::<f64>() / best.len() as f64;
        let upper = best.iter().map(|&(_, j)| x[j] as f64).sum::<f64>() / best.len() as f64;
        Ok(Interval {
            lower: lower as f32,
            upper: upper as f32,
        })
    } else {
        Ok(Interval {
            lower: x[i0],
            upper: x[j0],
        })
    }
}
