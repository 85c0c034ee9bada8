use crate::{HdiError, Interval};

/// Highest density interval of raw observations, leaving probability mass
/// `alpha` outside. Identical to [`hdi_with_size`] with `size = 1 - alpha`.
pub fn hdi_from_samples(samples: &[f32], alpha: f32) -> Result<Interval, HdiError> {
    if !(0.0 < alpha && alpha < 1.0) {
        return Err(HdiError::InvalidArgument(format!(
            "alpha {} outside (0, 1)",
            alpha
        )));
    }
    hdi_with_size(samples, 1.0 - alpha)
}

/// Shortest window over the sorted observations covering a `size` fraction
/// of them.
///
/// The window holds `ceil(size * n)` points. When several windows tie for
/// the minimal width and their offsets form one consecutive run, the
/// middle offset (floor of the mean) wins; scattered ties keep the lowest
/// offset.
pub fn hdi_with_size(samples: &[f32], size: f32) -> Result<Interval, HdiError> {
    if !(0.0 < size && size < 1.0) {
        return Err(HdiError::InvalidArgument(format!(
            "size {} outside (0, 1)",
            size
        )));
    }

    let n = samples.len();
    let window = (size * n as f32).ceil() as usize;
    if window < 2 || n - window < 1 {
        return Err(HdiError::InsufficientData { window, n });
    }

    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f32::total_cmp);

    let widths: Vec<f32> = (0..n - window)
        .map(|i| sorted[i + window] - sorted[i])
        .collect();
    let best = widths.iter().copied().fold(f32::INFINITY, f32::min);
    let tied: Vec<usize> = widths
        .iter()
        .enumerate()
        .filter(|&(_, &w)| w == best)
        .map(|(i, _)| i)
        .collect();

    let pick = pick_tied_offset(&tied);
    Ok(Interval {
        lower: sorted[pick],
        upper: sorted[pick + window],
    })
}

fn pick_tied_offset(tied: &[usize]) -> usize {
    let first = tied[0];
    let last = tied[tied.len() - 1];
    if last - first + 1 == tied.len() {
        (first + last) / 2
    } else {
        first
    }
}
