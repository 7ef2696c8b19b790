//! Distribution geometry for the violin halves.
//!
//! The charting crate has no violin trace, so the smoothed outline the
//! original figures got for free is computed here: a Gaussian kernel
//! density estimate evaluated on a fixed grid, plus the summary numbers
//! the box and mean overlays need.

// ---------------------------------------------------------------------------
// Tuning constants
// ---------------------------------------------------------------------------

/// Half-width of a violin at its widest point, in x-axis units.
pub const HALF_WIDTH: f64 = 0.4;

/// Number of grid points the density is evaluated on.
const GRID_POINTS: usize = 128;

/// The grid spans the data range extended by this many bandwidths.
const SPAN_BANDWIDTHS: f64 = 2.0;

/// Bandwidth used when the rule-of-thumb estimate degenerates
/// (constant data, or a single observation).
const FALLBACK_BANDWIDTH: f64 = 1.0;

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Summary numbers for one cohort's values, feeding the box and mean-line
/// overlays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub n: usize,
    pub mean: f64,
    pub std: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Summarise a slice of values. `None` when the slice is empty.
    pub fn of(values: &[f64]) -> Option<Summary> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let std = if n > 1 {
            let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (ss / (n - 1) as f64).sqrt()
        } else {
            0.0
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        Some(Summary {
            n,
            mean,
            std,
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Quantile by linear interpolation between order statistics.
/// `sorted` must be non-empty and ascending.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// ---------------------------------------------------------------------------
// Kernel density estimate
// ---------------------------------------------------------------------------

/// Silverman's rule-of-thumb bandwidth: `0.9 · min(σ, IQR/1.34) · n^(−1/5)`.
/// Falls back to a fixed width when the estimate is non-finite or
/// non-positive.
pub fn silverman_bandwidth(summary: &Summary) -> f64 {
    let iqr = summary.q3 - summary.q1;
    let sigma = if iqr > 0.0 {
        summary.std.min(iqr / 1.34)
    } else {
        summary.std
    };
    let bw = 0.9 * sigma * (summary.n as f64).powf(-0.2);
    if bw.is_finite() && bw > 0.0 {
        bw
    } else {
        FALLBACK_BANDWIDTH
    }
}

/// The smoothed outline of one violin half: densities on a value grid,
/// scaled so the widest point sits at [`HALF_WIDTH`].
#[derive(Debug, Clone)]
pub struct ViolinShape {
    grid: Vec<f64>,
    density: Vec<f64>,
}

impl ViolinShape {
    /// The closed polygon for one half of the split: the centre line down,
    /// the density curve out to `sign` (−1 for the left half, +1 for the
    /// right), and back to the centre.
    pub fn outline(&self, sign: f64) -> (Vec<f64>, Vec<f64>) {
        let mut xs = Vec::with_capacity(self.grid.len() + 2);
        let mut ys = Vec::with_capacity(self.grid.len() + 2);
        if let (Some(&lo), Some(&hi)) = (self.grid.first(), self.grid.last()) {
            xs.push(0.0);
            ys.push(lo);
            for (&g, &d) in self.grid.iter().zip(&self.density) {
                xs.push(sign * d);
                ys.push(g);
            }
            xs.push(0.0);
            ys.push(hi);
        }
        (xs, ys)
    }
}

/// Gaussian KDE of `values` on a grid spanning the data range extended by
/// two bandwidths. `None` when there are no values to smooth.
pub fn violin_shape(values: &[f64]) -> Option<ViolinShape> {
    let summary = Summary::of(values)?;
    let bw = silverman_bandwidth(&summary);

    let lo = summary.min - SPAN_BANDWIDTHS * bw;
    let hi = summary.max + SPAN_BANDWIDTHS * bw;
    let step = (hi - lo) / (GRID_POINTS - 1) as f64;

    let grid: Vec<f64> = (0..GRID_POINTS).map(|i| lo + step * i as f64).collect();
    let mut density: Vec<f64> = grid
        .iter()
        .map(|&g| {
            values
                .iter()
                .map(|&v| (-0.5 * ((g - v) / bw).powi(2)).exp())
                .sum::<f64>()
        })
        .collect();

    let peak = density.iter().cloned().fold(0.0_f64, f64::max);
    if peak > 0.0 {
        let scale = HALF_WIDTH / peak;
        for d in &mut density {
            *d *= scale;
        }
    }

    Some(ViolinShape { grid, density })
}
