use anyhow::{bail, Result};

/// Equal width histogram normalized to unit area.
pub struct Histogram {
    pub edges: Vec<f64>,
    pub density: Vec<f64>,
}

impl Histogram {
    /// Bins the finite values over their own range. The last bin is closed
    /// on the right so the maximum is counted. A constant input is binned
    /// over `[v - 0.5, v + 0.5]`.
    pub fn density(values: &[f64], bins: usize) -> Result<Histogram> {
        if bins == 0 {
            bail!("Histogram needs at least one bin");
        }
        let finite = values.iter().copied().filter(|v| v.is_finite());
        let (mut lo, mut hi) = finite
            .clone()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            // nothing finite to bin
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = ((v - lo) / width) as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        let total = counts.iter().sum::<usize>() as f64;
        let density = counts.iter().map(|&c| c as f64 / (total * width)).collect();

        Ok(Histogram { edges, density })
    }

    pub fn bins(&self) -> usize {
        self.density.len()
    }
}
