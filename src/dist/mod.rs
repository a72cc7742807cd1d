use anyhow::{bail, Context, Result};
use log::warn;
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;

pub mod hist;
pub mod quantities;

pub use quantities::delta_z_um;

#[derive(Deserialize)]
struct Record {
    dt: f64,
    p: f64,
}

const REQUIRED_COLUMNS: [&str; 2] = ["dt", "p"];

/// One particle distribution, stored column-wise.
#[derive(Debug)]
pub struct Distribution {
    pub name: String,
    pub dt: Vec<f64>, // arrival time deviation, s
    pub p: Vec<f64>,  // normalized momentum
}

/// Per-distribution means every derived quantity is measured against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Baseline {
    pub dt_mean: f64,
    pub p_mean: f64,
}

impl Distribution {
    pub fn new(name: &str, dt: Vec<f64>, p: Vec<f64>) -> Result<Distribution> {
        if dt.len() != p.len() {
            bail!(
                "Distribution {} has {} dt values but {} p values",
                name,
                dt.len(),
                p.len()
            );
        }
        Ok(Distribution {
            name: name.to_string(),
            dt,
            p,
        })
    }

    pub fn load<P: AsRef<Path>>(name: &str, path: P) -> Result<Distribution> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Could not open distribution file {}", path.display()))?;
        Distribution::from_reader(name, file)
            .with_context(|| format!("Could not read distribution file {}", path.display()))
    }

    /// Parses comma separated records by header name. Only `dt` and `p` are
    /// read, any other column is ignored. Both must be in the header row even
    /// when there are no records.
    pub fn from_reader<R: io::Read>(name: &str, reader: R) -> Result<Distribution> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = rdr.headers().context("Could not read header row")?;
        for column in REQUIRED_COLUMNS.iter() {
            if !headers.iter().any(|h| h == *column) {
                bail!("Distribution {} has no {} column", name, column);
            }
        }
        let mut dt = Vec::new();
        let mut p = Vec::new();
        for (row, record) in rdr.deserialize().enumerate() {
            let record: Record =
                record.with_context(|| format!("Malformed record at row {}", row + 1))?;
            dt.push(record.dt);
            p.push(record.p);
        }
        Distribution::new(name, dt, p)
    }

    pub fn len(&self) -> usize {
        self.dt.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dt.is_empty()
    }

    pub fn baseline(&self) -> Baseline {
        Baseline {
            dt_mean: mean(&self.dt),
            p_mean: mean(&self.p),
        }
    }
}

// NaN for an empty slice, same as numpy.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Every plotted quantity of one distribution, derived once.
pub struct Derived {
    pub name: String,
    pub baseline: Baseline,
    pub centered_time_fs: Vec<f64>,
    pub time_fs: Vec<f64>,
    pub energy_gev: Vec<f64>,
    pub longitudinal_offset_um: Vec<f64>,
    pub raw_longitudinal_offset_um: Vec<f64>,
    pub frac_momentum_dev_pct: Vec<f64>,
}

impl Derived {
    pub fn new(dist: &Distribution) -> Derived {
        let baseline = dist.baseline();
        Derived {
            name: dist.name.clone(),
            baseline,
            centered_time_fs: quantities::centered_time_fs(&dist.dt, baseline.dt_mean),
            time_fs: quantities::time_fs(&dist.dt),
            energy_gev: quantities::energy_gev(&dist.p),
            longitudinal_offset_um: quantities::longitudinal_offset_um(&dist.dt, baseline.dt_mean),
            raw_longitudinal_offset_um: quantities::raw_longitudinal_offset_um(&dist.dt),
            frac_momentum_dev_pct: quantities::frac_momentum_dev_pct(&dist.p, baseline.p_mean),
        }
    }
}

pub(crate) fn warn_length_mismatch(a: &Distribution, b: &Distribution) {
    if a.len() != b.len() {
        warn!(
            "{} has {} particles but {} has {}; only the first {} are paired",
            a.name,
            a.len(),
            b.name,
            b.len(),
            a.len().min(b.len())
        );
    }
}
