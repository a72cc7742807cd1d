// Elementwise conversions from raw distribution columns to plotted
// quantities. All of them preserve order and length.
use crate::dist::{warn_length_mismatch, Distribution};
use crate::{C, ELECTRON_MASS_MEV, FS_PER_S, MEV_PER_GEV, UM_PER_M};
use itertools::izip;

/// Arrival time relative to the bunch mean, fs.
pub fn centered_time_fs(dt: &[f64], dt_mean: f64) -> Vec<f64> {
    dt.iter().map(|&t| (t - dt_mean) * FS_PER_S).collect()
}

pub fn time_fs(dt: &[f64]) -> Vec<f64> {
    dt.iter().map(|&t| t * FS_PER_S).collect()
}

pub fn energy_gev(p: &[f64]) -> Vec<f64> {
    p.iter().map(|&p| (p * ELECTRON_MASS_MEV) / MEV_PER_GEV).collect()
}

/// Longitudinal offset from the bunch centre, um. Late particles sit
/// behind the centre, hence the sign flip.
pub fn longitudinal_offset_um(dt: &[f64], dt_mean: f64) -> Vec<f64> {
    dt.iter().map(|&t| -(t - dt_mean) * C * UM_PER_M).collect()
}

pub fn raw_longitudinal_offset_um(dt: &[f64]) -> Vec<f64> {
    dt.iter().map(|&t| -t * C * UM_PER_M).collect()
}

/// Momentum deviation from the mean, percent. A zero mean momentum yields
/// inf/NaN, which is passed through.
pub fn frac_momentum_dev_pct(p: &[f64], p_mean: f64) -> Vec<f64> {
    p.iter().map(|&p| 1e2 * (p - p_mean) / p_mean).collect()
}

/// Longitudinal slip of each particle between two distributions, um,
/// paired by record index over the common prefix.
pub fn delta_z_um(fin: &Distribution, initial: &Distribution) -> Vec<f64> {
    warn_length_mismatch(fin, initial);
    izip!(&fin.dt, &initial.dt)
        .map(|(&t_fin, &t_init)| -(t_fin - t_init) * C * UM_PER_M)
        .collect()
}
