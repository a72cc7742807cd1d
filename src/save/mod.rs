use crate::dist::{hist::Histogram, Derived};
use anyhow::{Context, Result};
use std::path::Path;

pub(crate) fn save_array(values: &[f64], name: &str, outdir: &Path) -> Result<()> {
    std::fs::create_dir_all(outdir).context("Unable to create output directory")?;
    npy::to_file(outdir.join(format!("{}.npy", name)), values.iter().copied())
        .context(format!("Could not save {} data to file", name))?;
    Ok(())
}

/// Writes every derived quantity of one distribution as
/// `<outdir>/<prefix>_<quantity>.npy`.
pub(crate) fn save_derived(derived: &Derived, prefix: &str, outdir: &Path) -> Result<()> {
    for (quantity, values) in &[
        ("t_centered_fs", &derived.centered_time_fs),
        ("t_fs", &derived.time_fs),
        ("energy_gev", &derived.energy_gev),
        ("z_centered_um", &derived.longitudinal_offset_um),
        ("z_um", &derived.raw_longitudinal_offset_um),
        ("delta_pct", &derived.frac_momentum_dev_pct),
    ] {
        save_array(values, &format!("{}_{}", prefix, quantity), outdir)?;
    }
    Ok(())
}

pub(crate) fn save_histogram(hist: &Histogram, name: &str, outdir: &Path) -> Result<()> {
    save_array(&hist.edges, &format!("{}_hist_edges", name), outdir)?;
    save_array(&hist.density, &format!("{}_hist_density", name), outdir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::Distribution;

    #[test]
    fn derived_files_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let dist = Distribution::new("initial", vec![1e-12, 3e-12], vec![100., 300.]).unwrap();
        let derived = Derived::new(&dist);
        save_derived(&derived, "initial", dir.path()).unwrap();

        let bytes = std::fs::read(dir.path().join("initial_delta_pct.npy")).unwrap();
        let data: npy::NpyData<f64> = npy::NpyData::from_bytes(&bytes).unwrap();
        assert_eq!(data.to_vec(), vec![-50., 50.]);
        for quantity in &["t_centered_fs", "t_fs", "energy_gev", "z_centered_um", "z_um"] {
            assert!(dir.path().join(format!("initial_{}.npy", quantity)).exists());
        }
    }

    #[test]
    fn histogram_files() {
        let dir = tempfile::tempdir().unwrap();
        let hist = Histogram::density(&[0., 1., 2., 3., 4.], 4).unwrap();
        save_histogram(&hist, "final_t", &dir.path().join("nested")).unwrap();
        assert!(dir.path().join("nested/final_t_hist_edges.npy").exists());
        assert!(dir.path().join("nested/final_t_hist_density.npy").exists());
    }
}
