use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

pub mod dist;
pub mod plot;
pub mod save;
pub mod steps;

use crate::dist::{hist::Histogram, Derived, Distribution};
use crate::steps::StepSeries;

// Unit conversions used by the analysis. The speed of light is the rounded
// value the beam group has always plotted with, not the exact one.
pub const C: f64 = 3e8;
pub const FS_PER_S: f64 = 1e15;
pub const UM_PER_M: f64 = 1e6;
pub const ELECTRON_MASS_MEV: f64 = 0.511;
pub const MEV_PER_GEV: f64 = 1000.0;

#[cfg(test)]
pub(crate) const E_TOL: f64 = 1e-9;

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub paths: Paths,
    pub figure: Figure,
    pub analysis: Analysis,
    pub output: Output,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Paths {
    pub initial_dist: PathBuf,
    pub final_dist: PathBuf,
    pub figures_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
    pub font_pt: f64,
    pub marker_pt: f64,
    pub margin_in: f64,
    /// Step-series figure size; it shares the font, marker and margin
    /// sizes above but is rasterized at `steps_dpi`.
    pub steps_width_in: f64,
    pub steps_height_in: f64,
    pub steps_dpi: f64,
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Analysis {
    pub bins: usize,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Output {
    pub write_derived: bool,
}

impl Default for Paths {
    fn default() -> Paths {
        Paths {
            initial_dist: PathBuf::from("./output/initial_dist.csv"),
            final_dist: PathBuf::from("./output/final_dist.csv"),
            figures_dir: PathBuf::from("./figures"),
            output_dir: PathBuf::from("./output/derived"),
        }
    }
}

impl Default for Figure {
    fn default() -> Figure {
        Figure {
            width_in: 12.0,
            height_in: 7.0,
            dpi: 600.0,
            font_pt: 22.0,
            marker_pt: 10.0,
            margin_in: 0.1,
            steps_width_in: 12.8,
            steps_height_in: 9.6,
            steps_dpi: 100.0,
        }
    }
}

impl Default for Analysis {
    fn default() -> Analysis {
        Analysis { bins: 400 }
    }
}

impl Config {
    /// Reads `config.toml` from the working directory. A missing file is
    /// not an error; the built-in constants are used instead.
    pub fn new() -> Result<Config> {
        let path = Path::new("config.toml");
        if path.exists() {
            Config::from_file(path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not open the config file {}", path.display()))?;
        toml::from_str(&contents).with_context(|| "Could not parse Config file")
    }
}

/// Loads a step-series array, echoes every particle trajectory to `echo`
/// and writes the two stacked scatter plots. Returns the figure path.
pub fn run_steps<P: AsRef<Path>, W: io::Write>(
    cfg: &Config,
    array_path: P,
    echo: &mut W,
) -> Result<PathBuf> {
    let series = StepSeries::load(array_path.as_ref())?;
    info!(
        "loaded {} steps for {} particles from {}",
        series.n_steps(),
        series.n_particles(),
        array_path.as_ref().display()
    );

    series
        .echo(echo)
        .context("Could not write particle trajectories")?;

    fs::create_dir_all(&cfg.paths.figures_dir).context("Unable to create figures directory")?;
    let out_path = cfg.paths.figures_dir.join("step_series.png");
    plot::steps::render(&series, &cfg.figure, &out_path)?;
    info!("saved figure {}", out_path.display());
    Ok(out_path)
}

/// Compares the initial and final distributions: derives the kinematic
/// quantities of both, renders the seven comparison plots and, if enabled,
/// dumps the derived arrays and histograms as `.npy` files.
pub fn run_comparison(cfg: &Config) -> Result<Vec<PathBuf>> {
    let initial = Distribution::load("initial", &cfg.paths.initial_dist)?;
    info!("loaded {} particles from {}", initial.len(), cfg.paths.initial_dist.display());
    let fin = Distribution::load("final", &cfg.paths.final_dist)?;
    info!("loaded {} particles from {}", fin.len(), cfg.paths.final_dist.display());

    let initial_derived = Derived::new(&initial);
    let final_derived = Derived::new(&fin);
    let delta_z = dist::delta_z_um(&fin, &initial);

    let bins = cfg.analysis.bins;
    let hists = [
        ("initial_t", Histogram::density(&initial_derived.centered_time_fs, bins)?),
        ("initial_p", Histogram::density(&initial_derived.energy_gev, bins)?),
        ("final_t", Histogram::density(&final_derived.centered_time_fs, bins)?),
        ("final_p", Histogram::density(&final_derived.energy_gev, bins)?),
    ];

    if cfg.output.write_derived {
        let out_dir = &cfg.paths.output_dir;
        save::save_derived(&initial_derived, &initial.name, out_dir)?;
        save::save_derived(&final_derived, &fin.name, out_dir)?;
        save::save_array(&delta_z, "delz", out_dir)?;
        for (name, hist) in &hists {
            save::save_histogram(hist, name, out_dir)?;
        }
        info!("saved derived quantities to {}", out_dir.display());
    }

    let written = plot::compare::render_comparisons(
        &initial_derived,
        &final_derived,
        &delta_z,
        &cfg.figure,
        &cfg.paths.figures_dir,
    )?;
    for path in &written {
        info!("saved figure {}", path.display());
    }
    Ok(written)
}
