use crate::dist::Derived;
use crate::plot::{save_scatter, Scatter, Style};
use crate::Figure;
use anyhow::{Context, Result};
use plotters::style::{RGBColor, BLUE, RED};
use std::path::{Path, PathBuf};

const T_DESC: &str = "t [fs]";
const E_DESC: &str = "Energy [GeV]";
const Z_DESC: &str = "z [µm]";
const DZ_DESC: &str = "Δz [µm]";
const DELTA_DESC: &str = "δ [%]";

const INITIAL: &str = "Initial";
const FIRST_ORDER: &str = "1st-order";

/// File stems of the comparison figures, in the order they are written.
pub const FIGURE_NAMES: [&str; 7] = [
    "t-p_norm_py",
    "z-delta_norm_py",
    "t-p_end_py",
    "z-delta_end_py",
    "delz-delta_py",
    "t-p_initial_py",
    "z-delta_initial_py",
];

struct Plot<'a> {
    name: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
    series: Vec<Scatter<'a>>,
}

fn scatter<'a>(
    label: Option<&'a str>,
    color: RGBColor,
    x: &'a [f64],
    y: &'a [f64],
) -> Scatter<'a> {
    Scatter { label, color, x, y }
}

fn comparison_plots<'a>(
    initial: &'a Derived,
    fin: &'a Derived,
    delta_z_um: &'a [f64],
) -> Vec<Plot<'a>> {
    vec![
        Plot {
            name: FIGURE_NAMES[0],
            x_desc: T_DESC,
            y_desc: E_DESC,
            series: vec![
                scatter(Some(INITIAL), BLUE, &initial.centered_time_fs, &initial.energy_gev),
                scatter(Some(FIRST_ORDER), RED, &fin.centered_time_fs, &fin.energy_gev),
            ],
        },
        Plot {
            name: FIGURE_NAMES[1],
            x_desc: Z_DESC,
            y_desc: DELTA_DESC,
            series: vec![
                scatter(
                    Some(INITIAL),
                    BLUE,
                    &initial.longitudinal_offset_um,
                    &initial.frac_momentum_dev_pct,
                ),
                scatter(
                    Some(FIRST_ORDER),
                    RED,
                    &fin.longitudinal_offset_um,
                    &fin.frac_momentum_dev_pct,
                ),
            ],
        },
        Plot {
            name: FIGURE_NAMES[2],
            x_desc: T_DESC,
            y_desc: E_DESC,
            series: vec![scatter(Some(FIRST_ORDER), RED, &fin.time_fs, &fin.energy_gev)],
        },
        Plot {
            name: FIGURE_NAMES[3],
            x_desc: Z_DESC,
            y_desc: DELTA_DESC,
            series: vec![scatter(
                Some(FIRST_ORDER),
                RED,
                &fin.raw_longitudinal_offset_um,
                &fin.frac_momentum_dev_pct,
            )],
        },
        Plot {
            name: FIGURE_NAMES[4],
            x_desc: DZ_DESC,
            y_desc: DELTA_DESC,
            series: vec![scatter(
                Some(FIRST_ORDER),
                RED,
                delta_z_um,
                &fin.frac_momentum_dev_pct,
            )],
        },
        Plot {
            name: FIGURE_NAMES[5],
            x_desc: T_DESC,
            y_desc: E_DESC,
            series: vec![scatter(None, RED, &initial.time_fs, &initial.energy_gev)],
        },
        Plot {
            name: FIGURE_NAMES[6],
            x_desc: Z_DESC,
            y_desc: DELTA_DESC,
            series: vec![scatter(
                None,
                RED,
                &initial.raw_longitudinal_offset_um,
                &initial.frac_momentum_dev_pct,
            )],
        },
    ]
}

/// Writes the seven comparison figures to `figures_dir` and returns their
/// paths in write order.
pub fn render_comparisons(
    initial: &Derived,
    fin: &Derived,
    delta_z_um: &[f64],
    fig: &Figure,
    figures_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(figures_dir).context("Unable to create figures directory")?;
    let style = Style::new(fig);

    let mut written = Vec::with_capacity(FIGURE_NAMES.len());
    for plot in comparison_plots(initial, fin, delta_z_um) {
        let path = figures_dir.join(format!("{}.png", plot.name));
        save_scatter(&path, &style, plot.x_desc, plot.y_desc, &plot.series)?;
        written.push(path);
    }
    Ok(written)
}
