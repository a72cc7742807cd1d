use beam_plots::{Analysis, Config, Figure, Output, Paths};
use std::fs;
use std::path::{Path, PathBuf};

pub fn write_dist(dir: &Path, name: &str, rows: &[(f64, f64)]) -> PathBuf {
    // Same column layout the tracking code writes: an index column first.
    let mut contents = String::from("id,dt,p\n");
    for (i, (dt, p)) in rows.iter().enumerate() {
        contents.push_str(&format!("{},{:e},{}\n", i, dt, p));
    }
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn setup_config(dir: &Path) -> Config {
    // A small, low resolution run rooted in a scratch directory.
    Config {
        paths: Paths {
            initial_dist: write_dist(
                dir,
                "initial_dist.csv",
                &[(1e-12, 195.0), (2e-12, 196.0), (3e-12, 197.0)],
            ),
            final_dist: write_dist(
                dir,
                "final_dist.csv",
                &[(1.5e-12, 195.0), (2.0e-12, 196.0), (2.5e-12, 197.0)],
            ),
            figures_dir: dir.join("figures"),
            output_dir: dir.join("derived"),
        },
        figure: Figure {
            dpi: 40.0,
            steps_dpi: 40.0,
            ..Figure::default()
        },
        analysis: Analysis { bins: 8 },
        output: Output {
            write_derived: true,
        },
    }
}
