use crate::plot::{draw_err, draw_scatter, Scatter, Style};
use crate::steps::{Channel, StepSeries};
use crate::Figure;
use anyhow::{Context, Result};
use plotters::prelude::*;
use std::path::Path;

pub(crate) fn title(channel: Channel) -> &'static str {
    match channel {
        Channel::Position => "Time deviation",
        Channel::EnergyDeviation => "Energy deviation",
    }
}

pub(crate) fn y_desc(channel: Channel) -> &'static str {
    match channel {
        Channel::Position => "Z (m)",
        Channel::EnergyDeviation => "δ (eV)",
    }
}

const X_DESC: &str = "Component #";

/// Two stacked panels, one scatter series per particle against the step
/// index. Colours cycle through the palette per particle.
pub fn render(series: &StepSeries, fig: &Figure, out_path: &Path) -> Result<()> {
    let style = Style::steps(fig);

    let steps: Vec<f64> = (0..series.n_steps()).map(|i| i as f64).collect();

    let root = BitMapBackend::new(out_path, style.size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    let panels = root.split_evenly((Channel::ALL.len(), 1));

    for (panel, channel) in panels.iter().zip(Channel::ALL.iter()) {
        let per_particle = series.channel_series(*channel);
        let scatters: Vec<Scatter> = per_particle
            .iter()
            .enumerate()
            .map(|(i, values)| Scatter {
                label: None,
                color: palette_color(i),
                x: &steps,
                y: values,
            })
            .collect();
        draw_scatter(
            panel,
            &style,
            Some(title(*channel)),
            X_DESC,
            y_desc(*channel),
            &scatters,
        )?;
    }

    root.present()
        .map_err(draw_err)
        .with_context(|| format!("Could not save figure {}", out_path.display()))
}

fn palette_color(i: usize) -> RGBColor {
    let (r, g, b) = Palette99::pick(i).rgb();
    RGBColor(r, g, b)
}
