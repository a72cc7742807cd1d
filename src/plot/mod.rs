use crate::Figure;
use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt;
use std::ops::Range;
use std::path::Path;

pub mod compare;
pub mod steps;

const FONT: &str = "sans-serif";
const POINTS_PER_INCH: f64 = 72.0;

// plotters errors borrow the backend's error type, flatten them to text.
pub(crate) fn draw_err<E: fmt::Display>(e: E) -> anyhow::Error {
    anyhow::anyhow!("Drawing failed: {}", e)
}

/// Figure geometry in pixels, resolved from the physical sizes in the
/// config.
#[derive(Clone, Copy, Debug)]
pub struct Style {
    pub size: (u32, u32),
    pub font_px: u32,
    pub marker_px: u32,
    pub margin_px: u32,
}

impl Style {
    pub fn new(fig: &Figure) -> Style {
        Style::at(fig, (fig.width_in, fig.height_in), fig.dpi)
    }

    /// Geometry of the step-series figure.
    pub fn steps(fig: &Figure) -> Style {
        Style::at(fig, (fig.steps_width_in, fig.steps_height_in), fig.steps_dpi)
    }

    fn at(fig: &Figure, (width_in, height_in): (f64, f64), dpi: f64) -> Style {
        let px = |inches: f64| (inches * dpi).round().max(1.0) as u32;
        Style {
            size: (px(width_in), px(height_in)),
            font_px: px(fig.font_pt / POINTS_PER_INCH),
            // marker size is a diameter
            marker_px: px(0.5 * fig.marker_pt / POINTS_PER_INCH),
            margin_px: px(fig.margin_in),
        }
    }

    fn label_area(&self) -> u32 {
        4 * self.font_px
    }
}

pub struct Scatter<'a> {
    pub label: Option<&'a str>,
    pub color: RGBColor,
    pub x: &'a [f64],
    pub y: &'a [f64],
}

impl<'a> Scatter<'a> {
    /// Finite (x, y) pairs; points with an inf/NaN coordinate are not drawn.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| (x, y))
            .filter(|(x, y)| x.is_finite() && y.is_finite())
    }
}

/// Data range padded by 5% on each side. Degenerate ranges are widened so
/// the chart always has a non-zero extent.
pub fn axis_range<I: IntoIterator<Item = f64>>(values: I) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return -1.0..1.0;
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { 0.05 * lo.abs() };
        return (lo - pad)..(hi + pad);
    }
    let pad = 0.05 * (hi - lo);
    (lo - pad)..(hi + pad)
}

/// Draws one scatter chart into `area`.
pub(crate) fn draw_scatter<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    style: &Style,
    caption: Option<&str>,
    x_desc: &str,
    y_desc: &str,
    series: &[Scatter],
) -> Result<()> {
    let x_range = axis_range(series.iter().flat_map(|s| s.points().map(|(x, _)| x)));
    let y_range = axis_range(series.iter().flat_map(|s| s.points().map(|(_, y)| y)));

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(style.margin_px)
        .x_label_area_size(style.label_area())
        .y_label_area_size(style.label_area());
    if let Some(caption) = caption {
        builder.caption(caption, (FONT, style.font_px));
    }
    let mut chart = builder
        .build_cartesian_2d(x_range, y_range)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .label_style((FONT, style.font_px))
        .axis_desc_style((FONT, style.font_px))
        .draw()
        .map_err(draw_err)?;

    let radius = style.marker_px;
    let mut has_legend = false;
    for s in series {
        let color = s.color;
        let anno = chart
            .draw_series(
                s.points()
                    .map(move |(x, y)| Circle::new((x, y), radius, color.filled())),
            )
            .map_err(draw_err)?;
        if let Some(label) = s.label {
            anno.label(label)
                .legend(move |(x, y)| Circle::new((x, y), radius, color.filled()));
            has_legend = true;
        }
    }

    if has_legend {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, style.font_px))
            .draw()
            .map_err(draw_err)?;
    }
    Ok(())
}

/// Renders a single scatter chart to a png file.
pub(crate) fn save_scatter(
    path: &Path,
    style: &Style,
    x_desc: &str,
    y_desc: &str,
    series: &[Scatter],
) -> Result<()> {
    let root = BitMapBackend::new(path, style.size).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;
    draw_scatter(&root, style, None, x_desc, y_desc, series)?;
    root.present()
        .map_err(draw_err)
        .with_context(|| format!("Could not save figure {}", path.display()))
}
