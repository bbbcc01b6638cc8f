use std::{io::Write, path::{Path, PathBuf}};

use anyhow::{Context, Result};
use tracing::info;

use crate::{
    common,
    io::svg::{escape_text, Rgb, SvgStringWriter},
    render::{Chart, SummaryRenderer},
    summary::UrbanizationSummary,
};

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const LEFT: f64 = 100.0;
const RIGHT: f64 = WIDTH - 100.0;
const TOP: f64 = 60.0;
const BOTTOM: f64 = HEIGHT - 70.0;

/// Classes shown on the x axis; the axis spans [-1, DISPLAY_CLASSES].
const DISPLAY_CLASSES: usize = 3;
const BAR_WIDTH: f64 = 0.4;
const TICKS: usize = 5;

const TITLE: &str = "Population and land area by degree of urbanisation";

/// Dual-axis grouped bar chart: population sum (left axis) against area share sum (right axis).
#[derive(Debug, Clone)]
pub struct SvgChartRenderer {
    path: PathBuf,
}

impl SvgChartRenderer {
    /// Renderer saving charts to `path` (an `.svg` file) when asked to.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Draw the chart as SVG text.
    pub fn to_svg(summary: &UrbanizationSummary) -> Result<String> {
        let rows = &summary.rows[..summary.rows.len().min(DISPLAY_CLASSES)];
        let population: Vec<f64> = rows.iter().map(|r| r.population.sum).collect();
        let area: Vec<f64> = rows.iter().map(|r| r.area_pct.sum).collect();
        let left_max = nice_max(population.iter().copied().fold(0.0, f64::max));
        let right_max = nice_max(area.iter().copied().fold(0.0, f64::max));

        let x = |v: f64| LEFT + (v + 1.0) / (DISPLAY_CLASSES as f64 + 1.0) * (RIGHT - LEFT);
        let y = |v: f64, max: f64| BOTTOM - v / max * (BOTTOM - TOP);

        let mut svg = SvgStringWriter::new();
        svg.write_header(WIDTH, HEIGHT)?;
        svg.write_styles()?;

        // bars
        for (i, row) in rows.iter().enumerate() {
            let center = i as f64;
            for (x0, value, max, color, class) in [
                (center - BAR_WIDTH, population[i], left_max, Rgb::TOMATO, "population"),
                (center, area[i], right_max, Rgb::FOREST_GREEN, "area"),
            ] {
                let (px, py) = (x(x0), y(value.max(0.0), max));
                writeln!(
                    svg, r#"<rect class="bar {class}" data-dgurba="{}" x="{px:.2}" y="{py:.2}" width="{:.2}" height="{:.2}" fill="{color}"/>"#,
                    row.dgurba, x(x0 + BAR_WIDTH) - px, BOTTOM - py,
                )?;
            }
            writeln!(
                svg, r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                x(center), BOTTOM + 20.0, row.dgurba,
            )?;
        }

        // axes
        writeln!(svg, r#"<rect class="axis" x="{LEFT}" y="{TOP}" width="{}" height="{}" stroke="{}"/>"#,
            RIGHT - LEFT, BOTTOM - TOP, Rgb::AXIS)?;
        for k in 0..=TICKS {
            let fraction = k as f64 / TICKS as f64;
            let py = BOTTOM - fraction * (BOTTOM - TOP);
            writeln!(svg, r#"<text x="{:.2}" y="{:.2}" text-anchor="end" fill="{}">{}</text>"#,
                LEFT - 8.0, py + 4.0, Rgb::TOMATO, format_tick(fraction * left_max, left_max / TICKS as f64))?;
            writeln!(svg, r#"<text x="{:.2}" y="{:.2}" text-anchor="start" fill="{}">{}</text>"#,
                RIGHT + 8.0, py + 4.0, Rgb::FOREST_GREEN, format_tick(fraction * right_max, right_max / TICKS as f64))?;
        }
        writeln!(svg, r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">DGURBA</text>"#, (LEFT + RIGHT) / 2.0, HEIGHT - 20.0)?;

        // labels
        let middle = (TOP + BOTTOM) / 2.0;
        writeln!(svg, r#"<text x="30" y="{middle:.2}" text-anchor="middle" fill="{}" transform="rotate(-90 30 {middle:.2})">population sum</text>"#, Rgb::TOMATO)?;
        writeln!(svg, r#"<text x="{r:.2}" y="{middle:.2}" text-anchor="middle" fill="{}" transform="rotate(90 {r:.2} {middle:.2})">sum of LAU areas</text>"#, Rgb::FOREST_GREEN, r = WIDTH - 30.0)?;
        writeln!(svg, r#"<text class="title" x="{:.2}" y="35" text-anchor="middle">{}</text>"#, WIDTH / 2.0, escape_text(TITLE))?;

        svg.write_footer()?;
        svg.into_string()
    }
}

impl SummaryRenderer for SvgChartRenderer {
    fn render(&self, summary: &UrbanizationSummary, save: bool) -> Result<Chart> {
        let svg = Self::to_svg(summary)?;
        if !save {
            return Ok(Chart { svg, path: None });
        }

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            common::ensure_dir_exists(dir)?;
        }
        std::fs::write(&self.path, &svg)
            .with_context(|| format!("Failed to write chart to {}", self.path.display()))?;
        info!("saved chart to {}", self.path.display());

        Ok(Chart { svg, path: Some(self.path.clone()) })
    }
}

/// Round an axis maximum up to 1, 2, 2.5 or 5 times a power of ten.
fn nice_max(value: f64) -> f64 {
    if !(value.is_finite() && value > 0.0) { return 1.0 }
    let magnitude = 10f64.powf(value.log10().floor());
    let nice = [1.0, 2.0, 2.5, 5.0, 10.0].into_iter()
        .find(|&step| step * magnitude >= value)
        .unwrap_or(10.0);
    nice * magnitude
}

/// Tick label with just enough decimals to distinguish ticks `step` apart.
fn format_tick(value: f64, step: f64) -> String {
    let decimals = (-step.log10().floor()).max(0.0) as usize + 1;
    if step >= 1.0 { format!("{value:.0}") } else { format!("{value:.decimals$}") }
}
