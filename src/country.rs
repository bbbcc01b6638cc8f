use anyhow::{ensure, Context, Result};
use tracing::info;

use crate::{
    config::Settings,
    geom::build_projection,
    interp::{interpolate, InterpolationReport},
    layer::{AdminLayer, GridLayer},
    render::{Chart, SummaryRenderer, SvgChartRenderer},
    summary::UrbanizationSummary,
    types::CountryCode,
};

/// LAU boundaries and population grid of one country, in the country's planar CRS.
#[derive(Debug)]
pub struct Country {
    code: CountryCode,
    admin: AdminLayer,
    grid: GridLayer,
    report: Option<InterpolationReport>,
    summary: Option<UrbanizationSummary>,
    chart: Option<Chart>,
    renderer: Box<dyn SummaryRenderer>,
}

impl Country {
    /// Load both layers for `code` from the data directory in `settings`.
    /// The code is validated before any file is touched.
    pub fn new(code: &str, settings: &Settings) -> Result<Self> {
        let code: CountryCode = code.parse()?;
        Self::load(code, settings)
    }

    /// Load, filter and reproject both layers for `code`.
    pub fn load(code: CountryCode, settings: &Settings) -> Result<Self> {
        let projection = code.projection();
        build_projection(&projection)?;

        let admin = AdminLayer::from_dgurba_shapefile(&settings.dgurba_path(), &settings.schema.admin, code)
            .context("Failed to load LAU boundaries")?;
        let grid = GridLayer::from_population_shapefile(&settings.population_grid_path(), &settings.schema.grid, code)
            .context("Failed to load population grid")?;
        info!("loaded {} LAUs and {} grid cells for {code}", admin.len(), grid.len());

        let admin = admin.reproject(&projection).context("Failed to reproject LAU boundaries")?;
        let grid = grid.reproject(&projection).context("Failed to reproject population grid")?;
        info!("reprojected both layers to EPSG:{}", projection.epsg);

        Ok(Self::from_layers(code, admin, grid)
            .with_renderer(Box::new(SvgChartRenderer::new(settings.chart_path()))))
    }

    /// Wrap layers that are already filtered and expressed in a shared planar CRS.
    pub fn from_layers(code: CountryCode, admin: AdminLayer, grid: GridLayer) -> Self {
        Self {
            code,
            admin,
            grid,
            report: None,
            summary: None,
            chart: None,
            renderer: Box::new(SvgChartRenderer::new(Settings::default().chart_path())),
        }
    }

    pub fn with_renderer(mut self, renderer: Box<dyn SummaryRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    #[inline] pub fn code(&self) -> CountryCode { self.code }

    #[inline] pub fn admin(&self) -> &AdminLayer { &self.admin }

    #[inline] pub fn grid(&self) -> &GridLayer { &self.grid }

    /// Report of the last population computation, if any.
    #[inline] pub fn report(&self) -> Option<&InterpolationReport> { self.report.as_ref() }

    /// Last summary computed by [`Country::get_urbanization_summary`], if any.
    #[inline] pub fn summary(&self) -> Option<&UrbanizationSummary> { self.summary.as_ref() }

    /// Chart drawn by the last plotting call, if any.
    #[inline] pub fn last_chart(&self) -> Option<&Chart> { self.chart.as_ref() }

    /// Estimate each LAU's population from the overlapping grid cells and attach it to the units.
    /// LAUs that overlap no cell are left without an estimate.
    pub fn compute_population_per_unit(&mut self) -> Result<&InterpolationReport> {
        let (population, report) = interpolate(&self.admin, &self.grid);
        self.admin.set_population(population)?;
        self.summary = None;
        self.chart = None;
        Ok(self.report.insert(report))
    }

    /// Aggregate population and area share by degree of urbanisation over the LAUs that received
    /// an estimate. With `plot` set the chart is drawn and kept, see [`Country::last_chart`].
    pub fn get_urbanization_summary(&mut self, plot: bool) -> Result<&UrbanizationSummary> {
        ensure!(
            self.report.is_some(),
            "population has not been computed for {}; call compute_population_per_unit first", self.code
        );
        let summary = UrbanizationSummary::from_units(self.admin.units(), &self.admin.areas())
            .with_context(|| format!("Failed to summarize {}", self.code))?;
        if plot {
            self.chart = Some(self.renderer.render(&summary, false)?);
        }
        Ok(self.summary.insert(summary))
    }

    /// Draw the chart of the last computed summary, saving it when `save` is set.
    pub fn print_urbanization_summary(&mut self, save: bool) -> Result<&Chart> {
        let summary = self.summary.as_ref()
            .context("No urbanisation summary yet; call get_urbanization_summary first")?;
        let chart = self.renderer.render(summary, save)?;
        Ok(self.chart.insert(chart))
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use geo::{polygon, MultiPolygon};

    use super::*;
    use crate::{error::ConfigError, layer::{AdminUnit, GridCell}, types::Dgurba};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x1, y: y0),
            (x: x1, y: y1),
            (x: x0, y: y1),
            (x: x0, y: y0),
        ]])
    }

    #[derive(Debug, Default)]
    struct CountingRenderer {
        calls: Rc<Cell<usize>>,
    }

    impl SummaryRenderer for CountingRenderer {
        fn render(&self, _summary: &UrbanizationSummary, save: bool) -> Result<Chart> {
            self.calls.set(self.calls.get() + 1);
            Ok(Chart { svg: String::new(), path: save.then(|| "chart.svg".into()) })
        }
    }

    fn country(calls: Rc<Cell<usize>>) -> Country {
        let admin = AdminLayer::new(
            vec![
                AdminUnit::new("city", "NL", Dgurba::CITY),
                AdminUnit::new("town", "NL", Dgurba::TOWN),
                AdminUnit::new("rural", "NL", Dgurba::RURAL),
            ],
            vec![rect(0.0, 0.0, 1.0, 2.0), rect(1.0, 0.0, 2.0, 2.0), rect(2.0, 0.0, 4.0, 2.0)],
            Some(28992),
        ).unwrap();
        let grid = GridLayer::new(
            vec![
                GridCell::new("g1", "NL", 900.0),
                GridCell::new("g2", "NL", 100.0),
                GridCell::new("g3", "NL", 30.0),
            ],
            vec![rect(0.0, 0.0, 2.0, 2.0), rect(2.0, 0.0, 4.0, 2.0), rect(4.0, 0.0, 5.0, 1.0)],
            Some(28992),
        ).unwrap();
        Country::from_layers(CountryCode::NL, admin, grid)
            .with_renderer(Box::new(CountingRenderer { calls }))
    }

    #[test]
    fn unsupported_code_fails_before_io() {
        let settings = Settings::default().with_data_path("/nonexistent/path/");
        let err = Country::new("XX", &settings).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnsupportedCountry("XX".into()))
        );
    }

    #[test]
    fn missing_files_are_io_errors() {
        let settings = Settings::default().with_data_path("/nonexistent/path/");
        let err = Country::new("GB", &settings).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_none());
        assert!(format!("{err:#}").contains("does not exist"));
    }

    #[test]
    fn population_attached_to_units() {
        let mut country = country(Rc::default());
        let report = country.compute_population_per_unit().unwrap().clone();
        assert_eq!(report.uncovered_cells, 1);

        let population = country.admin().population_by_id();
        assert!((population["city"] - 450.0).abs() < 1e-9);
        assert!((population["town"] - 450.0).abs() < 1e-9);
        assert!((population["rural"] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn summary_requires_population() {
        let mut country = country(Rc::default());
        assert!(country.get_urbanization_summary(false).is_err());
        assert!(country.print_urbanization_summary(false).is_err());
    }

    #[test]
    fn summary_is_idempotent() {
        let calls = Rc::new(Cell::new(0));
        let mut country = country(calls.clone());
        country.compute_population_per_unit().unwrap();

        let first = country.get_urbanization_summary(false).unwrap().clone();
        let second = country.get_urbanization_summary(false).unwrap().clone();
        assert_eq!(first, second);
        assert_eq!(country.summary(), Some(&second));
        assert_eq!(calls.get(), 0);

        let rural = first.get(Dgurba::RURAL).unwrap();
        assert!((rural.area_pct.sum - 0.5).abs() < 1e-12);
        assert_eq!(country.admin().get("rural").unwrap().population, Some(100.0));
    }

    #[test]
    fn renderer_only_called_on_request() {
        let calls = Rc::new(Cell::new(0));
        let mut country = country(calls.clone());
        country.compute_population_per_unit().unwrap();

        country.get_urbanization_summary(false).unwrap();
        assert!(country.last_chart().is_none());

        country.get_urbanization_summary(true).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(country.last_chart().unwrap().path.is_none());

        let chart = country.print_urbanization_summary(true).unwrap();
        assert!(chart.path.is_some());
        assert_eq!(calls.get(), 2);
        assert!(country.last_chart().unwrap().path.is_some());

        country.compute_population_per_unit().unwrap();
        assert!(country.last_chart().is_none());
    }

    #[test]
    fn plotted_chart_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.svg");
        let mut country = country(Rc::default())
            .with_renderer(Box::new(SvgChartRenderer::new(&path)));
        country.compute_population_per_unit().unwrap();

        country.get_urbanization_summary(true).unwrap();
        let chart = country.last_chart().unwrap();
        assert!(chart.svg.contains("<svg"));
        assert!(chart.svg.trim_end().ends_with("</svg>"));
        assert_eq!(chart.svg.matches(r#"class="bar population""#).count(), 3);
        assert!(!path.exists());
    }

    #[test]
    fn summary_skips_units_without_cells() {
        let admin = AdminLayer::new(
            vec![
                AdminUnit::new("city", "NL", Dgurba::CITY),
                AdminUnit::new("town", "NL", Dgurba::TOWN),
                AdminUnit::new("rural", "NL", Dgurba::RURAL),
                AdminUnit::new("island", "NL", Dgurba::RURAL),
            ],
            vec![
                rect(0.0, 0.0, 1.0, 2.0),
                rect(1.0, 0.0, 2.0, 2.0),
                rect(2.0, 0.0, 4.0, 2.0),
                rect(10.0, 10.0, 14.0, 14.0),
            ],
            Some(28992),
        ).unwrap();
        let grid = GridLayer::new(
            vec![GridCell::new("g1", "NL", 900.0), GridCell::new("g2", "NL", 100.0)],
            vec![rect(0.0, 0.0, 2.0, 2.0), rect(2.0, 0.0, 4.0, 2.0)],
            Some(28992),
        ).unwrap();
        let mut country = Country::from_layers(CountryCode::NL, admin, grid)
            .with_renderer(Box::new(CountingRenderer::default()));

        let report = country.compute_population_per_unit().unwrap();
        assert_eq!(report.unmatched_units, 1);
        assert_eq!(country.admin().get("island").unwrap().population, None);

        let summary = country.get_urbanization_summary(false).unwrap();
        let rural = summary.get(Dgurba::RURAL).unwrap();
        assert_eq!(rural.units, 1);
        assert!((rural.population.mean - 100.0).abs() < 1e-9);
        assert_eq!(rural.population.idxmin, "rural");
        // Shares are taken over the 8 units of area that received an estimate.
        assert!((rural.area_pct.sum - 0.5).abs() < 1e-12);
        assert!((summary.get(Dgurba::CITY).unwrap().area_pct.sum - 0.25).abs() < 1e-12);
        let total: f64 = summary.rows.iter().map(|r| r.area_pct.sum).sum();
        assert!((total - 1.0).abs() < 1e-12);
    }
}
