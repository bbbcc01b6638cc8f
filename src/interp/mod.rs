//! Area-weighted redistribution of grid cell population onto administrative units.

use serde::Serialize;
use tracing::{debug, info};

use crate::{geom::Intersection, layer::{AdminLayer, GridLayer}};

/// Cells whose covered area is below this share of their own area count as partially covered.
const FULL_COVER_TOLERANCE: f64 = 1e-9;

/// Bookkeeping from one interpolation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InterpolationReport {
    /// Non-empty (unit, cell) overlaps.
    pub intersections: usize,
    /// Sum of raw cell populations in the loaded grid.
    pub grid_population: f64,
    /// Sum of the estimates attached to units.
    pub assigned_population: f64,
    /// Cells overlapping no unit at all; their population is dropped.
    pub uncovered_cells: usize,
    pub uncovered_population: f64,
    /// Cells only partly inside the union of units; their population is scaled up to the covered part.
    pub partially_covered_cells: usize,
    /// Units overlapping no cell; they get no estimate.
    pub unmatched_units: usize,
}

/// Area-weighted population estimate for each unit of `admin`, in layer order,
/// together with a report of how the grid population was distributed.
///
/// Each cell's population is shared among the units it overlaps in proportion to
/// `overlap_area / covered_area`, where `covered_area` is the part of the cell inside any unit.
/// Units overlapping no cell get `None`.
pub fn interpolate(admin: &AdminLayer, grid: &GridLayer) -> (Vec<Option<f64>>, InterpolationReport) {
    let intersections = admin.geoms.overlay(&grid.geoms);
    debug!("overlay produced {} intersections", intersections.len());

    let covered = covered_areas(&intersections, grid.len());
    let cell_population: Vec<f64> = grid.cells().iter().map(|c| c.population).collect();
    let population = distribute(&intersections, &covered, &cell_population, admin.len());

    let cell_areas = grid.areas();
    let mut report = InterpolationReport {
        intersections: intersections.len(),
        grid_population: grid.total_population(),
        assigned_population: population.iter().flatten().sum(),
        unmatched_units: population.iter().filter(|p| p.is_none()).count(),
        ..Default::default()
    };
    for ((&covered, &area), &pop) in covered.iter().zip(&cell_areas).zip(&cell_population) {
        if covered <= 0.0 {
            report.uncovered_cells += 1;
            report.uncovered_population += pop;
        } else if covered < area * (1.0 - FULL_COVER_TOLERANCE) {
            report.partially_covered_cells += 1;
        }
    }

    info!(
        "assigned {:.1} of {:.1} grid population ({} uncovered cells holding {:.1}, {} partially covered, {} units without cells)",
        report.assigned_population, report.grid_population,
        report.uncovered_cells, report.uncovered_population, report.partially_covered_cells,
        report.unmatched_units,
    );

    (population, report)
}

/// Total overlap area per cell (the part of each cell lying inside some unit).
pub(crate) fn covered_areas(intersections: &[Intersection], cell_count: usize) -> Vec<f64> {
    intersections.iter().fold(vec![0.0; cell_count], |mut covered, i| {
        covered[i.right] += i.area;
        covered
    })
}

/// Sum each intersection's share of its cell's population into its unit.
/// Units no intersection refers to are left at `None`.
pub(crate) fn distribute(
    intersections: &[Intersection],
    covered: &[f64],
    cell_population: &[f64],
    unit_count: usize,
) -> Vec<Option<f64>> {
    intersections.iter()
        .filter(|i| covered[i.right] > 0.0)
        .map(|i| (i.left, cell_population[i.right] * (i.area / covered[i.right])))
        .fold(vec![None; unit_count], |mut population, (unit, share)| {
            *population[unit].get_or_insert(0.0) += share;
            population
        })
}
