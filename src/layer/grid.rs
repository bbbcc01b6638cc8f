use ahash::AHashMap;
use anyhow::{ensure, Result};
use geo::MultiPolygon;

use crate::{geom::Geometries, types::Projection};

/// One population grid square.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub id: String,
    pub country: String,
    pub population: f64,
}

impl GridCell {
    pub fn new(id: impl Into<String>, country: impl Into<String>, population: f64) -> Self {
        Self { id: id.into(), country: country.into(), population }
    }
}

/// Population grid cells with their attributes, indexed by cell id.
#[derive(Debug, Clone)]
pub struct GridLayer {
    cells: Vec<GridCell>,
    index: AHashMap<String, u32>,
    pub(crate) geoms: Geometries,
}

impl GridLayer {
    /// Build a layer from cells and their squares (same order), already in a planar CRS.
    pub fn new(cells: Vec<GridCell>, shapes: Vec<MultiPolygon<f64>>, epsg: Option<u32>) -> Result<Self> {
        ensure!(
            cells.len() == shapes.len(),
            "grid layer: {} cells but {} shapes", cells.len(), shapes.len()
        );
        Ok(Self {
            index: super::build_index("grid", cells.iter().map(|c| c.id.as_str()))?,
            cells,
            geoms: Geometries::new(shapes, epsg),
        })
    }

    #[inline] pub fn len(&self) -> usize { self.cells.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.cells.is_empty() }

    #[inline] pub fn cells(&self) -> &[GridCell] { &self.cells }

    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { self.geoms.shapes() }

    #[inline] pub fn epsg(&self) -> Option<u32> { self.geoms.epsg() }

    pub fn get(&self, id: &str) -> Option<&GridCell> {
        self.index.get(id).map(|&i| &self.cells[i as usize])
    }

    /// Planar area of each cell, in squared CRS units.
    pub fn areas(&self) -> Vec<f64> { self.geoms.areas() }

    /// Sum of raw cell populations.
    pub fn total_population(&self) -> f64 {
        self.cells.iter().map(|c| c.population).sum()
    }

    pub(crate) fn reproject(self, target: &Projection) -> Result<Self> {
        Ok(Self { geoms: self.geoms.reproject(target)?, ..self })
    }
}
