use ahash::AHashMap;
use anyhow::{ensure, Result};
use geo::MultiPolygon;

use crate::{geom::Geometries, types::{Dgurba, Projection}};

/// One Local Administrative Unit.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminUnit {
    pub id: String,
    pub country: String,
    pub dgurba: Dgurba,
    /// Interpolated population, set once the overlay has been computed.
    pub population: Option<f64>,
}

impl AdminUnit {
    pub fn new(id: impl Into<String>, country: impl Into<String>, dgurba: Dgurba) -> Self {
        Self { id: id.into(), country: country.into(), dgurba, population: None }
    }
}

/// LAU boundaries with their attributes, indexed by unit id.
#[derive(Debug, Clone)]
pub struct AdminLayer {
    units: Vec<AdminUnit>,
    index: AHashMap<String, u32>,
    pub(crate) geoms: Geometries,
}

impl AdminLayer {
    /// Build a layer from units and their boundaries (same order), already in a planar CRS.
    pub fn new(units: Vec<AdminUnit>, shapes: Vec<MultiPolygon<f64>>, epsg: Option<u32>) -> Result<Self> {
        ensure!(
            units.len() == shapes.len(),
            "admin layer: {} units but {} shapes", units.len(), shapes.len()
        );
        Ok(Self {
            index: super::build_index("admin", units.iter().map(|u| u.id.as_str()))?,
            units,
            geoms: Geometries::new(shapes, epsg),
        })
    }

    #[inline] pub fn len(&self) -> usize { self.units.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.units.is_empty() }

    #[inline] pub fn units(&self) -> &[AdminUnit] { &self.units }

    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { self.geoms.shapes() }

    #[inline] pub fn epsg(&self) -> Option<u32> { self.geoms.epsg() }

    /// Look up a unit by id.
    pub fn get(&self, id: &str) -> Option<&AdminUnit> {
        self.index.get(id).map(|&i| &self.units[i as usize])
    }

    /// Planar area of each unit, in squared CRS units.
    pub fn areas(&self) -> Vec<f64> { self.geoms.areas() }

    /// Interpolated population keyed by unit id (units without an estimate are left out).
    pub fn population_by_id(&self) -> AHashMap<&str, f64> {
        self.units.iter()
            .filter_map(|u| u.population.map(|p| (u.id.as_str(), p)))
            .collect()
    }

    /// Attach one population estimate per unit, in layer order. `None` marks a unit no cell reached.
    pub(crate) fn set_population(&mut self, population: Vec<Option<f64>>) -> Result<()> {
        ensure!(
            population.len() == self.units.len(),
            "population estimates ({}) do not match unit count ({})", population.len(), self.units.len()
        );
        for (unit, value) in self.units.iter_mut().zip(population) {
            unit.population = value;
        }
        Ok(())
    }

    pub(crate) fn reproject(self, target: &Projection) -> Result<Self> {
        Ok(Self { geoms: self.geoms.reproject(target)?, ..self })
    }
}
