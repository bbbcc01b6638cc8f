use std::{collections::BTreeMap, fmt};

use anyhow::{ensure, Result};
use serde::Serialize;

use crate::{layer::AdminUnit, types::Dgurba};

/// Sum, mean and the ids of the extreme units of one quantity within a class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub sum: f64,
    pub mean: f64,
    pub idxmax: String,
    pub idxmin: String,
}

impl Aggregate {
    /// Aggregate `(id, value)` pairs; ties keep the first id seen. `None` for an empty input.
    fn from_values<'a>(values: impl IntoIterator<Item = (&'a str, f64)>) -> Option<Self> {
        let mut iter = values.into_iter();
        let (first_id, first) = iter.next()?;

        let (mut sum, mut count) = (first, 1usize);
        let (mut max, mut min) = ((first_id, first), (first_id, first));
        for (id, value) in iter {
            sum += value;
            count += 1;
            if value > max.1 { max = (id, value) }
            if value < min.1 { min = (id, value) }
        }

        Some(Self {
            sum,
            mean: sum / count as f64,
            idxmax: max.0.to_string(),
            idxmin: min.0.to_string(),
        })
    }
}

/// Population and area share of the units in one degree of urbanisation class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub dgurba: Dgurba,
    pub units: usize,
    pub population: Aggregate,
    /// Area as a fraction of the total area of the units that received an estimate.
    pub area_pct: Aggregate,
}

/// Per-class summary, ordered by class code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UrbanizationSummary {
    pub rows: Vec<ClassSummary>,
}

impl UrbanizationSummary {
    /// Group units by degree of urbanisation. `areas` holds each unit's planar area, in unit order.
    /// Units without a population estimate (no overlapping cell) are left out entirely.
    pub fn from_units(units: &[AdminUnit], areas: &[f64]) -> Result<Self> {
        ensure!(
            units.len() == areas.len(),
            "summary: {} units but {} areas", units.len(), areas.len()
        );

        let matched: Vec<(&AdminUnit, f64, f64)> = units.iter()
            .zip(areas)
            .filter_map(|(unit, &area)| unit.population.map(|p| (unit, p, area)))
            .collect();

        let total_area: f64 = matched.iter().map(|&(_, _, area)| area).sum();
        ensure!(matched.is_empty() || total_area > 0.0, "summary: estimated units have zero total area");

        let mut groups: BTreeMap<Dgurba, Vec<(&str, f64, f64)>> = BTreeMap::new();
        for (unit, population, area) in matched {
            groups.entry(unit.dgurba)
                .or_default()
                .push((unit.id.as_str(), population, area / total_area));
        }

        let rows = groups.into_iter()
            .filter_map(|(dgurba, members)| Some(ClassSummary {
                dgurba,
                units: members.len(),
                population: Aggregate::from_values(members.iter().map(|&(id, p, _)| (id, p)))?,
                area_pct: Aggregate::from_values(members.iter().map(|&(id, _, a)| (id, a)))?,
            }))
            .collect();

        Ok(Self { rows })
    }

    pub fn get(&self, dgurba: Dgurba) -> Option<&ClassSummary> {
        self.rows.iter().find(|row| row.dgurba == dgurba)
    }

    #[inline] pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

impl fmt::Display for UrbanizationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f, "{:<6} {:<18} {:>6} {:>14} {:>12} {:>10} {:>10} {:>9} {:>9} {:>10} {:>10}",
            "DGURBA", "label", "units", "pop sum", "pop mean", "pop max", "pop min",
            "area sum", "area mean", "area max", "area min",
        )?;
        for row in &self.rows {
            writeln!(
                f, "{:<6} {:<18} {:>6} {:>14.1} {:>12.1} {:>10} {:>10} {:>9.4} {:>9.6} {:>10} {:>10}",
                row.dgurba.to_string(), row.dgurba.label(), row.units,
                row.population.sum, row.population.mean, row.population.idxmax, row.population.idxmin,
                row.area_pct.sum, row.area_pct.mean, row.area_pct.idxmax, row.area_pct.idxmin,
            )?;
        }
        Ok(())
    }
}
