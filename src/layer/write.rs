use std::path::Path;

use anyhow::Result;
use polars::{frame::DataFrame, prelude::{Column, NamedFrom}};

use crate::layer::AdminLayer;

impl AdminLayer {
    /// Unit attributes, planar area and population estimate, one row per unit.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let units = self.units();
        Ok(DataFrame::new(vec![
            Column::new("unit_id".into(), units.iter().map(|u| u.id.as_str()).collect::<Vec<_>>()),
            Column::new("country".into(), units.iter().map(|u| u.country.as_str()).collect::<Vec<_>>()),
            Column::new("dgurba".into(), units.iter().map(|u| u.dgurba.0 as u32).collect::<Vec<_>>()),
            Column::new("area_m2".into(), self.areas()),
            Column::new("population".into(), units.iter().map(|u| u.population).collect::<Vec<_>>()),
        ])?)
    }

    /// Write per-unit population estimates as CSV.
    pub fn write_populations_csv(&self, path: &Path) -> Result<()> {
        crate::io::csv::write_csv(&mut self.to_dataframe()?, path)
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, MultiPolygon};

    use crate::{layer::AdminUnit, types::Dgurba};

    use super::*;

    #[test]
    fn csv_rows_follow_units() {
        let shape = MultiPolygon(vec![polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 0.0)]]);
        let mut layer = AdminLayer::new(
            vec![AdminUnit::new("a", "DE", Dgurba::TOWN), AdminUnit::new("b", "DE", Dgurba::RURAL)],
            vec![shape.clone(), shape],
            None,
        ).unwrap();
        layer.set_population(vec![Some(12.5), None]).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("units.csv");
        layer.write_populations_csv(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "unit_id,country,dgurba,area_m2,population");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("a,DE,2,"));
        assert!(lines[1].ends_with(",12.5"));
        // No estimate is written as an empty field.
        assert!(lines[2].starts_with("b,DE,3,"));
        assert!(lines[2].ends_with(','));
    }
}
