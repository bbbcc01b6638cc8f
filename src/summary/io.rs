use std::path::Path;

use anyhow::{Context, Result};
use polars::{frame::DataFrame, prelude::{Column, NamedFrom}};

use crate::summary::UrbanizationSummary;

impl UrbanizationSummary {
    /// Flatten the summary into one row per class.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows = &self.rows;
        Ok(DataFrame::new(vec![
            Column::new("dgurba".into(), rows.iter().map(|r| r.dgurba.0 as u32).collect::<Vec<_>>()),
            Column::new("label".into(), rows.iter().map(|r| r.dgurba.label()).collect::<Vec<_>>()),
            Column::new("units".into(), rows.iter().map(|r| r.units as u64).collect::<Vec<_>>()),
            Column::new("population_sum".into(), rows.iter().map(|r| r.population.sum).collect::<Vec<_>>()),
            Column::new("population_mean".into(), rows.iter().map(|r| r.population.mean).collect::<Vec<_>>()),
            Column::new("population_idxmax".into(), rows.iter().map(|r| r.population.idxmax.as_str()).collect::<Vec<_>>()),
            Column::new("population_idxmin".into(), rows.iter().map(|r| r.population.idxmin.as_str()).collect::<Vec<_>>()),
            Column::new("area_pct_sum".into(), rows.iter().map(|r| r.area_pct.sum).collect::<Vec<_>>()),
            Column::new("area_pct_mean".into(), rows.iter().map(|r| r.area_pct.mean).collect::<Vec<_>>()),
            Column::new("area_pct_idxmax".into(), rows.iter().map(|r| r.area_pct.idxmax.as_str()).collect::<Vec<_>>()),
            Column::new("area_pct_idxmin".into(), rows.iter().map(|r| r.area_pct.idxmin.as_str()).collect::<Vec<_>>()),
        ])?)
    }

    /// Write the summary table as CSV.
    pub fn write_to_csv(&self, path: &Path) -> Result<()> {
        crate::io::csv::write_csv(&mut self.to_dataframe()?, path)
    }

    /// Summary table as a CSV string.
    pub fn to_csv(&self) -> Result<String> {
        crate::io::csv::write_csv_string(&mut self.to_dataframe()?)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize summary to JSON")
    }
}
