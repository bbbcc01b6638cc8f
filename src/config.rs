use std::{env, path::{Path, PathBuf}};

pub const DEFAULT_DATA_PATH: &str = "covid_emo_top_loc/";
pub const DEFAULT_GRAPH_PATH: &str = "graphs/";

const DGURBA_SHAPEFILE: &str = "DGURBA/DGURBA-2020-01M-SH.shp";
const POPULATION_SHAPEFILE: &str = "JRC_GRID_2018/JRC_POPULATION_2018.shp";
const CHART_FILE: &str = "population_land_lau.svg";

/// Attribute names of the LAU boundary layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSchema {
    pub id: String,
    pub country: String,
    pub dgurba: String,
}

impl Default for AdminSchema {
    fn default() -> Self {
        Self { id: "OBJECTID".into(), country: "CNTR_CODE".into(), dgurba: "DGURBA".into() }
    }
}

/// Attribute names of the population grid layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSchema {
    pub id: String,
    pub country: String,
    pub population: String,
}

impl Default for GridSchema {
    fn default() -> Self {
        Self { id: "OBJECTID".into(), country: "CNTR_ID".into(), population: "TOT_P_2018".into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub admin: AdminSchema,
    pub grid: GridSchema,
}

/// Where inputs are read from and charts are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_path: PathBuf,
    pub graph_path: PathBuf,
    pub schema: Schema,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.into(),
            graph_path: DEFAULT_GRAPH_PATH.into(),
            schema: Schema::default(),
        }
    }
}

impl Settings {
    /// Read `DATA_PATH` and `GRAPH_PATH`; unset or empty variables fall back to the defaults.
    pub fn from_env() -> Self {
        fn var_or(name: &str, default: &str) -> PathBuf {
            env::var(name).ok()
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
                .into()
        }

        Self {
            data_path: var_or("DATA_PATH", DEFAULT_DATA_PATH),
            graph_path: var_or("GRAPH_PATH", DEFAULT_GRAPH_PATH),
            schema: Schema::default(),
        }
    }

    pub fn with_data_path(mut self, path: impl AsRef<Path>) -> Self {
        self.data_path = path.as_ref().to_path_buf();
        self
    }

    pub fn with_graph_path(mut self, path: impl AsRef<Path>) -> Self {
        self.graph_path = path.as_ref().to_path_buf();
        self
    }

    pub fn dgurba_path(&self) -> PathBuf { self.data_path.join(DGURBA_SHAPEFILE) }

    pub fn population_grid_path(&self) -> PathBuf { self.data_path.join(POPULATION_SHAPEFILE) }

    pub fn chart_path(&self) -> PathBuf { self.graph_path.join(CHART_FILE) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths() {
        let settings = Settings::default();
        assert_eq!(settings.dgurba_path(), PathBuf::from("covid_emo_top_loc/DGURBA/DGURBA-2020-01M-SH.shp"));
        assert_eq!(
            settings.population_grid_path(),
            PathBuf::from("covid_emo_top_loc/JRC_GRID_2018/JRC_POPULATION_2018.shp")
        );
        assert_eq!(settings.chart_path(), PathBuf::from("graphs/population_land_lau.svg"));
    }

    #[test]
    fn overridden_paths() {
        let settings = Settings::default().with_data_path("/data").with_graph_path("/out");
        assert_eq!(settings.dgurba_path(), PathBuf::from("/data/DGURBA/DGURBA-2020-01M-SH.shp"));
        assert_eq!(settings.chart_path(), PathBuf::from("/out/population_land_lau.svg"));
    }
}
