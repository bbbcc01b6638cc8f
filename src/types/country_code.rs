use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::ConfigError;

/// Countries (and the pan-European region) the pipeline is configured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CountryCode {
    GB,
    ES,
    IT,
    DE,
    FR,
    NL,
    /// No country filter; every unit and cell is kept.
    EU,
}

/// Planar coordinate reference system used for area computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Projection {
    pub epsg: u32,
    pub proj4: &'static str,
}

impl CountryCode {
    pub fn to_str(&self) -> &'static str {
        match self {
            CountryCode::GB => "GB",
            CountryCode::ES => "ES",
            CountryCode::IT => "IT",
            CountryCode::DE => "DE",
            CountryCode::FR => "FR",
            CountryCode::NL => "NL",
            CountryCode::EU => "EU",
        }
    }

    pub fn all() -> [CountryCode; 7] {
        [
            CountryCode::GB,
            CountryCode::ES,
            CountryCode::IT,
            CountryCode::DE,
            CountryCode::FR,
            CountryCode::NL,
            CountryCode::EU,
        ]
    }

    /// Value the country attribute of both layers must equal, or `None` to keep everything.
    pub fn filter(&self) -> Option<&'static str> {
        match self {
            CountryCode::EU => None,
            other => Some(other.to_str()),
        }
    }

    /// The national planar CRS both layers are reprojected into.
    pub fn projection(&self) -> Projection {
        match self {
            CountryCode::GB => Projection {
                epsg: 27700, // OSGB 1936 / British National Grid
                proj4: "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 +ellps=airy +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs",
            },
            CountryCode::ES => Projection {
                epsg: 2062, // Madrid 1870 (Madrid) / Spain LCC
                proj4: "+proj=lcc +lat_1=40 +lat_0=40 +lon_0=0 +k_0=0.9988085293 +x_0=600000 +y_0=600927.04 +ellps=clrk80 +pm=madrid +units=m +no_defs",
            },
            CountryCode::IT => Projection {
                epsg: 6875, // RDN2008 / Italy zone (N-E)
                proj4: "+proj=tmerc +lat_0=0 +lon_0=12 +k=0.9985 +x_0=7000000 +y_0=0 +ellps=GRS80 +units=m +no_defs",
            },
            CountryCode::DE => Projection {
                epsg: 25832, // ETRS89 / UTM zone 32N
                proj4: "+proj=tmerc +lat_0=0 +lon_0=9 +k=0.9996 +x_0=500000 +y_0=0 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs",
            },
            CountryCode::FR => Projection {
                epsg: 2192, // ED50 / France EuroLambert
                proj4: "+proj=lcc +lat_1=46.8 +lat_0=46.8 +lon_0=2.337229166666667 +k_0=0.99987742 +x_0=600000 +y_0=2200000 +ellps=intl +towgs84=-87,-98,-121,0,0,0,0 +units=m +no_defs",
            },
            CountryCode::NL => Projection {
                epsg: 28992, // Amersfoort / RD New
                proj4: "+proj=sterea +lat_0=52.15616055555555 +lon_0=5.38763888888889 +k=0.9999079 +x_0=155000 +y_0=463000 +ellps=bessel +towgs84=565.417,50.3319,465.552,-0.398957,0.343988,-1.8774,4.0725 +units=m +no_defs",
            },
            CountryCode::EU => Projection {
                epsg: 5643, // ED50 / SPBA LCC
                proj4: "+proj=lcc +lat_0=48 +lon_0=10 +lat_1=52.66666666666666 +lat_2=54.33333333333334 +x_0=815000 +y_0=0 +ellps=intl +towgs84=-87,-98,-121,0,0,0,0 +units=m +no_defs",
            },
        }
    }
}

impl FromStr for CountryCode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        CountryCode::all().into_iter()
            .find(|c| c.to_str() == code)
            .ok_or_else(|| ConfigError::UnsupportedCountry(s.to_string()))
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
