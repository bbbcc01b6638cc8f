use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, MapCoords, MultiPolygon};
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::{geom::Geometries, types::Projection};

/// PROJ.4 definition of a supported source CRS, and whether it is geographic (lon/lat degrees).
fn source_proj4(epsg: u32) -> Result<(&'static str, bool)> {
    Ok(match epsg {
        4326 => ("+proj=longlat +datum=WGS84 +no_defs +type=crs", true),
        4258 => ("+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs", true),
        3035 => ("+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs", false),
        3857 => ("+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +no_defs +type=crs", false),
        other => bail!("no reprojection available from EPSG:{other}"),
    })
}

/// Parse the PROJ.4 definition of a target projection.
pub(crate) fn build_projection(target: &Projection) -> Result<Proj4> {
    Proj4::from_proj_string(target.proj4)
        .with_context(|| anyhow!("failed to build target PROJ.4 for EPSG:{}: {}", target.epsg, target.proj4))
}

impl Geometries {
    /// Reproject every shape into `target`. Shapes of unknown CRS are assumed to be WGS84 lon/lat.
    pub(crate) fn reproject(&self, target: &Projection) -> Result<Geometries> {
        let epsg = self.epsg().unwrap_or(4326);
        if epsg == target.epsg {
            return Ok(self.clone());
        }

        let (source, geographic) = source_proj4(epsg)?;
        let from = Proj4::from_proj_string(source)
            .with_context(|| anyhow!("failed to build source PROJ.4: {source}"))?;
        let to = build_projection(target)?;

        let (from, to) = (&from, &to);
        let projected = self.shapes().iter()
            .map(|shape| reproject_shape(shape, from, to, geographic))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("reprojection EPSG:{epsg} -> EPSG:{} failed", target.epsg))?;

        Ok(Geometries::new(projected, Some(target.epsg)))
    }
}

/// Map coords through the transform: radians in for geographic sources, meters out.
fn reproject_shape(shape: &MultiPolygon<f64>, from: &Proj4, to: &Proj4, geographic: bool) -> Result<MultiPolygon<f64>> {
    shape.try_map_coords(|coord: Coord<f64>| -> Result<Coord<f64>> {
        let mut point = if geographic {
            (coord.x.to_radians(), coord.y.to_radians(), 0.0)
        } else {
            (coord.x, coord.y, 0.0)
        };
        transform(from, to, &mut point)
            .map_err(|e| anyhow!("CRS transform failed at ({}, {}): {e}", coord.x, coord.y))?;
        Ok(Coord { x: point.0, y: point.1 })
    })
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Area, GeodesicArea};

    use super::*;
    use crate::types::CountryCode;

    fn lonlat_square(lon: f64, lat: f64, side: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: lon, y: lat),
            (x: lon + side, y: lat),
            (x: lon + side, y: lat + side),
            (x: lon, y: lat + side),
            (x: lon, y: lat),
        ]])
    }

    #[test]
    fn british_national_grid_origin() {
        // True origin of the grid (49N, 2W) maps to the false easting/northing, up to the datum shift.
        let geoms = Geometries::new(vec![lonlat_square(-2.0, 49.0, 0.01)], Some(4326));
        let projected = geoms.reproject(&CountryCode::GB.projection()).unwrap();
        assert_eq!(projected.epsg(), Some(27700));

        let first = projected.shapes()[0].0[0].exterior().0[0];
        assert!((first.x - 400_000.0).abs() < 200.0, "x = {}", first.x);
        assert!((first.y + 100_000.0).abs() < 200.0, "y = {}", first.y);
    }

    #[test]
    fn projected_area_is_metric() {
        // A 0.01 degree square around 52N spans roughly 690m x 1110m.
        let geoms = Geometries::new(vec![lonlat_square(5.0, 52.0, 0.01)], Some(4326));
        let projected = geoms.reproject(&CountryCode::NL.projection()).unwrap();
        let area = projected.shapes()[0].unsigned_area();
        assert!((area - 763_000.0).abs() / 763_000.0 < 0.02, "area = {area}");
    }

    #[test]
    fn every_country_projection_builds_and_preserves_area() {
        for (code, lon, lat) in [
            (CountryCode::GB, -1.5, 52.5),
            (CountryCode::ES, -3.7, 40.4),
            (CountryCode::IT, 12.5, 41.9),
            (CountryCode::DE, 10.0, 51.0),
            (CountryCode::FR, 2.3, 46.8),
            (CountryCode::NL, 5.3, 52.1),
            (CountryCode::EU, 10.0, 50.0),
        ] {
            let square = lonlat_square(lon, lat, 0.01);
            let expected = square.geodesic_area_unsigned();

            let geoms = Geometries::new(vec![square], Some(4326));
            let projected = geoms.reproject(&code.projection())
                .unwrap_or_else(|e| panic!("{code}: {e:#}"));
            assert_eq!(projected.epsg(), Some(code.projection().epsg));

            let area = projected.shapes()[0].unsigned_area();
            assert!(area.is_finite(), "{code}: area = {area}");
            assert!((area - expected).abs() / expected < 0.01, "{code}: {area} vs {expected}");
        }
    }

    #[test]
    fn same_crs_is_identity() {
        let geoms = Geometries::new(vec![lonlat_square(0.0, 0.0, 1.0)], Some(27700));
        let projected = geoms.reproject(&CountryCode::GB.projection()).unwrap();
        assert_eq!(projected.shapes(), geoms.shapes());
    }

    #[test]
    fn unknown_source_crs() {
        let geoms = Geometries::new(vec![lonlat_square(0.0, 0.0, 1.0)], Some(32631));
        assert!(geoms.reproject(&CountryCode::FR.projection()).is_err());
    }
}
