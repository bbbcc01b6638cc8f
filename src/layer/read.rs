use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::MultiPolygon;
use shapefile::{dbase::Record, Shape};
use tracing::{debug, warn};

use crate::{
    common,
    config::{AdminSchema, GridSchema},
    layer::{AdminLayer, AdminUnit, GridCell, GridLayer},
    types::{CountryCode, Dgurba},
};

/// Coerce a generic shape into an owned multipolygon, raising error if different shape.
/// Null shapes carry no geometry and yield `None`.
fn shape_to_multipolygon(shape: Shape) -> Result<Option<MultiPolygon<f64>>> {
    match shape {
        Shape::Polygon(polygon) => Ok(Some(common::shp_to_geo(&polygon))),
        Shape::NullShape => Ok(None),
        other => bail!("found non-Polygon shape in layer: {:?}", other.shapetype())
    }
}

/// Read a shapefile, keep the records whose `country_field` matches the country,
/// and hand back their attributes alongside the converted geometries.
fn read_country_records(
    path: &Path,
    country_field: &str,
    code: CountryCode,
) -> Result<(Vec<Record>, Vec<MultiPolygon<f64>>, Option<u32>)> {
    let epsg = common::epsg_from_shapefile(path)?;
    if epsg.is_none() {
        warn!("{} has no .prj sidecar, assuming EPSG:4326", path.display());
    }

    let (shapes, records) = common::read_from_shapefile(path)?;
    let total = records.len();

    let mut kept_records = Vec::new();
    let mut kept_shapes = Vec::new();
    for (i, (shape, record)) in shapes.into_iter().zip(records).enumerate() {
        if let Some(filter) = code.filter() {
            if common::get_character_field(&record, country_field)? != filter { continue }
        }
        match shape_to_multipolygon(shape).with_context(|| format!("record {i} of {}", path.display()))? {
            Some(shape) => {
                kept_records.push(record);
                kept_shapes.push(shape);
            }
            None => warn!("skipping record {i} of {} with null geometry", path.display()),
        }
    }

    debug!("{}: kept {} of {total} records for {code}", path.display(), kept_records.len());
    Ok((kept_records, kept_shapes, epsg))
}

/// Parse a DGURBA class from either a numeric or a character field.
fn get_dgurba_field(record: &Record, field: &str) -> Result<Dgurba> {
    let value = common::get_numeric_field(record, field)?
        .with_context(|| format!("null value in field {field}"))?;
    if value.fract() != 0.0 || !(0.0..=255.0).contains(&value) {
        bail!("invalid degree of urbanisation {value} in field {field}");
    }
    Ok(Dgurba(value as u8))
}

impl AdminLayer {
    /// Loads LAU boundaries from the DGURBA shapefile, restricted to one country.
    pub(crate) fn from_dgurba_shapefile(path: &Path, schema: &AdminSchema, code: CountryCode) -> Result<Self> {
        let (records, shapes, epsg) = read_country_records(path, &schema.country, code)?;

        let units = records.iter()
            .map(|record| Ok(AdminUnit::new(
                common::get_id_field(record, &schema.id)?,
                common::get_character_field(record, &schema.country)?,
                get_dgurba_field(record, &schema.dgurba)?,
            )))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Error reading LAU attributes in {}", path.display()))?;

        Self::new(units, shapes, epsg)
    }
}

impl GridLayer {
    /// Loads population grid squares from the JRC grid shapefile, restricted to one country.
    pub(crate) fn from_population_shapefile(path: &Path, schema: &GridSchema, code: CountryCode) -> Result<Self> {
        let (records, shapes, epsg) = read_country_records(path, &schema.country, code)?;

        let cells = records.iter()
            .map(|record| Ok(GridCell::new(
                common::get_id_field(record, &schema.id)?,
                common::get_character_field(record, &schema.country)?,
                common::get_numeric_field(record, &schema.population)?.unwrap_or(0.0),
            )))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Error reading grid attributes in {}", path.display()))?;

        Self::new(cells, shapes, epsg)
    }
}
