use std::path::Path;

use anyhow::{bail, Context, Result};
use shapefile::{dbase::{FieldValue, Record}, Reader, Shape};

/// Reads all shapes + attribute records from a given `.shp` file path.
pub(crate) fn read_from_shapefile(path: &Path) -> Result<(Vec<Shape>, Vec<Record>)> {
    crate::common::require_file_exists(path)?;

    let mut reader = Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let count = reader.shape_count()?;
    let mut shapes = Vec::with_capacity(count);
    let mut records = Vec::with_capacity(count);
    for result in reader.iter_shapes_and_records() {
        let (shape, record) = result
            .with_context(|| format!("Error reading shape+record in {}", path.display()))?;
        shapes.push(shape);
        records.push(record);
    }
    Ok((shapes, records))
}

/// Source CRSs we know how to reproject from, keyed by EPSG code.
/// Returns `Ok(None)` when the `.prj` sidecar is absent.
pub(crate) fn epsg_from_shapefile(path: &Path) -> Result<Option<u32>> {
    let prj = path.with_extension("prj");
    if !prj.exists() { return Ok(None) }

    let wkt = std::fs::read_to_string(&prj)
        .with_context(|| format!("Failed to read projection file: {}", prj.display()))?;
    epsg_from_wkt(&wkt)
        .map(Some)
        .with_context(|| format!("Unrecognised coordinate system in {}", prj.display()))
}

/// Match an ESRI WKT projection string against the handful of CRSs the source data ships in.
pub(crate) fn epsg_from_wkt(wkt: &str) -> Result<u32> {
    let wkt = wkt.to_ascii_uppercase();
    if let Some(epsg) = authority_code(&wkt) { return Ok(epsg) }

    if wkt.starts_with("PROJCS") {
        if wkt.contains("LAMBERT_AZIMUTHAL_EQUAL_AREA") && wkt.contains("ETRS") { return Ok(3035) }
        if wkt.contains("MERCATOR_AUXILIARY_SPHERE") || wkt.contains("PSEUDO-MERCATOR") { return Ok(3857) }
        bail!("unsupported projected CRS: {}", wkt.chars().take(80).collect::<String>())
    }
    if wkt.starts_with("GEOGCS") {
        if wkt.contains("ETRS") { return Ok(4258) }
        if wkt.contains("WGS_1984") || wkt.contains("WGS 84") || wkt.contains("WGS84") { return Ok(4326) }
    }
    bail!("unsupported CRS: {}", wkt.chars().take(80).collect::<String>())
}

/// Trailing `AUTHORITY["EPSG","nnnn"]` of the outermost CRS, if the WKT carries one.
fn authority_code(wkt: &str) -> Option<u32> {
    let start = wkt.rfind("AUTHORITY[\"EPSG\",")?;
    wkt[start..].split('"').nth(3)?.parse().ok()
}

/// Get the value of a character field from a Record.
pub(crate) fn get_character_field(record: &Record, field: &str) -> Result<String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        Some(FieldValue::Memo(s)) => Ok(s.trim().to_string()),
        _ => bail!("missing or invalid character field: {}", field)
    }
}

/// Get the value of a numeric field from a Record; `Ok(None)` for a null value.
pub(crate) fn get_numeric_field(record: &Record, field: &str) -> Result<Option<f64>> {
    match record.get(field) {
        Some(FieldValue::Numeric(n)) => Ok(*n),
        Some(FieldValue::Float(f)) => Ok(f.map(f64::from)),
        Some(FieldValue::Integer(i)) => Ok(Some(f64::from(*i))),
        Some(FieldValue::Double(d)) => Ok(Some(*d)),
        Some(FieldValue::Character(Some(s))) => Ok(Some(s.trim().parse()
            .with_context(|| format!("non-numeric value {s:?} in field {field}"))?)),
        Some(FieldValue::Character(None)) => Ok(None),
        _ => bail!("missing or invalid numeric field: {}", field)
    }
}

/// Get an identifier from either a character or numeric field.
/// Whole numbers are rendered without a fractional part.
pub(crate) fn get_id_field(record: &Record, field: &str) -> Result<String> {
    match record.get(field) {
        Some(FieldValue::Character(Some(s))) => Ok(s.trim().to_string()),
        Some(FieldValue::Integer(i)) => Ok(i.to_string()),
        Some(FieldValue::Numeric(Some(n))) | Some(FieldValue::Double(n)) => Ok(format_number(*n)),
        Some(FieldValue::Float(Some(f))) => Ok(format_number(f64::from(*f))),
        _ => bail!("missing or invalid id field: {}", field)
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 { format!("{}", n as i64) } else { n.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wkt_detection() {
        let laea = r#"PROJCS["ETRS89_ETRS_LAEA",GEOGCS["GCS_ETRS_1989",DATUM["D_ETRS_1989",SPHEROID["GRS_1980",6378137.0,298.257222101]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]],PROJECTION["Lambert_Azimuthal_Equal_Area"]]"#;
        assert_eq!(epsg_from_wkt(laea).unwrap(), 3035);

        let wgs84 = r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#;
        assert_eq!(epsg_from_wkt(wgs84).unwrap(), 4326);

        let etrs = r#"GEOGCS["GCS_ETRS_1989",DATUM["D_ETRS_1989",SPHEROID["GRS_1980",6378137.0,298.257222101]]]"#;
        assert_eq!(epsg_from_wkt(etrs).unwrap(), 4258);

        let tagged = r#"PROJCS["whatever",GEOGCS["x"],AUTHORITY["EPSG","3035"]]"#;
        assert_eq!(epsg_from_wkt(tagged).unwrap(), 3035);

        assert!(epsg_from_wkt(r#"PROJCS["NAD_1983_UTM_Zone_10N",PROJECTION["Transverse_Mercator"]]"#).is_err());
    }

    #[test]
    fn id_fields() {
        let mut record = Record::default();
        record.insert("A".to_string(), FieldValue::Numeric(Some(42.0)));
        record.insert("B".to_string(), FieldValue::Character(Some(" UK001 ".to_string())));
        record.insert("C".to_string(), FieldValue::Integer(7));
        assert_eq!(get_id_field(&record, "A").unwrap(), "42");
        assert_eq!(get_id_field(&record, "B").unwrap(), "UK001");
        assert_eq!(get_id_field(&record, "C").unwrap(), "7");
        assert!(get_id_field(&record, "D").is_err());
    }

    #[test]
    fn numeric_fields() {
        let mut record = Record::default();
        record.insert("P".to_string(), FieldValue::Numeric(Some(12.5)));
        record.insert("N".to_string(), FieldValue::Numeric(None));
        record.insert("S".to_string(), FieldValue::Character(Some("3".to_string())));
        assert_eq!(get_numeric_field(&record, "P").unwrap(), Some(12.5));
        assert_eq!(get_numeric_field(&record, "N").unwrap(), None);
        assert_eq!(get_numeric_field(&record, "S").unwrap(), Some(3.0));
        assert!(get_numeric_field(&record, "missing").is_err());
    }
}
