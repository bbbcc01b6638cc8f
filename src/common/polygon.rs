use geo::{Coord, LineString, MultiPolygon, Polygon};
use shapefile as shp;

/// Twice the signed area of a closed ring (negative for clockwise).
fn signed_area(coords: &[Coord<f64>]) -> f64 {
    coords.windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
}

/// Convert shapefile::Polygon to geo::MultiPolygon<f64>.
///
/// Shapefile rings are stored as `[exterior (CW), hole (CCW), ..., next exterior, ...]`.
/// A counter-clockwise ring that shows up before any exterior is taken as an exterior,
/// since some writers do not respect the winding convention.
pub(crate) fn shp_to_geo(p: &shp::Polygon) -> MultiPolygon<f64> {
    let mut polygons: Vec<Polygon<f64>> = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes: Vec<LineString<f64>> = Vec::new();

    for ring in p.rings() {
        let mut coords: Vec<Coord<f64>> = ring.points().iter()
            .map(|pt| Coord { x: pt.x, y: pt.y })
            .collect();
        if coords.len() < 3 { continue }
        if coords.first() != coords.last() { coords.push(coords[0]) }

        let is_exterior = signed_area(&coords) < 0.0 || exterior.is_none();
        let ring = LineString(coords);

        if is_exterior {
            if let Some(ext) = exterior.take() {
                polygons.push(Polygon::new(ext, std::mem::take(&mut holes)));
            }
            exterior = Some(ring);
        } else {
            holes.push(ring);
        }
    }

    if let Some(ext) = exterior {
        polygons.push(Polygon::new(ext, holes));
    }

    MultiPolygon(polygons)
}
